use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

///
/// Orientation of a locus on its chromosome.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Strand {
    #[default]
    Undefined,
    Positive,
    Negative,
}

impl Strand {
    ///
    /// Short one character symbol used by BED/GFF style formats.
    ///
    pub fn symbol(&self) -> &'static str {
        match self {
            Strand::Undefined => ".",
            Strand::Positive => "+",
            Strand::Negative => "-",
        }
    }

    pub fn is_defined(&self) -> bool {
        !matches!(self, Strand::Undefined)
    }
}

impl FromStr for Strand {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" => Ok(Strand::Positive),
            "-" => Ok(Strand::Negative),
            "." => Ok(Strand::Undefined),
            _ => Err(format!(
                "Illegal strand value: {}. Legal values: '+', '-', and '.'",
                s
            )),
        }
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}
