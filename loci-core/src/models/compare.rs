use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::errors::{LocusError, Result};
use crate::models::{Locus, Strand};

///
/// Outcome of an overlap-aware comparison between two loci.
///
/// Unlike [`Ordering`] this is not a total order: `Overlap` means the loci
/// share (or, with a tolerance, come close enough to share) a region.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Placement {
    Before,
    Overlap,
    After,
}

impl From<Ordering> for Placement {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Less => Placement::Before,
            Ordering::Equal => Placement::Overlap,
            Ordering::Greater => Placement::After,
        }
    }
}

///
/// How the tolerance value of a comparison is interpreted.
///
/// - `Fixed`: the value is truncated to a whole number of bases. Negative
///   values require that many bases of overlap, positive values allow a gap.
/// - `Percent`: the value (0 < v <= 1) is a fraction of the shorter locus
///   that must overlap. Gaps are never allowed.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ComparisonMode {
    #[default]
    Fixed,
    Percent,
}

impl FromStr for ComparisonMode {
    type Err = LocusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "fixed" => Ok(ComparisonMode::Fixed),
            "percent" => Ok(ComparisonMode::Percent),
            _ => Err(LocusError::InvalidComparisonParameters(format!(
                "unknown comparison mode '{}'",
                s
            ))),
        }
    }
}

impl Display for ComparisonMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ComparisonMode::Fixed => write!(f, "FIXED"),
            ComparisonMode::Percent => write!(f, "PERCENT"),
        }
    }
}

///
/// Strand rule applied before coordinates are looked at.
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum StrandComparison {
    /// Strand is ignored
    #[default]
    Neutral,
    /// Both strands defined and equal
    MatchStrict,
    /// Equal, or at least one strand undefined
    MatchPermissive,
    /// Both strands defined and different
    ComplementStrict,
    /// Different, or at least one strand undefined
    ComplementPermissive,
}

impl StrandComparison {
    ///
    /// Check whether two strands pass this rule.
    ///
    pub fn accepts(&self, a: Strand, b: Strand) -> bool {
        let both_defined = a.is_defined() && b.is_defined();
        match self {
            StrandComparison::Neutral => true,
            StrandComparison::MatchStrict => both_defined && a == b,
            StrandComparison::MatchPermissive => !both_defined || a == b,
            StrandComparison::ComplementStrict => both_defined && a != b,
            StrandComparison::ComplementPermissive => !both_defined || a != b,
        }
    }
}

impl FromStr for StrandComparison {
    type Err = LocusError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "neutral" => Ok(StrandComparison::Neutral),
            "match_strict" => Ok(StrandComparison::MatchStrict),
            "match_permissive" => Ok(StrandComparison::MatchPermissive),
            "complement_strict" => Ok(StrandComparison::ComplementStrict),
            "complement_permissive" => Ok(StrandComparison::ComplementPermissive),
            _ => Err(LocusError::InvalidComparisonParameters(format!(
                "unknown strand comparison '{}'",
                s
            ))),
        }
    }
}

impl Display for StrandComparison {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StrandComparison::Neutral => "NEUTRAL",
            StrandComparison::MatchStrict => "MATCH_STRICT",
            StrandComparison::MatchPermissive => "MATCH_PERMISSIVE",
            StrandComparison::ComplementStrict => "COMPLEMENT_STRICT",
            StrandComparison::ComplementPermissive => "COMPLEMENT_PERMISSIVE",
        };
        write!(f, "{}", name)
    }
}

///
/// A full set of comparison parameters, as read from configuration.
///
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ComparisonConfig {
    pub mode: ComparisonMode,
    pub value: f64,
    pub strand: StrandComparison,
}

impl ComparisonConfig {
    pub fn new(mode: ComparisonMode, value: f64, strand: StrandComparison) -> Self {
        ComparisonConfig {
            mode,
            value,
            strand,
        }
    }

    ///
    /// Check the parameters without comparing anything. Percent values must
    /// lie in (0, 1].
    ///
    pub fn validate(&self) -> Result<()> {
        match self.mode {
            ComparisonMode::Fixed => Ok(()),
            ComparisonMode::Percent => check_percent(self.value),
        }
    }
}

fn check_percent(value: f64) -> Result<()> {
    if value > 0.0 && value <= 1.0 {
        Ok(())
    } else {
        Err(LocusError::InvalidComparisonParameters(format!(
            "percent comparison value must satisfy 0 < v <= 1, got {}",
            value
        )))
    }
}

///
/// Signed slack, in bases, used by the tolerant comparisons.
///
/// Positive slack lets a gap count as overlap, negative slack demands that
/// many shared bases.
///
pub(crate) fn slack(a: &Locus, b: &Locus, mode: ComparisonMode, value: f64) -> Result<i64> {
    match mode {
        // `as` truncates toward zero and saturates at the i64 bounds
        ComparisonMode::Fixed => Ok(value as i64),
        ComparisonMode::Percent => {
            check_percent(value)?;
            let shorter = a.length().min(b.length());
            Ok(-((shorter as f64 * value).ceil() as i64))
        }
    }
}

///
/// Place `a` relative to `b` once the slack is known. The +1/-1 widening
/// lets exact edge contact count at zero slack. Arithmetic saturates, so a
/// huge slack acts like an unbounded one.
///
pub(crate) fn place_with_slack(a: &Locus, b: &Locus, slack: i64) -> Placement {
    if a.start.saturating_sub(slack) > b.end.saturating_add(1) {
        Placement::After
    } else if a.end.saturating_add(slack) < b.start.saturating_sub(1) {
        Placement::Before
    } else {
        Placement::Overlap
    }
}

/// True when either locus lies completely inside the other.
pub(crate) fn nested(a: &Locus, b: &Locus) -> bool {
    (a.start >= b.start && a.end <= b.end) || (b.start >= a.start && b.end <= a.end)
}
