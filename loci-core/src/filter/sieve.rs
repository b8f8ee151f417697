use std::fmt::{self, Display};

use regex::Regex;

use crate::errors::{LocusError, Result};
use crate::models::{Locus, LocusSet};

///
/// A value based test on a locus that may fail to read the value it needs.
///
pub trait LocusSieve {
    fn accept(&self, locus: &Locus) -> Result<bool>;

    /// e.g. `START = [1.0,100.0]`
    fn short_description(&self) -> String;
}

#[derive(Debug, Clone, PartialEq)]
enum NumericField {
    Start,
    End,
    Score,
    Annotation(String),
}

impl NumericField {
    fn parse(field: &str) -> Self {
        match field {
            "START" => NumericField::Start,
            "END" => NumericField::End,
            "SCORE" => NumericField::Score,
            other => NumericField::Annotation(other.to_string()),
        }
    }

    fn name(&self) -> &str {
        match self {
            NumericField::Start => "START",
            NumericField::End => "END",
            NumericField::Score => "SCORE",
            NumericField::Annotation(key) => key.as_str(),
        }
    }

    fn value(&self, locus: &Locus) -> Result<f64> {
        match self {
            NumericField::Start => Ok(locus.start as f64),
            NumericField::End => Ok(locus.end as f64),
            NumericField::Score => Ok(locus.score),
            NumericField::Annotation(key) => locus
                .annotation(key)
                .and_then(|v| v.as_f64())
                .ok_or_else(|| LocusError::FilterValue {
                    field: key.clone(),
                    locus: locus.detail_string(),
                    expected: "number",
                }),
        }
    }
}

///
/// Range test on a numeric field: `START`, `END`, `SCORE`, or the key of a
/// numeric annotation.
///
/// Inclusive sieves accept `lower <= v <= upper`; exclusive sieves accept
/// `v <= lower || v >= upper`, so the bounds themselves pass both ways.
///
#[derive(Debug, Clone, PartialEq)]
pub struct NumericSieve {
    field: NumericField,
    lower: f64,
    upper: f64,
    inclusive: bool,
}

impl NumericSieve {
    pub fn new(field: &str, lower: f64, upper: f64, inclusive: bool) -> Result<Self> {
        if lower > upper {
            return Err(LocusError::InvalidFilter(format!(
                "numeric sieve on {} has lower bound {} above upper bound {}",
                field, lower, upper
            )));
        }
        Ok(NumericSieve {
            field: NumericField::parse(field),
            lower,
            upper,
            inclusive,
        })
    }
}

impl LocusSieve for NumericSieve {
    fn accept(&self, locus: &Locus) -> Result<bool> {
        let value = self.field.value(locus)?;
        if self.inclusive {
            Ok(value >= self.lower && value <= self.upper)
        } else {
            Ok(value <= self.lower || value >= self.upper)
        }
    }

    fn short_description(&self) -> String {
        let eq = if self.inclusive { "=" } else { "!=" };
        format!(
            "{} {} [{:?},{:?}]",
            self.field.name(),
            eq,
            self.lower,
            self.upper
        )
    }
}

impl Display for NumericSieve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_description())
    }
}

///
/// Regular expression test on a text field: `ID`, `TYPE`, `STRAND`,
/// `CHROMOSOME`, `SOURCE`, or an annotation key. The whole value must match.
/// Missing values are matched as the empty string.
///
#[derive(Debug, Clone)]
pub struct StringSieve {
    field: String,
    pattern: String,
    regex: Regex,
    inclusive: bool,
}

impl StringSieve {
    pub fn new(field: &str, pattern: &str, inclusive: bool) -> Result<Self> {
        let regex = Regex::new(&format!("^(?:{})$", pattern))
            .map_err(|e| LocusError::InvalidFilter(e.to_string()))?;
        Ok(StringSieve {
            field: field.to_string(),
            pattern: pattern.to_string(),
            regex,
            inclusive,
        })
    }

    fn term(&self, locus: &Locus) -> String {
        match self.field.as_str() {
            "ID" => locus.id.clone(),
            "TYPE" => locus.locus_type.to_string(),
            "STRAND" => locus.strand.symbol().to_string(),
            "CHROMOSOME" => locus.chromosome.clone(),
            "SOURCE" => locus.source.clone().unwrap_or_default(),
            key => locus
                .annotation(key)
                .map(|v| v.to_string())
                .unwrap_or_default(),
        }
    }
}

impl LocusSieve for StringSieve {
    fn accept(&self, locus: &Locus) -> Result<bool> {
        let matched = self.regex.is_match(&self.term(locus));
        Ok(matched == self.inclusive)
    }

    fn short_description(&self) -> String {
        let eq = if self.inclusive { "=" } else { "!=" };
        format!("{} {} '{}'", self.field, eq, self.pattern)
    }
}

impl Display for StringSieve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.short_description())
    }
}

///
/// Keep the members of `set` accepted by every sieve, in order.
///
/// # Returns
/// a new set with the same name holding copies of the accepted members, or
/// the first error a sieve raised
pub fn sift_set(set: &LocusSet, sieves: &[&dyn LocusSieve]) -> Result<LocusSet> {
    let mut sifted = LocusSet::new(set.name());

    'members: for locus in set {
        for sieve in sieves {
            if !sieve.accept(locus)? {
                continue 'members;
            }
        }
        sifted.add_locus(locus.clone());
    }

    Ok(sifted)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::models::{LocusType, Strand};

    #[fixture]
    fn set() -> LocusSet {
        let mut a = Locus::with_details("geneA", "chr1", 100, 200, Strand::Positive, LocusType::Gene, "ens");
        a.score = 5.0;
        a.add_annotation("depth", 12_i64);
        let mut b = Locus::with_details("geneB", "chr2", 500, 900, Strand::Negative, LocusType::Gene, "ens");
        b.score = 50.0;
        b.add_annotation("depth", 3.5);
        let mut c = Locus::with_details("exonC", "chr1", 1000, 1100, Strand::Positive, LocusType::Exon, "ucsc");
        c.add_annotation("depth", "deep");
        LocusSet::with_loci("sieved", vec![a, b, c])
    }

    fn ids(set: &LocusSet) -> Vec<&str> {
        set.iter().map(|l| l.id.as_str()).collect()
    }

    #[rstest]
    #[case("START", 100.0, 500.0, true, vec!["geneA", "geneB"])]
    #[case("START", 100.0, 500.0, false, vec!["geneA", "geneB", "exonC"])]
    #[case("END", 150.0, 1000.0, false, vec!["exonC"])]
    #[case("SCORE", 1.0, 10.0, true, vec!["geneA"])]
    fn test_numeric_sieve(
        set: LocusSet,
        #[case] field: &str,
        #[case] lower: f64,
        #[case] upper: f64,
        #[case] inclusive: bool,
        #[case] expected: Vec<&str>,
    ) {
        // exonC has score 0.0
        let sieve = NumericSieve::new(field, lower, upper, inclusive).unwrap();
        let sifted = sift_set(&set, &[&sieve]).unwrap();
        assert_eq!(ids(&sifted), expected);
        assert_eq!(sifted.name(), "sieved");
    }

    #[rstest]
    fn test_numeric_sieve_rejects_inverted_bounds() {
        assert!(matches!(
            NumericSieve::new("START", 10.0, 1.0, true),
            Err(LocusError::InvalidFilter(_))
        ));
    }

    #[rstest]
    fn test_numeric_sieve_on_annotation(set: LocusSet) {
        let sieve = NumericSieve::new("depth", 0.0, 10.0, true).unwrap();
        assert_eq!(sieve.accept(set.get(0).unwrap()), Ok(false));
        assert_eq!(sieve.accept(set.get(1).unwrap()), Ok(true));
        assert!(matches!(
            sieve.accept(set.get(2).unwrap()),
            Err(LocusError::FilterValue { .. })
        ));
        assert!(sift_set(&set, &[&sieve]).is_err());
    }

    #[rstest]
    fn test_string_sieve_full_match(set: LocusSet) {
        let genes = StringSieve::new("ID", "gene.", true).unwrap();
        assert_eq!(ids(&sift_set(&set, &[&genes]).unwrap()), vec!["geneA", "geneB"]);

        let prefix_only = StringSieve::new("ID", "gene", true).unwrap();
        assert!(sift_set(&set, &[&prefix_only]).unwrap().is_empty());

        let not_chr1 = StringSieve::new("CHROMOSOME", "chr1", false).unwrap();
        assert_eq!(ids(&sift_set(&set, &[&not_chr1]).unwrap()), vec!["geneB"]);
    }

    #[rstest]
    fn test_string_sieve_fields(set: LocusSet) {
        let minus = StringSieve::new("STRAND", "-", true).unwrap();
        let exon = StringSieve::new("TYPE", "Exon", true).unwrap();
        let ucsc = StringSieve::new("SOURCE", "ucsc", true).unwrap();
        let missing = StringSieve::new("gene_name", "", true).unwrap();

        assert_eq!(ids(&sift_set(&set, &[&minus]).unwrap()), vec!["geneB"]);
        assert_eq!(ids(&sift_set(&set, &[&exon, &ucsc]).unwrap()), vec!["exonC"]);
        assert_eq!(sift_set(&set, &[&missing]).unwrap().len(), 3);
    }

    #[rstest]
    fn test_combined_sieves(set: LocusSet) {
        let chr1 = StringSieve::new("CHROMOSOME", "chr1", true).unwrap();
        let early = NumericSieve::new("START", 0.0, 500.0, true).unwrap();
        let sifted = sift_set(&set, &[&chr1, &early]).unwrap();
        assert_eq!(ids(&sifted), vec!["geneA"]);
    }

    #[rstest]
    fn test_descriptions() {
        let numeric = NumericSieve::new("SCORE", 1.0, 2.5, false).unwrap();
        assert_eq!(numeric.short_description(), "SCORE != [1.0,2.5]");
        let string = StringSieve::new("ID", "ab+", true).unwrap();
        assert_eq!(string.to_string(), "ID = 'ab+'");
    }

    #[rstest]
    fn test_bad_pattern() {
        assert!(matches!(
            StringSieve::new("ID", "(", true),
            Err(LocusError::InvalidFilter(_))
        ));
    }
}
