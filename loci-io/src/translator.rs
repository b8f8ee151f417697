use std::fmt::{self, Display};
use std::path::Path;
use std::str::FromStr;

use loci_core::models::{Locus, LocusSet, Strand};

use crate::bed::BedTranslator;
use crate::consts::GZ_EXTENSION;
use crate::error::{Result, TranslateError};
use crate::gff::GffTranslator;
use crate::gtf::GtfTranslator;

///
/// Converts between single lines of a text format and loci.
///
pub trait LocusTranslator {
    ///
    /// Whether a file of this name is in this translator's format. A trailing
    /// `.gz` is ignored.
    ///
    fn is_supported_file(&self, file_name: &str) -> bool;

    ///
    /// Parse one line.
    ///
    /// # Returns
    /// `None` for blank lines, comments and other lines carrying no locus
    fn decode(&self, line: &str) -> Result<Option<Locus>>;

    ///
    /// Render one locus as a line, without the line terminator.
    ///
    fn encode(&self, locus: &Locus) -> String;

    ///
    /// Restructure a freshly read set, e.g. regroup lines into features.
    ///
    fn post_process(&self, set: LocusSet) -> Result<LocusSet> {
        Ok(set)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Bed,
    Gff,
    Gtf,
}

impl Format {
    ///
    /// Pick the format from a file name, looking through a `.gz` suffix.
    ///
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Format> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| TranslateError::UnsupportedFileType(path.display().to_string()))?;

        [Format::Bed, Format::Gff, Format::Gtf]
            .into_iter()
            .find(|f| f.translator().is_supported_file(name))
            .ok_or_else(|| TranslateError::UnsupportedFileType(name.to_string()))
    }

    pub fn translator(&self) -> Box<dyn LocusTranslator> {
        match self {
            Format::Bed => Box::new(BedTranslator),
            Format::Gff => Box::new(GffTranslator),
            Format::Gtf => Box::new(GtfTranslator),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Format::Bed => "bed",
            Format::Gff => "gff",
            Format::Gtf => "gtf",
        }
    }
}

impl FromStr for Format {
    type Err = TranslateError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "bed" => Ok(Format::Bed),
            "gff" => Ok(Format::Gff),
            "gtf" => Ok(Format::Gtf),
            _ => Err(TranslateError::UnsupportedFileType(s.to_string())),
        }
    }
}

impl Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let description = match self {
            Format::Bed => "BED [Browser Extensible Data]",
            Format::Gff => "GFF [Gene Feature Format]",
            Format::Gtf => "GTF [Gene Transfer Format]",
        };
        write!(f, "{}", description)
    }
}

/// File name with a trailing `.gz` removed, lowercased.
pub(crate) fn plain_name(file_name: &str) -> String {
    let lower = file_name.to_lowercase();
    match lower.strip_suffix(&format!(".{}", GZ_EXTENSION)) {
        Some(stripped) => stripped.to_string(),
        None => lower,
    }
}

pub(crate) fn is_skippable(line: &str) -> bool {
    line.trim().is_empty() || line.starts_with('#')
}

pub(crate) fn split_columns<'a>(
    line: &'a str,
    format: &str,
    min: usize,
    max: usize,
) -> Result<Vec<&'a str>> {
    let columns: Vec<&str> = line.split('\t').collect();
    if columns.len() < min {
        return Err(TranslateError::IllegalDataFormat(format!(
            "Insufficient columns in {} line: min {}, provided {}: {}",
            format,
            min,
            columns.len(),
            line
        )));
    }
    if columns.len() > max {
        return Err(TranslateError::IllegalDataFormat(format!(
            "Excess columns in {} line: max {}, provided {}: {}",
            format,
            max,
            columns.len(),
            line
        )));
    }
    Ok(columns)
}

pub(crate) fn parse_coordinate(value: &str, what: &str) -> Result<i64> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|_| TranslateError::IllegalDataFormat(format!("Illegal {} index: {}", what, value)))
}

/// `.` reads as 0.
pub(crate) fn parse_score(value: &str) -> Result<f64> {
    if value == "." {
        return Ok(0.0);
    }
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| TranslateError::IllegalDataFormat(format!("Illegal score value: {}", value)))
}

pub(crate) fn parse_strand(value: &str) -> Result<Strand> {
    value.parse::<Strand>().map_err(|_| {
        TranslateError::IllegalDataFormat(format!(
            "Illegal strand value: {}. Legal values: '+', '-', and '.'",
            value
        ))
    })
}

/// Scores are written without a fractional part when they have none.
pub(crate) fn format_score(score: f64) -> String {
    format!("{}", score)
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    #[rstest]
    #[case("peaks.bed", Format::Bed)]
    #[case("PEAKS.BED.GZ", Format::Bed)]
    #[case("dir/genes.gff", Format::Gff)]
    #[case("genes.gtf.gz", Format::Gtf)]
    fn test_format_from_path(#[case] path: &str, #[case] expected: Format) {
        assert_eq!(Format::from_path(path).unwrap(), expected);
    }

    #[rstest]
    #[case("reads.bam")]
    #[case("archive.gz")]
    #[case("bed")]
    fn test_unsupported_path(#[case] path: &str) {
        assert!(matches!(
            Format::from_path(path),
            Err(TranslateError::UnsupportedFileType(_))
        ));
    }

    #[rstest]
    fn test_parse_helpers() {
        assert_eq!(parse_score(".").unwrap(), 0.0);
        assert_eq!(parse_score("2.5").unwrap(), 2.5);
        assert!(parse_score("high").is_err());
        assert_eq!(parse_strand("-").unwrap(), Strand::Negative);
        assert!(parse_strand("x").is_err());
        assert!(parse_coordinate("12a", "start").is_err());
        assert_eq!(format_score(0.0), "0");
        assert_eq!(format_score(7.25), "7.25");
    }

    #[rstest]
    fn test_split_columns_bounds() {
        assert!(split_columns("a\tb", "BED", 3, 12).is_err());
        assert_eq!(split_columns("a\tb\tc", "BED", 3, 12).unwrap().len(), 3);
        assert!(split_columns("a\tb\tc\td", "BED", 1, 3).is_err());
    }
}
