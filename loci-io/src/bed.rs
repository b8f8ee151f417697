use loci_core::models::Locus;

use crate::consts::{BED_MAX_COLUMNS, BED_MIN_COLUMNS};
use crate::error::Result;
use crate::translator::{
    LocusTranslator, format_score, is_skippable, parse_coordinate, parse_score, parse_strand,
    plain_name, split_columns,
};

///
/// BED lines: `chrom start end [name [score [strand [...]]]]`.
///
/// BED intervals are 0-based and half-open. Decoding shifts the start by one
/// to get 1-based inclusive loci; encoding shifts it back.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct BedTranslator;

impl LocusTranslator for BedTranslator {
    fn is_supported_file(&self, file_name: &str) -> bool {
        plain_name(file_name).ends_with(".bed")
    }

    fn decode(&self, line: &str) -> Result<Option<Locus>> {
        if is_skippable(line) || line.starts_with("track") || line.starts_with("browser") {
            return Ok(None);
        }

        let columns = split_columns(line, "BED", BED_MIN_COLUMNS, BED_MAX_COLUMNS)?;
        let start = parse_coordinate(columns[1], "starting")?;
        let end = parse_coordinate(columns[2], "ending")?;

        let mut locus = Locus::new("", columns[0], start + 1, end);
        if let Some(name) = columns.get(3) {
            locus.id = name.to_string();
        }
        if let Some(score) = columns.get(4) {
            locus.score = parse_score(score)?;
        }
        if let Some(strand) = columns.get(5) {
            locus.strand = parse_strand(strand)?;
        }

        Ok(Some(locus))
    }

    fn encode(&self, locus: &Locus) -> String {
        format!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            locus.chromosome,
            locus.start - 1,
            locus.end,
            locus.id,
            format_score(locus.score),
            locus.strand.symbol()
        )
    }
}
