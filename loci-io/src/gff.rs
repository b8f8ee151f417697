use loci_core::models::{Locus, LocusType};

use crate::consts::{DEFAULT_GFF_ID, GFF_MAX_COLUMNS, GFF_MIN_COLUMNS, HOCUSLOCUS_ID};
use crate::error::{Result, TranslateError};
use crate::translator::{
    LocusTranslator, format_score, is_skippable, parse_coordinate, parse_score, parse_strand,
    plain_name, split_columns,
};

///
/// GFF lines: `seqname source feature start end score strand frame [attributes [comment]]`.
///
/// Coordinates are already 1-based inclusive. Attributes are `key value`
/// pairs separated by semicolons and become annotations, except
/// `hocuslocus_id` which sets the locus id.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct GffTranslator;

///
/// Split a GFF/GTF attribute column into `(key, value)` pairs, with double
/// quotes removed from values.
///
pub(crate) fn parse_attributes(column: &str) -> Result<Vec<(String, String)>> {
    let mut attributes = Vec::new();

    for attribute in column.split(';').map(str::trim).filter(|a| !a.is_empty()) {
        let (key, value) = attribute.split_once(' ').ok_or_else(|| {
            TranslateError::IllegalDataFormat(format!(
                "Illegal formatting of attributes token: {}. \
                 Must consist of 'key value' pairs separated by semicolons (;)",
                column
            ))
        })?;
        attributes.push((key.trim().to_string(), value.trim().replace('"', "")));
    }

    Ok(attributes)
}

///
/// Build a locus from the first eight GFF/GTF columns. The id is left at
/// [`DEFAULT_GFF_ID`].
///
pub(crate) fn decode_feature(columns: &[&str]) -> Result<Locus> {
    let start = parse_coordinate(columns[3], "starting")?;
    let end = parse_coordinate(columns[4], "ending")?;
    let strand = parse_strand(columns[6])?;

    let mut locus = Locus::with_details(
        DEFAULT_GFF_ID,
        columns[0],
        start,
        end,
        strand,
        LocusType::from(columns[2]),
        columns[1],
    );
    locus.score = parse_score(columns[5])?;
    Ok(locus)
}

pub(crate) fn encode_feature(locus: &Locus) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}\t{}\t{}\t.\t{} {}",
        locus.chromosome,
        locus.source.as_deref().unwrap_or("."),
        locus.locus_type,
        locus.start,
        locus.end,
        format_score(locus.score),
        locus.strand.symbol(),
        HOCUSLOCUS_ID,
        locus.id
    )
}

impl LocusTranslator for GffTranslator {
    fn is_supported_file(&self, file_name: &str) -> bool {
        plain_name(file_name).ends_with(".gff")
    }

    fn decode(&self, line: &str) -> Result<Option<Locus>> {
        if is_skippable(line) {
            return Ok(None);
        }

        let columns = split_columns(line, "GFF", GFF_MIN_COLUMNS, GFF_MAX_COLUMNS)?;
        let mut locus = decode_feature(&columns)?;

        if let Some(column) = columns.get(8) {
            for (key, value) in parse_attributes(column)? {
                if key == HOCUSLOCUS_ID {
                    locus.id = value;
                } else {
                    locus.add_annotation(key, value);
                }
            }
        }

        Ok(Some(locus))
    }

    fn encode(&self, locus: &Locus) -> String {
        encode_feature(locus)
    }
}
