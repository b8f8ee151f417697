use std::collections::HashMap;

use loci_core::models::{Locus, LocusSet, LocusType};

use crate::consts::{GFF_MAX_COLUMNS, GTF_MIN_COLUMNS, GTF_TRANSCRIPT_ID, HOCUSLOCUS_ID};
use crate::error::{Result, TranslateError};
use crate::gff::{decode_feature, encode_feature, parse_attributes};
use crate::translator::{LocusTranslator, is_skippable, plain_name, split_columns};

///
/// GTF lines: GFF with a mandatory attribute column holding `transcript_id`.
///
/// The transcript id becomes the locus id unless `hocuslocus_id` is given.
/// [`LocusTranslator::post_process`] gathers the lines of each transcript
/// under one transcriptional region.
///
#[derive(Debug, Clone, Copy, Default)]
pub struct GtfTranslator;

impl LocusTranslator for GtfTranslator {
    fn is_supported_file(&self, file_name: &str) -> bool {
        plain_name(file_name).ends_with(".gtf")
    }

    fn decode(&self, line: &str) -> Result<Option<Locus>> {
        if is_skippable(line) {
            return Ok(None);
        }

        let columns = split_columns(line, "GTF", GTF_MIN_COLUMNS, GFF_MAX_COLUMNS)?;
        let mut locus = decode_feature(&columns)?;

        let mut hocuslocus_id = None;
        for (key, value) in parse_attributes(columns[8])? {
            if key == HOCUSLOCUS_ID {
                hocuslocus_id = Some(value);
            } else {
                locus.add_annotation(key, value);
            }
        }

        let transcript_id = locus
            .annotation(GTF_TRANSCRIPT_ID)
            .and_then(|v| v.as_str())
            .map(str::to_string)
            .ok_or_else(|| {
                TranslateError::IllegalDataFormat(format!(
                    "GTF line has no {} attribute: {}",
                    GTF_TRANSCRIPT_ID, line
                ))
            })?;
        locus.id = hocuslocus_id.unwrap_or(transcript_id);

        Ok(Some(locus))
    }

    fn encode(&self, locus: &Locus) -> String {
        encode_feature(locus)
    }

    ///
    /// One transcriptional region per transcript, in order of first
    /// appearance, spanning all lines of the transcript, which become its
    /// children.
    ///
    fn post_process(&self, set: LocusSet) -> Result<LocusSet> {
        let name = set.name().to_string();
        let mut regions: Vec<Locus> = Vec::new();
        let mut members: Vec<Vec<Locus>> = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();

        for locus in set.into_inner() {
            let transcript = locus
                .annotation(GTF_TRANSCRIPT_ID)
                .map(|v| v.to_string())
                .unwrap_or_else(|| locus.id.clone());

            let i = match index.get(&transcript) {
                Some(&i) => i,
                None => {
                    let mut region = Locus::new(
                        transcript.clone(),
                        locus.chromosome.clone(),
                        locus.start,
                        locus.end,
                    );
                    region.strand = locus.strand;
                    region.source = locus.source.clone();
                    region.locus_type = LocusType::TranscriptionalRegion;
                    regions.push(region);
                    members.push(Vec::new());
                    index.insert(transcript, regions.len() - 1);
                    regions.len() - 1
                }
            };

            regions[i].merge_coordinates(&locus)?;
            members[i].push(locus);
        }

        // children are attached once the region has its final extent
        let mut grouped = LocusSet::new(name);
        for (mut region, children) in regions.into_iter().zip(members) {
            for child in children {
                region.add_child(child)?;
            }
            grouped.add_locus(region);
        }

        Ok(grouped)
    }
}
