use anyhow::Result;
use clap::ArgMatches;
use fxhash::FxHashMap as HashMap;
use log::info;

use loci_core::models::{
    ComparisonConfig, ComparisonMode, Locus, LocusSet, StrandComparison,
};

use crate::common::{emit, load_config, read_input, required_path};

pub fn run_intersect(matches: &ArgMatches) -> Result<()> {
    let mut comparison = load_config(matches)?.comparison;
    if let Some(mode) = matches.get_one::<String>("mode") {
        comparison.mode = mode.parse::<ComparisonMode>()?;
    }
    if let Some(value) = matches.get_one::<f64>("value") {
        comparison.value = *value;
    }
    if let Some(strand) = matches.get_one::<String>("strand") {
        comparison.strand = strand.parse::<StrandComparison>()?;
    }
    comparison.validate()?;

    let (a, format) = read_input(required_path(matches, "a")?)?;
    let (b, _) = read_input(required_path(matches, "b")?)?;

    let hits = intersect(&a, &b, &comparison)?;
    info!(
        "{} of {} loci overlap {} ({}, {}, {})",
        hits.len(),
        a.len(),
        b.name(),
        comparison.mode,
        comparison.value,
        comparison.strand
    );

    emit(&hits, matches.get_one::<String>("output"), format)
}

///
/// Members of `a`, in order, that overlap at least one member of `b` under
/// `config`.
///
pub fn intersect(a: &LocusSet, b: &LocusSet, config: &ComparisonConfig) -> Result<LocusSet> {
    let mut by_chrom: HashMap<&str, Vec<&Locus>> = HashMap::default();
    for locus in b {
        by_chrom
            .entry(locus.chromosome.as_str())
            .or_default()
            .push(locus);
    }

    let mut hits = LocusSet::new(a.name());
    for locus in a {
        let Some(candidates) = by_chrom.get(locus.chromosome.as_str()) else {
            continue;
        };
        for candidate in candidates {
            if locus.overlaps_with(candidate, config)? {
                hits.add_locus(locus.clone());
                break;
            }
        }
    }

    Ok(hits)
}
