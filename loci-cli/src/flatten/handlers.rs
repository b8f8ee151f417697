use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use loci_core::models::LocusSet;

use crate::common::{emit, read_input, required_path};

pub fn run_flatten(matches: &ArgMatches) -> Result<()> {
    let input = required_path(matches, "input")?;
    let output = matches.get_one::<String>("output");

    let (set, format) = read_input(input)?;
    let grouped = format
        .translator()
        .post_process(set)
        .with_context(|| format!("Failed to group loci of {}", input))?;
    let flat = LocusSet::flatten(&grouped);
    info!("Flattened {} top level loci into {}", grouped.len(), flat.len());

    emit(&flat, output, format)
}
