use std::io::{self, BufWriter, Write};

use anyhow::{Context, Result};
use clap::ArgMatches;
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use loci_core::models::{ClusterSet, LocusSet};
use loci_io::write_cluster_set;

use crate::common::read_input;

pub fn run_cluster(matches: &ArgMatches) -> Result<()> {
    let inputs: Vec<&String> = matches
        .get_many::<String>("input")
        .context("At least one input file is required.")?
        .collect();

    let pb = ProgressBar::new(inputs.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40}] {pos}/{len} {msg}")?,
    );

    let mut sets = Vec::with_capacity(inputs.len());
    for input in &inputs {
        pb.set_message(input.to_string());
        let (set, _) = read_input(input)?;
        sets.push(set);
        pb.inc(1);
    }
    pb.finish_and_clear();

    let clusters = cluster(&sets)?;
    info!("Built {} clusters from {} files", clusters.len(), inputs.len());

    let mut names: Vec<&str> = sets.iter().map(|s| s.name()).collect();
    names.sort();
    let header = format!("# {}", names.join("\t"));

    match matches.get_one::<String>("output") {
        Some(path) => write_cluster_set(&clusters, path, &[header])
            .with_context(|| format!("Failed to write clusters to {}", path))?,
        None => {
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            writeln!(writer, "{}", header)?;
            for cluster in &clusters {
                writeln!(writer, "{}", cluster.render_line())?;
            }
            writer.flush()?;
        }
    }

    Ok(())
}

///
/// Squish the union of `sets`, wrapping every region, and group each region's
/// members by the set they came from.
///
pub fn cluster(sets: &[LocusSet]) -> Result<ClusterSet> {
    let mut union = LocusSet::new("union");
    for set in sets {
        let mut named = set.clone();
        named.stamp_set_name();
        union.append_set(&named);
    }
    union.squish(true)?;

    Ok(ClusterSet::from_squished("clusters", &union))
}
