use std::io::{self, BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use loci_core::models::LocusSet;
use loci_io::{Format, read_locus_set, write_locus_set};

use crate::config::LociConfig;
use crate::consts::CONFIG_ARG;

///
/// Settings from `--config`, or the defaults when it is not given.
///
pub fn load_config(matches: &ArgMatches) -> Result<LociConfig> {
    match matches.get_one::<String>(CONFIG_ARG) {
        Some(path) => {
            info!("Using config file {}", path);
            LociConfig::try_from(Path::new(path))
        }
        None => Ok(LociConfig::default()),
    }
}

pub fn required_path<'a>(matches: &'a ArgMatches, id: &str) -> Result<&'a String> {
    matches
        .get_one::<String>(id)
        .with_context(|| format!("A path for --{} is required.", id))
}

pub fn read_input(path: &str) -> Result<(LocusSet, Format)> {
    let format = Format::from_path(path)?;
    let set = read_locus_set(path).with_context(|| format!("Failed to read loci from {}", path))?;
    info!("Read {} loci from {}", set.len(), path);
    Ok((set, format))
}

///
/// Write `set` to `output` in the format its name implies, or to stdout in
/// `fallback` when no output is given.
///
pub fn emit(set: &LocusSet, output: Option<&String>, fallback: Format) -> Result<()> {
    match output {
        Some(path) => {
            write_locus_set(set, path, None, &[])
                .with_context(|| format!("Failed to write loci to {}", path))?;
            info!("Wrote {} loci to {}", set.len(), path);
        }
        None => {
            let translator = fallback.translator();
            let stdout = io::stdout();
            let mut writer = BufWriter::new(stdout.lock());
            for locus in set {
                writeln!(writer, "{}", translator.encode(locus))?;
            }
            writer.flush()?;
        }
    }
    Ok(())
}
