use anyhow::{Context, Result};
use clap::ArgMatches;
use log::info;

use crate::common::{emit, load_config, read_input, required_path};

pub fn run_squish(matches: &ArgMatches) -> Result<()> {
    let config = load_config(matches)?;
    let input = required_path(matches, "input")?;
    let output = matches.get_one::<String>("output");
    let wrap_all = matches.get_flag("wrap-all") || config.squish.wrap_all;

    let (mut set, format) = read_input(input)?;
    let before = set.len();
    set.squish(wrap_all)
        .with_context(|| format!("Failed to squish {}", input))?;
    info!("Squished {} loci into {}", before, set.len());

    emit(&set, output, format)
}
