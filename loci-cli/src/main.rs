mod cluster;
mod common;
mod config;
mod flatten;
mod intersect;
mod squish;
mod stats;

use anyhow::Result;
use clap::{Command, arg};

pub mod consts {
    pub const VERSION: &str = env!("CARGO_PKG_VERSION");
    pub const BIN_NAME: &str = "loci";
    pub const CONFIG_ARG: &str = "config";
}

fn build_parser() -> Command {
    Command::new(consts::BIN_NAME)
        .bin_name(consts::BIN_NAME)
        .version(consts::VERSION)
        .author("Omelogic")
        .about("Compare, squish, flatten and cluster genomic loci from BED, GFF and GTF files.")
        .subcommand_required(true)
        .arg(arg!(--config <config> "TOML file with comparison and squish settings").global(true))
        .subcommand(squish::cli::create_squish_cli())
        .subcommand(flatten::cli::create_flatten_cli())
        .subcommand(intersect::cli::create_intersect_cli())
        .subcommand(cluster::cli::create_cluster_cli())
        .subcommand(stats::cli::create_stats_cli())
}

fn main() -> Result<()> {
    pretty_env_logger::init();

    let app = build_parser();
    let matches = app.get_matches();

    match matches.subcommand() {
        //
        // SQUISH
        //
        Some((squish::cli::SQUISH_CMD, matches)) => {
            squish::handlers::run_squish(matches)?;
        }

        //
        // FLATTEN
        //
        Some((flatten::cli::FLATTEN_CMD, matches)) => {
            flatten::handlers::run_flatten(matches)?;
        }

        //
        // INTERSECT
        //
        Some((intersect::cli::INTERSECT_CMD, matches)) => {
            intersect::handlers::run_intersect(matches)?;
        }

        //
        // CLUSTER
        //
        Some((cluster::cli::CLUSTER_CMD, matches)) => {
            cluster::handlers::run_cluster(matches)?;
        }

        //
        // STATS
        //
        Some((stats::cli::STATS_CMD, matches)) => {
            stats::handlers::run_stats(matches)?;
        }

        _ => unreachable!("Subcommand not found"),
    };

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::*;

    #[rstest]
    fn test_parser_is_consistent() {
        build_parser().debug_assert();
    }

    #[rstest]
    fn test_global_config_reaches_subcommand() {
        let matches = build_parser()
            .try_get_matches_from(["loci", "stats", "--input", "a.bed", "--config", "loci.toml"])
            .unwrap();
        let (name, sub) = matches.subcommand().unwrap();
        assert_eq!(name, stats::cli::STATS_CMD);
        assert_eq!(
            sub.get_one::<String>(consts::CONFIG_ARG).map(String::as_str),
            Some("loci.toml")
        );
    }
}
