use clap::{Command, arg};

pub const STATS_CMD: &str = "stats";

pub fn create_stats_cli() -> Command {
    Command::new(STATS_CMD)
        .author("Omelogic")
        .about("Summarise a file of loci: count, chromosomes, total and covered length")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "BED, GFF or GTF file to summarise").required(true))
}
