use clap::{Command, arg};

pub const CLUSTER_CMD: &str = "cluster";

pub fn create_cluster_cli() -> Command {
    Command::new(CLUSTER_CMD)
        .author("Omelogic")
        .about("Group overlapping loci of several files, one line per cluster with ids per file")
        .arg_required_else_help(true)
        .arg(
            arg!(-i --input <input> "Files to cluster together")
                .required(true)
                .num_args(1..),
        )
        .arg(arg!(-o --output <output> "Where to write the clusters (stdout if omitted)"))
}
