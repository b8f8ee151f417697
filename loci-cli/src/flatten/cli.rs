use clap::{Command, arg};

pub const FLATTEN_CMD: &str = "flatten";

pub fn create_flatten_cli() -> Command {
    Command::new(FLATTEN_CMD)
        .author("Omelogic")
        .about("Lift every locus of a hierarchy into one sorted list (GTF transcripts are grouped first)")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "BED, GFF or GTF file to flatten").required(true))
        .arg(arg!(-o --output <output> "Where to write the result (stdout if omitted)"))
}
