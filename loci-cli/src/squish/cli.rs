use clap::{Command, arg};

pub const SQUISH_CMD: &str = "squish";

pub fn create_squish_cli() -> Command {
    Command::new(SQUISH_CMD)
        .author("Omelogic")
        .about("Merge overlapping loci into union regions")
        .arg_required_else_help(true)
        .arg(arg!(-i --input <input> "BED, GFF or GTF file to squish").required(true))
        .arg(arg!(-o --output <output> "Where to write the result (stdout if omitted)"))
        .arg(arg!(--"wrap-all" "Wrap loci that overlap nothing in a union region too"))
}
