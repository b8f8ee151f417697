use clap::{Command, arg, value_parser};

pub const INTERSECT_CMD: &str = "intersect";

pub fn create_intersect_cli() -> Command {
    Command::new(INTERSECT_CMD)
        .author("Omelogic")
        .about("Report loci of A that overlap any locus of B")
        .arg_required_else_help(true)
        .arg(arg!(-a <a> "Loci to report").required(true))
        .arg(arg!(-b <b> "Loci to test against").required(true))
        .arg(arg!(--mode <mode> "Tolerance mode: fixed or percent"))
        .arg(
            arg!(--value <value> "Tolerance: bases of slack (fixed) or overlap fraction (percent)")
                .value_parser(value_parser!(f64))
                .allow_negative_numbers(true),
        )
        .arg(arg!(--strand <strand> "neutral, match_strict, match_permissive, complement_strict or complement_permissive"))
        .arg(arg!(-o --output <output> "Where to write the result (stdout if omitted)"))
}
