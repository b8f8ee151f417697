use std::fmt::{self, Display};

use anyhow::Result;
use clap::ArgMatches;

use loci_core::models::LocusSet;

use crate::common::{read_input, required_path};

#[derive(Debug, PartialEq)]
pub struct LocusStats {
    pub name: String,
    pub count: usize,
    pub chromosomes: usize,
    pub total_length: i64,
    pub covered_length: i64,
}

impl LocusStats {
    pub fn from_set(set: &LocusSet) -> Result<Self> {
        let squished = LocusSet::squished(set, false);
        Ok(LocusStats {
            name: set.name().to_string(),
            count: set.len(),
            chromosomes: set.iter_chroms().count(),
            total_length: set.total_length(),
            covered_length: squished.total_length(),
        })
    }
}

impl Display for LocusStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "name\t{}", self.name)?;
        writeln!(f, "loci\t{}", self.count)?;
        writeln!(f, "chromosomes\t{}", self.chromosomes)?;
        writeln!(f, "total_length\t{}", self.total_length)?;
        write!(f, "covered_length\t{}", self.covered_length)
    }
}

pub fn run_stats(matches: &ArgMatches) -> Result<()> {
    let (set, _) = read_input(required_path(matches, "input")?)?;
    println!("{}", LocusStats::from_set(&set)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use std::path::PathBuf;

    #[rstest]
    fn test_stats_of_fixture() {
        let path = PathBuf::from("../tests/data/treated.bed");
        let (set, _) = read_input(path.to_str().unwrap()).unwrap();
        let stats = LocusStats::from_set(&set).unwrap();

        assert_eq!(
            stats,
            LocusStats {
                name: "treated.bed".to_string(),
                count: 3,
                chromosomes: 2,
                total_length: 101 + 201 + 31,
                covered_length: 101 + 201 + 31,
            }
        );
    }

    #[rstest]
    fn test_covered_length_discounts_overlap() {
        let set = LocusSet::with_loci(
            "s",
            vec![
                loci_core::Locus::new("a", "chr1", 1, 10),
                loci_core::Locus::new("b", "chr1", 6, 15),
            ],
        );
        let stats = LocusStats::from_set(&set).unwrap();
        assert_eq!(stats.total_length, 20);
        assert_eq!(stats.covered_length, 15);
        assert_eq!(stats.to_string().lines().count(), 5);
    }
}
