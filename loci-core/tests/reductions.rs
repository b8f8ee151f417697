use loci_core::filter::{LocusFilter, TypeCriteria};
use loci_core::gene::add_promoters;
use loci_core::models::{
    ClusterSet, ComparisonConfig, ComparisonMode, Locus, LocusSet, LocusType, Strand,
    StrandComparison,
};

use pretty_assertions::assert_eq;
use rstest::*;

fn from_set(name: &str, loci: Vec<(&str, &str, i64, i64)>) -> LocusSet {
    let mut set = LocusSet::with_loci(
        name,
        loci.into_iter()
            .map(|(id, chr, start, end)| Locus::new(id, chr, start, end)),
    );
    set.stamp_set_name();
    set
}

#[fixture]
fn treated() -> LocusSet {
    from_set(
        "treated",
        vec![
            ("t1", "chr1", 100, 200),
            ("t2", "chr1", 1000, 1200),
            ("t3", "chr2", 50, 80),
        ],
    )
}

#[fixture]
fn control() -> LocusSet {
    from_set(
        "control",
        vec![("c1", "chr1", 180, 300), ("c2", "chr2", 500, 600)],
    )
}

#[rstest]
fn test_union_squish_and_cluster(treated: LocusSet, control: LocusSet) {
    let mut union = LocusSet::new("union");
    union.append_set(&treated);
    union.append_set(&control);
    union.squish(true).unwrap();

    assert_eq!(union.len(), 4);
    assert!(union.total_length() <= treated.total_length() + control.total_length());

    let clusters = ClusterSet::from_squished("report", &union);
    let lines: Vec<String> = clusters.iter().map(|c| c.render_line()).collect();
    assert_eq!(lines, vec!["c1\tt1", "t2", "t3", "c2"]);
}

#[rstest]
fn test_squish_preserves_membership(treated: LocusSet, control: LocusSet) {
    let mut union = LocusSet::new("union");
    union.append_set(&treated);
    union.append_set(&control);
    let squished = LocusSet::squished(&union, false);

    for locus in union.iter() {
        assert!(squished.intersects_region_any(locus));
        assert!(squished.intersects_region(locus));
    }
}

#[rstest]
fn test_intersect_with_config(treated: LocusSet, control: LocusSet) {
    let strict = ComparisonConfig::new(ComparisonMode::Percent, 0.5, StrandComparison::Neutral);
    let loose = ComparisonConfig::new(ComparisonMode::Fixed, 0.0, StrandComparison::Neutral);

    let hits = |config: &ComparisonConfig| -> Vec<String> {
        treated
            .iter()
            .filter(|a| {
                control
                    .iter()
                    .any(|b| a.overlaps_with(b, config).unwrap())
            })
            .map(|a| a.id.clone())
            .collect()
    };

    // t1 and c1 share 21 bases, under half of the shorter locus
    assert_eq!(hits(&loose), vec!["t1"]);
    assert!(hits(&strict).is_empty());
}

#[rstest]
fn test_promoters_then_flatten_and_filter() {
    let genes = LocusSet::with_loci(
        "genes",
        vec![
            Locus::with_details("g1", "chr1", 1000, 2000, Strand::Positive, LocusType::Gene, "test"),
            Locus::with_details("g2", "chr1", 5000, 6000, Strand::Negative, LocusType::Gene, "test"),
        ],
    );
    let operons = add_promoters(&genes, 100, 50).unwrap();
    let flat = LocusSet::flatten(&operons);

    assert_eq!(flat.len(), 6);
    let promoters = LocusFilter::new().with(TypeCriteria(LocusType::Promoter));
    assert_eq!(promoters.filter_set(&flat, false).len(), 2);
    assert_eq!(promoters.filter_set(&operons, true).len(), 2);

    for locus in flat.iter().filter(|l| l.locus_type != LocusType::Operon) {
        let parent = flat.find_parent(locus).unwrap();
        assert_eq!(parent.locus_type, LocusType::Operon);
    }
}
