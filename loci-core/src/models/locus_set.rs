use std::collections::{HashMap, HashSet};
use std::fmt::{self, Display};

use log::debug;

use crate::errors::{LocusError, Result};
use crate::models::compare::{self, Placement};
use crate::models::{Locus, LocusType};

/// Id given to the synthetic wrappers created by squishing
pub const SQUISHED_REGION_ID: &str = "squished_region";

/// Column oriented projection of a [`LocusSet`]: field name -> one cell per locus.
pub type TableView = HashMap<String, Vec<Option<String>>>;

///
/// LocusSet struct, a named, ordered collection of loci.
///
/// Squishing is single-use per instance: once [`LocusSet::squish`] has run,
/// calling it again fails with [`LocusError::AlreadyReduced`]. Use
/// [`LocusSet::squished`] to squish a copy instead.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct LocusSet {
    name: String,
    loci: Vec<Locus>,
    squished: bool,
}

pub struct LocusSetIterator<'a> {
    locus_set: &'a LocusSet,
    index: usize,
}

impl<'a> Iterator for LocusSetIterator<'a> {
    type Item = &'a Locus;

    fn next(&mut self) -> Option<Self::Item> {
        if self.index < self.locus_set.loci.len() {
            let locus = &self.locus_set.loci[self.index];
            self.index += 1;
            Some(locus)
        } else {
            None
        }
    }
}

impl<'a> IntoIterator for &'a LocusSet {
    type Item = &'a Locus;
    type IntoIter = LocusSetIterator<'a>;

    fn into_iter(self) -> Self::IntoIter {
        LocusSetIterator {
            locus_set: self,
            index: 0,
        }
    }
}

impl From<Vec<Locus>> for LocusSet {
    fn from(loci: Vec<Locus>) -> Self {
        LocusSet {
            name: String::new(),
            loci,
            squished: false,
        }
    }
}

impl LocusSet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        LocusSet {
            name: name.into(),
            loci: Vec::new(),
            squished: false,
        }
    }

    ///
    /// Create a named set from existing loci, keeping their order.
    ///
    pub fn with_loci<S: Into<String>, I: IntoIterator<Item = Locus>>(name: S, loci: I) -> Self {
        LocusSet {
            name: name.into(),
            loci: loci.into_iter().collect(),
            squished: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn loci(&self) -> &[Locus] {
        &self.loci
    }

    pub fn into_inner(self) -> Vec<Locus> {
        self.loci
    }

    pub fn iter(&self) -> LocusSetIterator<'_> {
        self.into_iter()
    }

    pub fn len(&self) -> usize {
        self.loci.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loci.is_empty()
    }

    pub fn is_squished(&self) -> bool {
        self.squished
    }

    pub fn add_locus(&mut self, locus: Locus) {
        self.loci.push(locus);
    }

    ///
    /// Append copies of every locus in `other`, in order.
    ///
    pub fn append_set(&mut self, other: &LocusSet) {
        self.loci.extend(other.loci.iter().cloned());
    }

    pub fn get(&self, index: usize) -> Result<&Locus> {
        self.loci.get(index).ok_or(LocusError::IndexOutOfRange {
            index,
            len: self.loci.len(),
        })
    }

    pub fn contains(&self, locus: &Locus) -> bool {
        self.loci.contains(locus)
    }

    pub fn index_of(&self, locus: &Locus) -> Option<usize> {
        self.loci.iter().position(|l| l == locus)
    }

    ///
    /// Remove the first locus equal to `locus`.
    ///
    /// # Returns
    /// true if a locus was removed
    pub fn remove(&mut self, locus: &Locus) -> bool {
        match self.index_of(locus) {
            Some(index) => {
                self.loci.remove(index);
                true
            }
            None => false,
        }
    }

    ///
    /// Record this set's name as the collection name of every member.
    ///
    pub fn stamp_set_name(&mut self) {
        for locus in self.loci.iter_mut() {
            locus.set_name = Some(self.name.clone());
        }
    }

    ///
    /// Iterate unique chromosomes located in the LocusSet
    ///
    pub fn iter_chroms(&self) -> impl Iterator<Item = &String> {
        let unique_chroms: HashSet<&String> = self.loci.iter().map(|l| &l.chromosome).collect();
        unique_chroms.into_iter()
    }

    ///
    /// Sort in place by natural ordering (chromosome, then start).
    /// The sort is stable, so ties keep their relative order.
    ///
    pub fn sort(&mut self) {
        self.loci.sort_by(|a, b| a.natural_cmp(b));
    }

    ///
    /// Sum of the lengths of all members. Overlapping members are counted
    /// twice; squish first to measure genomic coverage.
    ///
    pub fn total_length(&self) -> i64 {
        self.loci.iter().map(|l| l.length()).sum()
    }

    ///
    /// Merge overlapping loci into wrapper loci of type [`LocusType::Union`].
    ///
    /// Members are sorted, then swept left to right. A locus sharing at least
    /// one base with the current wrapper extends it and becomes one of its
    /// children (adopted, so parent keys are untouched).
    ///
    /// # Arguments
    /// - wrap_all: emit a wrapper even around a lone locus. When false, lone
    ///   loci are emitted as they are.
    ///
    /// # Returns
    /// [`LocusError::AlreadyReduced`] if this set was squished before.
    pub fn squish(&mut self, wrap_all: bool) -> Result<()> {
        if self.squished {
            return Err(LocusError::AlreadyReduced(self.name.clone()));
        }
        if self.loci.is_empty() {
            return Ok(());
        }

        self.sort();
        let loci = std::mem::take(&mut self.loci);
        self.loci = squish_sorted(loci, wrap_all);
        self.squished = true;

        Ok(())
    }

    ///
    /// Squish a copy of `set`, leaving the input and its squished flag alone.
    ///
    pub fn squished(set: &LocusSet, wrap_all: bool) -> LocusSet {
        let mut loci = set.loci.clone();
        loci.sort_by(|a, b| a.natural_cmp(b));

        LocusSet {
            name: set.name.clone(),
            loci: squish_sorted(loci, wrap_all),
            squished: false,
        }
    }

    ///
    /// Lift every locus and all of its descendants into one flat set, sorted
    /// by natural ordering. Parent/child links are kept as they are, so a
    /// parent still carries its children next to their own entries.
    ///
    /// The walk visits each node once, but every entry owns a copy of its
    /// subtree: copying costs the sum of all subtree sizes, which grows with
    /// depth times node count for deep chains.
    ///
    pub fn flatten(set: &LocusSet) -> LocusSet {
        let mut flat = LocusSet::new(set.name.clone());
        for locus in &set.loci {
            flat.loci.extend(locus.iter_preorder().cloned());
        }
        flat.sort();

        debug!(
            "Flattened '{}' from {} to {} loci",
            set.name,
            set.len(),
            flat.len()
        );
        flat
    }

    ///
    /// Resolve the parent key of `child` against the members of this set.
    ///
    pub fn find_parent(&self, child: &Locus) -> Option<&Locus> {
        let key = child.parent()?;
        self.loci.iter().find(|l| key.matches(l))
    }

    ///
    /// Scan in current order, skipping members that end before `target`.
    ///
    /// Returns true at the first member overlapping `target` and false at the
    /// first member lying after it. Only a correct membership test when the
    /// set is sorted; see [`LocusSet::intersects_region_any`].
    ///
    pub fn intersects_region(&self, target: &Locus) -> bool {
        for locus in &self.loci {
            match locus.overlap_compare(target) {
                Placement::Before => continue,
                Placement::Overlap => return true,
                Placement::After => return false,
            }
        }
        false
    }

    ///
    /// Full scan membership test, independent of order.
    ///
    pub fn intersects_region_any(&self, target: &Locus) -> bool {
        self.loci
            .iter()
            .any(|l| l.overlap_compare(target) == Placement::Overlap)
    }

    ///
    /// Project the set into columns: id, chromosome, strand, start, end, type,
    /// source, score, plus one column per annotation key seen on any member.
    /// Cells a member has no value for are `None`.
    ///
    pub fn table_view(&self) -> TableView {
        let n = self.loci.len();
        let mut table: TableView = HashMap::new();

        for field in [
            "id",
            "chromosome",
            "strand",
            "start",
            "end",
            "type",
            "source",
            "score",
        ] {
            table.insert(field.to_string(), vec![None; n]);
        }

        for (i, locus) in self.loci.iter().enumerate() {
            let fields = [
                ("id", Some(locus.id.clone())),
                ("chromosome", Some(locus.chromosome.clone())),
                ("strand", Some(locus.strand.symbol().to_string())),
                ("start", Some(locus.start.to_string())),
                ("end", Some(locus.end.to_string())),
                ("type", Some(locus.locus_type.to_string())),
                ("source", locus.source.clone()),
                ("score", Some(format!("{:?}", locus.score))),
            ];
            for (field, value) in fields {
                if let Some(column) = table.get_mut(field) {
                    column[i] = value;
                }
            }

            for (key, value) in &locus.annotations {
                let column = table.entry(key.clone()).or_insert_with(|| vec![None; n]);
                column[i] = Some(value.to_string());
            }
        }

        table
    }
}

impl Display for LocusSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocusSet '{}' with {} loci.", self.name, self.len())
    }
}

/// Squish joins loci sharing at least one base.
const SQUISH_SLACK: i64 = -1;

fn new_wrapper(first: Locus) -> Locus {
    let mut wrapper = Locus::new(
        SQUISHED_REGION_ID,
        first.chromosome.clone(),
        first.start,
        first.end,
    );
    wrapper.locus_type = LocusType::Union;
    wrapper.absorb(first);
    wrapper
}

/// Fixed tolerance comparison at [`SQUISH_SLACK`], without the fallible
/// parameter checks.
fn joins_wrapper(wrapper: &Locus, locus: &Locus) -> bool {
    wrapper.chromosome == locus.chromosome
        && (compare::nested(wrapper, locus)
            || compare::place_with_slack(wrapper, locus, SQUISH_SLACK) == Placement::Overlap)
}

fn flush_wrapper(out: &mut Vec<Locus>, mut wrapper: Locus, wrap_all: bool) {
    if wrap_all || wrapper.child_count() > 1 {
        out.push(wrapper);
    } else {
        out.extend(wrapper.take_children());
    }
}

/// Sweep over loci already sorted by natural ordering.
fn squish_sorted(sorted: Vec<Locus>, wrap_all: bool) -> Vec<Locus> {
    let n = sorted.len();
    let mut out: Vec<Locus> = Vec::new();
    let mut loci = sorted.into_iter();

    let Some(first) = loci.next() else {
        return out;
    };
    let mut wrapper = new_wrapper(first);

    for locus in loci {
        if joins_wrapper(&wrapper, &locus) {
            wrapper.absorb(locus);
        } else {
            flush_wrapper(&mut out, wrapper, wrap_all);
            wrapper = new_wrapper(locus);
        }
    }
    flush_wrapper(&mut out, wrapper, wrap_all);

    debug!("Squished {} loci into {}", n, out.len());
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    use crate::models::Strand;

    #[fixture]
    fn overlapping() -> LocusSet {
        LocusSet::with_loci(
            "peaks",
            vec![
                Locus::new("c", "chr1", 400, 500),
                Locus::new("a", "chr1", 100, 200),
                Locus::new("b", "chr1", 150, 250),
            ],
        )
    }

    fn ids(set: &LocusSet) -> Vec<&str> {
        set.iter().map(|l| l.id.as_str()).collect()
    }

    #[rstest]
    fn test_sort() {
        let mut set = LocusSet::with_loci(
            "s",
            vec![
                Locus::new("x", "chr2", 5, 10),
                Locus::new("y", "chr1", 50, 60),
                Locus::new("z", "chr1", 5, 100),
                Locus::new("w", "chr1", 5, 10),
            ],
        );
        set.sort();
        assert_eq!(ids(&set), vec!["z", "w", "y", "x"]);
    }

    #[rstest]
    fn test_total_length_counts_overlaps(overlapping: LocusSet) {
        assert_eq!(overlapping.total_length(), 101 + 101 + 101);
    }

    #[rstest]
    fn test_squish_merges_overlaps(mut overlapping: LocusSet) {
        overlapping.squish(false).unwrap();

        assert_eq!(overlapping.len(), 2);
        let wrapper = overlapping.get(0).unwrap();
        assert_eq!(wrapper.locus_type, LocusType::Union);
        assert_eq!(wrapper.id, SQUISHED_REGION_ID);
        assert_eq!((wrapper.start, wrapper.end), (100, 250));
        assert_eq!(wrapper.child_count(), 2);
        assert!(wrapper.children().all(|c| c.parent().is_none()));

        let lone = overlapping.get(1).unwrap();
        assert_eq!(lone.id, "c");
        assert_eq!((lone.start, lone.end), (400, 500));
        assert!(overlapping.is_squished());
    }

    #[rstest]
    fn test_squish_wrap_all(mut overlapping: LocusSet) {
        overlapping.squish(true).unwrap();
        assert_eq!(overlapping.len(), 2);
        assert!(overlapping.iter().all(|l| l.locus_type == LocusType::Union));
        assert_eq!(overlapping.get(1).unwrap().child_count(), 1);
        assert_eq!(overlapping.get(1).unwrap().child(0).unwrap().id, "c");
    }

    #[rstest]
    fn test_squish_twice_fails(mut overlapping: LocusSet) {
        overlapping.squish(false).unwrap();
        assert_eq!(
            overlapping.squish(false),
            Err(LocusError::AlreadyReduced("peaks".to_string()))
        );
    }

    #[rstest]
    fn test_squished_copy_is_repeatable(overlapping: LocusSet) {
        let first = LocusSet::squished(&overlapping, false);
        let second = LocusSet::squished(&overlapping, false);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
        assert!(!overlapping.is_squished());
        assert_eq!(ids(&overlapping), vec!["c", "a", "b"]);
    }

    #[rstest]
    fn test_squish_disjoint_is_identity() {
        let loci = vec![
            Locus::new("b", "chr1", 300, 400),
            Locus::new("a", "chr1", 100, 200),
            Locus::new("c", "chr1", 500, 600),
        ];
        let mut set = LocusSet::with_loci("disjoint", loci.clone());
        set.squish(false).unwrap();

        assert_eq!(ids(&set), vec!["a", "b", "c"]);
        assert_eq!(set.get(0).unwrap(), &loci[1]);
        assert_eq!(set.get(1).unwrap(), &loci[0]);
        assert_eq!(set.get(2).unwrap(), &loci[2]);
    }

    #[rstest]
    fn test_squish_does_not_merge_adjacent() {
        let mut set = LocusSet::with_loci(
            "adjacent",
            vec![Locus::new("a", "chr1", 100, 200), Locus::new("b", "chr1", 201, 300)],
        );
        set.squish(false).unwrap();
        assert_eq!(ids(&set), vec!["a", "b"]);
    }

    #[rstest]
    fn test_squish_merges_single_shared_base() {
        let mut set = LocusSet::with_loci(
            "touching",
            vec![Locus::new("a", "chr1", 100, 200), Locus::new("b", "chr1", 200, 300)],
        );
        set.squish(false).unwrap();
        assert_eq!(set.len(), 1);
        assert_eq!(set.get(0).unwrap().child_count(), 2);
    }

    #[rstest]
    fn test_squish_chains_through_wrapper_end() {
        // c overlaps the grown wrapper but not a
        let mut set = LocusSet::with_loci(
            "chain",
            vec![
                Locus::new("a", "chr1", 1, 10),
                Locus::new("b", "chr1", 5, 30),
                Locus::new("c", "chr1", 25, 40),
            ],
        );
        set.squish(false).unwrap();
        assert_eq!(set.len(), 1);
        let wrapper = set.get(0).unwrap();
        assert_eq!((wrapper.start, wrapper.end), (1, 40));
        assert_eq!(wrapper.child_count(), 3);
    }

    #[rstest]
    fn test_squish_keeps_chromosomes_apart() {
        let mut set = LocusSet::with_loci(
            "chroms",
            vec![Locus::new("a", "chr1", 1, 100), Locus::new("b", "chr2", 1, 100)],
        );
        set.squish(false).unwrap();
        assert_eq!(ids(&set), vec!["a", "b"]);
    }

    #[rstest]
    fn test_squish_empty_is_noop() {
        let mut set = LocusSet::new("empty");
        set.squish(true).unwrap();
        assert!(set.is_empty());
        assert!(LocusSet::squished(&set, true).is_empty());
    }

    #[rstest]
    fn test_flatten() {
        let mut root = Locus::new("root", "chr1", 1, 1000);
        let mut mid = Locus::new("mid", "chr1", 100, 500);
        mid.add_child(Locus::new("leaf1", "chr1", 150, 200)).unwrap();
        mid.add_child(Locus::new("leaf2", "chr1", 300, 400)).unwrap();
        root.add_child(mid).unwrap();
        root.add_child(Locus::new("tail", "chr1", 600, 700)).unwrap();

        let set = LocusSet::with_loci("tree", vec![root]);
        let flat = LocusSet::flatten(&set);

        assert_eq!(flat.len(), 5);
        assert_eq!(ids(&flat), vec!["root", "mid", "leaf1", "leaf2", "tail"]);
        assert_eq!(flat.name(), "tree");

        let leaf1 = flat.get(2).unwrap();
        let mid = flat.find_parent(leaf1).unwrap();
        assert_eq!(mid.id, "mid");
        assert_eq!(mid.child_count(), 2);
    }

    #[rstest]
    fn test_flatten_deep_chain_keeps_subtrees() {
        let mut chain = Locus::new("n4", "chr1", 40, 60);
        for depth in (0..4).rev() {
            let margin = 10 * (4 - depth) as i64;
            let mut parent = Locus::new(format!("n{}", depth), "chr1", 40 - margin, 60 + margin);
            parent.add_child(chain).unwrap();
            chain = parent;
        }

        let flat = LocusSet::flatten(&LocusSet::with_loci("chain", vec![chain]));

        assert_eq!(ids(&flat), vec!["n0", "n1", "n2", "n3", "n4"]);
        let subtree_sizes: Vec<usize> = flat.iter().map(|l| l.iter_preorder().count()).collect();
        assert_eq!(subtree_sizes, vec![5, 4, 3, 2, 1]);
        for pair in flat.loci().windows(2) {
            assert!(pair[1].parent().unwrap().matches(&pair[0]));
        }
    }

    #[rstest]
    fn test_squish_nested_and_chromosome_boundaries() {
        let mut set = LocusSet::with_loci(
            "mixed",
            vec![
                Locus::new("d", "chr2", 100, 200),
                Locus::new("c", "chr1", 500, 600),
                Locus::new("b", "chr1", 200, 300),
                Locus::new("a", "chr1", 100, 500),
            ],
        );
        set.squish(false).unwrap();

        assert!(set.is_squished());
        assert_eq!(ids(&set), vec![SQUISHED_REGION_ID, "d"]);
        let wrapper = set.get(0).unwrap();
        assert_eq!((wrapper.start, wrapper.end), (100, 600));
        assert_eq!(
            wrapper.children().map(|l| l.id.as_str()).collect::<Vec<_>>(),
            vec!["a", "b", "c"]
        );
        assert!(wrapper.children().all(|l| l.parent().is_none()));
    }

    #[rstest]
    fn test_intersects_region_sorted() {
        let set = LocusSet::with_loci(
            "sorted",
            vec![
                Locus::new("a", "chr1", 1, 10),
                Locus::new("b", "chr1", 20, 30),
                Locus::new("c", "chr1", 40, 50),
            ],
        );
        assert!(set.intersects_region(&Locus::new("t", "chr1", 25, 26)));
        assert!(!set.intersects_region(&Locus::new("t", "chr1", 12, 15)));
        assert!(!set.intersects_region(&Locus::new("t", "chr1", 60, 70)));
    }

    #[rstest]
    fn test_intersects_region_stops_at_first_later_member() {
        let set = LocusSet::with_loci(
            "unsorted",
            vec![Locus::new("late", "chr1", 40, 50), Locus::new("early", "chr1", 1, 10)],
        );
        let target = Locus::new("t", "chr1", 5, 6);
        assert!(!set.intersects_region(&target));
        assert!(set.intersects_region_any(&target));
    }

    #[rstest]
    fn test_table_view() {
        let mut a = Locus::with_details("a", "chr1", 1, 10, Strand::Negative, LocusType::Exon, "src");
        a.add_annotation("gene_name", "TP53");
        let b = Locus::new("b", "chr2", 5, 6);
        let set = LocusSet::with_loci("t", vec![a, b]);

        let table = set.table_view();
        assert_eq!(table.len(), 9);
        assert_eq!(table["id"], vec![Some("a".to_string()), Some("b".to_string())]);
        assert_eq!(table["strand"], vec![Some("-".to_string()), Some(".".to_string())]);
        assert_eq!(table["type"][0], Some("Exon".to_string()));
        assert_eq!(table["source"], vec![Some("src".to_string()), None]);
        assert_eq!(table["score"][1], Some("0.0".to_string()));
        assert_eq!(table["gene_name"], vec![Some("TP53".to_string()), None]);
    }

    #[rstest]
    fn test_get_out_of_range(overlapping: LocusSet) {
        assert_eq!(
            overlapping.get(3),
            Err(LocusError::IndexOutOfRange { index: 3, len: 3 })
        );
    }

    #[rstest]
    fn test_membership(mut overlapping: LocusSet) {
        let b = Locus::new("b", "chr1", 150, 250);
        assert!(overlapping.contains(&b));
        assert_eq!(overlapping.index_of(&b), Some(2));
        assert!(overlapping.remove(&b));
        assert!(!overlapping.remove(&b));
        assert_eq!(overlapping.len(), 2);
    }

    #[rstest]
    fn test_append_and_stamp(mut overlapping: LocusSet) {
        let other = LocusSet::with_loci("other", vec![Locus::new("d", "chr3", 1, 2)]);
        overlapping.append_set(&other);
        overlapping.stamp_set_name();
        assert_eq!(overlapping.len(), 4);
        assert!(overlapping.iter().all(|l| l.set_name.as_deref() == Some("peaks")));
        assert_eq!(overlapping.iter_chroms().count(), 2);
        assert_eq!(overlapping.to_string(), "LocusSet 'peaks' with 4 loci.");
    }
}
