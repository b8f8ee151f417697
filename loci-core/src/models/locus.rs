use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt::{self, Display};

use crate::errors::{LocusError, Result};
use crate::models::compare::{self, ComparisonConfig, ComparisonMode, Placement, StrandComparison};
use crate::models::{AnnotationValue, LocusType, Strand};

///
/// Non-owning reference from a child back to the locus it was attached to.
///
/// The key is a snapshot of the parent's identity taken at attach time and is
/// resolved by lookup (see [`LocusKey::matches`] and `LocusSet::find_parent`).
/// It never keeps the parent alive.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocusKey {
    pub id: String,
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
}

impl LocusKey {
    pub fn matches(&self, locus: &Locus) -> bool {
        self.id == locus.id
            && self.chromosome == locus.chromosome
            && self.start == locus.start
            && self.end == locus.end
    }
}

///
/// Locus struct, a single genomic region with metadata and nested sub-loci.
///
/// Coordinates are 1-based and inclusive at both ends.
///
#[derive(Debug, Clone, PartialEq)]
pub struct Locus {
    pub id: String,
    pub chromosome: String,
    pub start: i64,
    pub end: i64,
    pub locus_type: LocusType,
    pub source: Option<String>,
    pub score: f64,
    pub strand: Strand,
    pub sequence: Option<String>,
    /// name of the collection this locus came from
    pub set_name: Option<String>,
    pub annotations: HashMap<String, AnnotationValue>,

    parent: Option<LocusKey>,
    children: Vec<Locus>,
}

impl Locus {
    ///
    /// Create a locus with the minimal set of attributes.
    ///
    /// # Arguments
    /// - id: name/accession of the locus
    /// - chromosome: sequence the locus lives on
    /// - start: first base (1-based)
    /// - end: last base (inclusive)
    pub fn new<S: Into<String>, C: Into<String>>(id: S, chromosome: C, start: i64, end: i64) -> Self {
        Locus {
            id: id.into(),
            chromosome: chromosome.into(),
            start,
            end,
            locus_type: LocusType::Undefined,
            source: None,
            score: 0.0,
            strand: Strand::Undefined,
            sequence: None,
            set_name: None,
            annotations: HashMap::new(),
            parent: None,
            children: Vec::new(),
        }
    }

    ///
    /// Create a locus with strand, type and source set.
    ///
    pub fn with_details<S: Into<String>, C: Into<String>, T: Into<LocusType>, R: Into<String>>(
        id: S,
        chromosome: C,
        start: i64,
        end: i64,
        strand: Strand,
        locus_type: T,
        source: R,
    ) -> Self {
        let mut locus = Locus::new(id, chromosome, start, end);
        locus.strand = strand;
        locus.locus_type = locus_type.into();
        locus.source = Some(source.into());
        locus
    }

    ///
    /// Number of bases covered: `end - start + 1`
    ///
    pub fn length(&self) -> i64 {
        self.end - self.start + 1
    }

    pub fn key(&self) -> LocusKey {
        LocusKey {
            id: self.id.clone(),
            chromosome: self.chromosome.clone(),
            start: self.start,
            end: self.end,
        }
    }

    /// Key of the locus this one was attached to with [`Locus::add_child`].
    pub fn parent(&self) -> Option<&LocusKey> {
        self.parent.as_ref()
    }

    pub fn clear_parent(&mut self) {
        self.parent = None;
    }

    ///
    /// Iterate the first generation of children. Not recursive.
    ///
    pub fn children(&self) -> std::slice::Iter<'_, Locus> {
        self.children.iter()
    }

    pub fn child(&self, index: usize) -> Result<&Locus> {
        self.children.get(index).ok_or(LocusError::IndexOutOfRange {
            index,
            len: self.children.len(),
        })
    }

    pub fn child_count(&self) -> usize {
        self.children.len()
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }

    pub(crate) fn take_children(&mut self) -> Vec<Locus> {
        std::mem::take(&mut self.children)
    }

    /// Widen to cover `child`, then adopt it. Both must share a chromosome.
    pub(crate) fn absorb(&mut self, child: Locus) {
        self.start = self.start.min(child.start);
        self.end = self.end.max(child.end);
        self.children.push(child);
    }

    ///
    /// Attach a child and point its parent key at this locus.
    ///
    /// The child must be on the same chromosome and lie within
    /// `[self.start, self.end]`, otherwise nothing changes and
    /// [`LocusError::OutOfScope`] is returned.
    ///
    pub fn add_child(&mut self, mut child: Locus) -> Result<()> {
        self.check_scope(&child)?;
        child.parent = Some(self.key());
        self.children.push(child);
        Ok(())
    }

    ///
    /// Attach a child without touching its parent key. Used by wrappers that
    /// group loci without claiming ownership of the parent relation.
    ///
    pub fn adopt_child(&mut self, child: Locus) -> Result<()> {
        self.check_scope(&child)?;
        self.children.push(child);
        Ok(())
    }

    ///
    /// Create a child of this locus from a sub-range.
    ///
    /// The child id is `spawn_type` followed by this locus' id; chromosome,
    /// strand and source are inherited.
    ///
    pub fn spawn_child<T: Into<LocusType>>(&mut self, start: i64, end: i64, spawn_type: T) -> Result<()> {
        let spawn_type = spawn_type.into();
        let mut spawn = Locus::new(
            format!("{}{}", spawn_type, self.id),
            self.chromosome.clone(),
            start,
            end,
        );
        spawn.strand = self.strand;
        spawn.source = self.source.clone();
        spawn.locus_type = spawn_type;
        self.add_child(spawn)
    }

    fn check_scope(&self, child: &Locus) -> Result<()> {
        if self.chromosome != child.chromosome || self.start > child.start || self.end < child.end {
            return Err(LocusError::OutOfScope {
                parent: self.detail_string(),
                child: child.detail_string(),
            });
        }
        Ok(())
    }

    ///
    /// Sort the first generation of children by natural ordering.
    ///
    pub fn sort_children(&mut self) {
        self.children.sort_by(|a, b| a.natural_cmp(b));
    }

    ///
    /// Depth-first, pre-order walk over this locus and all its descendants.
    ///
    pub fn iter_preorder(&self) -> Preorder<'_> {
        Preorder { stack: vec![self] }
    }

    ///
    /// Descendants (at any depth) that have no children of their own.
    /// A locus without children is its own only leaf.
    ///
    pub fn leaves(&self) -> impl Iterator<Item = &Locus> {
        self.iter_preorder().filter(|l| !l.has_children())
    }

    pub fn add_annotation<K: Into<String>, V: Into<AnnotationValue>>(&mut self, key: K, value: V) {
        self.annotations.insert(key.into(), value.into());
    }

    pub fn annotation(&self, key: &str) -> Option<&AnnotationValue> {
        self.annotations.get(key)
    }

    pub fn contains_annotation(&self, key: &str) -> bool {
        self.annotations.contains_key(key)
    }

    pub fn annotation_keys(&self) -> impl Iterator<Item = &String> {
        self.annotations.keys()
    }

    ///
    /// Natural ordering: chromosome label (lexicographic), then start.
    /// End is never consulted, so loci sharing chromosome and start are equal.
    ///
    pub fn natural_cmp(&self, other: &Locus) -> Ordering {
        self.chromosome
            .cmp(&other.chromosome)
            .then_with(|| self.start.cmp(&other.start))
    }

    ///
    /// Place this locus relative to another using true genomic overlap.
    ///
    /// Loci on different chromosomes are placed by chromosome label and never
    /// overlap.
    ///
    pub fn overlap_compare(&self, other: &Locus) -> Placement {
        match self.chromosome.cmp(&other.chromosome) {
            Ordering::Equal => {
                if self.end < other.start {
                    Placement::Before
                } else if self.start > other.end {
                    Placement::After
                } else {
                    Placement::Overlap
                }
            }
            ord => Placement::from(ord),
        }
    }

    ///
    /// Place this locus relative to another with a tolerance.
    ///
    /// # Arguments
    /// - other: locus to compare against
    /// - mode: how `value` is interpreted, see [`ComparisonMode`]
    /// - value: the tolerance
    ///
    /// # Returns
    /// [`Placement`], or [`LocusError::InvalidComparisonParameters`] for a
    /// percent value outside (0, 1]. Different chromosomes and nested loci are
    /// decided before the tolerance is looked at.
    pub fn compare_with_tolerance(&self, other: &Locus, mode: ComparisonMode, value: f64) -> Result<Placement> {
        match self.chromosome.cmp(&other.chromosome) {
            Ordering::Equal => {}
            ord => return Ok(Placement::from(ord)),
        }

        if compare::nested(self, other) {
            return Ok(Placement::Overlap);
        }

        let slack = compare::slack(self, other, mode, value)?;
        Ok(compare::place_with_slack(self, other, slack))
    }

    ///
    /// Overlap test with tolerance and a strand rule.
    ///
    /// Returns `false` for different chromosomes or when the strand rule
    /// rejects the pair, regardless of coordinates.
    ///
    pub fn overlaps_with_tolerance(
        &self,
        other: &Locus,
        mode: ComparisonMode,
        value: f64,
        strand: StrandComparison,
    ) -> Result<bool> {
        if self.chromosome != other.chromosome {
            return Ok(false);
        }

        if !strand.accepts(self.strand, other.strand) {
            return Ok(false);
        }

        if compare::nested(self, other) {
            return Ok(true);
        }

        let slack = compare::slack(self, other, mode, value)?;
        Ok(compare::place_with_slack(self, other, slack) == Placement::Overlap)
    }

    pub fn compare_with(&self, other: &Locus, config: &ComparisonConfig) -> Result<Placement> {
        self.compare_with_tolerance(other, config.mode, config.value)
    }

    pub fn overlaps_with(&self, other: &Locus, config: &ComparisonConfig) -> Result<bool> {
        self.overlaps_with_tolerance(other, config.mode, config.value, config.strand)
    }

    ///
    /// Grow this locus to cover `other` as well. Only coordinates change.
    ///
    pub fn merge_coordinates(&mut self, other: &Locus) -> Result<()> {
        if self.chromosome != other.chromosome {
            return Err(LocusError::ChromosomeMismatch(
                self.chromosome.clone(),
                other.chromosome.clone(),
            ));
        }
        self.start = self.start.min(other.start);
        self.end = self.end.max(other.end);
        Ok(())
    }

    ///
    /// `id@chr:start-end`, or `chr:start-end` when the id is empty.
    ///
    pub fn detail_string(&self) -> String {
        if self.id.is_empty() {
            format!("{}:{}-{}", self.chromosome, self.start, self.end)
        } else {
            format!("{}@{}:{}-{}", self.id, self.chromosome, self.start, self.end)
        }
    }
}

impl Display for Locus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

pub struct Preorder<'a> {
    stack: Vec<&'a Locus>,
}

impl<'a> Iterator for Preorder<'a> {
    type Item = &'a Locus;

    fn next(&mut self) -> Option<Self::Item> {
        let locus = self.stack.pop()?;
        self.stack.extend(locus.children.iter().rev());
        Some(locus)
    }
}
