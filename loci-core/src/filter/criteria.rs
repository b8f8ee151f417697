use log::trace;

use crate::models::{Locus, LocusSet, LocusType, Strand};

///
/// A yes/no test on a single locus.
///
pub trait FilterCriteria {
    fn passes(&self, locus: &Locus) -> bool;
}

/// Passes loci of exactly this type.
#[derive(Debug, Clone, PartialEq)]
pub struct TypeCriteria(pub LocusType);

impl FilterCriteria for TypeCriteria {
    fn passes(&self, locus: &Locus) -> bool {
        locus.locus_type == self.0
    }
}

/// Passes loci on exactly this strand.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrandCriteria(pub Strand);

impl FilterCriteria for StrandCriteria {
    fn passes(&self, locus: &Locus) -> bool {
        locus.strand == self.0
    }
}

///
/// Selects children of a locus, or members of a set, that pass every
/// criterion added to the filter. A filter with no criteria passes everything.
///
/// In recursive mode only leaves (loci without children) are tested, at any
/// depth below the starting point.
///
#[derive(Default)]
pub struct LocusFilter {
    criteria: Vec<Box<dyn FilterCriteria>>,
}

impl LocusFilter {
    pub fn new() -> Self {
        LocusFilter {
            criteria: Vec::new(),
        }
    }

    pub fn add_criteria<C: FilterCriteria + 'static>(&mut self, criteria: C) {
        self.criteria.push(Box::new(criteria));
    }

    ///
    /// Builder form of [`LocusFilter::add_criteria`].
    ///
    pub fn with<C: FilterCriteria + 'static>(mut self, criteria: C) -> Self {
        self.add_criteria(criteria);
        self
    }

    fn passes_all(&self, locus: &Locus) -> bool {
        self.criteria.iter().all(|c| c.passes(locus))
    }

    ///
    /// Filter the descendants of `locus`.
    ///
    /// # Arguments
    /// - locus: locus whose children are filtered
    /// - recurse: false tests first-generation children only; true tests
    ///   every leaf below `locus` (or `locus` itself if it has no children)
    pub fn filter<'a>(&self, locus: &'a Locus, recurse: bool) -> Vec<&'a Locus> {
        if recurse {
            locus.leaves().filter(|l| self.passes_all(l)).collect()
        } else {
            locus.children().filter(|l| self.passes_all(l)).collect()
        }
    }

    ///
    /// Number of loci [`LocusFilter::filter`] would return.
    ///
    pub fn filter_count(&self, locus: &Locus, recurse: bool) -> usize {
        if recurse {
            locus.leaves().filter(|l| self.passes_all(l)).count()
        } else {
            locus.children().filter(|l| self.passes_all(l)).count()
        }
    }

    ///
    /// Filter a set: its direct members, or in recursive mode the leaves below
    /// each member.
    ///
    pub fn filter_set<'a>(&self, set: &'a LocusSet, recurse: bool) -> Vec<&'a Locus> {
        let passed: Vec<&Locus> = if recurse {
            set.iter()
                .flat_map(|member| member.leaves())
                .filter(|l| self.passes_all(l))
                .collect()
        } else {
            set.iter().filter(|l| self.passes_all(l)).collect()
        };

        trace!("{} of '{}' passed the filter", passed.len(), set.name());
        passed
    }
}
