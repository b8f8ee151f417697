//! Selecting loci out of trees and sets.
//!
//! [`LocusFilter`] combines [`FilterCriteria`] (plain predicates) and walks
//! locus hierarchies. [`LocusSieve`]s test field values, can fail on values
//! of the wrong kind, and are applied to whole sets with [`sift_set`].
pub mod criteria;
pub mod sieve;

pub use self::criteria::{FilterCriteria, LocusFilter, StrandCriteria, TypeCriteria};
pub use self::sieve::{LocusSieve, NumericSieve, StringSieve, sift_set};
