//! # Genomic interval algebra
//!
//! `loci-core` models loci (1-based, inclusive intervals on a chromosome) that
//! can nest inside one another, and the operations used to reduce and
//! regroup collections of them:
//!
//! - tolerant comparison and strand-aware overlap tests on [`Locus`]
//! - sorting, squishing (overlap merging) and flattening of a [`LocusSet`]
//! - regrouping squished sets by origin with [`ClusterSet`]
//! - filters and sieves over locus trees and sets
//!
//! ```rust
//! use loci_core::models::{Locus, LocusSet};
//!
//! let mut set = LocusSet::with_loci(
//!     "peaks",
//!     vec![
//!         Locus::new("a", "chr1", 100, 200),
//!         Locus::new("b", "chr1", 150, 250),
//!         Locus::new("c", "chr1", 400, 500),
//!     ],
//! );
//! set.squish(false).unwrap();
//! assert_eq!(set.len(), 2);
//! ```
pub mod errors;
pub mod filter;
pub mod gene;
pub mod models;

// re-export for cleaner imports
pub use errors::{LocusError, Result};
pub use models::{ClusterSet, Locus, LocusCluster, LocusSet};
