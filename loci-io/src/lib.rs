//! # Reading and writing loci
//!
//! Translators turn single lines of BED, GFF and GTF files into [`Locus`]
//! values and back. The functions in [`files`] drive a translator over a whole
//! file (plain or gzipped) to produce or store a [`LocusSet`], and write
//! [`ClusterSet`] reports.
//!
//! [`Locus`]: loci_core::models::Locus
//! [`LocusSet`]: loci_core::models::LocusSet
//! [`ClusterSet`]: loci_core::models::ClusterSet
pub mod bed;
pub mod consts;
pub mod error;
pub mod files;
pub mod gff;
pub mod gtf;
pub mod translator;

// re-expose core functions
pub use bed::*;
pub use error::*;
pub use files::*;
pub use gff::*;
pub use gtf::*;
pub use translator::*;
