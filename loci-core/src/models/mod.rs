pub mod annotation;
pub mod cluster;
pub mod compare;
pub mod locus;
pub mod locus_set;
pub mod locus_type;
pub mod strand;

// re-export for cleaner imports
pub use self::annotation::AnnotationValue;
pub use self::cluster::{ClusterSet, LocusCluster};
pub use self::compare::{ComparisonConfig, ComparisonMode, Placement, StrandComparison};
pub use self::locus::{Locus, LocusKey, Preorder};
pub use self::locus_set::{LocusSet, TableView};
pub use self::locus_type::LocusType;
pub use self::strand::Strand;
