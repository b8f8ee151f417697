/// Attribute that sets the id of a GFF/GTF locus, overriding anything else
pub const HOCUSLOCUS_ID: &str = "hocuslocus_id";
/// Id of GFF loci that carry no [`HOCUSLOCUS_ID`] attribute
pub const DEFAULT_GFF_ID: &str = "GFFLocus";
/// Mandatory GTF attribute naming the transcript a line belongs to
pub const GTF_TRANSCRIPT_ID: &str = "transcript_id";

pub const BED_MIN_COLUMNS: usize = 3;
pub const BED_MAX_COLUMNS: usize = 12;
pub const GFF_MIN_COLUMNS: usize = 8;
pub const GFF_MAX_COLUMNS: usize = 10;
pub const GTF_MIN_COLUMNS: usize = 9;

pub const GZ_EXTENSION: &str = "gz";
