use std::fmt::{self, Display};

///
/// Type tag of a locus.
///
/// Any string is a legal type; the well known tags get their own variant and
/// everything else is carried in [`LocusType::Other`]. Parsing a well known tag
/// always yields the dedicated variant, so `LocusType::from("Gene")` and
/// `LocusType::Gene` compare equal.
///
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum LocusType {
    #[default]
    Undefined,
    /// Wrapper around several loci, produced by squishing
    Union,
    Intersection,
    Locus,
    Operon,
    Promoter,
    Gene,
    Cds,
    FiveUtr,
    ThreeUtr,
    Exon,
    Intron,
    Mrna,
    Block,
    TranscriptionalRegion,
    TranscriptionalUnit,
    InterveningUnit,
    Other(String),
}

impl LocusType {
    pub fn as_str(&self) -> &str {
        match self {
            LocusType::Undefined => "Undefined",
            LocusType::Union => "Union",
            LocusType::Intersection => "Intersection",
            LocusType::Locus => "Locus",
            LocusType::Operon => "Operon",
            LocusType::Promoter => "Promoter",
            LocusType::Gene => "Gene",
            LocusType::Cds => "CDS",
            LocusType::FiveUtr => "5UTR",
            LocusType::ThreeUtr => "3UTR",
            LocusType::Exon => "Exon",
            LocusType::Intron => "Intron",
            LocusType::Mrna => "mRNA",
            LocusType::Block => "Block",
            LocusType::TranscriptionalRegion => "Transcriptional Region",
            LocusType::TranscriptionalUnit => "Transcriptional Unit",
            LocusType::InterveningUnit => "Intervening Unit",
            LocusType::Other(s) => s.as_str(),
        }
    }
}

impl From<&str> for LocusType {
    fn from(value: &str) -> Self {
        match value {
            "Undefined" => LocusType::Undefined,
            "Union" => LocusType::Union,
            "Intersection" => LocusType::Intersection,
            "Locus" => LocusType::Locus,
            "Operon" => LocusType::Operon,
            "Promoter" => LocusType::Promoter,
            "Gene" => LocusType::Gene,
            "CDS" => LocusType::Cds,
            "5UTR" => LocusType::FiveUtr,
            "3UTR" => LocusType::ThreeUtr,
            "Exon" => LocusType::Exon,
            "Intron" => LocusType::Intron,
            "mRNA" => LocusType::Mrna,
            "Block" => LocusType::Block,
            "Transcriptional Region" => LocusType::TranscriptionalRegion,
            "Transcriptional Unit" => LocusType::TranscriptionalUnit,
            "Intervening Unit" => LocusType::InterveningUnit,
            other => LocusType::Other(other.to_string()),
        }
    }
}

impl From<String> for LocusType {
    fn from(value: String) -> Self {
        LocusType::from(value.as_str())
    }
}

impl Display for LocusType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
