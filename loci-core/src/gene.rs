//! Gene level helpers.
use log::debug;

use crate::errors::Result;
use crate::models::{Locus, LocusSet, LocusType, Strand};

fn derived(gene: &Locus, start: i64, end: i64, locus_type: LocusType) -> Locus {
    let mut locus = Locus::new(gene.id.clone(), gene.chromosome.clone(), start, end);
    locus.strand = gene.strand;
    locus.source = gene.source.clone();
    locus.locus_type = locus_type;
    locus
}

///
/// Wrap each gene in an operon that also covers its promoter.
///
/// The promoter reaches `upstream` bases before the transcription start and
/// `downstream` bases into the gene, clipped to the gene. On the negative
/// strand the transcription start is the gene end.
///
/// # Arguments
/// - genes: loci to extend, usually of type gene or mRNA
/// - upstream: bases before the transcription start
/// - downstream: bases after the transcription start
///
/// # Returns
/// a set named like `genes` holding one operon per gene, each with two
/// children: the promoter, then a copy of the gene
pub fn add_promoters(genes: &LocusSet, upstream: i64, downstream: i64) -> Result<LocusSet> {
    let mut operons = LocusSet::new(genes.name());

    for gene in genes {
        let (promoter, mut operon) = if gene.strand == Strand::Negative {
            let prom_start = (gene.end - downstream).max(gene.start).max(0);
            let prom_end = gene.end + upstream;
            (
                derived(gene, prom_start, prom_end, LocusType::Promoter),
                derived(gene, gene.start, prom_end, LocusType::Operon),
            )
        } else {
            let mut prom_start = gene.start - upstream;
            if prom_start < 0 {
                prom_start = gene.start;
            }
            let prom_end = (gene.start + downstream).min(gene.end);
            (
                derived(gene, prom_start, prom_end, LocusType::Promoter),
                derived(gene, prom_start, gene.end, LocusType::Operon),
            )
        };

        operon.add_child(promoter)?;
        operon.add_child(gene.clone())?;
        operons.add_locus(operon);
    }

    debug!("Added promoters to {} genes of '{}'", operons.len(), genes.name());
    Ok(operons)
}
