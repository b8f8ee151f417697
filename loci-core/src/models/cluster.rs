use std::collections::BTreeMap;
use std::fmt::{self, Display};

use log::debug;

use crate::models::{Locus, LocusSet, LocusType};

/// Group name used for wrapper children that carry no collection name
pub const UNNAMED_GROUP: &str = "unnamed";

///
/// One cluster of loci, grouped by the name of the collection each locus
/// came from. Each group is a [`LocusSet`] named `cluster N`, where N counts
/// the groups of this cluster in order of first appearance, starting at 1.
///
#[derive(Clone, Debug, PartialEq)]
pub struct LocusCluster {
    groups: BTreeMap<String, LocusSet>,
    next_id: usize,
}

impl Default for LocusCluster {
    fn default() -> Self {
        LocusCluster::new()
    }
}

impl LocusCluster {
    pub fn new() -> Self {
        LocusCluster {
            groups: BTreeMap::new(),
            next_id: 1,
        }
    }

    ///
    /// Add `locus` to the group of `origin`, creating that group on first use.
    ///
    pub fn add_member<S: Into<String>>(&mut self, origin: S, locus: Locus) {
        let next_id = &mut self.next_id;
        self.groups
            .entry(origin.into())
            .or_insert_with(|| {
                let group = LocusSet::new(format!("cluster {}", next_id));
                *next_id += 1;
                group
            })
            .add_locus(locus);
    }

    pub fn group(&self, origin: &str) -> Option<&LocusSet> {
        self.groups.get(origin)
    }

    /// Origin names in lexicographic order.
    pub fn origins(&self) -> impl Iterator<Item = &String> {
        self.groups.keys()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    ///
    /// One line of output: for each origin (sorted), the ids of its loci
    /// joined with commas; groups separated by tabs.
    ///
    pub fn render_line(&self) -> String {
        self.groups
            .values()
            .map(|group| {
                group
                    .iter()
                    .map(|l| l.id.as_str())
                    .collect::<Vec<_>>()
                    .join(",")
            })
            .collect::<Vec<_>>()
            .join("\t")
    }
}

impl Display for LocusCluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LocusCluster:\n\t{}", self.render_line())
    }
}

///
/// Named, ordered collection of [`LocusCluster`]s.
///
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClusterSet {
    name: String,
    clusters: Vec<LocusCluster>,
}

impl<'a> IntoIterator for &'a ClusterSet {
    type Item = &'a LocusCluster;
    type IntoIter = std::slice::Iter<'a, LocusCluster>;

    fn into_iter(self) -> Self::IntoIter {
        self.clusters.iter()
    }
}

impl ClusterSet {
    pub fn new<S: Into<String>>(name: S) -> Self {
        ClusterSet {
            name: name.into(),
            clusters: Vec::new(),
        }
    }

    ///
    /// Regroup a squished set: one cluster per member. Union wrappers
    /// contribute each child under the child's collection name
    /// ([`UNNAMED_GROUP`] if it has none); any other member contributes itself.
    ///
    pub fn from_squished<S: Into<String>>(name: S, set: &LocusSet) -> ClusterSet {
        let mut clusters = ClusterSet::new(name);

        for member in set {
            let cluster = clusters.create_new_cluster();
            if member.locus_type == LocusType::Union {
                for child in member.children() {
                    cluster.add_member(origin_of(child), child.clone());
                }
            } else {
                cluster.add_member(origin_of(member), member.clone());
            }
        }

        debug!(
            "Built {} clusters for '{}' from '{}'",
            clusters.len(),
            clusters.name,
            set.name()
        );
        clusters
    }

    ///
    /// Append a new, empty cluster and hand it back for filling.
    ///
    pub fn create_new_cluster(&mut self) -> &mut LocusCluster {
        self.clusters.push(LocusCluster::new());
        let last = self.clusters.len() - 1;
        &mut self.clusters[last]
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_name<S: Into<String>>(&mut self, name: S) {
        self.name = name.into();
    }

    pub fn iter(&self) -> std::slice::Iter<'_, LocusCluster> {
        self.clusters.iter()
    }

    pub fn len(&self) -> usize {
        self.clusters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.clusters.is_empty()
    }

    /// Every cluster's line, joined with newlines.
    pub fn render(&self) -> String {
        self.clusters
            .iter()
            .map(|c| c.render_line())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn origin_of(locus: &Locus) -> String {
    locus
        .set_name
        .clone()
        .unwrap_or_else(|| UNNAMED_GROUP.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;
    use rstest::*;

    fn named(id: &str, set: &str, start: i64, end: i64) -> Locus {
        let mut locus = Locus::new(id, "chr1", start, end);
        locus.set_name = Some(set.to_string());
        locus
    }

    #[rstest]
    fn test_group_names_count_from_one() {
        let mut cluster = LocusCluster::new();
        cluster.add_member("setB", Locus::new("b1", "chr1", 1, 2));
        cluster.add_member("setA", Locus::new("a1", "chr1", 1, 2));
        cluster.add_member("setB", Locus::new("b2", "chr1", 3, 4));

        assert_eq!(cluster.len(), 2);
        assert_eq!(cluster.group("setB").unwrap().name(), "cluster 1");
        assert_eq!(cluster.group("setA").unwrap().name(), "cluster 2");
        assert_eq!(cluster.group("setB").unwrap().len(), 2);
    }

    #[rstest]
    fn test_render_line_sorted_by_origin() {
        let mut cluster = LocusCluster::new();
        cluster.add_member("setB", Locus::new("b1", "chr1", 1, 2));
        cluster.add_member("setA", Locus::new("a1", "chr1", 1, 2));
        cluster.add_member("setB", Locus::new("b2", "chr1", 3, 4));

        assert_eq!(cluster.render_line(), "a1\tb1,b2");
        assert_eq!(cluster.to_string(), "LocusCluster:\n\ta1\tb1,b2");
    }

    #[rstest]
    fn test_render_line_empty() {
        assert_eq!(LocusCluster::new().render_line(), "");
    }

    #[rstest]
    fn test_create_new_cluster() {
        let mut clusters = ClusterSet::new("report");
        clusters
            .create_new_cluster()
            .add_member("x", Locus::new("x1", "chr1", 1, 2));
        clusters.create_new_cluster();

        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.render(), "x1\n");
    }

    #[rstest]
    fn test_from_squished() {
        let mut set = LocusSet::with_loci(
            "union",
            vec![
                named("a1", "setA", 100, 200),
                named("b1", "setB", 150, 250),
                Locus::new("lonely", "chr1", 900, 950),
                named("a2", "setA", 180, 220),
            ],
        );
        set.squish(false).unwrap();

        let clusters = ClusterSet::from_squished("report", &set);
        assert_eq!(clusters.len(), 2);
        assert_eq!(clusters.name(), "report");
        assert_eq!(clusters.render(), "a1,a2\tb1\nlonely");

        let first = clusters.iter().next().unwrap();
        assert_eq!(first.origins().collect::<Vec<_>>(), vec!["setA", "setB"]);
        let second = clusters.iter().nth(1).unwrap();
        assert!(second.group(UNNAMED_GROUP).is_some());
    }
}
