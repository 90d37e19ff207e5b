//! Link graph model and the minimal adapter trait the estimators run on.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::{Error, Result};

/// Index-level view of a directed graph: nodes are `0..node_count()`.
///
/// Every id returned by `neighbors` must be `< node_count()`. The checked entrypoints
/// report a violation as [`Error::IndexOutOfBounds`]; `pagerank_run` panics on it.
pub trait Graph {
    fn node_count(&self) -> usize;
    fn neighbors(&self, node: usize) -> Vec<usize>;
    fn out_degree(&self, node: usize) -> usize {
        self.neighbors(node).len()
    }
}

/// A closed hyperlink graph over named pages.
///
/// Built once from raw per-document link sets and read-only afterwards:
/// - pages are kept sorted by id, so node indices are stable for a given input
/// - self-links are removed
/// - links to pages outside the corpus are removed
/// - a page whose links are all removed is kept as a dangling page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkGraph {
    pages: Vec<String>,
    index: HashMap<String, usize>,
    outlinks: Vec<Vec<usize>>,
}

impl LinkGraph {
    /// Build a graph from `(page, raw link targets)` pairs.
    ///
    /// If the same page id appears more than once, the last entry wins.
    pub fn from_links<I, P, L, S>(links: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: Into<String>,
        L: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut raw: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, targets) in links {
            raw.insert(page.into(), targets.into_iter().map(Into::into).collect());
        }

        let pages: Vec<String> = raw.keys().cloned().collect();
        let index: HashMap<String, usize> =
            pages.iter().enumerate().map(|(i, p)| (p.clone(), i)).collect();

        let outlinks: Vec<Vec<usize>> = raw
            .iter()
            .enumerate()
            .map(|(i, (_, targets))| {
                // BTreeSet iteration is sorted, so indices come out sorted and unique.
                targets
                    .iter()
                    .filter_map(|t| index.get(t).copied())
                    .filter(|&j| j != i)
                    .collect::<Vec<usize>>()
            })
            .collect();

        Self { pages, index, outlinks }
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.outlinks.iter().map(Vec::len).sum()
    }

    /// All pages, sorted by id.
    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> Option<&str> {
        self.pages.get(index).map(String::as_str)
    }

    pub fn index_of(&self, page: &str) -> Option<usize> {
        self.index.get(page).copied()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.index.contains_key(page)
    }

    /// Outlinks of `page` in id order, or `None` if the page is unknown.
    pub fn outlinks(&self, page: &str) -> Option<impl Iterator<Item = &str> + '_> {
        let i = self.index_of(page)?;
        Some(self.outlinks[i].iter().map(move |&j| self.pages[j].as_str()))
    }

    /// Outlink node indices of node `index` (empty if out of range).
    pub fn outlink_indices(&self, index: usize) -> &[usize] {
        self.outlinks.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn is_dangling(&self, page: &str) -> Option<bool> {
        self.index_of(page).map(|i| self.outlinks[i].is_empty())
    }

    pub fn dangling_pages(&self) -> impl Iterator<Item = &str> + '_ {
        self.outlinks
            .iter()
            .zip(&self.pages)
            .filter(|(links, _)| links.is_empty())
            .map(|(_, page)| page.as_str())
    }
}

/// Reject adapters that hand out neighbor ids outside `0..node_count()`.
pub(crate) fn check_neighbors<G: Graph>(graph: &G) -> Result<()> {
    let n = graph.node_count();
    for u in 0..n {
        if let Some(v) = graph.neighbors(u).into_iter().find(|&v| v >= n) {
            return Err(Error::IndexOutOfBounds(v));
        }
    }
    Ok(())
}

impl Graph for LinkGraph {
    fn node_count(&self) -> usize {
        self.pages.len()
    }
    fn neighbors(&self, node: usize) -> Vec<usize> {
        self.outlink_indices(node).to_vec()
    }
    fn out_degree(&self, node: usize) -> usize {
        self.outlink_indices(node).len()
    }
}

/// A petgraph graph read as a link graph: edge direction is link direction, parallel edges
/// count as one link, and self-loops are ignored, matching [`LinkGraph::from_links`].
#[cfg(feature = "petgraph")]
impl<N, E, Ty, Ix> Graph for petgraph::Graph<N, E, Ty, Ix>
where
    Ty: petgraph::EdgeType,
    Ix: petgraph::graph::IndexType,
{
    fn node_count(&self) -> usize {
        petgraph::Graph::node_count(self)
    }
    fn neighbors(&self, node: usize) -> Vec<usize> {
        if node >= petgraph::Graph::node_count(self) {
            return Vec::new();
        }
        let mut out: Vec<usize> = petgraph::Graph::neighbors(self, petgraph::graph::NodeIndex::new(node))
            .map(|idx| idx.index())
            .filter(|&v| v != node)
            .collect();
        out.sort_unstable();
        out.dedup();
        out
    }
}
