//! Page-labelled probability distributions.

use std::fmt;

use crate::graph::LinkGraph;
use crate::topk::top_k;

/// A probability for every page of a graph, sorted by page id.
///
/// Values are kept at full precision; `Display` rounds to 4 decimal places.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Distribution {
    entries: Vec<(String, f64)>,
}

impl Distribution {
    /// Label an index-ordered score vector with the graph's page ids.
    ///
    /// `scores[i]` belongs to `graph.page(i)`; extra scores are ignored and missing ones are 0.
    pub fn from_scores(graph: &LinkGraph, scores: &[f64]) -> Self {
        let entries = graph
            .pages()
            .iter()
            .enumerate()
            .map(|(i, page)| (page.clone(), scores.get(i).copied().unwrap_or(0.0)))
            .collect();
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, page: &str) -> Option<f64> {
        self.entries
            .binary_search_by(|(p, _)| p.as_str().cmp(page))
            .ok()
            .map(|i| self.entries[i].1)
    }

    /// `(page, probability)` pairs in page id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.entries.iter().map(|(p, v)| (p.as_str(), *v))
    }

    pub fn scores(&self) -> Vec<f64> {
        self.entries.iter().map(|(_, v)| *v).collect()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, v)| v).sum()
    }

    /// Largest per-page absolute difference; a page missing on one side counts as 0 there.
    pub fn max_abs_diff(&self, other: &Distribution) -> f64 {
        let mut diff: f64 = 0.0;
        for (page, v) in self.iter() {
            diff = diff.max((v - other.get(page).unwrap_or(0.0)).abs());
        }
        for (page, v) in other.iter() {
            if self.get(page).is_none() {
                diff = diff.max(v.abs());
            }
        }
        diff
    }

    /// The `k` highest-probability pages, best first. Zero-probability pages are skipped.
    pub fn top(&self, k: usize) -> Vec<(&str, f64)> {
        top_k(&self.scores(), k)
            .into_iter()
            .map(|(i, s)| (self.entries[i].0.as_str(), s))
            .collect()
    }
}

impl fmt::Display for Distribution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (page, v) in self.iter() {
            writeln!(f, "  {page}: {v:.4}")?;
        }
        Ok(())
    }
}
