//! PageRank by power iteration.
//!
//! Each round recomputes every page from a frozen copy of the previous round:
//! \[
//!   r'(p) = \frac{1 - d}{N} + d \sum_{q \to p} \frac{r(q)}{L(q)} + d \sum_{q \text{ dangling}} \frac{r(q)}{N}
//! \]
//! Dangling pages spread their rank over all pages, themselves included, so every round
//! redistributes exactly the previous round's total mass.
//!
//! Iteration stops once no page moves by `tolerance` or more in a single round.

use tracing::{debug, warn};

use crate::distribution::Distribution;
use crate::graph::{check_neighbors, Graph, LinkGraph};
use crate::{validate_damping, Error, Result};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageRankConfig {
    pub damping: f64,
    /// Per-page absolute change below which a round counts as converged.
    pub tolerance: f64,
    /// Hard bound on rounds. Exceeding it is reported, never looped past.
    pub max_iterations: usize,
}

impl Default for PageRankConfig {
    fn default() -> Self {
        Self { damping: 0.85, tolerance: 0.0005, max_iterations: 10_000 }
    }
}

impl PageRankConfig {
    pub fn with_damping(mut self, damping: f64) -> Self {
        self.damping = damping;
        self
    }

    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        if !self.tolerance.is_finite() || self.tolerance <= 0.0 {
            return Err(Error::InvalidParameter(format!(
                "tolerance must be finite and > 0 (got {})",
                self.tolerance
            )));
        }
        if self.max_iterations == 0 {
            return Err(Error::InvalidParameter("max_iterations must be >= 1".to_string()));
        }
        Ok(())
    }
}

/// Outcome of a power-iteration run, whether or not it converged.
#[derive(Debug, Clone)]
pub struct PageRankRun {
    /// Scores indexed by node.
    pub scores: Vec<f64>,
    pub iterations: usize,
    /// Largest per-node change in the last round.
    pub delta: f64,
    pub converged: bool,
}

/// Run power iteration without validating `config` or the graph adapter.
///
/// Always terminates within `config.max_iterations` rounds; check `converged`.
/// Panics if `graph` returns a neighbor id `>= node_count()`.
pub fn pagerank_run<G: Graph>(graph: &G, config: PageRankConfig) -> PageRankRun {
    let n = graph.node_count();
    if n == 0 {
        return PageRankRun { scores: Vec::new(), iterations: 0, delta: 0.0, converged: true };
    }
    let n_f64 = n as f64;
    let mut scores = vec![1.0 / n_f64; n];
    let mut new_scores = vec![0.0; n];
    let neighbors: Vec<Vec<usize>> = (0..n).map(|u| graph.neighbors(u)).collect();
    let teleport = (1.0 - config.damping) / n_f64;

    let mut iterations = 0usize;
    let mut delta = f64::INFINITY;
    let mut converged = false;
    for _ in 0..config.max_iterations {
        iterations += 1;
        let dangling_sum: f64 = neighbors
            .iter()
            .zip(&scores)
            .filter(|(nbrs, _)| nbrs.is_empty())
            .map(|(_, &s)| s)
            .sum();
        new_scores.fill(teleport + config.damping * dangling_sum / n_f64);

        for (u, nbrs) in neighbors.iter().enumerate() {
            if nbrs.is_empty() {
                continue;
            }
            let share = config.damping * scores[u] / nbrs.len() as f64;
            for &v in nbrs {
                new_scores[v] += share;
            }
        }

        delta = scores
            .iter()
            .zip(new_scores.iter())
            .map(|(old, new)| (old - new).abs())
            .fold(0.0, f64::max);
        std::mem::swap(&mut scores, &mut new_scores);
        if delta < config.tolerance {
            converged = true;
            break;
        }
    }
    debug!(nodes = n, iterations, delta, converged, "power iteration finished");
    PageRankRun { scores, iterations, delta, converged }
}

/// Validated power iteration: errors on a bad config, an empty graph, a neighbor id outside
/// the graph, or non-convergence.
pub fn pagerank_checked<G: Graph>(graph: &G, config: PageRankConfig) -> Result<PageRankRun> {
    config.validate()?;
    if graph.node_count() == 0 {
        return Err(Error::EmptyGraph);
    }
    check_neighbors(graph)?;
    let run = pagerank_run(graph, config);
    if !run.converged {
        warn!(iterations = run.iterations, delta = run.delta, "power iteration did not converge");
        return Err(Error::NonConvergence { iterations: run.iterations, delta: run.delta });
    }
    Ok(run)
}

/// PageRank of every page in `graph`, computed deterministically.
pub fn iterate_pagerank(graph: &LinkGraph, config: PageRankConfig) -> Result<Distribution> {
    let run = pagerank_checked(graph, config)?;
    Ok(Distribution::from_scores(graph, &run.scores))
}
