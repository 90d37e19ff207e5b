//! PageRank by random-surfer sampling.
//!
//! The surfer starts on a uniformly random page and takes `samples - 1` steps, each drawn from
//! the [transition model](crate::transition). Visit counts divided by `samples` estimate the
//! stationary distribution that [`crate::pagerank`] computes exactly.

use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution as _;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::distribution::Distribution;
use crate::graph::{Graph, LinkGraph};
use crate::topk::normalize;
use crate::transition::transition_probabilities;
use crate::{validate_damping, Error, Result};

#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SamplingConfig {
    pub damping: f64,
    /// Total pages visited, the starting page included.
    pub samples: usize,
    pub seed: u64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self { damping: 0.85, samples: 10_000, seed: 42 }
    }
}

impl SamplingConfig {
    pub fn validate(&self) -> Result<()> {
        validate_damping(self.damping)?;
        validate_samples(self.samples)
    }
}

fn validate_samples(samples: usize) -> Result<()> {
    if samples == 0 {
        return Err(Error::InvalidParameter("samples must be >= 1".to_string()));
    }
    Ok(())
}

/// Visit frequencies of a `samples`-long random-surfer walk, indexed by node.
pub fn sample_scores<G: Graph, R: Rng>(
    graph: &G,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<Vec<f64>> {
    validate_damping(damping)?;
    validate_samples(samples)?;
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }

    // The transition model depends only on the current node, so build each sampler once.
    let samplers = (0..n)
        .map(|u| {
            let probs = transition_probabilities(graph, u, damping)?;
            WeightedIndex::new(&probs).map_err(|e| {
                Error::InvalidParameter(format!("transition weights for node {u}: {e}"))
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let mut counts = vec![0.0f64; n];
    let mut curr = rng.random_range(0..n);
    counts[curr] += 1.0;
    for _ in 1..samples {
        curr = samplers[curr].sample(rng);
        counts[curr] += 1.0;
    }
    // Counts are exact integers summing to `samples`.
    normalize(&mut counts);
    debug!(nodes = n, samples, "random-surfer sampling finished");
    Ok(counts)
}

/// Sampled PageRank of every page, drawing from the caller's random source.
pub fn sample_pagerank_with_rng<R: Rng>(
    graph: &LinkGraph,
    damping: f64,
    samples: usize,
    rng: &mut R,
) -> Result<Distribution> {
    let scores = sample_scores(graph, damping, samples, rng)?;
    Ok(Distribution::from_scores(graph, &scores))
}

/// Sampled PageRank of every page, seeded from `config.seed`.
pub fn sample_pagerank(graph: &LinkGraph, config: SamplingConfig) -> Result<Distribution> {
    config.validate()?;
    let mut rng = ChaCha8Rng::seed_from_u64(config.seed);
    sample_pagerank_with_rng(graph, config.damping, config.samples, &mut rng)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corpus() -> LinkGraph {
        LinkGraph::from_links([
            ("1.html", vec!["2.html"]),
            ("2.html", vec!["1.html", "3.html"]),
            ("3.html", vec!["2.html", "4.html"]),
            ("4.html", vec![]),
        ])
    }

    #[test]
    fn one_sample_is_the_start_page() {
        let d = sample_pagerank(&corpus(), SamplingConfig { samples: 1, ..Default::default() })
            .unwrap();
        let ones: Vec<f64> = d.iter().map(|(_, p)| p).filter(|&p| p > 0.0).collect();
        assert_eq!(ones, vec![1.0]);
    }

    #[test]
    fn single_page_graph_is_trivial() {
        let g = LinkGraph::from_links([("only", vec!["only", "elsewhere"])]);
        let d = sample_pagerank(&g, SamplingConfig { samples: 500, ..Default::default() }).unwrap();
        assert_eq!(d.get("only"), Some(1.0));
    }

    #[test]
    fn all_dangling_graph_is_valid() {
        let g = LinkGraph::from_links([("a", Vec::<&str>::new()), ("b", vec![]), ("c", vec![])]);
        let d = sample_pagerank(&g, SamplingConfig::default()).unwrap();
        assert_eq!(d.len(), 3);
        assert!((d.total() - 1.0).abs() < 1e-12);
        for (_, p) in d.iter() {
            assert!((p - 1.0 / 3.0).abs() < 0.05);
        }
    }

    #[test]
    fn same_seed_same_result() {
        let config = SamplingConfig { samples: 2_000, seed: 7, ..Default::default() };
        let a = sample_pagerank(&corpus(), config).unwrap();
        let b = sample_pagerank(&corpus(), config).unwrap();
        assert_eq!(a, b);

        let c = sample_pagerank(&corpus(), SamplingConfig { seed: 8, ..config }).unwrap();
        assert_ne!(a, c);
    }

    #[test]
    fn injected_rng_is_used() {
        let mut r1 = ChaCha8Rng::seed_from_u64(3);
        let mut r2 = ChaCha8Rng::seed_from_u64(3);
        let a = sample_pagerank_with_rng(&corpus(), 0.85, 1_000, &mut r1).unwrap();
        let b = sample_pagerank_with_rng(&corpus(), 0.85, 1_000, &mut r2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn rejects_zero_samples_and_empty_graph() {
        let err = sample_pagerank(&corpus(), SamplingConfig { samples: 0, ..Default::default() })
            .unwrap_err();
        assert!(format!("{err}").contains("samples"));

        let err = sample_pagerank(&LinkGraph::default(), SamplingConfig::default()).unwrap_err();
        assert!(matches!(err, Error::EmptyGraph));
    }
}
