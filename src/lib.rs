//! `linkrank`: PageRank for small, closed hyperlink graphs.
//!
//! Two independent estimators of the same stationary distribution:
//! - [`sample_pagerank`]: a random surfer walks the graph and visit counts are normalized.
//! - [`iterate_pagerank`]: the PageRank recurrence is applied until every page is stable.
//!
//! Both are driven by the same single-step [`transition_model`].
//!
//! Public invariants (must not drift):
//! - **Page order**: [`LinkGraph`] stores pages sorted by id; node index `i` is the `i`-th
//!   page in that order, and every `Vec<f64>` score vector follows it.
//! - **Closed graph**: no self-links, no links leaving the page set.
//! - **Determinism**: the iterative estimator is deterministic; the sampler is deterministic
//!   given a seed (or an injected `Rng`).
//! - **Full precision**: rounding to 4 decimals happens only in [`Distribution`]'s `Display`.

pub mod crawl;
pub mod distribution;
pub mod graph;
pub mod pagerank;
pub mod random_walk;
pub mod topk;
pub mod transition;

pub use crawl::{crawl, extract_links};
pub use distribution::Distribution;
pub use graph::{Graph, LinkGraph};
pub use pagerank::{iterate_pagerank, pagerank_checked, pagerank_run, PageRankConfig, PageRankRun};
pub use random_walk::{
    sample_pagerank, sample_pagerank_with_rng, sample_scores, SamplingConfig,
};
pub use topk::{normalize, top_k};
pub use transition::{transition_model, transition_probabilities};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("graph has no pages")]
    EmptyGraph,
    #[error("unknown page: {0}")]
    UnknownPage(String),
    #[error("index out of bounds: {0}")]
    IndexOutOfBounds(usize),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("no convergence after {iterations} iterations (max delta {delta})")]
    NonConvergence { iterations: usize, delta: f64 },
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("walk directory error: {0}")]
    WalkDir(#[from] walkdir::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Shared check for damping factors: finite and within `[0, 1]`.
pub(crate) fn validate_damping(damping: f64) -> Result<()> {
    if !damping.is_finite() || !(0.0..=1.0).contains(&damping) {
        return Err(Error::InvalidParameter(format!(
            "damping must be in [0, 1] (got {damping})"
        )));
    }
    Ok(())
}
