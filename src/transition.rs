//! Random-surfer transition model.
//!
//! From a page with outlinks, the surfer follows one of them uniformly with probability
//! `damping` and otherwise jumps to any page uniformly:
//! \[
//!   P(u \to v) = \frac{1 - d}{N} + d \cdot \frac{[u \to v]}{L(u)}
//! \]
//! From a dangling page there is nothing to follow, so the jump is uniform over all pages
//! and `damping` plays no part.

use crate::distribution::Distribution;
use crate::graph::{Graph, LinkGraph};
use crate::{validate_damping, Error, Result};

/// Next-page probabilities from node `node`, indexed by node.
pub fn transition_probabilities<G: Graph>(graph: &G, node: usize, damping: f64) -> Result<Vec<f64>> {
    validate_damping(damping)?;
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::EmptyGraph);
    }
    if node >= n {
        return Err(Error::IndexOutOfBounds(node));
    }
    let n_f64 = n as f64;
    let links = graph.neighbors(node);
    if links.is_empty() {
        return Ok(vec![1.0 / n_f64; n]);
    }
    let mut probs = vec![(1.0 - damping) / n_f64; n];
    let share = damping / links.len() as f64;
    for v in links {
        *probs.get_mut(v).ok_or(Error::IndexOutOfBounds(v))? += share;
    }
    Ok(probs)
}

/// Where the surfer goes next from `page`.
pub fn transition_model(graph: &LinkGraph, page: &str, damping: f64) -> Result<Distribution> {
    if graph.is_empty() {
        return Err(Error::EmptyGraph);
    }
    let node = graph
        .index_of(page)
        .ok_or_else(|| Error::UnknownPage(page.to_string()))?;
    let probs = transition_probabilities(graph, node, damping)?;
    Ok(Distribution::from_scores(graph, &probs))
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
    fn follows_links_with_damping() {
        let d = transition_model(&corpus(), "2.html", 0.85).unwrap();
        let jump = 0.15 / 4.0;
        assert!((d.get("1.html").unwrap() - (jump + 0.425)).abs() < 1e-12);
        assert!((d.get("2.html").unwrap() - jump).abs() < 1e-12);
        assert!((d.get("3.html").unwrap() - (jump + 0.425)).abs() < 1e-12);
        assert!((d.get("4.html").unwrap() - jump).abs() < 1e-12);
        assert!((d.total() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn dangling_page_is_uniform_for_any_damping() {
        for damping in [0.0, 0.5, 0.85, 1.0] {
            let d = transition_model(&corpus(), "4.html", damping).unwrap();
            for (_, p) in d.iter() {
                assert!((p - 0.25).abs() < 1e-12);
            }
        }
    }

    #[test]
    fn single_page_is_certain() {
        let g = LinkGraph::from_links([("only", vec!["only"])]);
        for damping in [0.0, 0.85, 1.0] {
            let d = transition_model(&g, "only", damping).unwrap();
            assert_eq!(d.get("only"), Some(1.0));
        }
    }

    #[test]
    fn rejects_unknown_page_and_empty_graph() {
        let err = transition_model(&corpus(), "missing.html", 0.85).unwrap_err();
        assert!(matches!(err, Error::UnknownPage(ref p) if p == "missing.html"));

        let err = transition_model(&LinkGraph::default(), "a", 0.85).unwrap_err();
        assert!(matches!(err, Error::EmptyGraph));

        let err = transition_probabilities(&corpus(), 4, 0.85).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds(4)));
    }

    struct Stray;

    impl Graph for Stray {
        fn node_count(&self) -> usize {
            2
        }
        fn neighbors(&self, node: usize) -> Vec<usize> {
            if node == 0 { vec![1, 7] } else { Vec::new() }
        }
    }

    #[test]
    fn neighbor_outside_graph_is_an_error() {
        let err = transition_probabilities(&Stray, 0, 0.85).unwrap_err();
        assert!(matches!(err, Error::IndexOutOfBounds(7)));
        // Dangling node never looks at neighbor ids.
        assert_eq!(transition_probabilities(&Stray, 1, 0.85).unwrap(), vec![0.5, 0.5]);
    }

    #[test]
    fn rejects_bad_damping() {
        for damping in [-0.1, 1.5, f64::NAN] {
            let err = transition_model(&corpus(), "1.html", damping).unwrap_err();
            assert!(format!("{err}").contains("damping"));
        }
    }
}
