//! Link extraction from a directory of HTML pages.
//!
//! Only `<a ... href="...">` anchors with double-quoted targets are recognized. Targets are
//! compared verbatim against file names in the corpus directory, so anything that is not a
//! sibling `*.html` file (absolute URLs, subdirectories, fragments) falls out of the graph.

use std::collections::BTreeSet;
use std::path::Path;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::graph::LinkGraph;
use crate::Result;

lazy_static! {
    static ref HREF_RE: Regex = Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).unwrap();
}

/// Raw `href` targets of every anchor in `html`, deduplicated.
pub fn extract_links(html: &str) -> BTreeSet<String> {
    HREF_RE
        .captures_iter(html)
        .filter_map(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Build a [`LinkGraph`] from the `*.html` files directly inside `dir`.
///
/// Each file name is a page; subdirectories are not descended into.
pub fn crawl(dir: &Path) -> Result<LinkGraph> {
    let mut documents: Vec<(String, BTreeSet<String>)> = Vec::new();

    let walker = WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .sort_by_file_name();
    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }
        let name = entry.file_name().to_string_lossy().to_string();
        if !name.ends_with(".html") {
            continue;
        }
        let contents = std::fs::read_to_string(entry.path())?;
        let links = extract_links(&contents);
        debug!(page = %name, links = links.len(), "parsed page");
        documents.push((name, links));
    }

    let graph = LinkGraph::from_links(documents);
    info!(
        dir = %dir.display(),
        pages = graph.page_count(),
        links = graph.edge_count(),
        "crawled corpus"
    );
    Ok(graph)
}
