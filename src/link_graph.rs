//! The directed link graph both estimators read.

use crate::*;
use algograph::graph::{directed, GrowableGraph, QueryableGraph, VertexId};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use tracing::debug;

/// Pages and the set of pages each one links to.
///
/// Vertices are allocated in ascending page-name order and [`LinkGraph::pages`]
/// yields them in that order. Everything that walks the page set (transition
/// distributions, weighted choice, debug output) relies on it being stable.
#[derive(Debug, Clone)]
pub struct LinkGraph {
    graph: directed::TreeBackedGraph,
    pages: Vec<VertexId>,
    ids: BTreeMap<String, VertexId>,
    names: HashMap<VertexId, String, ahash::RandomState>,
    positions: HashMap<VertexId, usize, ahash::RandomState>,
}

impl LinkGraph {
    /// Builds a graph from `(page, links)` pairs.
    ///
    /// Repeated links collapse into one edge. Links to a name that is not a
    /// page of the graph are dropped.
    pub fn from_links<I, P, L>(pages: I) -> Self
    where
        I: IntoIterator<Item = (P, L)>,
        P: AsRef<str>,
        L: IntoIterator,
        L::Item: AsRef<str>,
    {
        let mut adjacency: BTreeMap<String, BTreeSet<String>> = BTreeMap::new();
        for (page, links) in pages {
            let out = adjacency.entry(page.as_ref().to_string()).or_default();
            out.extend(links.into_iter().map(|x| x.as_ref().to_string()));
        }
        Self::from_adjacency(&adjacency)
    }

    fn from_adjacency(adjacency: &BTreeMap<String, BTreeSet<String>>) -> Self {
        let mut graph = directed::TreeBackedGraph::new();
        let mut pages = Vec::with_capacity(adjacency.len());
        let mut ids = BTreeMap::new();
        let mut names = HashMap::with_hasher(ahash::RandomState::new());
        let mut positions = HashMap::with_hasher(ahash::RandomState::new());
        for name in adjacency.keys() {
            let v = graph.add_vertex();
            positions.insert(v, pages.len());
            pages.push(v);
            ids.insert(name.clone(), v);
            names.insert(v, name.clone());
        }
        let mut dropped = 0usize;
        for (name, links) in adjacency.iter() {
            let u = ids[name];
            for link in links.iter() {
                if let Some(v) = ids.get(link) {
                    graph.add_edge(u, *v);
                } else {
                    dropped += 1;
                }
            }
        }
        debug!(
            pages = pages.len(),
            links = graph.edge_size(),
            dropped,
            "link graph built"
        );
        Self {
            graph,
            pages,
            ids,
            names,
            positions,
        }
    }

    /// Returns an equivalent graph in which every sink links to every page,
    /// itself included. `self` is left as it was, and vertex ids carry over.
    pub fn normalize_sinks(&self) -> Self {
        let mut res = self.clone();
        let sinks: Vec<_> = self.pages().filter(|u| self.is_sink(*u)).collect();
        for u in sinks.iter() {
            for v in self.pages() {
                res.graph.add_edge(*u, v);
            }
        }
        debug!(sinks = sinks.len(), "sinks normalized");
        res
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn contains(&self, page: &str) -> bool {
        self.ids.contains_key(page)
    }

    pub fn pages(&self) -> impl Iterator<Item = VertexId> + '_ {
        self.pages.iter().copied()
    }

    pub fn vertex(&self, page: &str) -> Option<VertexId> {
        self.ids.get(page).copied()
    }

    pub fn name(&self, v: VertexId) -> Option<&str> {
        self.names.get(&v).map(|x| x.as_str())
    }

    pub(crate) fn lookup(&self, page: &str) -> Result<VertexId> {
        self.vertex(page)
            .ok_or_else(|| Error::invalid(format!("page {page:?} is not in the graph")))
    }

    pub fn out_degree(&self, v: VertexId) -> usize {
        self.graph.out_edges(&v).count()
    }

    pub fn is_sink(&self, v: VertexId) -> bool {
        self.graph.out_edges(&v).next().is_none()
    }

    pub fn links(&self, v: VertexId) -> impl Iterator<Item = VertexId> + '_ {
        self.graph.out_edges(&v).map(|e| e.sink)
    }

    pub fn links_of(&self, page: &str) -> Result<Vec<&str>> {
        let u = self.lookup(page)?;
        let mut res: Vec<&str> = self.links(u).filter_map(|v| self.name(v)).collect();
        res.sort_unstable();
        Ok(res)
    }

    pub fn position(&self, v: VertexId) -> Option<usize> {
        self.positions.get(&v).copied()
    }

    pub fn uniform(&self) -> HashMap<VertexId, f64, ahash::RandomState> {
        let n = self.len() as f64;
        self.pages().map(|v| (v, 1.0 / n)).collect()
    }

    pub fn to_named(&self, v: &HashMap<VertexId, f64, ahash::RandomState>) -> RankMapping {
        v.iter()
            .filter_map(|(u, x)| self.name(*u).map(|name| (name.to_string(), *x)))
            .collect()
    }
}
