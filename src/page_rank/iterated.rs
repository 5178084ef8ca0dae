use super::{traits::check_start, *};
use crate::*;
use algograph::graph::VertexId;
use std::collections::{BTreeMap, HashMap};
use tracing::{debug, trace};

/// Solves page rank by synchronous fixed-point rounds.
///
/// Sinks are resolved up front through [`LinkGraph::normalize_sinks`], so the
/// solver owns a normalized copy and the caller's graph is never touched.
pub struct IteratedPageRank {
    graph: LinkGraph,
    damping: f64,
    epsilon: f64,
    max_rounds: usize,
    transitions: BTreeMap<(VertexId, VertexId), f64>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    /// Largest per-page change that still counts as converged.
    pub epsilon: f64,
    pub max_rounds: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            epsilon: EPSILON,
            max_rounds: 10_000,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if !self.epsilon.is_finite() || self.epsilon <= 0.0 {
            return Err(Error::invalid(format!("epsilon={}", self.epsilon)));
        }
        if self.max_rounds == 0 {
            return Err(Error::invalid("max_rounds must be > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Output {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub delta: HashMap<VertexId, f64, ahash::RandomState>,
    pub rounds: usize,
}

impl IteratedPageRank {
    pub fn new(g: &LinkGraph, config: &Config) -> Result<Self> {
        config.validate()?;
        if g.is_empty() {
            return Err(Error::invalid("graph has no pages"));
        }
        let damping = config.damping;
        let graph = g.normalize_sinks();
        let transitions = {
            let mut transitions = BTreeMap::new();
            for u in graph.pages() {
                let unit = damping / (graph.out_degree(u) as f64);
                for v in graph.links(u) {
                    if let Some(w) = transitions.get_mut(&(u, v)) {
                        *w += unit;
                    } else {
                        transitions.insert((u, v), unit);
                    }
                }
            }
            transitions
        };
        Ok(Self {
            graph,
            damping,
            epsilon: config.epsilon,
            max_rounds: config.max_rounds,
            transitions,
        })
    }

    pub fn graph(&self) -> &LinkGraph {
        &self.graph
    }
}

impl PageRank for IteratedPageRank {
    type Output = self::Output;

    fn calc(&self, start: &HashMap<VertexId, f64, ahash::RandomState>) -> Result<Self::Output> {
        check_start(&self.graph, start)?;
        let teleport = (1.0 - self.damping) / (self.graph.len() as f64);
        let mut p: HashMap<_, _, ahash::RandomState> = self
            .graph
            .pages()
            .map(|v| (v, start.get(&v).copied().unwrap_or(0.0)))
            .collect();
        let mut r = HashMap::with_hasher(ahash::RandomState::new());
        let mut delta = HashMap::with_hasher(ahash::RandomState::new());
        for round in 1..=self.max_rounds {
            for v in self.graph.pages() {
                r.insert(v, teleport);
            }
            for ((v0, v1), w) in self.transitions.iter() {
                let from = p[v0];
                if let Some(to) = r.get_mut(v1) {
                    *to += from * w;
                }
            }

            delta.clear();
            for v in self.graph.pages() {
                delta.insert(v, r[&v] - p[&v]);
            }

            let max_delta = norm_inf(&delta);
            trace!(round, max_delta, "page rank round");
            if max_delta <= self.epsilon {
                debug!(rounds = round, max_delta, "page rank converged");
                let sum: f64 = r.values().sum();
                if sum > 0.0 {
                    r.values_mut().for_each(|x| *x /= sum);
                }
                return Ok(Self::Output {
                    page_rank: r,
                    delta,
                    rounds: round,
                });
            }

            std::mem::swap(&mut p, &mut r);
            r.clear();
        }
        Err(Error::NotConverged {
            rounds: self.max_rounds,
            max_delta: norm_inf(&delta),
        })
    }
}

impl PageRankResult for self::Output {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState> {
        &self.page_rank
    }

    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a {
        OutputDebug {
            graph,
            output: self,
        }
    }
}

pub struct OutputDebug<'a> {
    graph: &'a LinkGraph,
    output: &'a self::Output,
}

impl std::fmt::Debug for OutputDebug<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for v in self.graph.pages() {
            let name = self.graph.name(v).unwrap_or_default();
            let p = self.output.page_rank.get(&v).copied().unwrap_or_default();
            let d = self.output.delta.get(&v).copied().unwrap_or_default();
            writeln!(f, "{name}: {p:.4}, {d:?}")?;
        }
        Ok(())
    }
}

pub fn iterate_rank(graph: &LinkGraph, damping: f64) -> Result<RankMapping> {
    let config = Config {
        damping,
        ..Config::default()
    };
    let ipr = IteratedPageRank::new(graph, &config)?;
    let out = ipr.calc(&ipr.graph().uniform())?;
    Ok(out.ranks(ipr.graph()))
}
