use super::{traits::check_start, transition::fill_transitions, *};
use crate::*;
use algograph::graph::VertexId;
use std::{cell::RefCell, collections::HashMap};
use tracing::debug;

/// Estimates page rank by the visit frequencies of a random walk.
///
/// The walk is one Markov chain: every step depends on the page the previous
/// step picked, so draws are taken strictly in sequence from `source`.
pub struct SampledPageRank<'a, S>
where
    S: UniformSource,
{
    graph: &'a LinkGraph,
    damping: f64,
    samples: usize,
    row: RefCell<Vec<(VertexId, f64)>>,
    source: RefCell<S>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub damping: f64,
    pub samples: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            damping: DAMPING,
            samples: SAMPLES,
        }
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        check_damping(self.damping)?;
        if self.samples == 0 {
            return Err(Error::invalid("samples must be > 0"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct Output {
    pub page_rank: HashMap<VertexId, f64, ahash::RandomState>,
    pub visits: HashMap<VertexId, usize, ahash::RandomState>,
}

impl<'a, S: UniformSource> SampledPageRank<'a, S> {
    pub fn new(g: &'a LinkGraph, config: &Config, source: S) -> Result<Self> {
        config.validate()?;
        if g.is_empty() {
            return Err(Error::invalid("graph has no pages"));
        }
        Ok(Self {
            graph: g,
            damping: config.damping,
            samples: config.samples,
            row: RefCell::new(Vec::with_capacity(g.len())),
            source: RefCell::new(source),
        })
    }

    fn draw(&self, items: &[(VertexId, f64)]) -> Result<VertexId> {
        let x = self.source.borrow_mut().next_uniform();
        if !(0.0..1.0).contains(&x) {
            return Err(Error::invalid(format!("uniform draw {x} is not in [0,1)")));
        }
        weighted_choice(items, x).ok_or_else(|| Error::invalid("nothing to choose from"))
    }
}

impl<S: UniformSource> PageRank for SampledPageRank<'_, S> {
    type Output = self::Output;

    fn calc(&self, start: &HashMap<VertexId, f64, ahash::RandomState>) -> Result<Self::Output> {
        check_start(self.graph, start)?;
        let mut visits: HashMap<_, _, ahash::RandomState> =
            self.graph.pages().map(|v| (v, 0usize)).collect();

        let first: Vec<(VertexId, f64)> = self
            .graph
            .pages()
            .map(|v| (v, start.get(&v).copied().unwrap_or(0.0)))
            .collect();
        let mut cur = self.draw(&first)?;
        *visits.entry(cur).or_default() += 1;

        let mut row = self.row.borrow_mut();
        for _ in 1..self.samples {
            fill_transitions(self.graph, cur, self.damping, &mut row);
            cur = self.draw(&row)?;
            *visits.entry(cur).or_default() += 1;
        }

        let n = self.samples as f64;
        let page_rank = visits.iter().map(|(v, c)| (*v, *c as f64 / n)).collect();
        debug!(samples = self.samples, pages = self.graph.len(), "walk finished");
        Ok(Self::Output { page_rank, visits })
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
            let c = self.output.visits.get(&v).copied().unwrap_or_default();
            writeln!(f, "{name}: {p:.4}, {c}")?;
        }
        Ok(())
    }
}

pub fn sample_rank(graph: &LinkGraph, damping: f64, n: usize) -> Result<RankMapping> {
    sample_rank_with(graph, damping, n, RngSource(rand::rng()))
}

pub fn sample_rank_with<S: UniformSource>(
    graph: &LinkGraph,
    damping: f64,
    n: usize,
    source: S,
) -> Result<RankMapping> {
    let config = Config {
        damping,
        samples: n,
    };
    let spr = SampledPageRank::new(graph, &config, source)?;
    let out = spr.calc(&graph.uniform())?;
    Ok(out.ranks(graph))
}
