use crate::*;
use algograph::graph::VertexId;
use std::collections::HashMap;

pub trait PageRank {
    type Output: PageRankResult;

    fn calc(&self, start: &HashMap<VertexId, f64, ahash::RandomState>) -> Result<Self::Output>;
}

pub trait PageRankResult {
    fn page_rank(&self) -> &HashMap<VertexId, f64, ahash::RandomState>;
    fn debug<'a>(&'a self, graph: &'a LinkGraph) -> impl std::fmt::Debug + 'a;

    fn ranks(&self, graph: &LinkGraph) -> RankMapping {
        graph.to_named(self.page_rank())
    }
}

pub(crate) fn check_start(
    graph: &LinkGraph,
    start: &HashMap<VertexId, f64, ahash::RandomState>,
) -> Result<()> {
    for (v, w) in start.iter() {
        if graph.name(*v).is_none() {
            return Err(Error::invalid(format!("start holds unknown vertex {v:?}")));
        }
        if !w.is_finite() || *w < 0.0 {
            return Err(Error::invalid(format!("start weight {w} of {v:?}")));
        }
    }
    let sum = norm_1(start);
    if (sum - 1.0).abs() >= 1e-7 {
        return Err(Error::invalid(format!("start sums to {sum}")));
    }
    Ok(())
}
