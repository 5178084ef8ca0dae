use crate::*;
use algograph::graph::VertexId;

/// Probability of visiting each page next, given the current `page`.
///
/// A sink teleports uniformly and ignores `damping`. Any other page jumps
/// uniformly with probability `1 - damping` and follows one of its links with
/// probability `damping`.
pub fn transition(graph: &LinkGraph, page: &str, damping: f64) -> Result<Distribution> {
    check_damping(damping)?;
    let u = graph.lookup(page)?;
    let dist = transitions_from(graph, u, damping);
    Ok(dist
        .into_iter()
        .filter_map(|(v, w)| graph.name(v).map(|name| (name.to_string(), w)))
        .collect())
}

pub(crate) fn transitions_from(
    graph: &LinkGraph,
    u: VertexId,
    damping: f64,
) -> Vec<(VertexId, f64)> {
    let mut dist = Vec::with_capacity(graph.len());
    fill_transitions(graph, u, damping, &mut dist);
    dist
}

pub(crate) fn fill_transitions(
    graph: &LinkGraph,
    u: VertexId,
    damping: f64,
    dist: &mut Vec<(VertexId, f64)>,
) {
    let n = graph.len() as f64;
    let out = graph.out_degree(u);
    dist.clear();
    if out == 0 {
        dist.extend(graph.pages().map(|v| (v, 1.0 / n)));
        return;
    }
    dist.extend(graph.pages().map(|v| (v, (1.0 - damping) / n)));
    let unit = damping / (out as f64);
    for v in graph.links(u) {
        if let Some(i) = graph.position(v) {
            dist[i].1 += unit;
        }
    }
}
