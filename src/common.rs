use crate::{Error, Result};
use algograph::graph::VertexId;
use std::{collections::HashMap, hash::Hash};

pub const DAMPING: f64 = 0.85;
pub const SAMPLES: usize = 10_000;
pub const EPSILON: f64 = 0.001;

/// Page name to rank.
pub type RankMapping = HashMap<String, f64, ahash::RandomState>;
/// Page name to the probability of visiting it next.
pub type Distribution = HashMap<String, f64, ahash::RandomState>;

pub fn norm_1<K: Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).sum()
}

pub fn norm_inf<K: Hash>(v: &HashMap<K, f64, ahash::RandomState>) -> f64 {
    v.values().map(|x| x.abs()).fold(0.0, f64::max)
}

pub fn check_damping(damping: f64) -> Result<()> {
    if !damping.is_finite() || !(0.0..=1.0).contains(&damping) {
        return Err(Error::invalid(format!("damping={damping} is not in [0,1]")));
    }
    Ok(())
}

/// Source of uniform draws in `[0, 1)`.
pub trait UniformSource {
    fn next_uniform(&mut self) -> f64;
}

/// Adapts a `rand` generator.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: rand::Rng> UniformSource for RngSource<R> {
    fn next_uniform(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

impl<S: UniformSource + ?Sized> UniformSource for &mut S {
    fn next_uniform(&mut self) -> f64 {
        (**self).next_uniform()
    }
}

/// Cumulative-weight selection.
///
/// `draw` is scaled to the total weight, then the running sum is walked in the
/// order of `items`. Identical `items` and `draw` always select the same vertex.
/// Returns `None` when no item carries positive weight.
pub fn weighted_choice(items: &[(VertexId, f64)], draw: f64) -> Option<VertexId> {
    let total: f64 = items.iter().map(|(_, w)| *w).sum();
    let target = draw * total;
    let mut acc = 0.0f64;
    for (v, w) in items.iter() {
        acc += *w;
        if target < acc {
            return Some(*v);
        }
    }
    // rounding may leave `target` just above the last partial sum
    items.iter().rev().find(|(_, w)| *w > 0.0).map(|(v, _)| *v)
}
