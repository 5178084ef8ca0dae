//! PageRank estimators over a [`LinkGraph`](crate::LinkGraph).

mod traits;
pub use self::traits::*;
pub mod iterated;
pub use self::iterated::{iterate_rank, IteratedPageRank};
pub mod sampled;
pub use self::sampled::{sample_rank, sample_rank_with, SampledPageRank};
pub mod transition;
pub use self::transition::transition;
