//! Key-collision clustering.
//!
//! Values whose normalized keys are equal fall into the same cluster. The
//! aggregation step is a commutative merge of [`PartialClusters`], so the
//! per-value work can be fanned out with rayon and folded back by key.

mod aggregator;
mod key_collision;

pub use self::aggregator::{ClusterAggregator, PartialClusters};
pub use self::key_collision::KeyCollision;
