mod aggregator;
mod batch_planner;
mod normalizer;

pub use aggregator::ResultAggregator;
pub use batch_planner::{Batch, BatchPlanner};
pub use normalizer::Normalizer;
