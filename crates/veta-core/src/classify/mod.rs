pub mod engine;

pub use engine::{partition, tier_of, TierPartition};
