//! Synthetic bin packing instances.
//!
//! Instances are drawn from a seeded PRNG so that every benchmark run with
//! the same configuration sees byte-identical weight vectors. The seed of a
//! unit is a pure function of its size and repetition index, see
//! [`instance_seed`].

mod generator;
mod types;

pub use generator::{instance_name, instance_seed, InstanceGenerator, DEFAULT_WEIGHT_RANGE};
pub use types::Instance;
