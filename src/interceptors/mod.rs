//! Ready-made middleware layers

pub mod fields;
pub mod sampling;

pub use fields::{ContextFields, StaticFields};
pub use sampling::{Sampler, SamplerMetrics, CATEGORY_KEY};
