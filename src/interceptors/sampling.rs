//! Record sampling for high-volume scenarios
//!
//! A [`Sampler`] is a middleware layer that lets a random fraction of records
//! through and suppresses the rest, so suppressed records never reach any
//! handler. Configured levels bypass sampling entirely.
//!
//! # Example
//!
//! ```
//! use rust_xlog::prelude::*;
//!
//! let logger = Logger::builder()
//!     .middleware(Sampler::new(0.1).with_category_rate("audit", 1.0))
//!     .build();
//! ```

use crate::core::{Context, Level, Middleware, Next, Params};
use rand::Rng;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

/// Field or context key that selects a per-category rate
pub const CATEGORY_KEY: &str = "category";

/// Counters for sampling observability
#[derive(Debug)]
pub struct SamplerMetrics {
    sampled_count: AtomicU64,
    dropped_count: AtomicU64,
}

impl SamplerMetrics {
    pub const fn new() -> Self {
        Self {
            sampled_count: AtomicU64::new(0),
            dropped_count: AtomicU64::new(0),
        }
    }

    /// Records that passed sampling
    #[inline]
    pub fn sampled_count(&self) -> u64 {
        self.sampled_count.load(Ordering::Relaxed)
    }

    /// Records suppressed by sampling
    #[inline]
    pub fn dropped_count(&self) -> u64 {
        self.dropped_count.load(Ordering::Relaxed)
    }

    /// Observed pass ratio; 1.0 before anything was seen
    pub fn effective_sample_rate(&self) -> f64 {
        let sampled = self.sampled_count() as f64;
        let total = sampled + self.dropped_count() as f64;
        if total == 0.0 {
            1.0
        } else {
            sampled / total
        }
    }

    pub fn reset(&self) {
        self.sampled_count.store(0, Ordering::Relaxed);
        self.dropped_count.store(0, Ordering::Relaxed);
    }
}

impl Default for SamplerMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Random sampling middleware
#[derive(Debug)]
pub struct Sampler {
    rate: f64,
    always_sample: Vec<Level>,
    category_rates: HashMap<String, f64>,
    metrics: SamplerMetrics,
}

impl Sampler {
    /// Keep `rate` (0.0 to 1.0) of records; ERROR, PANIC and FATAL always pass
    pub fn new(rate: f64) -> Self {
        Self {
            rate: rate.clamp(0.0, 1.0),
            always_sample: vec![Level::Error, Level::Panic, Level::Fatal],
            category_rates: HashMap::new(),
            metrics: SamplerMetrics::new(),
        }
    }

    /// Replace the levels that bypass sampling
    #[must_use]
    pub fn with_always_sample(mut self, levels: Vec<Level>) -> Self {
        self.always_sample = levels;
        self
    }

    /// Use `rate` for records whose [`CATEGORY_KEY`] is `category`
    #[must_use]
    pub fn with_category_rate(mut self, category: impl Into<String>, rate: f64) -> Self {
        self.category_rates.insert(category.into(), rate.clamp(0.0, 1.0));
        self
    }

    pub fn rate(&self) -> f64 {
        self.rate
    }

    pub fn metrics(&self) -> &SamplerMetrics {
        &self.metrics
    }

    /// Decide whether a record passes, updating the counters
    pub fn should_sample(&self, level: Level, category: Option<&str>) -> bool {
        let sample = if self.always_sample.contains(&level) {
            true
        } else {
            let rate = category
                .and_then(|c| self.category_rates.get(c).copied())
                .unwrap_or(self.rate);
            if rate >= 1.0 {
                true
            } else if rate <= 0.0 {
                false
            } else {
                rand::thread_rng().gen::<f64>() < rate
            }
        };

        let counter = if sample {
            &self.metrics.sampled_count
        } else {
            &self.metrics.dropped_count
        };
        counter.fetch_add(1, Ordering::Relaxed);
        sample
    }

    /// The record's category: its own field first, then the context
    fn category<'a>(ctx: &'a Context, params: &'a Params) -> Option<&'a str> {
        params
            .fields
            .chunks(2)
            .find_map(|pair| match pair {
                [key, value] if key.as_str() == Some(CATEGORY_KEY) => value.as_str(),
                _ => None,
            })
            .or_else(|| ctx.value(CATEGORY_KEY).and_then(|v| v.as_str()))
    }
}

impl Middleware for Sampler {
    fn handle(&self, ctx: &Context, params: &mut Params, next: Next<'_>) {
        if self.should_sample(params.level, Self::category(ctx, params)) {
            next.run(ctx, params);
        }
    }
}
