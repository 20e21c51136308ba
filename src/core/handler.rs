//! Handler trait for record output

use super::{context::Context, params::Params};

/// Output sink for finished records
///
/// Handlers are invoked concurrently from any thread that logs, so they take
/// `&self` and guard their own resources. They decide for themselves whether a
/// record's level is worth emitting, and they have no error channel: a handler
/// that cannot write reports it out of band.
pub trait Handler: Send + Sync {
    fn log(&self, ctx: &Context, params: &Params);

    /// Push out anything buffered
    fn flush(&self) {}

    fn name(&self) -> &str {
        "handler"
    }
}

impl<F> Handler for F
where
    F: Fn(&Context, &Params) + Send + Sync,
{
    fn log(&self, ctx: &Context, params: &Params) {
        self(ctx, params)
    }

    fn name(&self) -> &str {
        "fn"
    }
}
