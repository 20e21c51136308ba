//! Middleware that attaches structured fields

use crate::core::{Context, Middleware, Next, Params, Value};

/// Prepends a fixed key/value list to every record's fields
///
/// # Example
///
/// ```
/// use rust_xlog::prelude::*;
///
/// let service = StaticFields::new(values!["service", "billing", "version", 3]);
/// let logger = Logger::builder().middleware(service).build();
/// ```
#[derive(Debug, Clone)]
pub struct StaticFields {
    fields: Vec<Value>,
}

impl StaticFields {
    pub fn new(fields: Vec<Value>) -> Self {
        Self { fields }
    }
}

impl Middleware for StaticFields {
    fn handle(&self, ctx: &Context, params: &mut Params, next: Next<'_>) {
        if !self.fields.is_empty() {
            params.fields.splice(0..0, self.fields.iter().cloned());
        }
        next.run(ctx, params);
    }
}

/// Copies named context values into the record's fields
///
/// Keys absent from the context are skipped.
#[derive(Debug, Clone)]
pub struct ContextFields {
    keys: Vec<String>,
}

impl ContextFields {
    pub fn new<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self {
            keys: keys.into_iter().map(Into::into).collect(),
        }
    }
}

impl Middleware for ContextFields {
    fn handle(&self, ctx: &Context, params: &mut Params, next: Next<'_>) {
        for key in &self.keys {
            if let Some(value) = ctx.value(key) {
                params.fields.push(Value::from(key.as_str()));
                params.fields.push(value.clone());
            }
        }
        next.run(ctx, params);
    }
}
