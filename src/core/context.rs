//! Cancellation-context token threaded through middleware and handlers
//!
//! The dispatch core never inspects the token; it only hands it on. Middleware
//! may read request-scoped values from it and handlers may honour cancellation.

use super::value::Value;
use std::collections::HashMap;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Request-scoped token carrying a cancellation flag and immutable values
///
/// Cloning is cheap: clones share the cancellation flag and the value map.
/// A derived context sees its ancestors' cancellation, never the reverse.
///
/// # Example
///
/// ```
/// use rust_xlog::Context;
///
/// let ctx = Context::background().with_value("request_id", "abc-123");
/// assert_eq!(ctx.value("request_id").and_then(|v| v.as_str()), Some("abc-123"));
///
/// let child = ctx.with_value("user_id", 42);
/// ctx.cancel();
/// assert!(child.is_cancelled());
/// ```
#[derive(Clone, Default)]
pub struct Context {
    values: Arc<HashMap<String, Value>>,
    cancel: Arc<CancelFlag>,
}

/// One link in a chain of cancellation flags, child to root
#[derive(Default)]
struct CancelFlag {
    cancelled: AtomicBool,
    parent: Option<Arc<CancelFlag>>,
}

impl CancelFlag {
    fn child_of(parent: &Arc<CancelFlag>) -> Self {
        Self {
            cancelled: AtomicBool::new(false),
            parent: Some(Arc::clone(parent)),
        }
    }

    fn is_set(&self) -> bool {
        let mut link = Some(self);
        while let Some(flag) = link {
            if flag.cancelled.load(Ordering::Acquire) {
                return true;
            }
            link = flag.parent.as_deref();
        }
        false
    }
}

impl Context {
    /// An empty, never-cancelled context
    pub fn background() -> Self {
        Self::default()
    }

    /// Derive a context holding one more value
    ///
    /// The derived context is cancelled along with `self`; cancelling it
    /// leaves `self` untouched.
    #[must_use]
    pub fn with_value<K, V>(&self, key: K, value: V) -> Self
    where
        K: Into<String>,
        V: Into<Value>,
    {
        let mut values = (*self.values).clone();
        values.insert(key.into(), value.into());
        Self {
            values: Arc::new(values),
            cancel: Arc::new(CancelFlag::child_of(&self.cancel)),
        }
    }

    pub fn value(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    /// Mark this context, and every context derived from it, as cancelled
    pub fn cancel(&self) {
        self.cancel.cancelled.store(true, Ordering::Release);
    }

    #[inline]
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_set()
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("values", &self.values)
            .field("cancelled", &self.is_cancelled())
            .finish()
    }
}
