//! Interceptor chain around record delivery
//!
//! A chain is an ordered list of layers, outermost first. Dispatch walks the
//! process-wide layers, then the instance layers, then the terminal delivery
//! step. Each layer decides whether to continue by calling [`Next::run`];
//! returning without calling it suppresses everything downstream.
//!
//! Composition prepends: layers registered later wrap everything registered
//! before them, and within one registration call the first layer listed is the
//! outermost.

use super::context::Context;
use super::params::Params;
use parking_lot::RwLock;
use std::fmt;
use std::iter::Chain;
use std::slice::Iter;
use std::sync::{Arc, OnceLock};

/// One interception layer
pub trait Middleware: Send + Sync {
    fn handle(&self, ctx: &Context, params: &mut Params, next: Next<'_>);
}

impl<F> Middleware for F
where
    F: Fn(&Context, &mut Params, Next<'_>) + Send + Sync,
{
    fn handle(&self, ctx: &Context, params: &mut Params, next: Next<'_>) {
        self(ctx, params, next)
    }
}

impl<M: Middleware + ?Sized> Middleware for Arc<M> {
    fn handle(&self, ctx: &Context, params: &mut Params, next: Next<'_>) {
        (**self).handle(ctx, params, next)
    }
}

type Layers<'a> = Chain<Iter<'a, Arc<dyn Middleware>>, Iter<'a, Arc<dyn Middleware>>>;

/// Continuation handed to each layer: the rest of the chain plus delivery
pub struct Next<'a> {
    layers: Layers<'a>,
    terminal: &'a dyn Fn(&Context, &mut Params),
}

impl<'a> Next<'a> {
    /// Continuation over `outer` layers, then `inner` layers, then `terminal`
    pub fn new(
        outer: &'a MiddlewareChain,
        inner: &'a MiddlewareChain,
        terminal: &'a dyn Fn(&Context, &mut Params),
    ) -> Self {
        Self {
            layers: outer.layers.iter().chain(inner.layers.iter()),
            terminal,
        }
    }

    /// Invoke the next layer, or the terminal step once the layers are exhausted
    pub fn run(mut self, ctx: &Context, params: &mut Params) {
        match self.layers.next() {
            Some(layer) => layer.handle(ctx, params, self),
            None => (self.terminal)(ctx, params),
        }
    }
}

/// Composed middleware, stored outermost first
#[derive(Clone, Default)]
pub struct MiddlewareChain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl MiddlewareChain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose `middleware` onto this chain as its new outer layers
    ///
    /// The first element ends up outermost. This is the only composition
    /// function; both the instance and process-wide scopes go through it.
    #[must_use]
    pub fn compose<I>(&self, middleware: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Middleware>>,
    {
        let mut layers: Vec<Arc<dyn Middleware>> = middleware.into_iter().collect();
        layers.extend(self.layers.iter().cloned());
        Self { layers }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }
}

impl fmt::Debug for MiddlewareChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MiddlewareChain")
            .field("layers", &self.layers.len())
            .finish()
    }
}

/// Shared, lock-guarded chain applied by every logger that holds a handle to it
///
/// Registration swaps in a freshly composed chain; loggers take a snapshot per
/// call, so a registration never disturbs a dispatch already in flight.
/// Registration is meant to finish during startup, before concurrent logging.
#[derive(Clone, Default)]
pub struct GlobalChain {
    current: Arc<RwLock<Arc<MiddlewareChain>>>,
}

impl GlobalChain {
    /// A private chain, independent of the process-wide one
    pub fn new() -> Self {
        Self::default()
    }

    /// Compose `middleware` onto the shared chain
    pub fn register<I>(&self, middleware: I)
    where
        I: IntoIterator<Item = Arc<dyn Middleware>>,
    {
        let mut current = self.current.write();
        let composed = current.compose(middleware);
        *current = Arc::new(composed);
    }

    /// The chain as of now
    pub fn snapshot(&self) -> Arc<MiddlewareChain> {
        Arc::clone(&self.current.read())
    }

    pub fn is_empty(&self) -> bool {
        self.current.read().is_empty()
    }
}

impl fmt::Debug for GlobalChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GlobalChain")
            .field("layers", &self.current.read().len())
            .finish()
    }
}

static PROCESS_CHAIN: OnceLock<GlobalChain> = OnceLock::new();

/// The process-wide chain that loggers use unless given their own
pub fn global_chain() -> &'static GlobalChain {
    PROCESS_CHAIN.get_or_init(GlobalChain::new)
}

/// Compose middleware onto the process-wide chain
///
/// There is no way to remove layers again.
///
/// # Example
///
/// ```
/// use rust_xlog::{register_global_middleware, Context, Middleware, Next, Params};
/// use std::sync::Arc;
///
/// let tag: Arc<dyn Middleware> = Arc::new(|ctx: &Context, p: &mut Params, next: Next<'_>| {
///     p.fields.extend(["service".into(), "billing".into()]);
///     next.run(ctx, p);
/// });
/// register_global_middleware([tag]);
/// ```
pub fn register_global_middleware<I>(middleware: I)
where
    I: IntoIterator<Item = Arc<dyn Middleware>>,
{
    global_chain().register(middleware);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level;
    use parking_lot::Mutex;

    fn recorder(name: &'static str, trace: &Arc<Mutex<Vec<String>>>) -> Arc<dyn Middleware> {
        let trace = Arc::clone(trace);
        Arc::new(move |ctx: &Context, params: &mut Params, next: Next<'_>| {
            trace.lock().push(format!("{}:in", name));
            next.run(ctx, params);
            trace.lock().push(format!("{}:out", name));
        })
    }

    fn run(outer: &MiddlewareChain, inner: &MiddlewareChain, trace: &Arc<Mutex<Vec<String>>>) {
        let sink = Arc::clone(trace);
        let terminal = move |_: &Context, _: &mut Params| sink.lock().push("deliver".to_string());
        let mut params = Params::default();
        Next::new(outer, inner, &terminal).run(&Context::background(), &mut params);
    }

    #[test]
    fn test_empty_chain_reaches_terminal() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let empty = MiddlewareChain::new();
        run(&empty, &empty, &trace);
        assert_eq!(*trace.lock(), vec!["deliver"]);
    }

    #[test]
    fn test_compose_order() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let chain = MiddlewareChain::new()
            .compose([recorder("a", &trace), recorder("b", &trace)])
            .compose([recorder("c", &trace)]);
        assert_eq!(chain.len(), 3);

        run(&chain, &MiddlewareChain::new(), &trace);
        assert_eq!(
            *trace.lock(),
            vec!["c:in", "a:in", "b:in", "deliver", "b:out", "a:out", "c:out"]
        );
    }

    #[test]
    fn test_outer_chain_runs_before_inner() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let outer = MiddlewareChain::new().compose([recorder("global", &trace)]);
        let inner = MiddlewareChain::new().compose([recorder("instance", &trace)]);

        run(&outer, &inner, &trace);
        assert_eq!(
            *trace.lock(),
            vec!["global:in", "instance:in", "deliver", "instance:out", "global:out"]
        );
    }

    #[test]
    fn test_short_circuit() {
        let trace = Arc::new(Mutex::new(Vec::new()));
        let stop: Arc<dyn Middleware> = Arc::new(|_: &Context, _: &mut Params, _: Next<'_>| {});
        let outer = MiddlewareChain::new().compose([stop]);
        let inner = MiddlewareChain::new().compose([recorder("instance", &trace)]);

        run(&outer, &inner, &trace);
        assert!(trace.lock().is_empty());
    }

    #[test]
    fn test_layer_can_rewrite_record() {
        let raise: Arc<dyn Middleware> =
            Arc::new(|ctx: &Context, params: &mut Params, next: Next<'_>| {
                params.level = Level::Error;
                next.run(ctx, params);
            });
        let chain = MiddlewareChain::new().compose([raise]);
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let terminal = move |_: &Context, params: &mut Params| *sink.lock() = Some(params.level);

        let mut params = Params::default();
        Next::new(&chain, &MiddlewareChain::new(), &terminal)
            .run(&Context::background(), &mut params);
        assert_eq!(*seen.lock(), Some(Level::Error));
    }

    #[test]
    fn test_shared_layer_is_middleware() {
        fn wrap<M: Middleware + 'static>(layer: M) -> Arc<dyn Middleware> {
            Arc::new(layer)
        }

        let trace = Arc::new(Mutex::new(Vec::new()));
        let shared = recorder("shared", &trace);
        let chain = MiddlewareChain::new().compose([wrap(Arc::clone(&shared)), wrap(shared)]);

        run(&chain, &MiddlewareChain::new(), &trace);
        assert_eq!(
            *trace.lock(),
            vec!["shared:in", "shared:in", "deliver", "shared:out", "shared:out"]
        );
    }

    #[test]
    fn test_global_chain_snapshot_swap() {
        let global = GlobalChain::new();
        assert!(global.is_empty());

        let before = global.snapshot();
        let noop: Arc<dyn Middleware> =
            Arc::new(|ctx: &Context, p: &mut Params, next: Next<'_>| next.run(ctx, p));
        global.register([noop]);

        assert!(before.is_empty());
        assert_eq!(global.snapshot().len(), 1);

        let shared = global.clone();
        assert_eq!(shared.snapshot().len(), 1);
    }
}
