//! Main logger implementation
//!
//! Every entry point funnels into one synchronous pipeline: build the record,
//! optionally resolve the caller, run the middleware layers, then hand the
//! record to each handler in registration order.

use super::{
    caller::Caller,
    context::Context,
    handler::Handler,
    level::Level,
    middleware::{global_chain, GlobalChain, Middleware, MiddlewareChain, Next},
    params::{Param, Params},
    value::Value,
};
use std::fmt;
use std::sync::Arc;

/// Frames between the caller resolver and the user's call site:
/// the internal dispatch step and the public level method.
pub const CALLER_SKIP_OFFSET: usize = 2;

/// Dispatch core
///
/// Immutable once built; share it behind an `Arc` or clone it (clones share
/// handlers and middleware).
#[derive(Clone)]
pub struct Logger {
    handlers: Vec<Arc<dyn Handler>>,
    middleware: MiddlewareChain,
    global: GlobalChain,
    caller: bool,
    caller_skip: usize,
}

impl Logger {
    /// A logger with no handlers, attached to the process-wide middleware chain
    #[must_use]
    pub fn new() -> Self {
        LoggerBuilder::new().build()
    }

    /// Create a builder for Logger
    ///
    /// # Example
    /// ```
    /// use rust_xlog::prelude::*;
    ///
    /// let logger = Logger::builder()
    ///     .handler(ConsoleHandler::stdout().with_min_level(Level::Debug))
    ///     .caller(true)
    ///     .build();
    /// logger.infof(&Context::background(), "listening on %v", values![8080]);
    /// ```
    #[must_use]
    pub fn builder() -> LoggerBuilder {
        LoggerBuilder::new()
    }

    pub fn handler_count(&self) -> usize {
        self.handlers.len()
    }

    pub fn caller_enabled(&self) -> bool {
        self.caller
    }

    /// Extra frames skipped on top of [`CALLER_SKIP_OFFSET`]
    pub fn caller_skip(&self) -> usize {
        self.caller_skip
    }

    /// Log positional arguments at `level`
    #[inline(never)]
    pub fn log(&self, ctx: &Context, level: Level, args: Vec<Value>) {
        self.dispatch(ctx, level, None, vec![Param::Args(args)]);
    }

    /// Log a printf-style template at `level`
    #[inline(never)]
    pub fn logf(&self, ctx: &Context, level: Level, format: &str, args: Vec<Value>) {
        self.dispatch(ctx, level, Some(format), vec![Param::Args(args)]);
    }

    /// Log a record shaped by `params` at `level`
    #[inline(never)]
    pub fn logv(&self, ctx: &Context, level: Level, params: Vec<Param>) {
        self.dispatch(ctx, level, None, params);
    }

    /// Flush every handler
    pub fn flush(&self) {
        for handler in &self.handlers {
            handler.flush();
        }
    }

    #[inline(never)]
    fn dispatch(&self, ctx: &Context, level: Level, format: Option<&str>, params: Vec<Param>) {
        let mut record = Params::build(level, format, params);
        if self.caller {
            record.caller = Some(Caller::resolve(self.caller_skip + CALLER_SKIP_OFFSET));
        }

        let global = self.global.snapshot();
        if global.is_empty() && self.middleware.is_empty() {
            self.deliver(ctx, &record);
            return;
        }

        let terminal = |ctx: &Context, record: &mut Params| self.deliver(ctx, record);
        Next::new(&global, &self.middleware, &terminal).run(ctx, &mut record);
    }

    fn deliver(&self, ctx: &Context, record: &Params) {
        for handler in &self.handlers {
            handler.log(ctx, record);
        }
    }
}

macro_rules! level_methods {
    ($($level:ident => $plain:ident, $formatted:ident, $structured:ident;)*) => {
        impl Logger {
            $(
                #[doc = concat!("Log positional arguments at `", stringify!($level), "`.")]
                #[inline(never)]
                pub fn $plain(&self, ctx: &Context, args: Vec<Value>) {
                    self.dispatch(ctx, Level::$level, None, vec![Param::Args(args)]);
                }

                #[doc = concat!("Log a printf-style template at `", stringify!($level), "`.")]
                #[inline(never)]
                pub fn $formatted(&self, ctx: &Context, format: &str, args: Vec<Value>) {
                    self.dispatch(ctx, Level::$level, Some(format), vec![Param::Args(args)]);
                }

                #[doc = concat!("Log a record built from `params` at `", stringify!($level), "`.")]
                #[inline(never)]
                pub fn $structured(&self, ctx: &Context, params: Vec<Param>) {
                    self.dispatch(ctx, Level::$level, None, params);
                }
            )*
        }
    };
}

level_methods! {
    Debug => debug, debugf, debugv;
    Info => info, infof, infov;
    Warning => warning, warningf, warningv;
    Error => error, errorf, errorv;
    Panic => panic, panicf, panicv;
    Fatal => fatal, fatalf, fatalv;
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.handlers.iter().map(|h| h.name()).collect();
        f.debug_struct("Logger")
            .field("handlers", &names)
            .field("middleware", &self.middleware)
            .field("caller", &self.caller)
            .field("caller_skip", &self.caller_skip)
            .finish()
    }
}

/// Builder for constructing Logger with a fluent API
///
/// # Example
/// ```
/// use rust_xlog::prelude::*;
///
/// let logger = Logger::builder()
///     .handler(ConsoleHandler::stderr().with_min_level(Level::Warning))
///     .middleware(StaticFields::new(values!["service", "billing"]))
///     .caller(true)
///     .caller_skip(1)
///     .build();
/// assert_eq!(logger.caller_skip(), 1);
/// ```
pub struct LoggerBuilder {
    handlers: Vec<Arc<dyn Handler>>,
    middleware: MiddlewareChain,
    global: Option<GlobalChain>,
    caller: bool,
    caller_skip: usize,
}

impl LoggerBuilder {
    /// Create a new builder with default values
    pub fn new() -> Self {
        Self {
            handlers: Vec::new(),
            middleware: MiddlewareChain::new(),
            global: None,
            caller: false,
            caller_skip: 0,
        }
    }

    /// Append a handler
    #[must_use = "builder methods return a new value"]
    pub fn handler<H: Handler + 'static>(mut self, handler: H) -> Self {
        self.handlers.push(Arc::new(handler));
        self
    }

    /// Append already-shared handlers, keeping their order
    #[must_use = "builder methods return a new value"]
    pub fn handlers<I>(mut self, handlers: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Handler>>,
    {
        self.handlers.extend(handlers);
        self
    }

    /// Compose one middleware onto the instance chain as its new outermost layer
    #[must_use = "builder methods return a new value"]
    pub fn middleware<M: Middleware + 'static>(self, middleware: M) -> Self {
        let layer: Arc<dyn Middleware> = Arc::new(middleware);
        self.middlewares([layer])
    }

    /// Compose a list onto the instance chain; the first element ends up outermost
    #[must_use = "builder methods return a new value"]
    pub fn middlewares<I>(mut self, middleware: I) -> Self
    where
        I: IntoIterator<Item = Arc<dyn Middleware>>,
    {
        self.middleware = self.middleware.compose(middleware);
        self
    }

    /// Toggle caller capture
    #[must_use = "builder methods return a new value"]
    pub fn caller(mut self, enabled: bool) -> Self {
        self.caller = enabled;
        self
    }

    /// Add frames to skip during caller capture; repeated calls accumulate
    ///
    /// Use one per wrapper function that sits between the application's call
    /// site and the logger.
    #[must_use = "builder methods return a new value"]
    pub fn caller_skip(mut self, skip: usize) -> Self {
        self.caller_skip += skip;
        self
    }

    /// Use `chain` instead of the process-wide chain
    #[must_use = "builder methods return a new value"]
    pub fn global_chain(mut self, chain: GlobalChain) -> Self {
        self.global = Some(chain);
        self
    }

    /// Build the Logger
    pub fn build(self) -> Logger {
        Logger {
            handlers: self.handlers,
            middleware: self.middleware,
            global: self.global.unwrap_or_else(|| global_chain().clone()),
            caller: self.caller,
            caller_skip: self.caller_skip,
        }
    }
}

impl Default for LoggerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::params::{args, argsf, fields};
    use crate::values;
    use parking_lot::Mutex;

    type Trace = Arc<Mutex<Vec<(&'static str, Params)>>>;

    struct RecordingHandler {
        name: &'static str,
        trace: Trace,
    }

    impl Handler for RecordingHandler {
        fn log(&self, _ctx: &Context, params: &Params) {
            self.trace.lock().push((self.name, params.clone()));
        }

        fn name(&self) -> &str {
            self.name
        }
    }

    fn recording(name: &'static str, trace: &Trace) -> RecordingHandler {
        RecordingHandler {
            name,
            trace: Arc::clone(trace),
        }
    }

    fn isolated() -> LoggerBuilder {
        Logger::builder().global_chain(GlobalChain::new())
    }

    #[test]
    fn test_builder_defaults() {
        let logger = isolated().build();
        assert_eq!(logger.handler_count(), 0);
        assert!(!logger.caller_enabled());
        assert_eq!(logger.caller_skip(), 0);

        // no handlers: nothing to do, nothing to fail
        logger.info(&Context::background(), values!["dropped"]);
    }

    #[test]
    fn test_handlers_invoked_in_registration_order() {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let logger = isolated()
            .handler(recording("h1", &trace))
            .handler(recording("h2", &trace))
            .build();

        logger.warning(&Context::background(), values!["disk", 91]);

        let trace = trace.lock();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].0, "h1");
        assert_eq!(trace[1].0, "h2");
        assert_eq!(trace[0].1, trace[1].1);
        assert_eq!(trace[0].1.level, Level::Warning);
        assert_eq!(trace[0].1.args, values!["disk", 91]);
    }

    #[test]
    fn test_global_layer_runs_before_instance_layer() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));

        let global = GlobalChain::new();
        let seen = Arc::clone(&order);
        let m1: Arc<dyn Middleware> = Arc::new(move |ctx: &Context, p: &mut Params, next: Next<'_>| {
            seen.lock().push("m1");
            next.run(ctx, p);
        });
        global.register([m1]);

        let seen = Arc::clone(&order);
        let logger = Logger::builder()
            .global_chain(global)
            .middleware(move |ctx: &Context, p: &mut Params, next: Next<'_>| {
                seen.lock().push("m2");
                next.run(ctx, p);
            })
            .handler(recording("h", &trace))
            .build();

        logger.info(&Context::background(), values!["hello"]);

        assert_eq!(*order.lock(), vec!["m1", "m2"]);
        assert_eq!(trace.lock().len(), 1);
    }

    #[test]
    fn test_global_layer_can_suppress_everything() {
        let order = Arc::new(Mutex::new(Vec::new()));
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));

        let global = GlobalChain::new();
        let m1: Arc<dyn Middleware> = Arc::new(|_: &Context, _: &mut Params, _: Next<'_>| {});
        global.register([m1]);

        let seen = Arc::clone(&order);
        let logger = Logger::builder()
            .global_chain(global)
            .middleware(move |ctx: &Context, p: &mut Params, next: Next<'_>| {
                seen.lock().push("m2");
                next.run(ctx, p);
            })
            .handler(recording("h", &trace))
            .build();

        logger.error(&Context::background(), values!["swallowed"]);

        assert!(order.lock().is_empty());
        assert!(trace.lock().is_empty());
    }

    #[test]
    fn test_global_registration_after_build_is_seen() {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let global = GlobalChain::new();
        let logger = Logger::builder()
            .global_chain(global.clone())
            .handler(recording("h", &trace))
            .build();

        logger.info(&Context::background(), values!["before"]);
        let drop_all: Arc<dyn Middleware> = Arc::new(|_: &Context, _: &mut Params, _: Next<'_>| {});
        global.register([drop_all]);
        logger.info(&Context::background(), values!["after"]);

        let trace = trace.lock();
        assert_eq!(trace.len(), 1);
        assert_eq!(trace[0].1.args, values!["before"]);
    }

    #[test]
    fn test_caller_points_at_test_function() {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let logger = isolated()
            .handler(recording("h", &trace))
            .caller(true)
            .caller_skip(0)
            .build();

        logger.info(&Context::background(), values!["where am i"]);

        let trace = trace.lock();
        let caller = trace[0].1.caller.as_ref().expect("caller captured");
        assert_eq!(caller.filename, "logger.rs");
        assert!(
            caller.function.ends_with("test_caller_points_at_test_function"),
            "resolved {}",
            caller.function
        );
    }

    #[inline(never)]
    fn app_log_helper(logger: &Logger, message: &str) {
        logger.infof(&Context::background(), "app: %s", values![message]);
    }

    #[test]
    fn test_caller_skip_compensates_for_wrapper() {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let logger = isolated()
            .handler(recording("h", &trace))
            .caller(true)
            .caller_skip(1)
            .build();

        app_log_helper(&logger, "wrapped");

        let trace = trace.lock();
        let caller = trace[0].1.caller.as_ref().expect("caller captured");
        assert!(
            caller.function.ends_with("test_caller_skip_compensates_for_wrapper"),
            "resolved {}",
            caller.function
        );
        assert_eq!(trace[0].1.message(), "app: wrapped");
    }

    #[test]
    fn test_caller_skip_accumulates() {
        let logger = isolated().caller_skip(1).caller_skip(2).build();
        assert_eq!(logger.caller_skip(), 3);
    }

    #[test]
    fn test_caller_absent_when_disabled() {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let logger = isolated().handler(recording("h", &trace)).build();
        logger.debug(&Context::background(), values![1]);
        assert!(trace.lock()[0].1.caller.is_none());
    }

    #[test]
    fn test_fatal_does_not_terminate() {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let logger = isolated().handler(recording("h", &trace)).build();

        logger.fatal(&Context::background(), values!["unrecoverable"]);
        logger.panicf(&Context::background(), "code=%d", values![3]);

        let trace = trace.lock();
        assert_eq!(trace.len(), 2);
        assert_eq!(trace[0].1.level, Level::Fatal);
        assert_eq!(trace[1].1.level, Level::Panic);
    }

    #[test]
    fn test_every_entry_point_tags_its_level() {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let logger = isolated().handler(recording("h", &trace)).build();
        let ctx = Context::background();

        logger.debug(&ctx, values![1]);
        logger.debugf(&ctx, "%v", values![1]);
        logger.debugv(&ctx, vec![args([1])]);
        logger.info(&ctx, values![1]);
        logger.infof(&ctx, "%v", values![1]);
        logger.infov(&ctx, vec![args([1])]);
        logger.warning(&ctx, values![1]);
        logger.warningf(&ctx, "%v", values![1]);
        logger.warningv(&ctx, vec![args([1])]);
        logger.error(&ctx, values![1]);
        logger.errorf(&ctx, "%v", values![1]);
        logger.errorv(&ctx, vec![args([1])]);
        logger.panic(&ctx, values![1]);
        logger.panicf(&ctx, "%v", values![1]);
        logger.panicv(&ctx, vec![args([1])]);
        logger.fatal(&ctx, values![1]);
        logger.fatalf(&ctx, "%v", values![1]);
        logger.fatalv(&ctx, vec![args([1])]);

        let trace = trace.lock();
        assert_eq!(trace.len(), 18);
        for (i, level) in Level::ALL.iter().enumerate() {
            for j in 0..3 {
                let record = &trace[i * 3 + j].1;
                assert_eq!(record.level, *level);
                assert_eq!(record.message(), "1");
                assert_eq!(record.format.is_some(), j == 1);
            }
        }
    }

    #[test]
    fn test_structured_call() {
        let trace: Trace = Arc::new(Mutex::new(Vec::new()));
        let logger = isolated().handler(recording("h", &trace)).build();

        logger.infov(
            &Context::background(),
            vec![
                argsf("user=%s ", ["alice"]),
                argsf("attempt=%d", [3]),
                fields(values!["ip", "10.0.0.1"]),
            ],
        );

        let trace = trace.lock();
        let record = &trace[0].1;
        assert_eq!(record.format.as_deref(), Some("user=%s attempt=%d"));
        assert_eq!(record.message(), "user=alice attempt=3");
        assert_eq!(record.fields, values!["ip", "10.0.0.1"]);
    }

    #[test]
    fn test_context_reaches_handlers() {
        let seen = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&seen);
        let logger = isolated()
            .handler(move |ctx: &Context, _: &Params| {
                *sink.lock() = ctx.value("request_id").cloned();
            })
            .build();

        let ctx = Context::background().with_value("request_id", "r-9");
        logger.log(&ctx, Level::Info, values!["x"]);
        assert_eq!(*seen.lock(), Some(Value::from("r-9")));
    }

    #[test]
    fn test_logger_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Logger>();
    }
}
