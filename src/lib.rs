//! # XLog
//!
//! A level-aware logging dispatch engine. Every call becomes a [`Params`]
//! record, optionally tagged with its call site, passed through composable
//! middleware and delivered to each registered [`Handler`].
//!
//! ## Features
//!
//! - **Three calling conventions**: positional (`info`), printf-style
//!   (`infof`) and structured (`infov`) at six levels
//! - **Middleware**: per-logger and process-wide interception layers that can
//!   rewrite or suppress records
//! - **Caller capture**: file, line and function of the application call site
//! - **Handlers**: console, file, JSON lines, queued and terminating wrappers
//!
//! ## Example
//!
//! ```
//! use rust_xlog::prelude::*;
//!
//! let logger = Logger::builder()
//!     .handler(ConsoleHandler::new().with_min_level(Level::Debug))
//!     .middleware(StaticFields::new(values!["service", "billing"]))
//!     .caller(true)
//!     .build();
//!
//! let ctx = Context::background();
//! logger.infof(&ctx, "charged %s %d cents", values!["alice", 1250]);
//! logger.warningv(&ctx, vec![argsf("retrying in %ds", [5]), fields(["attempt", "2"])]);
//! ```

pub mod buffer;
pub mod config;
pub mod core;
pub mod global;
pub mod handlers;
pub mod interceptors;
pub mod macros;

pub mod prelude {
    pub use crate::core::{
        args, argsf, fields, register_global_middleware, Caller, Context, Handler, Level, Logger,
        LoggerBuilder, LoggerError, Middleware, Next, OutputFormat, Param, Params, Result,
        TimestampFormat, Value,
    };
    pub use crate::handlers::{AsyncHandler, ConsoleHandler, FileHandler, JsonHandler, TerminatingHandler};
    pub use crate::interceptors::{ContextFields, Sampler, StaticFields};
    pub use crate::values;
}

pub use buffer::{MessageBuffer, BUFFER_SEPARATOR};
pub use config::{init_default, LogConfig};
pub use crate::core::{
    args, argsf, fields, global_chain, register_global_middleware, Caller, Context, GlobalChain,
    Handler, HandlerMetrics, Level, Logger, LoggerBuilder, LoggerError, Middleware,
    MiddlewareChain, Next, OutputFormat, Param, Params, Result, TimestampFormat, Value,
    BAD_KEY, CALLER_SKIP_OFFSET,
};
pub use global::{
    debug, debugf, debugv, default_logger, error, errorf, errorv, fatal, fatalf, fatalv, flush,
    info, infof, infov, init, log, panic, panicf, panicv, warning, warningf, warningv,
};
pub use handlers::{
    AsyncHandler, ConsoleHandler, ConsoleTarget, FileHandler, JsonHandler, TerminatingHandler,
    DEFAULT_SHUTDOWN_TIMEOUT,
};
pub use interceptors::{ContextFields, Sampler, SamplerMetrics, StaticFields};
