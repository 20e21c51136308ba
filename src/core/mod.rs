//! Core dispatch types and traits

pub mod caller;
pub mod context;
pub mod error;
pub mod handler;
pub mod level;
pub mod logger;
pub mod metrics;
pub mod middleware;
pub mod output_format;
pub mod params;
pub mod render;
pub mod timestamp;
pub mod value;

pub use caller::Caller;
pub use context::Context;
pub use error::{LoggerError, Result};
pub use handler::Handler;
pub use level::Level;
pub use logger::{Logger, LoggerBuilder, CALLER_SKIP_OFFSET};
pub use metrics::HandlerMetrics;
pub use middleware::{
    global_chain, register_global_middleware, GlobalChain, Middleware, MiddlewareChain, Next,
};
pub use output_format::OutputFormat;
pub use params::{args, argsf, fields, Param, Params, BAD_KEY};
pub use timestamp::TimestampFormat;
pub use value::Value;
