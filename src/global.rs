//! Process-wide default logger
//!
//! The free functions here forward to whatever logger was last installed with
//! [`init`]. Until then the default logger has no handlers, so every call is a
//! no-op. Each function adds one frame between the application and the
//! logger; loggers installed through [`crate::init_default`] compensate with
//! `caller_skip(1)`.

use crate::core::{Context, Level, Logger, Param, Value};
use parking_lot::RwLock;
use std::sync::{Arc, OnceLock};

static DEFAULT_LOGGER: OnceLock<RwLock<Arc<Logger>>> = OnceLock::new();

fn slot() -> &'static RwLock<Arc<Logger>> {
    DEFAULT_LOGGER.get_or_init(|| RwLock::new(Arc::new(Logger::new())))
}

/// Install `logger` as the process default
///
/// Calls already in flight finish on the logger they started with.
pub fn init(logger: Logger) {
    *slot().write() = Arc::new(logger);
}

/// The current default logger
pub fn default_logger() -> Arc<Logger> {
    Arc::clone(&slot().read())
}

/// Log positional arguments at `level` on the default logger
#[inline(never)]
pub fn log(ctx: &Context, level: Level, args: Vec<Value>) {
    default_logger().log(ctx, level, args);
}

/// Flush every handler of the default logger
pub fn flush() {
    default_logger().flush();
}

macro_rules! forward_to_default {
    ($($plain:ident, $formatted:ident, $structured:ident;)*) => {
        $(
            #[doc = concat!("[`Logger::", stringify!($plain), "`] on the default logger.")]
            #[inline(never)]
            pub fn $plain(ctx: &Context, args: Vec<Value>) {
                default_logger().$plain(ctx, args);
            }

            #[doc = concat!("[`Logger::", stringify!($formatted), "`] on the default logger.")]
            #[inline(never)]
            pub fn $formatted(ctx: &Context, format: &str, args: Vec<Value>) {
                default_logger().$formatted(ctx, format, args);
            }

            #[doc = concat!("[`Logger::", stringify!($structured), "`] on the default logger.")]
            #[inline(never)]
            pub fn $structured(ctx: &Context, params: Vec<Param>) {
                default_logger().$structured(ctx, params);
            }
        )*
    };
}

forward_to_default! {
    debug, debugf, debugv;
    info, infof, infov;
    warning, warningf, warningv;
    error, errorf, errorv;
    panic, panicf, panicv;
    fatal, fatalf, fatalv;
}
