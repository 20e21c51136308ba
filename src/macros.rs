//! Construction macros for argument and field lists
//!
//! Log calls take `Vec<Value>`; these macros convert each expression with
//! `Value::from` so mixed types can sit in one list.
//!
//! # Examples
//!
//! ```
//! use rust_xlog::prelude::*;
//! use rust_xlog::{args, fields};
//!
//! let logger = Logger::new();
//! let ctx = Context::background();
//!
//! logger.info(&ctx, values!["listening on", 8080]);
//! logger.infof(&ctx, "user %s retried %d times", values!["alice", 3]);
//! logger.infov(&ctx, vec![args!["cache warm"], fields!["entries", 1024u64]]);
//! ```

/// Build a `Vec<Value>` from mixed expressions.
///
/// # Examples
///
/// ```
/// use rust_xlog::{values, Value};
///
/// assert_eq!(values![1, "a"], vec![Value::Int(1), Value::from("a")]);
/// assert!(values![].is_empty());
/// ```
#[macro_export]
macro_rules! values {
    () => {
        ::std::vec::Vec::<$crate::Value>::new()
    };
    ($($value:expr),+ $(,)?) => {
        vec![$($crate::Value::from($value)),+]
    };
}

/// Build a positional-arguments [`Param`](crate::Param).
#[macro_export]
macro_rules! args {
    ($($value:expr),* $(,)?) => {
        $crate::Param::Args($crate::values![$($value),*])
    };
}

/// Build a template [`Param`](crate::Param) with its operands.
///
/// # Examples
///
/// ```
/// use rust_xlog::{argsf, Level, Params};
///
/// let record = Params::build(Level::Info, None, [argsf!("%d items", 3)]);
/// assert_eq!(record.message(), "3 items");
/// ```
#[macro_export]
macro_rules! argsf {
    ($format:expr $(, $value:expr)* $(,)?) => {
        $crate::Param::Argsf(::std::string::String::from($format), $crate::values![$($value),*])
    };
}

/// Build a structured-fields [`Param`](crate::Param) from alternating keys and values.
#[macro_export]
macro_rules! fields {
    ($($value:expr),* $(,)?) => {
        $crate::Param::Fields($crate::values![$($value),*])
    };
}
