//! Terminating wrapper for PANIC and FATAL records
//!
//! The dispatch core never unwinds or exits on its own; wrapping the last
//! handler in a [`TerminatingHandler`] restores the conventional behavior.

use crate::core::{Context, Handler, Level, Params};

type FatalHook = Box<dyn Fn(&Params) + Send + Sync>;

/// Delivers to the wrapped handler, then panics on PANIC or exits on FATAL
pub struct TerminatingHandler<H: Handler> {
    inner: H,
    on_fatal: FatalHook,
}

impl<H: Handler> TerminatingHandler<H> {
    /// FATAL records flush `inner` and exit the process with status 1
    pub fn new(inner: H) -> Self {
        Self {
            inner,
            on_fatal: Box::new(|_| std::process::exit(1)),
        }
    }

    /// Replace the process exit that follows a FATAL record
    #[must_use]
    pub fn with_fatal_hook<F>(mut self, hook: F) -> Self
    where
        F: Fn(&Params) + Send + Sync + 'static,
    {
        self.on_fatal = Box::new(hook);
        self
    }
}

impl<H: Handler> Handler for TerminatingHandler<H> {
    fn log(&self, ctx: &Context, params: &Params) {
        self.inner.log(ctx, params);

        match params.level {
            Level::Panic => {
                self.inner.flush();
                panic!("{}", params.message());
            }
            Level::Fatal => {
                self.inner.flush();
                (self.on_fatal)(params);
            }
            _ => {}
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }

    fn name(&self) -> &str {
        self.inner.name()
    }
}
