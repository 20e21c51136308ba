//! Caller resolution by stack walking
//!
//! The resolver anchors on its own frame and then walks `skip` further frames
//! outward, so the skip count is independent of how many frames the unwinder
//! itself contributes. Each physical frame is expanded into the inlined calls
//! its debug info records, innermost first, before counting.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Function name reported when the frame cannot be resolved
pub const UNKNOWN_FUNCTION: &str = "unknown";

/// Source location of a log call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Caller {
    /// Instruction pointer of the resolved frame
    pub pc: usize,
    /// Source path as recorded in the debug info
    pub file: String,
    /// Last component of `file`
    pub filename: String,
    /// Demangled function path without the hash suffix
    pub function: String,
    pub line: u32,
}

impl Caller {
    /// Placeholder for a frame that could not be resolved
    pub fn unknown() -> Self {
        Self {
            pc: 0,
            file: String::new(),
            filename: String::new(),
            function: UNKNOWN_FUNCTION.to_string(),
            line: 0,
        }
    }

    /// `true` when the resolver could not identify the frame
    pub fn is_unknown(&self) -> bool {
        self.function == UNKNOWN_FUNCTION
    }

    /// Resolve the frame `skip` levels above the function that calls `resolve`.
    ///
    /// `skip = 0` names the direct caller of `resolve`. Frames are counted as
    /// source-level calls: a function inlined into its caller still counts as
    /// its own frame, provided debug info describes it. Never fails: an
    /// unreachable or unsymbolized frame yields [`Caller::unknown`].
    #[inline(never)]
    pub fn resolve(skip: usize) -> Caller {
        let anchor = Self::resolve as fn(usize) -> Caller as usize;
        let mut anchored = false;
        let mut remaining = skip;
        let mut target = None;

        backtrace::trace(|frame| {
            let mut logical = Self::logical_frames(frame).into_iter();
            if !anchored {
                if frame.symbol_address() as usize == anchor {
                    anchored = true;
                    return true;
                }
                if !logical.any(|caller| is_anchor_function(&caller.function)) {
                    return true;
                }
                anchored = true;
            }
            for caller in logical {
                if remaining == 0 {
                    target = Some(caller);
                    return false;
                }
                remaining -= 1;
            }
            true
        });

        target.unwrap_or_else(Self::unknown)
    }

    /// Source-level frames of one physical frame, innermost first
    fn logical_frames(frame: &backtrace::Frame) -> Vec<Caller> {
        let pc = frame.ip() as usize;
        let mut frames = Vec::new();
        backtrace::resolve_frame(frame, |symbol| {
            let mut caller = Caller::unknown();
            caller.pc = pc;
            if let Some(name) = symbol.name() {
                caller.function = format!("{:#}", name);
            }
            if let Some(path) = symbol.filename() {
                caller.file = path.display().to_string();
                caller.filename = base_name(path);
            }
            caller.line = symbol.lineno().unwrap_or(0);
            frames.push(caller);
        });

        if frames.is_empty() {
            let mut caller = Caller::unknown();
            caller.pc = pc;
            frames.push(caller);
        }
        frames
    }

    /// `filename:line`, the short form used by text and JSON output
    pub fn short(&self) -> String {
        format!("{}:{}", self.filename, self.line)
    }
}

fn is_anchor_function(function: &str) -> bool {
    function.ends_with("Caller::resolve")
}

fn base_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_direct_caller() {
        let caller = Caller::resolve(0);

        assert!(!caller.is_unknown());
        assert!(
            caller.function.ends_with("test_resolve_direct_caller"),
            "resolved {}",
            caller.function
        );
        assert_eq!(caller.filename, "caller.rs");
        assert!(caller.line > 0);
        assert_ne!(caller.pc, 0);
    }

    #[inline(never)]
    fn wrapper() -> Caller {
        Caller::resolve(1)
    }

    #[test]
    fn test_resolve_skips_wrapper_frame() {
        let caller = wrapper();
        assert!(
            caller.function.ends_with("test_resolve_skips_wrapper_frame"),
            "resolved {}",
            caller.function
        );
    }

    #[inline(always)]
    fn inlined_wrapper() -> Caller {
        Caller::resolve(1)
    }

    #[inline(always)]
    fn inlined_outer() -> Caller {
        inlined_wrapper_twice()
    }

    #[inline(never)]
    fn inlined_wrapper_twice() -> Caller {
        Caller::resolve(2)
    }

    #[test]
    fn test_resolve_counts_inlined_wrapper() {
        let caller = inlined_wrapper();
        assert!(
            caller.function.ends_with("test_resolve_counts_inlined_wrapper"),
            "resolved {}",
            caller.function
        );
        assert_eq!(caller.filename, "caller.rs");
    }

    #[test]
    fn test_resolve_mixed_inlined_and_outlined_frames() {
        let caller = inlined_outer();
        assert!(
            caller.function.ends_with("test_resolve_mixed_inlined_and_outlined_frames"),
            "resolved {}",
            caller.function
        );
    }

    #[test]
    fn test_anchor_function_names() {
        assert!(is_anchor_function("rust_xlog::core::caller::Caller::resolve"));
        assert!(!is_anchor_function("rust_xlog::core::caller::Caller::resolve_frame"));
        assert!(!is_anchor_function("app::main"));
    }

    #[test]
    fn test_resolve_past_stack_bottom_is_unknown() {
        let caller = Caller::resolve(100_000);
        assert!(caller.is_unknown());
        assert_eq!(caller.function, "unknown");
        assert_eq!(caller.line, 0);
    }

    #[test]
    fn test_short_form() {
        let caller = Caller {
            pc: 1,
            file: "/src/app/main.rs".to_string(),
            filename: "main.rs".to_string(),
            function: "app::main".to_string(),
            line: 12,
        };
        assert_eq!(caller.short(), "main.rs:12");
        assert_eq!(base_name(Path::new("/src/app/main.rs")), "main.rs");
    }
}
