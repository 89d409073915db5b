//! Call frames and the raise interface.
//!
//! A `Frame` is one call-context activation. It carries the ability to raise
//! a typed exception and tracks nesting depth so runaway recursion through
//! object protocols surfaces as a RuntimeError instead of a stack overflow.

use crate::config::runtime_config;
use crate::raised::Raised;

// =============================================================================
// Frame
// =============================================================================

/// One call-context activation.
///
/// Frames are cheap values created at an entry point with [`Frame::root`] and
/// passed down by `&mut` through every protocol operation. Raising does not
/// unwind: the `raise_*` helpers only construct the exception value, which
/// the operation returns through its `Result`.
#[derive(Debug)]
pub struct Frame {
    /// Current nested call depth.
    depth: u32,
    /// Depth at which further calls fail.
    limit: u32,
}

impl Frame {
    /// Create a top-level frame using the process-wide recursion limit.
    pub fn root() -> Self {
        Self {
            depth: 0,
            limit: runtime_config().recursion_limit,
        }
    }

    /// Create a top-level frame with an explicit recursion limit.
    pub fn with_limit(limit: u32) -> Self {
        Self { depth: 0, limit }
    }

    /// Current nested call depth.
    #[inline]
    pub fn depth(&self) -> u32 {
        self.depth
    }

    /// Enter a nested call activation.
    ///
    /// Must be balanced with [`Frame::leave`] on the success and recovery
    /// paths alike.
    #[inline]
    pub fn enter(&mut self) -> Result<(), Raised> {
        if self.depth >= self.limit {
            return Err(self.raise_runtime_error("maximum recursion depth exceeded"));
        }
        self.depth += 1;
        Ok(())
    }

    /// Leave the innermost call activation.
    #[inline]
    pub fn leave(&mut self) {
        self.depth = self.depth.saturating_sub(1);
    }

    /// Raise a TypeError.
    #[inline]
    pub fn raise_type_error(&self, message: impl Into<String>) -> Raised {
        Raised::TypeError(message.into())
    }

    /// Raise a ValueError.
    #[inline]
    pub fn raise_value_error(&self, message: impl Into<String>) -> Raised {
        Raised::ValueError(message.into())
    }

    /// Raise an IndexError.
    #[inline]
    pub fn raise_index_error(&self, message: impl Into<String>) -> Raised {
        Raised::IndexError(message.into())
    }

    /// Raise the iteration-end signal.
    #[inline]
    pub fn raise_stop_iteration(&self) -> Raised {
        Raised::StopIteration(String::new())
    }

    /// Raise an OverflowError.
    #[inline]
    pub fn raise_overflow_error(&self, message: impl Into<String>) -> Raised {
        Raised::OverflowError(message.into())
    }

    /// Raise a RuntimeError.
    #[inline]
    pub fn raise_runtime_error(&self, message: impl Into<String>) -> Raised {
        Raised::RuntimeError(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raised::ExcKind;

    #[test]
    fn test_raise_constructs_value_without_unwinding() {
        let frame = Frame::with_limit(8);
        let exc = frame.raise_type_error("an integer is required");
        assert_eq!(exc.kind(), ExcKind::TypeError);
        assert_eq!(exc.message(), "an integer is required");
    }

    #[test]
    fn test_enter_leave_balance() {
        let mut frame = Frame::with_limit(2);
        assert!(frame.enter().is_ok());
        assert!(frame.enter().is_ok());
        let err = frame.enter().unwrap_err();
        assert!(matches!(err, Raised::RuntimeError(_)));
        frame.leave();
        assert!(frame.enter().is_ok());
        assert_eq!(frame.depth(), 2);
    }

    #[test]
    fn test_stop_iteration_is_empty() {
        let frame = Frame::with_limit(1);
        assert_eq!(frame.raise_stop_iteration().message(), "");
    }
}
