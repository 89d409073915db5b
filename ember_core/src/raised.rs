//! Exception values threaded through return channels.
//!
//! The runtime never unwinds on failure. Every fallible operation returns
//! `Result<T, Raised>` and callers either recover by matching on the kind or
//! forward the value unchanged with `?`. Kind and message survive propagation
//! verbatim.

use std::fmt;

// =============================================================================
// Exception Kind
// =============================================================================

/// Classification tag for a raised exception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExcKind {
    /// Operand kind mismatch.
    TypeError,
    /// Right kind, invalid value.
    ValueError,
    /// Valid index kind, out-of-range position.
    IndexError,
    /// Iteration-control signal; absorbed only by iteration drivers.
    StopIteration,
    /// Result or size beyond representable range.
    OverflowError,
    /// Internal invariant violation surfaced as a value.
    RuntimeError,
}

impl ExcKind {
    /// Display name matching the surface language.
    #[inline]
    pub const fn name(self) -> &'static str {
        match self {
            ExcKind::TypeError => "TypeError",
            ExcKind::ValueError => "ValueError",
            ExcKind::IndexError => "IndexError",
            ExcKind::StopIteration => "StopIteration",
            ExcKind::OverflowError => "OverflowError",
            ExcKind::RuntimeError => "RuntimeError",
        }
    }
}

// =============================================================================
// Raised
// =============================================================================

/// One raised exception: a kind plus a human-readable message.
///
/// Mirrors the surface language's exception taxonomy. No operation may
/// produce both a usable result and a `Raised`; `Result` enforces this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Raised {
    /// Wrong type passed where a protocol or specific kind was required.
    TypeError(String),
    /// Value error (e.g. out-of-range byte, zero slice step).
    ValueError(String),
    /// Index out of range.
    IndexError(String),
    /// End of iteration.
    StopIteration(String),
    /// Overflow (e.g. allocation size over the configured cap).
    OverflowError(String),
    /// Internal error.
    RuntimeError(String),
}

impl Raised {
    /// Get the exception kind.
    #[inline]
    pub fn kind(&self) -> ExcKind {
        match self {
            Raised::TypeError(_) => ExcKind::TypeError,
            Raised::ValueError(_) => ExcKind::ValueError,
            Raised::IndexError(_) => ExcKind::IndexError,
            Raised::StopIteration(_) => ExcKind::StopIteration,
            Raised::OverflowError(_) => ExcKind::OverflowError,
            Raised::RuntimeError(_) => ExcKind::RuntimeError,
        }
    }

    /// Get the message text.
    #[inline]
    pub fn message(&self) -> &str {
        match self {
            Raised::TypeError(msg)
            | Raised::ValueError(msg)
            | Raised::IndexError(msg)
            | Raised::StopIteration(msg)
            | Raised::OverflowError(msg)
            | Raised::RuntimeError(msg) => msg,
        }
    }

    /// True for the iteration-control signal.
    #[inline]
    pub fn is_stop_iteration(&self) -> bool {
        matches!(self, Raised::StopIteration(_))
    }
}

impl fmt::Display for Raised {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.message().is_empty() {
            write!(f, "{}", self.kind().name())
        } else {
            write!(f, "{}: {}", self.kind().name(), self.message())
        }
    }
}

impl std::error::Error for Raised {}
