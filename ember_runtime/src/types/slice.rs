//! Slice objects and index/slice resolution shared by sequence types.
//!
//! A `SliceObject` carries optional start/stop/step components. Resolution
//! against a concrete sequence length produces a `SliceIndices` triple with
//! full surface-language semantics: defaults chosen by step direction,
//! negative indices normalized, bounds clamped. Zero step is rejected
//! through the frame's error channel, never by panicking.

use crate::object::Value;
use crate::object::type_obj::{TypeFlags, TypeId, TypeObject, TypeSlots};
use ember_core::{Frame, Raised};
use std::fmt;

// =============================================================================
// SliceValue - Compact optional integer representation
// =============================================================================

/// Compact representation of an optional slice index.
///
/// Tagged: i64::MIN (never a valid index) stands for "unspecified". Halves
/// the size of `Option<i64>`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct SliceValue(i64);

impl SliceValue {
    /// Sentinel value representing None.
    const NONE_SENTINEL: i64 = i64::MIN;

    /// Create an unspecified slice component.
    #[inline(always)]
    pub const fn none() -> Self {
        SliceValue(Self::NONE_SENTINEL)
    }

    /// Create a specified slice component.
    #[inline(always)]
    pub const fn some(value: i64) -> Self {
        // i64::MIN as an explicit index collides with the tag; clamp to the
        // adjacent value, which behaves identically after clamping anyway.
        if value == Self::NONE_SENTINEL {
            SliceValue(Self::NONE_SENTINEL + 1)
        } else {
            SliceValue(value)
        }
    }

    /// Check if unspecified.
    #[inline(always)]
    pub const fn is_none(self) -> bool {
        self.0 == Self::NONE_SENTINEL
    }

    /// Get the value if specified.
    #[inline(always)]
    pub const fn get(self) -> Option<i64> {
        if self.0 == Self::NONE_SENTINEL {
            None
        } else {
            Some(self.0)
        }
    }

    /// Get the value or a default.
    #[inline(always)]
    pub const fn unwrap_or(self, default: i64) -> i64 {
        if self.0 == Self::NONE_SENTINEL {
            default
        } else {
            self.0
        }
    }
}

impl Default for SliceValue {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Option<i64>> for SliceValue {
    #[inline]
    fn from(opt: Option<i64>) -> Self {
        match opt {
            Some(v) => SliceValue::some(v),
            None => SliceValue::none(),
        }
    }
}

impl fmt::Debug for SliceValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(v) => write!(f, "{}", v),
            None => write!(f, "None"),
        }
    }
}

// =============================================================================
// SliceIndices - Resolved indices for a sequence of known length
// =============================================================================

/// Concrete start/stop/step after resolution against a sequence length.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SliceIndices {
    /// Resolved start index.
    pub start: usize,
    /// Resolved stop index.
    pub stop: usize,
    /// Resolved step (never 0).
    pub step: isize,
    /// Number of selected elements.
    pub length: usize,
}

impl SliceIndices {
    /// Iterate the selected indices in slice order.
    #[inline]
    pub fn iter(self) -> SliceIndexIter {
        SliceIndexIter {
            current: self.start as isize,
            step: self.step,
            remaining: self.length,
        }
    }
}

/// Iterator over resolved slice indices.
pub struct SliceIndexIter {
    current: isize,
    step: isize,
    remaining: usize,
}

impl Iterator for SliceIndexIter {
    type Item = usize;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let index = self.current as usize;
        self.current += self.step;
        self.remaining -= 1;
        Some(index)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl ExactSizeIterator for SliceIndexIter {}

// =============================================================================
// SliceObject
// =============================================================================

/// Slice specification: optional start, stop, step.
///
/// Immutable after construction and safe to share. A zero step is
/// representable but rejected at resolution time.
#[derive(Clone, PartialEq, Eq)]
pub struct SliceObject {
    start: SliceValue,
    stop: SliceValue,
    step: SliceValue,
}

impl SliceObject {
    /// Create a new slice specification.
    #[inline]
    pub fn new(start: Option<i64>, stop: Option<i64>, step: Option<i64>) -> Self {
        Self {
            start: start.into(),
            stop: stop.into(),
            step: step.into(),
        }
    }

    /// Get the start component.
    #[inline]
    pub fn start(&self) -> Option<i64> {
        self.start.get()
    }

    /// Get the stop component.
    #[inline]
    pub fn stop(&self) -> Option<i64> {
        self.stop.get()
    }

    /// Get the step component.
    #[inline]
    pub fn step(&self) -> Option<i64> {
        self.step.get()
    }

    /// Resolve concrete indices for a sequence of the given length.
    ///
    /// Algorithm: determine the step direction, pick direction-appropriate
    /// defaults for unspecified components, normalize negatives, clamp into
    /// range, then compute the selected element count.
    pub fn indices(&self, frame: &Frame, length: usize) -> Result<SliceIndices, Raised> {
        let len = length as i64;
        let step = self.step.unwrap_or(1);
        if step == 0 {
            return Err(frame.raise_value_error("slice step cannot be zero"));
        }

        let (default_start, default_stop) = if step > 0 {
            (0i64, len)
        } else {
            (len - 1, -len - 1)
        };

        let mut start = self.start.unwrap_or(default_start);
        if start < 0 {
            start += len;
            if start < 0 {
                start = if step < 0 { -1 } else { 0 };
            }
        } else if start >= len {
            start = if step < 0 { len - 1 } else { len };
        }

        let mut stop = self.stop.unwrap_or(default_stop);
        if stop < 0 {
            stop += len;
            if stop < 0 {
                stop = if step < 0 { -1 } else { 0 };
            }
        } else if stop >= len {
            stop = if step < 0 { len - 1 } else { len };
        }

        let slice_length = if step > 0 {
            if stop > start {
                ((stop - start - 1) / step + 1) as usize
            } else {
                0
            }
        } else if start > stop {
            ((start - stop - 1) / (-step) + 1) as usize
        } else {
            0
        };

        Ok(SliceIndices {
            start: start.max(0) as usize,
            stop: stop.max(0) as usize,
            step: step as isize,
            length: slice_length,
        })
    }
}

impl fmt::Debug for SliceObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "slice({:?}, {:?}, {:?})",
            self.start, self.stop, self.step
        )
    }
}

/// Type descriptor for slice specifications.
pub static SLICE_TYPE: TypeObject = TypeObject {
    id: TypeId::SLICE,
    name: "slice",
    flags: TypeFlags::empty(),
    slots: TypeSlots {
        repr: Some(slice_repr),
        ..TypeSlots::EMPTY
    },
};

fn slice_repr(frame: &mut Frame, obj: &Value) -> Result<String, Raised> {
    let Some(slice) = obj.as_slice() else {
        return Err(frame.raise_type_error("repr slot requires a 'slice' object"));
    };
    Ok(format!("{:?}", slice.as_ref()))
}

// =============================================================================
// Single-index resolution
// =============================================================================

/// Extract a raw index from a value, if it is integer-like or exposes the
/// index protocol.
///
/// Returns `Ok(None)` when the value's kind has no index semantics, letting
/// the caller raise its own kind-specific TypeError. An error raised by the
/// index slot itself propagates unchanged.
pub fn try_index(frame: &mut Frame, key: &Value) -> Result<Option<i64>, Raised> {
    if let Some(i) = key.as_integer() {
        return Ok(Some(i));
    }
    match key.type_obj().slots.index {
        Some(slot) => slot(frame, key).map(Some),
        None => Ok(None),
    }
}

/// Normalize a raw index against a sequence length.
///
/// Negative values count from the end; anything outside `[0, len)` after
/// normalization is an IndexError.
pub fn normalize_index(frame: &Frame, len: usize, raw: i64) -> Result<usize, Raised> {
    let len = len as i64;
    let idx = if raw < 0 { raw + len } else { raw };
    if idx < 0 || idx >= len {
        return Err(frame.raise_index_error("index out of range"));
    }
    Ok(idx as usize)
}
