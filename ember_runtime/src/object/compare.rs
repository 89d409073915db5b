//! Cross-type comparison and equality.
//!
//! Ordering is slot-dispatched: `compare` resolves the left operand's
//! compare slot and fails with a TypeError when none exists. Equality
//! (`values_eq`) is total — content-based for comparable kinds, identity for
//! reference payloads, and false (never an error) for everything else, so
//! sentinel checks work against arbitrary values.

use crate::object::Value;
use ember_core::{Frame, Raised};
use std::cmp::Ordering;

/// Three-way comparison: LT, EQ, or GT.
///
/// Dispatches to the left operand's compare slot. A type without comparable
/// semantics against the given operand fails with a TypeError at this call
/// site.
pub fn compare(frame: &mut Frame, a: &Value, b: &Value) -> Result<Ordering, Raised> {
    let Some(slot) = a.type_obj().slots.compare else {
        return Err(unorderable(frame, a, b));
    };
    slot(frame, a, b)
}

/// Equality used by `==` and the callable-iterator sentinel check.
///
/// Content-based, not identity-based, for all comparable kinds; errors only
/// when a nested element comparison itself raises.
pub fn values_eq(frame: &mut Frame, a: &Value, b: &Value) -> Result<bool, Raised> {
    // Numeric kinds compare by value across int/bool/float.
    if let (Some(x), Some(y)) = (numeric_view(a), numeric_view(b)) {
        return Ok(numeric_eq(x, y));
    }

    if let (Some(x), Some(y)) = (a.as_str(), b.as_str()) {
        return Ok(x == y);
    }

    // Byte-sequence equality holds whether the comparand is a bytearray or
    // a textual value with equal byte content.
    if a.as_bytearray().is_some() || b.as_bytearray().is_some() {
        if let (Some(x), Some(y)) = (byte_view(a), byte_view(b)) {
            return Ok(x == y);
        }
        return Ok(false);
    }

    if a.is_none() && b.is_none() {
        return Ok(true);
    }

    if let (Some(x), Some(y)) = (a.as_list(), b.as_list()) {
        let (xs, ys) = (x.items(), y.items());
        if xs.len() != ys.len() {
            return Ok(false);
        }
        for (xi, yi) in xs.iter().zip(ys.iter()) {
            if !values_eq(frame, xi, yi)? {
                return Ok(false);
            }
        }
        return Ok(true);
    }

    if let (Some(x), Some(y)) = (a.as_slice(), b.as_slice()) {
        return Ok(x == y);
    }

    // Functions, iterators, and plain instances compare by identity.
    Ok(a.identity_eq(b))
}

/// Lexicographic byte-sequence ordering: first differing byte decides; on a
/// common-prefix tie the shorter sequence is less.
#[inline]
pub fn compare_bytes(a: &[u8], b: &[u8]) -> Ordering {
    a.cmp(b)
}

/// Numeric comparison over int/bool/float operands, total over NaN.
pub(crate) fn compare_numeric(a: &Value, b: &Value) -> Option<Ordering> {
    match (numeric_view(a)?, numeric_view(b)?) {
        (NumericView::Int(x), NumericView::Int(y)) => Some(x.cmp(&y)),
        (x, y) => Some(x.as_f64().total_cmp(&y.as_f64())),
    }
}

/// TypeError for an unsupported comparison pair.
pub(crate) fn unorderable(frame: &Frame, a: &Value, b: &Value) -> Raised {
    frame.raise_type_error(format!(
        "cannot compare '{}' with '{}'",
        a.type_name(),
        b.type_name()
    ))
}

/// Raw byte content of a byte-sequence or textual operand.
pub(crate) fn byte_view(v: &Value) -> Option<Vec<u8>> {
    if let Some(ba) = v.as_bytearray() {
        return Some(ba.to_vec());
    }
    v.as_str().map(|s| s.as_bytes().to_vec())
}

#[derive(Clone, Copy)]
pub(crate) enum NumericView {
    Int(i64),
    Float(f64),
}

impl NumericView {
    #[inline]
    fn as_f64(self) -> f64 {
        match self {
            NumericView::Int(i) => i as f64,
            NumericView::Float(f) => f,
        }
    }
}

#[inline]
fn numeric_eq(x: NumericView, y: NumericView) -> bool {
    match (x, y) {
        (NumericView::Int(a), NumericView::Int(b)) => a == b,
        (x, y) => x.as_f64() == y.as_f64(),
    }
}

#[inline]
fn numeric_view(v: &Value) -> Option<NumericView> {
    if let Some(i) = v.as_integer() {
        return Some(NumericView::Int(i));
    }
    v.as_float().map(NumericView::Float)
}
