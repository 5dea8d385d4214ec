//! Logical index resolution.
//!
//! Every position-based operation resolves a possibly negative index against the
//! entry count at call time. Negative indices count back from the end.

/// Resolves a start-like or end-like position, clamped to `[0, len]`.
pub(crate) fn resolve_bound(index: i64, len: usize) -> usize {
    let len_i = len as i64;
    if index < 0 {
        (len_i + index).max(0) as usize
    } else {
        index.min(len_i) as usize
    }
}

/// Resolves a point lookup. Indices whose magnitude exceeds `len` are out of range.
///
/// The result may equal `len`, which matches no entry of a dense container.
pub(crate) fn resolve_point(index: i64, len: usize) -> Option<usize> {
    let len_i = len as i64;
    if len == 0 || index.unsigned_abs() > len as u64 {
        return None;
    }
    let resolved = if index < 0 { len_i + index } else { index };
    Some(resolved as usize)
}

/// Resolves the lower bound of a forward search.
///
/// Returns `None` when the search starts past the end. The result stays negative
/// when a negative index reaches back past the first entry, which admits every key.
pub(crate) fn resolve_from(index: i64, len: usize) -> Option<i64> {
    let len_i = len as i64;
    if index > len_i {
        return None;
    }
    Some(if index < 0 { len_i + index } else { index })
}

/// Resolves the upper bound of a backward search, clamped to the last position.
///
/// Returns `None` when a negative index reaches back past the first entry.
pub(crate) fn resolve_upto(index: i64, len: usize) -> Option<i64> {
    let len_i = len as i64;
    let bound = if index < 0 {
        len_i + index
    } else {
        index.min(len_i - 1)
    };
    (bound >= 0).then_some(bound)
}
