//! String truncation across the report tree.
//!
//! Every node type implements [`Truncatable`]. A node truncates its own
//! string fields and delegates to each child's implementation, so there is
//! no central routine that has to know every node's shape.
//!
//! Results are returned as [`Cow`]: a node that already fits comes back as
//! `Cow::Borrowed(self)` without allocating, and a node that had to change
//! comes back as a freshly built `Cow::Owned` value. The receiver is never
//! mutated.
//!
//! Lengths are counted in Unicode scalar values (`char`s). Truncation keeps
//! the first `max_length` chars with no ellipsis or marker.

use std::borrow::Cow;
use std::collections::BTreeMap;
use tracing::debug;

/// A report node that can produce a copy of itself with bounded strings.
pub trait Truncatable: Clone {
    /// Return this node with every reachable string cut to at most
    /// `max_length` chars.
    ///
    /// Field identity, child count and child order are preserved.
    fn truncate_strings(&self, max_length: usize) -> Cow<'_, Self>;
}

/// Truncate a whole tree, logging when anything had to change.
pub fn truncate<T: Truncatable>(node: &T, max_length: usize) -> Cow<'_, T> {
    let result = node.truncate_strings(max_length);
    if is_owned(&result) {
        debug!(max_length, "report tree rebuilt with truncated strings");
    }
    result
}

/// First `max_length` chars of `value`, borrowing when it already fits.
pub fn truncate_str(value: &str, max_length: usize) -> Cow<'_, str> {
    match value.char_indices().nth(max_length) {
        Some((end, _)) => Cow::Owned(value[..end].to_string()),
        None => Cow::Borrowed(value),
    }
}

/// [`truncate_str`] over an optional field.
pub fn truncate_opt(value: &Option<String>, max_length: usize) -> Option<Cow<'_, str>> {
    value.as_deref().map(|v| truncate_str(v, max_length))
}

/// Truncate every element, preserving order and count.
///
/// Borrows the original slice when no element changed.
pub fn truncate_slice<T: Truncatable>(items: &[T], max_length: usize) -> Cow<'_, [T]> {
    let truncated: Vec<Cow<'_, T>> = items
        .iter()
        .map(|item| item.truncate_strings(max_length))
        .collect();

    if !truncated.iter().any(is_owned) {
        return Cow::Borrowed(items);
    }
    Cow::Owned(truncated.into_iter().map(Cow::into_owned).collect())
}

/// Truncate the values of a string map. Keys are left alone.
pub fn truncate_map_values(
    map: &BTreeMap<String, String>,
    max_length: usize,
) -> Cow<'_, BTreeMap<String, String>> {
    if !map.values().any(|v| exceeds(v, max_length)) {
        return Cow::Borrowed(map);
    }
    Cow::Owned(
        map.iter()
            .map(|(k, v)| (k.clone(), truncate_str(v, max_length).into_owned()))
            .collect(),
    )
}

/// Truncate every string in a map of string lists.
pub fn truncate_list_map(
    map: &BTreeMap<String, Vec<String>>,
    max_length: usize,
) -> Cow<'_, BTreeMap<String, Vec<String>>> {
    let changed = map
        .values()
        .any(|list| list.iter().any(|v| exceeds(v, max_length)));
    if !changed {
        return Cow::Borrowed(map);
    }
    Cow::Owned(
        map.iter()
            .map(|(k, list)| {
                let list = list
                    .iter()
                    .map(|v| truncate_str(v, max_length).into_owned())
                    .collect();
                (k.clone(), list)
            })
            .collect(),
    )
}

/// Whether `value` is longer than `max_length` chars.
pub fn exceeds(value: &str, max_length: usize) -> bool {
    value.chars().nth(max_length).is_some()
}

pub(crate) fn is_owned<B: ToOwned + ?Sized>(value: &Cow<'_, B>) -> bool {
    matches!(value, Cow::Owned(_))
}

pub(crate) fn opt_owned<B: ToOwned + ?Sized>(value: &Option<Cow<'_, B>>) -> bool {
    value.as_ref().is_some_and(is_owned)
}

pub(crate) fn opt_into_owned(value: Option<Cow<'_, str>>) -> Option<String> {
    value.map(Cow::into_owned)
}

/// Rewrap a child's truncation result in its parent.
///
/// A borrowed child means the parent is unchanged too.
pub(crate) fn rewrap<'a, C, P>(
    parent: &'a P,
    child: Cow<'_, C>,
    wrap: impl FnOnce(C::Owned) -> P,
) -> Cow<'a, P>
where
    C: ToOwned + ?Sized,
    P: Clone,
{
    match child {
        Cow::Borrowed(_) => Cow::Borrowed(parent),
        Cow::Owned(child) => Cow::Owned(wrap(child)),
    }
}
