//! Sources of report fields.

/// Supplies one part of a report, or nothing when it is unavailable.
pub trait Provider<T> {
    fn provide(&self) -> Option<T>;
}

impl<T, F> Provider<T> for F
where
    F: Fn() -> Option<T>,
{
    fn provide(&self) -> Option<T> {
        self()
    }
}
