// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use std::fmt::{self, Display, Formatter};
use std::ops::Index;
use std::sync::Arc;
use std::time::Duration;

/// An ordered, frozen sequence of wait durations, one per retry attempt.
///
/// Position `i` in the schedule is the wait applied before retry attempt `i + 1`,
/// so a schedule of length `N` implicitly bounds the retry mode it parameterizes
/// to `N` attempts. What happens once the schedule is exhausted (stop retrying,
/// repeat the last wait, retry immediately) is a policy owned by the retry
/// executor, not by this type; [`get`][BackoffSchedule::get] simply returns
/// `None` past the end.
///
/// The waits are copied out of the source collection at construction and frozen,
/// so later changes to that collection cannot reach the schedule. Cloning shares
/// the frozen storage and is cheap.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use redelivery::BackoffSchedule;
///
/// let schedule = BackoffSchedule::new([
///     Duration::from_secs(1),
///     Duration::from_secs(5),
///     Duration::from_secs(10),
/// ]);
///
/// assert_eq!(schedule.len(), 3);
/// assert_eq!(schedule.get(0), Some(Duration::from_secs(1)));
/// assert_eq!(schedule.get(3), None); // exhausted
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct BackoffSchedule {
    waits: Arc<[Duration]>,
}

impl BackoffSchedule {
    /// Creates a schedule from an ordered collection of waits.
    ///
    /// The waits are kept exactly as supplied: no reordering, deduplication,
    /// or clamping takes place.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    ///
    /// use redelivery::BackoffSchedule;
    ///
    /// let schedule = BackoffSchedule::new(vec![Duration::from_secs(30)]);
    /// assert_eq!(schedule.as_slice(), &[Duration::from_secs(30)]);
    /// ```
    #[must_use]
    pub fn new(waits: impl IntoIterator<Item = Duration>) -> Self {
        Self {
            waits: waits.into_iter().collect(),
        }
    }

    /// Creates an empty schedule.
    ///
    /// An empty schedule is valid configuration: it means the retry mode it
    /// parameterizes is bounded to zero attempts (effectively disabled).
    ///
    /// # Examples
    ///
    /// ```rust
    /// use redelivery::BackoffSchedule;
    ///
    /// assert!(BackoffSchedule::empty().is_empty());
    /// ```
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns the waits as a slice, in original order.
    #[must_use]
    pub fn as_slice(&self) -> &[Duration] {
        &self.waits
    }

    /// Returns an iterator over the waits, in original order.
    pub fn iter(&self) -> std::iter::Copied<std::slice::Iter<'_, Duration>> {
        self.waits.iter().copied()
    }

    /// Returns the number of configured waits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.waits.len()
    }

    /// Returns `true` if the schedule contains no waits.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.waits.is_empty()
    }

    /// Returns the wait before retry attempt `attempt + 1`, or `None` if the
    /// schedule is exhausted at that attempt.
    ///
    /// `None` carries no policy of its own; the executor decides whether an
    /// exhausted schedule means "stop retrying" or something else.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    ///
    /// use redelivery::BackoffSchedule;
    ///
    /// let schedule = BackoffSchedule::new([Duration::from_secs(1), Duration::from_secs(5)]);
    ///
    /// assert_eq!(schedule.get(1), Some(Duration::from_secs(5)));
    /// assert_eq!(schedule.get(2), None);
    /// ```
    #[must_use]
    pub fn get(&self, attempt: usize) -> Option<Duration> {
        self.waits.get(attempt).copied()
    }

    /// Returns the implicit bound on retry attempts, which is the schedule length.
    #[must_use]
    pub fn max_attempts(&self) -> usize {
        self.waits.len()
    }
}

impl From<Vec<Duration>> for BackoffSchedule {
    fn from(waits: Vec<Duration>) -> Self {
        Self::new(waits)
    }
}

impl From<&[Duration]> for BackoffSchedule {
    fn from(waits: &[Duration]) -> Self {
        Self {
            waits: Arc::from(waits),
        }
    }
}

impl<const N: usize> From<[Duration; N]> for BackoffSchedule {
    fn from(waits: [Duration; N]) -> Self {
        Self::new(waits)
    }
}

impl FromIterator<Duration> for BackoffSchedule {
    fn from_iter<T: IntoIterator<Item = Duration>>(iter: T) -> Self {
        Self::new(iter)
    }
}

impl AsRef<[Duration]> for BackoffSchedule {
    fn as_ref(&self) -> &[Duration] {
        &self.waits
    }
}

impl Index<usize> for BackoffSchedule {
    type Output = Duration;

    fn index(&self, attempt: usize) -> &Self::Output {
        &self.waits[attempt]
    }
}

impl<'a> IntoIterator for &'a BackoffSchedule {
    type Item = Duration;
    type IntoIter = std::iter::Copied<std::slice::Iter<'a, Duration>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl Display for BackoffSchedule {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.waits.iter()).finish()
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::fmt::Debug;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(BackoffSchedule: Debug, Clone, PartialEq, Eq, std::hash::Hash, Send, Sync);

    #[test]
    fn preserves_order_and_duplicates() {
        let waits = vec![
            Duration::from_secs(10),
            Duration::from_secs(1),
            Duration::from_secs(1),
            Duration::from_millis(500),
        ];

        let schedule = BackoffSchedule::new(waits.clone());

        assert_eq!(schedule.as_slice(), waits.as_slice());
        assert_eq!(schedule.iter().collect::<Vec<_>>(), waits);
    }

    #[test]
    fn empty_schedule() {
        let schedule = BackoffSchedule::empty();

        assert!(schedule.is_empty());
        assert_eq!(schedule.len(), 0);
        assert_eq!(schedule.max_attempts(), 0);
        assert_eq!(schedule.get(0), None);
        assert_eq!(schedule, BackoffSchedule::default());
        assert_eq!(schedule, BackoffSchedule::new([]));
    }

    #[test]
    fn get_by_attempt() {
        let schedule = BackoffSchedule::new([Duration::from_secs(1), Duration::from_secs(5)]);

        assert_eq!(schedule.get(0), Some(Duration::from_secs(1)));
        assert_eq!(schedule.get(1), Some(Duration::from_secs(5)));
        assert_eq!(schedule.get(2), None);
        assert_eq!(schedule.max_attempts(), 2);
    }

    #[test]
    fn index_by_attempt() {
        let schedule = BackoffSchedule::new([Duration::from_secs(7)]);

        assert_eq!(schedule[0], Duration::from_secs(7));
    }

    #[test]
    fn frozen_at_construction() {
        let mut waits = vec![Duration::from_secs(1)];
        let schedule = BackoffSchedule::from(waits.as_slice());

        waits.push(Duration::from_secs(99));
        waits[0] = Duration::from_secs(42);

        assert_eq!(schedule.as_slice(), &[Duration::from_secs(1)]);
    }

    #[test]
    fn clones_share_content() {
        let schedule = BackoffSchedule::new([Duration::from_secs(2)]);
        let clone = schedule.clone();

        assert_eq!(schedule, clone);
        assert_eq!(clone.as_slice(), &[Duration::from_secs(2)]);
    }

    #[test]
    fn conversions() {
        let expected = BackoffSchedule::new([Duration::from_secs(3)]);

        assert_eq!(BackoffSchedule::from(vec![Duration::from_secs(3)]), expected);
        assert_eq!(BackoffSchedule::from([Duration::from_secs(3)]), expected);
        assert_eq!([Duration::from_secs(3)].into_iter().collect::<BackoffSchedule>(), expected);
    }

    #[test]
    fn display_ok() {
        let schedule = BackoffSchedule::new([
            Duration::from_secs(1),
            Duration::from_secs(5),
            Duration::from_millis(500),
        ]);

        assert_eq!(schedule.to_string(), "[1s, 5s, 500ms]");
        assert_eq!(BackoffSchedule::empty().to_string(), "[]");
    }

    #[test]
    fn ref_into_iterator() {
        let schedule = BackoffSchedule::new([Duration::from_secs(1), Duration::from_secs(2)]);

        let mut total = Duration::ZERO;
        for wait in &schedule {
            total += wait;
        }

        assert_eq!(total, Duration::from_secs(3));
    }
}
