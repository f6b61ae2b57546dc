// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

use crate::error::{Error, Result};
use crate::schedule::BackoffSchedule;

/// Immutable retry timing configuration for a message consumer.
///
/// Holds two independent [`BackoffSchedule`]s, one per retry mode:
///
/// - **Blocking**: intake on the affected partition is paused while waiting
///   between attempts. The blocking schedule defines those pause durations.
/// - **Non-blocking**: the failed message is deferred (re-enqueued) without
///   halting intake. The non-blocking schedule defines the delays before
///   re-dispatch.
///
/// The schedules carry no cross-constraint: either may be empty (disabling
/// that mode), and their lengths need not match. Once constructed, the value
/// never changes; it is `Send + Sync` and may be read concurrently by any
/// number of threads without synchronization. The retry executor consuming
/// this configuration owns everything else: attempt tracking, partition
/// pause/resume, and the policy for exhausted schedules.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use redelivery::RetryConfig;
///
/// let config = RetryConfig::new(
///     [Duration::from_secs(1), Duration::from_secs(5), Duration::from_secs(10)],
///     [Duration::from_secs(30)],
/// );
///
/// assert_eq!(config.blocking_backoffs().len(), 3);
/// assert_eq!(config.non_blocking_backoffs().get(0), Some(Duration::from_secs(30)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RetryConfig {
    blocking_backoffs: BackoffSchedule,
    non_blocking_backoffs: BackoffSchedule,
}

impl RetryConfig {
    /// Creates a configuration from explicit blocking and non-blocking schedules.
    ///
    /// Both schedules are required; pass [`BackoffSchedule::empty`] (or an
    /// empty collection) to disable a mode rather than omitting it. The
    /// schedules are taken as supplied, with no reordering, deduplication,
    /// or clamping.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::time::Duration;
    ///
    /// use redelivery::{BackoffSchedule, RetryConfig};
    ///
    /// // Blocking retry disabled, one non-blocking attempt after 30 seconds.
    /// let config = RetryConfig::new(BackoffSchedule::empty(), [Duration::from_secs(30)]);
    ///
    /// assert!(config.blocking_backoffs().is_empty());
    /// assert_eq!(config.non_blocking_backoffs().len(), 1);
    /// ```
    #[must_use]
    pub fn new(
        blocking_backoffs: impl Into<BackoffSchedule>,
        non_blocking_backoffs: impl Into<BackoffSchedule>,
    ) -> Self {
        Self {
            blocking_backoffs: blocking_backoffs.into(),
            non_blocking_backoffs: non_blocking_backoffs.into(),
        }
    }

    /// Creates a builder for assembling a configuration field by field.
    ///
    /// Unlike [`new`][RetryConfig::new], the builder allows the schedules to
    /// be supplied separately (e.g. from different configuration sources) and
    /// reports an error at [`build`][RetryConfigBuilder::build] time if either
    /// one was never provided.
    #[must_use]
    pub fn builder() -> RetryConfigBuilder {
        RetryConfigBuilder::default()
    }

    /// Returns the waits between blocking-mode retry attempts, in original order.
    #[must_use]
    pub fn blocking_backoffs(&self) -> &BackoffSchedule {
        &self.blocking_backoffs
    }

    /// Returns the delays before non-blocking re-dispatch, in original order.
    #[must_use]
    pub fn non_blocking_backoffs(&self) -> &BackoffSchedule {
        &self.non_blocking_backoffs
    }
}

/// Builder for [`RetryConfig`].
///
/// Both schedules are required properties. [`build`][RetryConfigBuilder::build]
/// fails if either was never set, since a configuration with an absent
/// schedule would leave retry timing undefined. An explicitly empty schedule
/// is always acceptable.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
///
/// use redelivery::RetryConfig;
///
/// let config = RetryConfig::builder()
///     .blocking_backoffs([Duration::from_secs(1), Duration::from_secs(5)])
///     .non_blocking_backoffs([Duration::from_secs(30)])
///     .build()?;
///
/// assert_eq!(config.blocking_backoffs().len(), 2);
/// # Ok::<(), redelivery::Error>(())
/// ```
#[derive(Debug, Default)]
pub struct RetryConfigBuilder {
    blocking_backoffs: Option<BackoffSchedule>,
    non_blocking_backoffs: Option<BackoffSchedule>,
}

impl RetryConfigBuilder {
    /// Sets the blocking backoff schedule.
    #[must_use]
    pub fn blocking_backoffs(mut self, schedule: impl Into<BackoffSchedule>) -> Self {
        self.blocking_backoffs = Some(schedule.into());
        self
    }

    /// Sets the non-blocking backoff schedule.
    #[must_use]
    pub fn non_blocking_backoffs(mut self, schedule: impl Into<BackoffSchedule>) -> Self {
        self.non_blocking_backoffs = Some(schedule.into());
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if either schedule was never supplied.
    pub fn build(self) -> Result<RetryConfig> {
        let blocking_backoffs = self
            .blocking_backoffs
            .ok_or_else(|| Error::missing_schedule("blocking"))?;
        let non_blocking_backoffs = self
            .non_blocking_backoffs
            .ok_or_else(|| Error::missing_schedule("non-blocking"))?;

        Ok(RetryConfig {
            blocking_backoffs,
            non_blocking_backoffs,
        })
    }
}

#[cfg_attr(coverage_nightly, coverage(off))]
#[cfg(test)]
mod tests {
    use std::fmt::Debug;
    use std::time::Duration;

    use static_assertions::assert_impl_all;

    use super::*;

    assert_impl_all!(RetryConfig: Debug, Clone, PartialEq, Eq, std::hash::Hash, Send, Sync);
    assert_impl_all!(RetryConfigBuilder: Debug, Default, Send, Sync);

    #[test]
    fn round_trip_identity() {
        let blocking = vec![
            Duration::from_secs(1),
            Duration::from_secs(5),
            Duration::from_secs(10),
        ];
        let non_blocking = vec![Duration::from_secs(30)];

        let config = RetryConfig::new(blocking.clone(), non_blocking.clone());

        assert_eq!(config.blocking_backoffs().as_slice(), blocking.as_slice());
        assert_eq!(config.non_blocking_backoffs().as_slice(), non_blocking.as_slice());
    }

    #[test]
    fn both_schedules_empty() {
        let config = RetryConfig::new(BackoffSchedule::empty(), BackoffSchedule::empty());

        assert!(config.blocking_backoffs().is_empty());
        assert!(config.non_blocking_backoffs().is_empty());
    }

    #[test]
    fn schedules_are_independent() {
        let blocking_only = RetryConfig::new([Duration::from_secs(1)], BackoffSchedule::empty());
        assert_eq!(blocking_only.blocking_backoffs().len(), 1);
        assert!(blocking_only.non_blocking_backoffs().is_empty());

        let non_blocking_only = RetryConfig::new(BackoffSchedule::empty(), [Duration::from_secs(1)]);
        assert!(non_blocking_only.blocking_backoffs().is_empty());
        assert_eq!(non_blocking_only.non_blocking_backoffs().len(), 1);
    }

    #[test]
    fn builder_ok() {
        let config = RetryConfig::builder()
            .blocking_backoffs([Duration::from_secs(2)])
            .non_blocking_backoffs(BackoffSchedule::empty())
            .build()
            .unwrap();

        assert_eq!(config.blocking_backoffs().as_slice(), &[Duration::from_secs(2)]);
        assert!(config.non_blocking_backoffs().is_empty());
    }

    #[test]
    fn builder_missing_blocking() {
        let error = RetryConfig::builder()
            .non_blocking_backoffs([Duration::from_secs(30)])
            .build()
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "invalid retry configuration: no blocking backoff schedule was provided"
        );
    }

    #[test]
    fn builder_missing_non_blocking() {
        let error = RetryConfig::builder()
            .blocking_backoffs([Duration::from_secs(30)])
            .build()
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "invalid retry configuration: no non-blocking backoff schedule was provided"
        );
    }

    #[test]
    fn builder_missing_both_reports_blocking_first() {
        let error = RetryConfig::builder().build().unwrap_err();

        assert_eq!(
            error.to_string(),
            "invalid retry configuration: no blocking backoff schedule was provided"
        );
    }

    #[test]
    fn builder_last_set_wins() {
        let config = RetryConfig::builder()
            .blocking_backoffs([Duration::from_secs(1)])
            .blocking_backoffs([Duration::from_secs(9)])
            .non_blocking_backoffs(BackoffSchedule::empty())
            .build()
            .unwrap();

        assert_eq!(config.blocking_backoffs().as_slice(), &[Duration::from_secs(9)]);
    }

    #[test]
    fn accessor_views_do_not_alias_internal_state() {
        let config = RetryConfig::new([Duration::from_secs(1)], BackoffSchedule::empty());

        // The accessor hands out a view; turning it into an owned collection
        // and mutating that cannot touch the configuration.
        let mut copied = config.blocking_backoffs().iter().collect::<Vec<_>>();
        copied.push(Duration::from_secs(77));
        copied[0] = Duration::from_secs(88);

        assert_eq!(config.blocking_backoffs().as_slice(), &[Duration::from_secs(1)]);
    }

    #[test]
    fn equality_covers_both_schedules() {
        let a = RetryConfig::new([Duration::from_secs(1)], [Duration::from_secs(2)]);
        let b = RetryConfig::new([Duration::from_secs(1)], [Duration::from_secs(2)]);
        let c = RetryConfig::new([Duration::from_secs(2)], [Duration::from_secs(1)]);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
