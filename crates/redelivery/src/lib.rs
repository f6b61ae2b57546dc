// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

#![cfg_attr(
    test,
    allow(
        clippy::arithmetic_side_effects,
        reason = "allow these lints in tests to improve the readability of the tests"
    )
)]
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]
#![cfg_attr(docsrs, feature(doc_cfg))]

//! Backoff schedules for message redelivery retry policies.
//!
//! # Why
//!
//! When a message consumer fails to process a message, a retry mechanism
//! decides when the message is attempted again. This crate provides the
//! configuration value that parameterizes such a mechanism: how long to wait
//! before each retry attempt, separately for the two common retry modes:
//!
//! - **Blocking retry**: intake on the affected partition is paused while
//!   waiting to reattempt processing, preserving ordering at the cost of lag.
//! - **Non-blocking retry**: the failed message is deferred (e.g. re-enqueued
//!   to a retry topic) without pausing intake of subsequent messages.
//!
//! The crate deliberately stops at the data model. The retry executor — the
//! scheduler that delays, re-dispatches, pauses and resumes partitions, and
//! tracks attempt counts — consumes a [`RetryConfig`] as an immutable input
//! and owns every policy decision, including what to do when a schedule runs
//! out of waits.
//!
//! # Core Types
//!
//! - [`RetryConfig`]: an immutable pair of backoff schedules, one per retry mode.
//! - [`BackoffSchedule`]: an ordered, frozen sequence of wait durations, one
//!   per retry attempt.
//! - [`Error`]: the invalid-configuration error reported when a required
//!   schedule is absent.
//!
//! # Examples
//!
//! ```rust
//! use std::time::Duration;
//!
//! use redelivery::RetryConfig;
//!
//! // Three blocking attempts with growing waits, then one non-blocking
//! // redelivery half a minute later.
//! let config = RetryConfig::new(
//!     [Duration::from_secs(1), Duration::from_secs(5), Duration::from_secs(10)],
//!     [Duration::from_secs(30)],
//! );
//!
//! // An executor reads the waits attempt by attempt.
//! assert_eq!(config.blocking_backoffs().get(0), Some(Duration::from_secs(1)));
//! assert_eq!(config.blocking_backoffs().get(2), Some(Duration::from_secs(10)));
//! assert_eq!(config.blocking_backoffs().get(3), None); // exhausted - executor's call
//! ```
//!
//! Assembling the configuration field by field, failing if a schedule is
//! never supplied:
//!
//! ```rust
//! use std::time::Duration;
//!
//! use redelivery::{BackoffSchedule, RetryConfig};
//!
//! let config = RetryConfig::builder()
//!     .blocking_backoffs(BackoffSchedule::empty()) // blocking retry disabled
//!     .non_blocking_backoffs([Duration::from_secs(30), Duration::from_secs(60)])
//!     .build()?;
//!
//! assert!(config.blocking_backoffs().is_empty());
//!
//! // Omitting a schedule outright is an invalid configuration.
//! assert!(RetryConfig::builder().build().is_err());
//! # Ok::<(), redelivery::Error>(())
//! ```
//!
//! # Thread Safety
//!
//! [`RetryConfig`] and [`BackoffSchedule`] are immutable once constructed and
//! are `Send + Sync`: any number of threads may read a shared configuration
//! concurrently without synchronization.
//!
//! # Features
//!
//! - `serde`: serialization support. Schedules are expressed as sequences of
//!   duration strings (`"5s"`, `"2m 30s"`, `"PT30s"`), so configurations can
//!   be read from JSON or similar configuration files.

mod config;
mod error;
mod schedule;
#[cfg(feature = "serde")]
mod serde_impl;

pub use config::{RetryConfig, RetryConfigBuilder};
pub use error::{Error, Result};
pub use schedule::BackoffSchedule;
