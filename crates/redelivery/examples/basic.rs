// Copyright (c) Microsoft Corporation.

//! This example demonstrates constructing a retry configuration and reading
//! it the way a retry executor would.

use std::time::Duration;

use redelivery::{BackoffSchedule, RetryConfig};

fn main() -> Result<(), redelivery::Error> {
    // Three blocking attempts with growing waits, one non-blocking redelivery.
    let config = RetryConfig::new(
        [Duration::from_secs(1), Duration::from_secs(5), Duration::from_secs(10)],
        [Duration::from_secs(30)],
    );

    println!("blocking waits: {}", config.blocking_backoffs());
    println!("non-blocking waits: {}", config.non_blocking_backoffs());

    // An executor walks the schedule attempt by attempt until it is exhausted.
    let mut attempt = 0;
    while let Some(wait) = config.blocking_backoffs().get(attempt) {
        println!("before blocking attempt {}: wait {wait:?}", attempt + 1);
        attempt += 1;
    }
    println!("blocking schedule exhausted after {attempt} attempts");

    // Schedules can also be assembled piecemeal; the builder rejects a
    // configuration where one of them was never supplied.
    let config = RetryConfig::builder()
        .blocking_backoffs(BackoffSchedule::empty())
        .non_blocking_backoffs([Duration::from_secs(30), Duration::from_secs(60)])
        .build()?;

    println!("blocking retry disabled: {}", config.blocking_backoffs().is_empty());

    Ok(())
}
