// Copyright (c) Microsoft Corporation.

//! This example demonstrates loading a retry configuration from JSON text,
//! as an application would from its configuration file.

use redelivery::RetryConfig;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let text = r#"{
        "blocking_backoffs": ["1s", "5s", "10s"],
        "non_blocking_backoffs": ["30s", "2m 30s"]
    }"#;

    let config: RetryConfig = serde_json::from_str(text)?;

    println!("blocking waits: {}", config.blocking_backoffs());
    println!("non-blocking waits: {}", config.non_blocking_backoffs());

    // A configuration missing a schedule is rejected outright; the consumer
    // should fail to start rather than run with undefined retry timing.
    if let Err(err) = serde_json::from_str::<RetryConfig>(r#"{"blocking_backoffs": []}"#) {
        println!("incomplete configuration rejected: {err}");
    }

    Ok(())
}
