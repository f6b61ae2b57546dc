// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Serde support for retry configuration.
//!
//! Schedules serialize as sequences of duration strings and parse back from
//! either the friendly form (`"5s"`, `"2m 30s"`) or the ISO 8601 form
//! (`"PT30s"`). A configuration missing one of its schedules, or carrying a
//! negative wait, is rejected during deserialization.

use std::fmt;
use std::time::Duration;

use jiff::SignedDuration;
use serde_core::de::{self, Deserializer, MapAccess, SeqAccess, Visitor};
use serde_core::ser::{self, SerializeSeq, SerializeStruct, Serializer};
use serde_core::{Deserialize, Serialize};

use crate::{BackoffSchedule, RetryConfig};

const FIELDS: &[&str] = &["blocking_backoffs", "non_blocking_backoffs"];

// A single wait, carried across the wire as a duration string.
struct Wait(Duration);

impl Serialize for Wait {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match SignedDuration::try_from(self.0) {
            Ok(wait) => serializer.collect_str(&wait),
            Err(err) => Err(ser::Error::custom(err)),
        }
    }
}

impl<'de> Deserialize<'de> for Wait {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct WaitVisitor;

        impl Visitor<'_> for WaitVisitor {
            type Value = Wait;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a duration string such as \"5s\" or \"2m 30s\"")
            }

            fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                let wait = value.parse::<SignedDuration>().map_err(E::custom)?;
                if wait.is_negative() {
                    return Err(E::custom(format_args!(
                        "backoff wait must not be negative, got {value}"
                    )));
                }

                let wait = Duration::try_from(wait).map_err(E::custom)?;
                Ok(Wait(wait))
            }
        }

        deserializer.deserialize_str(WaitVisitor)
    }
}

impl Serialize for BackoffSchedule {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for wait in self {
            seq.serialize_element(&Wait(wait))?;
        }

        seq.end()
    }
}

impl<'de> Deserialize<'de> for BackoffSchedule {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct ScheduleVisitor;

        impl<'de> Visitor<'de> for ScheduleVisitor {
            type Value = BackoffSchedule;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a sequence of duration strings")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<Self::Value, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let mut waits = Vec::with_capacity(seq.size_hint().unwrap_or(0));
                while let Some(Wait(wait)) = seq.next_element::<Wait>()? {
                    waits.push(wait);
                }

                Ok(BackoffSchedule::new(waits))
            }
        }

        deserializer.deserialize_seq(ScheduleVisitor)
    }
}

impl Serialize for RetryConfig {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("RetryConfig", FIELDS.len())?;
        state.serialize_field("blocking_backoffs", self.blocking_backoffs())?;
        state.serialize_field("non_blocking_backoffs", self.non_blocking_backoffs())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for RetryConfig {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        enum Field {
            Blocking,
            NonBlocking,
        }

        impl<'de> Deserialize<'de> for Field {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: Deserializer<'de>,
            {
                struct FieldVisitor;

                impl Visitor<'_> for FieldVisitor {
                    type Value = Field;

                    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                        f.write_str("`blocking_backoffs` or `non_blocking_backoffs`")
                    }

                    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
                    where
                        E: de::Error,
                    {
                        match value {
                            "blocking_backoffs" => Ok(Field::Blocking),
                            "non_blocking_backoffs" => Ok(Field::NonBlocking),
                            _ => Err(de::Error::unknown_field(value, FIELDS)),
                        }
                    }
                }

                deserializer.deserialize_identifier(FieldVisitor)
            }
        }

        struct ConfigVisitor;

        impl<'de> Visitor<'de> for ConfigVisitor {
            type Value = RetryConfig;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a retry configuration with blocking and non-blocking backoff schedules")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut blocking: Option<BackoffSchedule> = None;
                let mut non_blocking: Option<BackoffSchedule> = None;

                while let Some(key) = map.next_key::<Field>()? {
                    match key {
                        Field::Blocking => {
                            if blocking.is_some() {
                                return Err(de::Error::duplicate_field("blocking_backoffs"));
                            }

                            blocking = Some(map.next_value()?);
                        }
                        Field::NonBlocking => {
                            if non_blocking.is_some() {
                                return Err(de::Error::duplicate_field("non_blocking_backoffs"));
                            }

                            non_blocking = Some(map.next_value()?);
                        }
                    }
                }

                let blocking = blocking.ok_or_else(|| de::Error::missing_field("blocking_backoffs"))?;
                let non_blocking =
                    non_blocking.ok_or_else(|| de::Error::missing_field("non_blocking_backoffs"))?;

                Ok(RetryConfig::new(blocking, non_blocking))
            }
        }

        deserializer.deserialize_struct("RetryConfig", FIELDS, ConfigVisitor)
    }
}
