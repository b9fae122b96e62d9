//! WHOOP developer API
//!
//! `WhoopClient` exchanges account credentials for a bearer token once,
//! then reads the sleep, cycle and workout collections through the
//! paginated fetch loop. Collections are requested with `limit`, `start`
//! and `end`; the continuation token travels back as `nextToken`.

mod client;

pub use client::{WhoopClient, CYCLE_PATH, SLEEP_PATH, WORKOUT_PATH};
