#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(forbidden_lint_groups)]

#[macro_use]
extern crate tracing;

use uuid::Uuid;

pub use self::{in_memory::InMemoryLocker, redis::RedisLocker};

mod in_memory;
mod redis;

/// Unique value identifying one acquisition of a lease
fn lease_value() -> String {
    Uuid::now_v7().to_string()
}
