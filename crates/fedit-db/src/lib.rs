#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(forbidden_lint_groups)]

#[macro_use]
extern crate tracing;

pub use self::{
    error::StoreError,
    store::{memory::MemoryStore, with_transaction, FailPoint, Store, Transaction},
};

mod error;

pub mod model;
pub mod store;
