#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, forbidden_lint_groups)]

#[macro_use]
extern crate tracing;

pub use self::{
    service::{lock_key, AppliedUpdate, SkipReason, StatusUpdateService, UpdateOutcome},
    settings::Settings,
};

mod effects;
mod service;
mod settings;

pub mod history;
pub mod parser;
pub mod prepare;
pub mod reconcile;
