#![forbid(rust_2018_idioms)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(clippy::module_name_repetitions, forbidden_lint_groups)]

#[macro_use]
extern crate tracing;

pub mod event;
pub mod traits;
