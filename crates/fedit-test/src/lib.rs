//! Doubles and fixtures for exercising the update pipeline without any external service

#![forbid(rust_2018_idioms)]
#![allow(clippy::missing_panics_doc, forbidden_lint_groups)]

pub use self::{
    clock::MockClock,
    federation::{FakeFederation, Gate},
};

mod clock;
mod federation;

pub mod fixtures;
