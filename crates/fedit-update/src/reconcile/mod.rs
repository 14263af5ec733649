//! Merging one aspect of the remote state into the stored entities
//!
//! Every reconciler writes exclusively through the transaction handed to it

pub mod media;
pub mod metadata;
pub mod poll;
