//! Pure extraction of typed values out of a parsed document
//!
//! Nothing in here fails. Malformed sub-fields are logged and skipped.

pub mod media;
pub mod poll;
pub mod tag;
pub mod text;
pub mod timestamp;

pub use self::{
    media::{media_descriptors, MediaDescriptor},
    poll::{poll_shape, PollShape},
    tag::{tag_buckets, EmojiDescriptor, TagBuckets},
    text::{language, sensitive, spoiler_text, text},
};
