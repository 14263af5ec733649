//! Subset of the ActivityStreams vocabulary an object update carries
//!
//! Fields are kept close to the wire: language maps stay maps, plural/singular
//! fields are normalised into `Vec`s, timestamps stay strings. Interpreting
//! them is the job of the consumer.

use serde::{Deserialize, Serialize};

pub mod object;
pub mod poll;
pub mod tag;

pub use self::{
    object::{Icon, Link, MediaAttachment, Object},
    poll::{Closed, PollOption, Replies},
    tag::Tag,
};

/// Kinds of objects whose updates we process
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ObjectKind {
    Note,
    Question,
    Unsupported,
}

impl ObjectKind {
    /// Decide the kind from a (possibly plural) `type` field
    ///
    /// The first known type wins, unknown extension types are skipped
    #[must_use]
    pub fn from_types<S>(types: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        types
            .iter()
            .find_map(|ty| match ty.as_ref() {
                "Note" => Some(Self::Note),
                "Question" => Some(Self::Question),
                _ => None,
            })
            .unwrap_or(Self::Unsupported)
    }
}

#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum TagKind {
    Emoji,
    Hashtag,
    Mention,
    Unknown,
}

impl TagKind {
    #[must_use]
    pub fn from_types<S>(types: &[S]) -> Self
    where
        S: AsRef<str>,
    {
        types
            .iter()
            .find_map(|ty| match ty.as_ref() {
                "Emoji" => Some(Self::Emoji),
                "Hashtag" => Some(Self::Hashtag),
                "Mention" => Some(Self::Mention),
                _ => None,
            })
            .unwrap_or(Self::Unknown)
    }
}
