use super::{object::Icon, TagKind};
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull, OneOrMany};

/// Entry of the `tag` collection
///
/// Hashtags, mentions and custom emojis share this shape, see [`Tag::kind`]
#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Tag {
    #[serde(default)]
    pub id: Option<String>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    pub r#type: Vec<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub href: Option<String>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    pub icon: Vec<Icon>,

    #[serde(default)]
    pub updated: Option<String>,
}

impl Tag {
    #[must_use]
    pub fn kind(&self) -> TagKind {
        TagKind::from_types(&self.r#type)
    }
}
