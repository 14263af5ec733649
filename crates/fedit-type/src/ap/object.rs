use super::{
    poll::{Closed, PollOption},
    tag::Tag,
    ObjectKind,
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, skip_serializing_none, DefaultOnNull, OneOrMany};

/// A language map (`contentMap`, `summaryMap`, `nameMap`)
///
/// Insertion order is kept since consumers pick the first entry
pub type LanguageMap = IndexMap<String, String>;

#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Object {
    pub id: String,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    pub r#type: Vec<String>,

    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub content_map: Option<LanguageMap>,

    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub summary_map: Option<LanguageMap>,

    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub name_map: Option<LanguageMap>,

    #[serde(default)]
    pub sensitive: Option<bool>,

    #[serde(default)]
    pub published: Option<String>,
    #[serde(default)]
    pub updated: Option<String>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    pub attachment: Vec<MediaAttachment>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    pub tag: Vec<Tag>,

    #[serde(default)]
    pub one_of: Option<Vec<PollOption>>,
    #[serde(default)]
    pub any_of: Option<Vec<PollOption>>,
    #[serde(default)]
    pub end_time: Option<String>,
    #[serde(default)]
    pub closed: Option<Closed>,
    #[serde(default)]
    pub voters_count: Option<u64>,
}

impl Object {
    #[must_use]
    pub fn kind(&self) -> ObjectKind {
        ObjectKind::from_types(&self.r#type)
    }
}

/// Reference to a resource
///
/// Either a bare IRI, a `Link` object or a list of them
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Link {
    Url(String),
    Object {
        href: String,
        #[serde(default, rename = "mediaType")]
        media_type: Option<String>,
    },
    Many(Vec<Link>),
}

impl Link {
    /// First IRI this link points to
    #[must_use]
    pub fn href(&self) -> Option<&str> {
        match self {
            Self::Url(url) | Self::Object { href: url, .. } => Some(url.as_str()),
            Self::Many(links) => links.iter().find_map(Link::href),
        }
    }
}

#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Icon {
    #[serde(default)]
    pub media_type: Option<String>,
    #[serde(default)]
    pub url: Option<Link>,
}

#[serde_as]
#[skip_serializing_none]
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaAttachment {
    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    pub r#type: Vec<String>,

    #[serde(default)]
    pub url: Option<Link>,

    #[serde(default)]
    pub media_type: Option<String>,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub summary: Option<String>,

    #[serde(default)]
    pub blurhash: Option<String>,

    #[serde(default)]
    pub focal_point: Option<Vec<f64>>,

    #[serde(default)]
    #[serde_as(as = "DefaultOnNull<OneOrMany<_>>")]
    pub icon: Vec<Icon>,
}
