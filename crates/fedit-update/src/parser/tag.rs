use super::timestamp;
use fedit_type::ap::{Link, Object, Tag, TagKind};
use iso8601_timestamp::Timestamp;

#[derive(Clone, Debug, PartialEq)]
pub struct EmojiDescriptor {
    pub shortcode: String,
    pub image_url: String,
    pub uri: Option<String>,
    pub updated: Option<Timestamp>,
}

/// Tag-like entries of a document, split by kind
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TagBuckets {
    pub hashtags: Vec<String>,
    /// Account URIs
    pub mentions: Vec<String>,
    pub emojis: Vec<EmojiDescriptor>,
}

fn hashtag_name(tag: &Tag) -> Option<String> {
    let name = tag.name.as_deref()?.trim();
    let name = name.strip_prefix('#').unwrap_or(name).trim();

    (!name.is_empty()).then(|| name.to_owned())
}

fn mention_uri(tag: &Tag) -> Option<String> {
    tag.href
        .as_deref()
        .map(str::trim)
        .filter(|href| !href.is_empty())
        .map(ToOwned::to_owned)
}

fn emoji(tag: &Tag) -> Option<EmojiDescriptor> {
    let shortcode = tag.name.as_deref()?.trim().trim_matches(':');
    let image_url = tag
        .icon
        .iter()
        .find_map(|icon| icon.url.as_ref().and_then(Link::href))
        .map(str::trim)
        .filter(|url| !url.is_empty());

    let Some(image_url) = image_url.filter(|_| !shortcode.is_empty()) else {
        debug!(name = ?tag.name, "skipping incomplete emoji");
        return None;
    };

    Some(EmojiDescriptor {
        shortcode: shortcode.to_owned(),
        image_url: image_url.to_owned(),
        uri: tag.id.clone(),
        updated: timestamp::parse("updated", tag.updated.as_deref()),
    })
}

/// Split the `tag` collection into hashtags, mentions and emojis
///
/// Hashtags are de-duplicated case-insensitively, mentions and emojis by their key
#[must_use]
pub fn tag_buckets(object: &Object) -> TagBuckets {
    let mut buckets = TagBuckets::default();

    for tag in &object.tag {
        match tag.kind() {
            TagKind::Hashtag => {
                if let Some(name) = hashtag_name(tag) {
                    if !buckets
                        .hashtags
                        .iter()
                        .any(|seen| seen.to_lowercase() == name.to_lowercase())
                    {
                        buckets.hashtags.push(name);
                    }
                }
            }
            TagKind::Mention => {
                if let Some(uri) = mention_uri(tag) {
                    if !buckets.mentions.contains(&uri) {
                        buckets.mentions.push(uri);
                    }
                }
            }
            TagKind::Emoji => {
                if let Some(emoji) = emoji(tag) {
                    if !buckets
                        .emojis
                        .iter()
                        .any(|seen| seen.shortcode == emoji.shortcode)
                    {
                        buckets.emojis.push(emoji);
                    }
                }
            }
            TagKind::Unknown => debug!(types = ?tag.r#type, "ignoring unknown tag"),
        }
    }

    buckets
}
