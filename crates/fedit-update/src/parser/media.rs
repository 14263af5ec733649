use fedit_config::media::MAX_ATTACHMENTS;
use fedit_type::ap::{Link, MediaAttachment, Object};
use url::Url;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

/// Attachment as described by the remote document
#[derive(Clone, Debug, PartialEq)]
pub struct MediaDescriptor {
    pub remote_url: String,
    pub thumbnail_remote_url: Option<String>,
    pub description: Option<String>,
    pub focus: Option<(f64, f64)>,
    pub blurhash: Option<String>,
    pub content_type: String,
}

/// Parse an URL into the form used for comparing attachments
///
/// Only HTTP(S) URLs are accepted
#[must_use]
pub fn normalize_url(raw: &str) -> Option<Url> {
    Url::parse(raw.trim())
        .ok()
        .filter(|url| matches!(url.scheme(), "http" | "https"))
}

fn non_blank(value: Option<&String>) -> Option<String> {
    value
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .map(ToOwned::to_owned)
}

fn descriptor(attachment: &MediaAttachment) -> Option<MediaDescriptor> {
    let Some(href) = attachment.url.as_ref().and_then(Link::href) else {
        debug!("attachment without url");
        return None;
    };
    let Some(url) = normalize_url(href) else {
        warn!(url = href, "malformed attachment url");
        return None;
    };

    let thumbnail_remote_url = attachment
        .icon
        .iter()
        .find_map(|icon| icon.url.as_ref().and_then(Link::href))
        .and_then(|href| {
            let normalized = normalize_url(href);
            if normalized.is_none() {
                warn!(url = href, "malformed thumbnail url");
            }
            normalized
        })
        .map(String::from);

    let content_type = non_blank(attachment.media_type.as_ref()).unwrap_or_else(|| {
        mime_guess::from_path(url.path())
            .first_raw()
            .unwrap_or(FALLBACK_CONTENT_TYPE)
            .to_owned()
    });

    let focus = match attachment.focal_point.as_deref() {
        Some(&[x, y]) => Some((x, y)),
        _ => None,
    };

    Some(MediaDescriptor {
        remote_url: url.into(),
        thumbnail_remote_url,
        description: non_blank(attachment.summary.as_ref())
            .or_else(|| non_blank(attachment.name.as_ref())),
        focus,
        blurhash: non_blank(attachment.blurhash.as_ref()),
        content_type,
    })
}

/// Attachment descriptors of the document
///
/// At most `max` descriptors are looked at, never more than [`MAX_ATTACHMENTS`].
/// Descriptors pointing at an URL already seen collapse into the first one.
#[must_use]
pub fn media_descriptors(object: &Object, max: usize) -> Vec<MediaDescriptor> {
    let max = max.min(MAX_ATTACHMENTS);
    let mut descriptors: Vec<MediaDescriptor> = Vec::with_capacity(max);

    for descriptor in object.attachment.iter().take(max).filter_map(descriptor) {
        if descriptors
            .iter()
            .any(|seen| seen.remote_url == descriptor.remote_url)
        {
            debug!(url = %descriptor.remote_url, "duplicate attachment");
            continue;
        }

        descriptors.push(descriptor);
    }

    descriptors
}
