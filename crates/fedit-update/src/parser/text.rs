use fedit_type::ap::{object::LanguageMap, Object};
use isolang::Language;

fn first_value(map: Option<&LanguageMap>) -> Option<&str> {
    map.and_then(|map| map.values().next()).map(String::as_str)
}

/// Status body, falling back to the first entry of the language map
#[must_use]
pub fn text(object: &Object) -> String {
    object
        .content
        .as_deref()
        .or_else(|| first_value(object.content_map.as_ref()))
        .unwrap_or_default()
        .to_owned()
}

#[must_use]
pub fn spoiler_text(object: &Object) -> String {
    object
        .summary
        .as_deref()
        .or_else(|| first_value(object.summary_map.as_ref()))
        .unwrap_or_default()
        .to_owned()
}

#[must_use]
pub fn sensitive(object: &Object) -> bool {
    object.sensitive.unwrap_or(false)
}

/// Language of the status
///
/// Taken from the first key of the content, name or summary map (in that order).
/// Tags with an unknown primary language are dropped.
#[must_use]
pub fn language(object: &Object) -> Option<String> {
    [&object.content_map, &object.name_map, &object.summary_map]
        .into_iter()
        .flatten()
        .find_map(|map| map.keys().next())
        .and_then(|tag| normalize_language(tag))
}

/// Normalise the casing of a BCP 47 tag (`EN-us` → `en-US`)
#[must_use]
pub fn normalize_language(tag: &str) -> Option<String> {
    let mut subtags = tag.trim().split(['-', '_']);

    let primary = subtags.next()?.to_ascii_lowercase();
    let known = match primary.len() {
        2 => Language::from_639_1(&primary).is_some(),
        3 => Language::from_639_3(&primary).is_some(),
        _ => false,
    };
    if !known {
        debug!(tag, "dropping unknown language");
        return None;
    }

    let mut normalized = primary;
    for subtag in subtags {
        normalized.push('-');

        let is_alpha = subtag.chars().all(|ch| ch.is_ascii_alphabetic());
        match subtag.len() {
            2 if is_alpha => normalized.push_str(&subtag.to_ascii_uppercase()),
            4 if is_alpha => {
                let (first, rest) = subtag.split_at(1);
                normalized.push_str(&first.to_ascii_uppercase());
                normalized.push_str(&rest.to_ascii_lowercase());
            }
            _ => normalized.push_str(&subtag.to_ascii_lowercase()),
        }
    }

    Some(normalized)
}
