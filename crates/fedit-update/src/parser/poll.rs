use super::timestamp;
use fedit_type::ap::{Closed, Object, ObjectKind};
use iso8601_timestamp::Timestamp;

/// Poll as described by the remote document
#[derive(Clone, Debug, PartialEq)]
pub struct PollShape {
    pub options: Vec<String>,
    pub tallies: Vec<u64>,
    pub multiple: bool,
    pub expires_at: Option<Timestamp>,
    pub voters_count: Option<u64>,
}

/// Expiry of the poll
///
/// An explicit closing time wins, a bare `closed: true` means it closed just now,
/// otherwise the declared end time is used
fn expires_at(object: &Object, now: Timestamp) -> Option<Timestamp> {
    match object.closed {
        Some(Closed::Timestamp(ref closed)) => {
            if let Some(closed) = timestamp::parse("closed", Some(closed.as_str())) {
                return Some(closed);
            }
        }
        Some(Closed::Flag(true)) => return Some(now),
        Some(Closed::Flag(false)) | None => {}
    }

    timestamp::parse("endTime", object.end_time.as_deref())
}

/// Poll of the document, if it carries one
///
/// Only questions carry polls. `anyOf` means multiple choice.
#[must_use]
pub fn poll_shape(object: &Object, now: Timestamp) -> Option<PollShape> {
    if object.kind() != ObjectKind::Question {
        return None;
    }

    let (items, multiple) = match (&object.any_of, &object.one_of) {
        (Some(items), _) => (items, true),
        (None, Some(items)) => (items, false),
        (None, None) => return None,
    };

    let (options, tallies): (Vec<String>, Vec<u64>) = items
        .iter()
        .filter_map(|item| {
            let name = item.name.as_deref().map(str::trim).filter(|name| !name.is_empty());
            if name.is_none() {
                debug!("skipping poll option without a name");
            }

            name.map(|name| (name.to_owned(), item.votes()))
        })
        .unzip();

    if options.is_empty() {
        return None;
    }

    Some(PollShape {
        options,
        tallies,
        multiple,
        expires_at: expires_at(object, now),
        voters_count: object.voters_count,
    })
}
