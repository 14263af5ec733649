use fedit_db::model::{account::Account, status::Status};
use fedit_type::ap::{MediaAttachment, Object, PollOption, Replies, Tag};
use iso8601_timestamp::Timestamp;
use uuid::Uuid;

pub const PUBLISHED: &str = "2024-03-01T10:00:00Z";

#[must_use]
pub fn timestamp(value: &str) -> Timestamp {
    Timestamp::parse(value).expect("invalid timestamp literal")
}

/// Parse a document the way it arrives over the wire
#[must_use]
pub fn document(json: &str) -> Object {
    sonic_rs::from_str(json).expect("invalid document")
}

#[must_use]
pub fn remote_account(username: &str, domain: &str) -> Account {
    Account {
        id: Uuid::now_v7(),
        uri: format!("https://{domain}/users/{username}"),
        username: username.into(),
        domain: Some(domain.into()),
        sensitized: false,
        created_at: timestamp(PUBLISHED),
    }
}

#[must_use]
pub fn local_account(username: &str) -> Account {
    Account {
        domain: None,
        uri: format!("https://local.example/users/{username}"),
        ..remote_account(username, "local.example")
    }
}

/// Never edited status with the given text
#[must_use]
pub fn status(author: &Account, text: &str) -> Status {
    let published = timestamp(PUBLISHED);

    Status {
        id: Uuid::now_v7(),
        uri: format!("{}/statuses/{}", author.uri, Uuid::now_v7()),
        account_id: author.id,
        text: text.into(),
        spoiler_text: String::new(),
        sensitive: false,
        language: None,
        tag_ids: Vec::new(),
        ordered_media_attachment_ids: Vec::new(),
        poll_id: None,
        created_at: published,
        updated_at: published,
        edited_at: None,
    }
}

/// Note document representing the status, edited at the given time
#[must_use]
pub fn note(status: &Status, content: &str, updated: &str) -> Object {
    Object {
        id: status.uri.clone(),
        r#type: vec!["Note".into()],
        content: Some(content.into()),
        published: Some(PUBLISHED.into()),
        updated: Some(updated.into()),
        ..Object::default()
    }
}

/// Question document with a single-choice poll
#[must_use]
pub fn question(status: &Status, options: &[(&str, u64)], updated: &str) -> Object {
    Object {
        r#type: vec!["Question".into()],
        one_of: Some(
            options
                .iter()
                .map(|(name, votes)| PollOption {
                    name: Some((*name).into()),
                    replies: Some(Replies {
                        total_items: Some(*votes),
                    }),
                })
                .collect(),
        ),
        end_time: Some("2024-03-08T10:00:00Z".into()),
        ..note(status, "pick one", updated)
    }
}

#[must_use]
pub fn image(url: &str) -> MediaAttachment {
    MediaAttachment {
        r#type: vec!["Document".into()],
        url: Some(fedit_type::ap::Link::Url(url.into())),
        media_type: Some("image/png".into()),
        ..MediaAttachment::default()
    }
}

#[must_use]
pub fn mention(account: &Account) -> Tag {
    Tag {
        r#type: vec!["Mention".into()],
        href: Some(account.uri.clone()),
        name: Some(format!("@{}", account.username)),
        ..Tag::default()
    }
}

#[must_use]
pub fn hashtag(name: &str) -> Tag {
    Tag {
        r#type: vec!["Hashtag".into()],
        name: Some(name.into()),
        ..Tag::default()
    }
}
