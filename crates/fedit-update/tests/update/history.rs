use crate::support::{Harness, FIRST_EDIT, SECOND_EDIT};
use fedit_db::model::status_edit::StatusEdit;
use fedit_test::fixtures::{image, note, question, timestamp, PUBLISHED};
use fedit_type::ap::{MediaAttachment, Object};
use pretty_assertions::assert_eq;

async fn history(harness: &Harness) -> Vec<StatusEdit> {
    harness
        .store
        .read(|tables| {
            tables
                .edits_of(harness.status.id)
                .into_iter()
                .cloned()
                .collect()
        })
        .await
}

#[tokio::test]
async fn first_edit_records_the_original() {
    let harness = Harness::new().await;

    harness
        .service
        .apply(&harness.status, &note(&harness.status, "edited", FIRST_EDIT))
        .await
        .unwrap();

    let edits = history(&harness).await;
    assert_eq!(edits.len(), 2);

    assert_eq!(edits[0].text, "hello world");
    assert_eq!(edits[0].created_at, timestamp(PUBLISHED));
    assert!(!edits[0].media_attachments_changed);

    assert_eq!(edits[1].text, "edited");
    assert_eq!(edits[1].created_at, timestamp(FIRST_EDIT));
    assert_eq!(edits[1].account_id, harness.author.id);
}

#[tokio::test]
async fn later_edits_append_one_entry() {
    let harness = Harness::new().await;

    harness
        .service
        .apply(&harness.status, &note(&harness.status, "first", FIRST_EDIT))
        .await
        .unwrap();
    let stored = harness.stored_status().await;
    harness
        .service
        .apply(&stored, &note(&harness.status, "second", SECOND_EDIT))
        .await
        .unwrap();

    let texts: Vec<String> = history(&harness)
        .await
        .into_iter()
        .map(|edit| edit.text)
        .collect();
    assert_eq!(texts, ["hello world", "first", "second"]);
}

#[tokio::test]
async fn entry_captures_media_and_poll() {
    let harness = Harness::new().await;

    let object = Object {
        attachment: vec![
            MediaAttachment {
                name: Some("first picture".into()),
                ..image("https://remote.example/media/a.png")
            },
            image("https://remote.example/media/b.png"),
        ],
        ..question(&harness.status, &[("X", 1), ("Y", 2)], FIRST_EDIT)
    };
    harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();

    let stored = harness.stored_status().await;
    let edits = history(&harness).await;
    let latest = edits.last().unwrap();

    assert!(latest.media_attachments_changed);
    assert_eq!(
        latest.ordered_media_attachment_ids,
        stored.ordered_media_attachment_ids
    );
    assert_eq!(
        latest.media_descriptions,
        [Some("first picture".to_owned()), None]
    );
    assert_eq!(
        latest.poll_options,
        Some(vec!["X".to_owned(), "Y".to_owned()])
    );

    // The original had neither
    assert!(edits[0].ordered_media_attachment_ids.is_empty());
    assert_eq!(edits[0].poll_options, None);
}
