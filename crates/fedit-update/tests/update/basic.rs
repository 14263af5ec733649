use crate::support::{Harness, FIRST_EDIT, NOW, SECOND_EDIT};
use fedit_test::fixtures::{hashtag, note, remote_account, timestamp};
use fedit_error::ErrorType;
use fedit_type::ap::Object;
use fedit_update::{SkipReason, UpdateOutcome};
use indexmap::IndexMap;
use pretty_assertions::assert_eq;

#[tokio::test]
async fn applies_text_edit() {
    let harness = Harness::new().await;
    let object = Object {
        summary: Some("cw: food".into()),
        sensitive: Some(true),
        ..note(&harness.status, "hello fediverse", FIRST_EDIT)
    };

    let outcome = harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();
    let UpdateOutcome::Applied(applied) = outcome else {
        panic!("expected the update to be applied, got {outcome:?}");
    };
    assert!(applied.text_changed);
    assert!(!applied.media_changed);

    let stored = harness.stored_status().await;
    assert_eq!(stored, applied.status);
    assert_eq!(stored.text, "hello fediverse");
    assert_eq!(stored.spoiler_text, "cw: food");
    assert!(stored.sensitive);
    assert_eq!(stored.edited_at, Some(timestamp(FIRST_EDIT)));
    assert_eq!(stored.updated_at, timestamp(NOW));
    assert_eq!(stored.created_at, harness.status.created_at);
}

#[tokio::test]
async fn redelivery_is_idempotent() {
    let harness = Harness::new().await;
    let object = note(&harness.status, "hello fediverse", FIRST_EDIT);

    harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();
    let after_first = harness.stored_status().await;

    // Once with the fresh record and once with the outdated one the caller still holds
    for status in [after_first.clone(), harness.status.clone()] {
        let outcome = harness.service.apply(&status, &object).await.unwrap();
        assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::AlreadyApplied));
    }

    assert_eq!(harness.stored_status().await, after_first);
    let edits = harness
        .store
        .read(|tables| tables.edits_of(harness.status.id).len())
        .await;
    assert_eq!(edits, 2);
}

#[tokio::test]
async fn stale_document_is_skipped() {
    let harness = Harness::new().await;

    harness
        .service
        .apply(
            &harness.status,
            &note(&harness.status, "second", SECOND_EDIT),
        )
        .await
        .unwrap();
    let stored = harness.stored_status().await;

    let outcome = harness
        .service
        .apply(&stored, &note(&harness.status, "first", FIRST_EDIT))
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::Stale));

    // The outdated record of the caller only gets caught under the lock
    let outcome = harness
        .service
        .apply(&harness.status, &note(&harness.status, "first", FIRST_EDIT))
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::Stale));

    assert_eq!(harness.stored_status().await.text, "second");
}

#[tokio::test]
async fn unsupported_type_is_skipped() {
    let harness = Harness::new().await;
    let object = Object {
        r#type: vec!["Person".into()],
        ..note(&harness.status, "not a post", FIRST_EDIT)
    };

    let outcome = harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::Skipped(SkipReason::UnsupportedType));
    assert_eq!(harness.stored_status().await, harness.status);
}

#[tokio::test]
async fn foreign_document_is_rejected() {
    let mut harness = Harness::new().await;
    let object = Object {
        id: "https://evil.example/statuses/999".into(),
        ..note(&harness.status, "hijacked", FIRST_EDIT)
    };

    let error = harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap_err();
    assert!(matches!(error.error_type(), ErrorType::BadRequest(_)));

    assert_eq!(harness.stored_status().await, harness.status);
    assert!(harness.drain_jobs().is_empty());
}

#[tokio::test]
async fn missing_updated_falls_back_to_now() {
    let harness = Harness::new().await;
    let object = Object {
        updated: None,
        ..note(&harness.status, "undated", FIRST_EDIT)
    };

    harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();

    assert_eq!(
        harness.stored_status().await.edited_at,
        Some(timestamp(NOW))
    );
}

#[tokio::test]
async fn malformed_updated_is_not_stale() {
    let harness = Harness::new().await;
    harness
        .service
        .apply(&harness.status, &note(&harness.status, "first", FIRST_EDIT))
        .await
        .unwrap();
    let stored = harness.stored_status().await;

    let object = Object {
        updated: Some("yesterday-ish".into()),
        ..note(&harness.status, "second", FIRST_EDIT)
    };
    let outcome = harness.service.apply(&stored, &object).await.unwrap();

    assert!(matches!(outcome, UpdateOutcome::Applied(..)));
    let stored = harness.stored_status().await;
    assert_eq!(stored.text, "second");
    assert_eq!(stored.edited_at, Some(timestamp(NOW)));
}

#[tokio::test]
async fn sensitized_account_forces_sensitive() {
    let harness = Harness::builder()
        .author(fedit_db::model::account::Account {
            sensitized: true,
            ..remote_account("bob", "remote.example")
        })
        .build()
        .await;

    let object = Object {
        sensitive: Some(false),
        ..note(&harness.status, "nothing to see", FIRST_EDIT)
    };
    harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();

    assert!(harness.stored_status().await.sensitive);
}

#[tokio::test]
async fn language_is_taken_from_content_map() {
    let harness = Harness::new().await;
    let mut content_map = IndexMap::new();
    content_map.insert("DE-at".to_owned(), "Servus".to_owned());

    let object = Object {
        content: None,
        content_map: Some(content_map),
        ..note(&harness.status, "", FIRST_EDIT)
    };
    harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();

    let stored = harness.stored_status().await;
    assert_eq!(stored.text, "Servus");
    assert_eq!(stored.language.as_deref(), Some("de-AT"));
}

#[tokio::test]
async fn hashtags_are_replaced() {
    let harness = Harness::new().await;

    let object = Object {
        tag: vec![hashtag("#Rust"), hashtag("#rust"), hashtag("fediverse")],
        ..note(&harness.status, "#Rust #fediverse", FIRST_EDIT)
    };
    harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();
    let stored = harness.stored_status().await;
    assert_eq!(stored.tag_ids.len(), 2);

    let object = Object {
        tag: vec![hashtag("fediverse")],
        ..note(&harness.status, "#fediverse", SECOND_EDIT)
    };
    harness.service.apply(&stored, &object).await.unwrap();

    let stored = harness.stored_status().await;
    let names: Vec<String> = harness
        .store
        .read(|tables| {
            stored
                .tag_ids
                .iter()
                .map(|id| tables.tags[id].name.clone())
                .collect()
        })
        .await;
    assert_eq!(names, ["fediverse"]);
}

#[tokio::test]
async fn wire_document_is_merged() {
    let harness = Harness::new().await;
    let object = fedit_test::fixtures::document(&format!(
        r##"{{
            "id": "{uri}",
            "type": "Note",
            "summary": null,
            "content": "<p>now with <a href=\"https://remote.example/tags/rust\">#rust</a></p>",
            "contentMap": {{"en": "<p>now with #rust</p>"}},
            "sensitive": false,
            "published": "2024-03-01T10:00:00Z",
            "updated": "{updated}",
            "attachment": [
                {{
                    "type": "Document",
                    "mediaType": "image/jpeg",
                    "url": "https://remote.example/media/photo.jpg",
                    "name": "a photo",
                    "blurhash": "UBL_:rOpGG-oBUNG,qRj2so|=eE1w^n4S5NH",
                    "focalPoint": [0.5, -0.25]
                }}
            ],
            "tag": [
                {{"type": "Hashtag", "href": "https://remote.example/tags/rust", "name": "#rust"}}
            ]
        }}"##,
        uri = harness.status.uri,
        updated = FIRST_EDIT,
    ));

    let outcome = harness
        .service
        .apply(&harness.status, &object)
        .await
        .unwrap();
    assert!(matches!(outcome, UpdateOutcome::Applied(..)));

    let stored = harness.stored_status().await;
    assert_eq!(stored.language.as_deref(), Some("en"));
    assert_eq!(stored.tag_ids.len(), 1);

    let attachment = harness
        .store
        .read(|tables| tables.media_attachments[&stored.ordered_media_attachment_ids[0]].clone())
        .await;
    assert_eq!(attachment.description.as_deref(), Some("a photo"));
    assert_eq!(attachment.focus, Some((0.5, -0.25)));
    assert_eq!(attachment.content_type, "image/jpeg");
    assert_eq!(attachment.status_id, Some(harness.status.id));
}
