use crate::support::{Harness, FIRST_EDIT, SECOND_EDIT};
use fedit_db::model::poll::Poll;
use fedit_jobs::{poll::NotifyPollExpiry, Job, JobDetails, Schedule};
use fedit_test::fixtures::{note, question, timestamp};
use fedit_type::ap::{Closed, Object};
use fedit_update::{AppliedUpdate, UpdateOutcome};
use pretty_assertions::assert_eq;
use uuid::Uuid;

const END_TIME: &str = "2024-03-08T10:00:00Z";

fn applied(outcome: UpdateOutcome) -> AppliedUpdate {
    match outcome {
        UpdateOutcome::Applied(applied) => applied,
        other => panic!("expected the update to be applied, got {other:?}"),
    }
}

fn expiry_notifications(jobs: Vec<JobDetails>) -> Vec<(Uuid, Schedule)> {
    jobs.into_iter()
        .filter_map(|details| match details.job {
            Job::NotifyPollExpiry(NotifyPollExpiry { poll_id }) => {
                Some((poll_id, details.schedule))
            }
            _ => None,
        })
        .collect()
}

async fn poll(harness: &Harness, id: Uuid) -> Option<Poll> {
    harness
        .store
        .read(|tables| tables.polls.get(&id).cloned())
        .await
}

#[tokio::test]
async fn changed_options_replace_the_poll() {
    let mut harness = Harness::new().await;

    let first = question(&harness.status, &[("X", 1), ("Y", 2)], FIRST_EDIT);
    let first = applied(harness.service.apply(&harness.status, &first).await.unwrap());
    let first_poll = first.status.poll_id.unwrap();
    assert!(first.media_changed);
    assert_eq!(
        expiry_notifications(harness.drain_jobs()),
        [(first_poll, Schedule::At(timestamp(END_TIME)))]
    );

    let second = question(
        &harness.status,
        &[("X", 1), ("Y", 2), ("Z", 0)],
        SECOND_EDIT,
    );
    let second = applied(harness.service.apply(&first.status, &second).await.unwrap());
    let second_poll = second.status.poll_id.unwrap();

    assert!(second.media_changed);
    assert_ne!(first_poll, second_poll);
    assert!(poll(&harness, first_poll).await.is_none());

    let replacement = poll(&harness, second_poll).await.unwrap();
    assert_eq!(replacement.options, ["X", "Y", "Z"]);
    assert_eq!(replacement.cached_tallies, [1, 2, 0]);
    assert_eq!(replacement.status_id, harness.status.id);
    assert_eq!(
        expiry_notifications(harness.drain_jobs()),
        [(second_poll, Schedule::At(timestamp(END_TIME)))]
    );
}

#[tokio::test]
async fn same_options_keep_the_poll() {
    let mut harness = Harness::new().await;

    let first = question(&harness.status, &[("X", 1), ("Y", 2)], FIRST_EDIT);
    let first = applied(harness.service.apply(&harness.status, &first).await.unwrap());
    harness.drain_jobs();

    let second = Object {
        voters_count: Some(9),
        ..question(&harness.status, &[("X", 5), ("Y", 4)], SECOND_EDIT)
    };
    let second = applied(harness.service.apply(&first.status, &second).await.unwrap());

    assert!(!second.media_changed);
    assert_eq!(second.status.poll_id, first.status.poll_id);

    let poll = poll(&harness, second.status.poll_id.unwrap()).await.unwrap();
    assert_eq!(poll.cached_tallies, [5, 4]);
    assert_eq!(poll.voters_count, Some(9));
    // The expiry did not move
    assert!(expiry_notifications(harness.drain_jobs()).is_empty());
}

#[tokio::test]
async fn dropped_poll_is_deleted() {
    let harness = Harness::new().await;

    let first = question(&harness.status, &[("X", 1), ("Y", 2)], FIRST_EDIT);
    let first = applied(harness.service.apply(&harness.status, &first).await.unwrap());
    let poll_id = first.status.poll_id.unwrap();

    let second = note(&harness.status, "never mind", SECOND_EDIT);
    let second = applied(harness.service.apply(&first.status, &second).await.unwrap());

    assert!(second.media_changed);
    assert_eq!(second.status.poll_id, None);
    assert!(poll(&harness, poll_id).await.is_none());
}

#[tokio::test]
async fn redelivery_refreshes_tallies() {
    let mut harness = Harness::new().await;

    let first = question(&harness.status, &[("X", 1), ("Y", 2)], FIRST_EDIT);
    let first = applied(harness.service.apply(&harness.status, &first).await.unwrap());
    let poll_id = first.status.poll_id.unwrap();
    harness.drain_jobs();
    harness.events.recv().await.unwrap();

    let redelivered = question(&harness.status, &[("X", 3), ("Y", 4)], FIRST_EDIT);
    let outcome = harness
        .service
        .apply(&first.status, &redelivered)
        .await
        .unwrap();
    assert_eq!(outcome, UpdateOutcome::PollRefreshed);

    let refreshed = poll(&harness, poll_id).await.unwrap();
    assert_eq!(refreshed.cached_tallies, [3, 4]);

    // No new revision: status, history and subscribers are left alone
    assert_eq!(harness.stored_status().await, first.status);
    let edits = harness
        .store
        .read(|tables| tables.edits_of(harness.status.id).len())
        .await;
    assert_eq!(edits, 2);
    assert!(harness.events.try_recv().is_err());
    assert!(harness.drain_jobs().is_empty());
}

#[tokio::test]
async fn closing_reschedules_expiry() {
    let mut harness = Harness::new().await;

    let first = question(&harness.status, &[("X", 1), ("Y", 2)], FIRST_EDIT);
    let first = applied(harness.service.apply(&harness.status, &first).await.unwrap());
    let poll_id = first.status.poll_id.unwrap();
    harness.drain_jobs();

    let closed = Object {
        closed: Some(Closed::Timestamp("2024-03-02T08:00:00Z".into())),
        ..question(&harness.status, &[("X", 1), ("Y", 3)], FIRST_EDIT)
    };
    let outcome = harness.service.apply(&first.status, &closed).await.unwrap();
    assert_eq!(outcome, UpdateOutcome::PollRefreshed);

    assert_eq!(
        expiry_notifications(harness.drain_jobs()),
        [(poll_id, Schedule::At(timestamp("2024-03-02T08:00:00Z")))]
    );
    assert_eq!(
        poll(&harness, poll_id).await.unwrap().expires_at,
        Some(timestamp("2024-03-02T08:00:00Z"))
    );
}
