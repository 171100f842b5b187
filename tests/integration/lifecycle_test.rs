//! Submission-to-delivery scenarios across the service and worker.

use chrono::{Duration, Utc};

use courier_entity::notification::{NotificationFilter, NotificationKind, NotificationStatus};
use courier_service::notification::NotificationRequest;

use crate::helpers::engine;

#[tokio::test]
async fn scheduled_email_is_released_by_the_worker() {
    let e = engine(true).await;
    let scheduled_for = Utc::now() + Duration::minutes(2);

    let stored = e
        .service
        .send_notification(
            NotificationRequest::new(NotificationKind::Email, "u@example.com", "Hi", "Body")
                .with_schedule(scheduled_for),
        )
        .await
        .expect("submit");
    assert_eq!(stored.status, NotificationStatus::Queued);
    assert!(stored.last_attempted_at.is_none());
    assert_eq!(e.email.call_count(), 0);

    // A tick 30 seconds in: still gated by the schedule.
    e.worker.run_tick_at(Utc::now() + Duration::seconds(30)).await;
    assert_eq!(e.email.call_count(), 0);

    // A tick just past the scheduled moment dispatches exactly once.
    e.worker.run_tick_at(scheduled_for + Duration::seconds(1)).await;
    assert_eq!(e.email.call_count(), 1);

    let delivered = e
        .service
        .get_notification_status(&stored.notification_id)
        .await
        .expect("get");
    assert_eq!(delivered.status, NotificationStatus::Sent);
    assert_eq!(delivered.retry_count, 1);
}

#[tokio::test]
async fn submission_failure_is_retried_until_success() {
    let e = engine(true).await;

    // Submission attempt plus the first worker attempt fail.
    e.email.fail_next(2);

    let stored = e
        .service
        .send_notification(NotificationRequest::new(
            NotificationKind::Email,
            "u@example.com",
            "Hi",
            "Body",
        ))
        .await
        .expect("submit");
    assert_eq!(stored.status, NotificationStatus::Failed);
    assert_eq!(stored.retry_count, 0);
    let t0 = stored.last_attempted_at.expect("attempted at submission");

    // First worker attempt carries no backoff gate (retry_count = 0).
    e.worker.run_tick_at(t0 + Duration::seconds(1)).await;
    let after_first = e.repo.get(&stored.notification_id).await.expect("get");
    assert_eq!(after_first.status, NotificationStatus::Failed);
    assert_eq!(after_first.retry_count, 1);

    // The second worker attempt waits 2·base from the failed attempt.
    let t1 = after_first.last_attempted_at.expect("attempted");
    e.worker.run_tick_at(t1 + Duration::seconds(1)).await;
    assert_eq!(e.email.call_count(), 2, "backoff must gate the retry");

    e.worker.run_tick_at(t1 + Duration::seconds(2)).await;
    assert_eq!(e.email.call_count(), 3);

    let delivered = e.repo.get(&stored.notification_id).await.expect("get");
    assert_eq!(delivered.status, NotificationStatus::Sent);
    assert_eq!(delivered.retry_count, 2);
}

#[tokio::test]
async fn cancelled_notification_never_dispatches() {
    let e = engine(true).await;

    let stored = e
        .service
        .send_notification(
            NotificationRequest::new(NotificationKind::Email, "u@example.com", "Hi", "Body")
                .with_schedule(Utc::now() + Duration::minutes(5)),
        )
        .await
        .expect("submit");

    let cancelled = e
        .service
        .cancel_notification(&stored.notification_id)
        .await
        .expect("cancel");
    assert_eq!(cancelled.status, NotificationStatus::Failed);

    // Ticks long past the original schedule never touch the row.
    e.worker.run_tick_at(Utc::now() + Duration::hours(1)).await;
    e.worker.run_tick_at(Utc::now() + Duration::hours(2)).await;
    assert_eq!(e.email.call_count(), 0);

    let after = e
        .service
        .get_notification_status(&stored.notification_id)
        .await
        .expect("get");
    assert_eq!(after.status, NotificationStatus::Failed);
}

#[tokio::test]
async fn sms_lifecycle_records_provider_message_id_only_when_sent() {
    let e = engine(true).await;

    e.sms.fail_next(1);
    let stored = e
        .service
        .send_notification(NotificationRequest::new(
            NotificationKind::Sms,
            "+15550000000",
            "",
            "OTP 123456",
        ))
        .await
        .expect("submit");
    assert_eq!(stored.status, NotificationStatus::Failed);
    assert!(stored.provider_message_id.is_empty());

    let t0 = stored.last_attempted_at.expect("attempted");
    e.worker.run_tick_at(t0 + Duration::seconds(1)).await;

    let delivered = e.repo.get(&stored.notification_id).await.expect("get");
    assert_eq!(delivered.status, NotificationStatus::Sent);
    assert_eq!(delivered.provider_message_id, "SM-e2e");
    assert_eq!(delivered.retry_count, 1);
}

#[tokio::test]
async fn status_listing_reflects_lifecycle() {
    let e = engine(true).await;

    e.service
        .send_notification(NotificationRequest::new(
            NotificationKind::Email,
            "sent@example.com",
            "Hi",
            "Body",
        ))
        .await
        .expect("submit sent");
    e.service
        .send_notification(
            NotificationRequest::new(NotificationKind::Email, "queued@example.com", "Hi", "Body")
                .with_schedule(Utc::now() + Duration::minutes(10)),
        )
        .await
        .expect("submit queued");

    let queued = e
        .service
        .list_notifications(&NotificationFilter::with_statuses([
            NotificationStatus::Queued,
        ]))
        .await
        .expect("list queued");
    assert_eq!(queued.len(), 1);
    assert_eq!(queued[0].recipient, "queued@example.com");

    let terminal = e
        .service
        .list_notifications(&NotificationFilter::with_statuses([
            NotificationStatus::Sent,
            NotificationStatus::Failed,
        ]))
        .await
        .expect("list terminal");
    assert_eq!(terminal.len(), 1);
    assert_eq!(terminal[0].recipient, "sent@example.com");
}
