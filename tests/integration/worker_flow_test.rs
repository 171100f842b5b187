//! Invariant checks over repeated worker sweeps.

use chrono::{Duration, Utc};

use courier_entity::notification::{NotificationKind, NotificationStatus};
use courier_service::notification::NotificationRequest;

use crate::helpers::engine;

#[tokio::test]
async fn sent_rows_are_never_reattempted() {
    let e = engine(true).await;

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
    assert_eq!(stored.status, NotificationStatus::Sent);
    assert_eq!(e.email.call_count(), 1);

    for hours in 1..=3 {
        e.worker.run_tick_at(Utc::now() + Duration::hours(hours)).await;
    }
    assert_eq!(e.email.call_count(), 1, "sent is terminal");

    let after = e.repo.get(&stored.notification_id).await.expect("get");
    assert_eq!(after.status, NotificationStatus::Sent);
    assert_eq!(after.retry_count, 0);
}

#[tokio::test]
async fn retry_count_is_monotonic_until_eviction() {
    let e = engine(true).await;
    e.email.fail_next(u32::MAX);

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
    assert_eq!(stored.retry_count, 0);

    // Drive ticks far enough apart that backoff never gates, and watch
    // retry_count climb to max_retries, then stop.
    let mut previous = 0;
    let mut now = stored.last_attempted_at.expect("attempted");
    for _ in 0..8 {
        now += Duration::hours(1);
        e.worker.run_tick_at(now).await;
        let current = e.repo.get(&stored.notification_id).await.expect("get").retry_count;
        assert!(current >= previous, "retry_count must never decrease");
        previous = current;
    }

    assert_eq!(previous, 5, "eviction at max_retries");
    assert_eq!(e.email.call_count(), 6, "submission plus five worker attempts");
}

#[tokio::test]
async fn future_scheduled_rows_remain_unattempted() {
    let e = engine(true).await;

    let stored = e
        .service
        .send_notification(
            NotificationRequest::new(NotificationKind::Email, "u@example.com", "Hi", "Body")
                .with_schedule(Utc::now() + Duration::days(1)),
        )
        .await
        .expect("submit");

    for minutes in 1..=5 {
        e.worker
            .run_tick_at(Utc::now() + Duration::minutes(minutes))
            .await;
    }

    let after = e.repo.get(&stored.notification_id).await.expect("get");
    assert_eq!(after.status, NotificationStatus::Queued);
    assert!(after.last_attempted_at.is_none());
    assert_eq!(after.retry_count, 0);
    assert_eq!(e.email.call_count(), 0);
}

#[tokio::test]
async fn stranded_sms_rows_fail_out_when_provider_is_removed() {
    // A queued SMS row can predate a configuration change that removed
    // the SMS credentials; the worker fails it out attempt by attempt.
    let disabled = engine(false).await;
    let now = Utc::now();

    let row = courier_entity::notification::Notification::queued(
        courier_core::types::NotificationId::from_string("notif-stranded"),
        NotificationKind::Sms,
        "+15550000000",
        "",
        "OTP",
        Vec::new(),
        None,
        now,
    );
    disabled.repo.create(&row).await.expect("create");

    disabled.worker.run_tick_at(now + Duration::seconds(1)).await;
    let after = disabled.repo.get(&row.notification_id).await.expect("get");
    assert_eq!(after.status, NotificationStatus::Failed);
    assert_eq!(after.retry_count, 1);
    assert_eq!(disabled.sms.call_count(), 0, "no provider call is made");
}
