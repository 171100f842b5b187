//! Notification handlers.

use axum::extract::{Path, RawQuery, State};
use axum::Json;

use courier_core::error::AppError;
use courier_core::result::AppResult;
use courier_core::types::NotificationId;
use courier_entity::notification::{NotificationFilter, NotificationStatus};

use crate::dto::request::{parse_rfc3339_utc, RescheduleRequest, SendNotificationRequest};
use crate::dto::response::{ListNotificationsResponse, NotificationResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// POST /api/notifications
pub async fn send_notification(
    State(state): State<AppState>,
    Json(payload): Json<SendNotificationRequest>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let request = payload.into_domain()?;
    let stored = state.notification_service.send_notification(request).await?;
    Ok(Json(stored.into()))
}

/// GET /api/notifications/{id}
pub async fn get_notification_status(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let notification = state
        .notification_service
        .get_notification_status(&NotificationId::from_string(id))
        .await?;
    Ok(Json(notification.into()))
}

/// GET /api/notifications?status=queued&status=failed
pub async fn list_notifications(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Json<ListNotificationsResponse>, ApiError> {
    let filter = parse_status_filters(query.as_deref())?;
    let notifications = state
        .notification_service
        .list_notifications(&filter)
        .await?;
    Ok(Json(ListNotificationsResponse {
        notifications: notifications.into_iter().map(Into::into).collect(),
    }))
}

/// PATCH /api/notifications/{id}/schedule
pub async fn reschedule_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<RescheduleRequest>,
) -> Result<Json<NotificationResponse>, ApiError> {
    if payload.scheduled_time.trim().is_empty() {
        return Err(AppError::validation("scheduled_time is required").into());
    }
    let scheduled_for = parse_rfc3339_utc(&payload.scheduled_time)?;
    let notification = state
        .notification_service
        .reschedule_notification(&NotificationId::from_string(id), scheduled_for)
        .await?;
    Ok(Json(notification.into()))
}

/// POST /api/notifications/{id}/cancel
pub async fn cancel_notification(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NotificationResponse>, ApiError> {
    let notification = state
        .notification_service
        .cancel_notification(&NotificationId::from_string(id))
        .await?;
    Ok(Json(notification.into()))
}

/// Collect repeated (or comma-separated) `status` query parameters into a
/// filter. Unknown statuses are rejected rather than silently dropped.
fn parse_status_filters(query: Option<&str>) -> AppResult<NotificationFilter> {
    let mut statuses = Vec::new();
    let Some(query) = query else {
        return Ok(NotificationFilter::all());
    };

    for pair in query.split('&') {
        let mut parts = pair.splitn(2, '=');
        if parts.next() != Some("status") {
            continue;
        }
        let value = parts.next().unwrap_or("");
        for raw in value.split(',') {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                continue;
            }
            let status = NotificationStatus::parse(trimmed).ok_or_else(|| {
                AppError::validation(format!("unknown status filter: {trimmed}"))
            })?;
            statuses.push(status);
        }
    }
    Ok(NotificationFilter::with_statuses(statuses))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_query_means_unfiltered() {
        assert!(parse_status_filters(None).expect("parse").is_unfiltered());
        assert!(parse_status_filters(Some("")).expect("parse").is_unfiltered());
    }

    #[test]
    fn test_repeated_and_comma_forms_collect() {
        let filter =
            parse_status_filters(Some("status=queued&status=failed")).expect("parse");
        assert_eq!(
            filter.statuses,
            vec![NotificationStatus::Queued, NotificationStatus::Failed]
        );

        let filter = parse_status_filters(Some("status=queued,sent")).expect("parse");
        assert_eq!(
            filter.statuses,
            vec![NotificationStatus::Queued, NotificationStatus::Sent]
        );
    }

    #[test]
    fn test_duplicates_collapse_and_case_folds() {
        let filter =
            parse_status_filters(Some("status=QUEUED&status=queued")).expect("parse");
        assert_eq!(filter.statuses, vec![NotificationStatus::Queued]);
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let err = parse_status_filters(Some("status=delivered")).expect_err("unknown");
        assert!(err.message.contains("delivered"));
    }

    #[test]
    fn test_other_parameters_are_ignored() {
        let filter = parse_status_filters(Some("page=2&status=sent")).expect("parse");
        assert_eq!(filter.statuses, vec![NotificationStatus::Sent]);
    }
}
