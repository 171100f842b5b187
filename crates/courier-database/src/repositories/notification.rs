//! Notification repository implementation.
//!
//! The repository is the only writer of the `notifications` table. Every
//! mutation advances `updated_at`; callers tolerate concurrent readers.

use chrono::Utc;
use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use courier_core::error::{AppError, ErrorKind};
use courier_core::result::AppResult;
use courier_core::types::NotificationId;
use courier_entity::notification::{
    EmailAttachment, Notification, NotificationFilter, NotificationKind, NotificationStatus,
};

/// Repository for notification persistence and filtered queries.
#[derive(Debug, Clone)]
pub struct NotificationRepository {
    pool: SqlitePool,
}

#[derive(Debug, sqlx::FromRow)]
struct AttachmentRow {
    notification_row_id: i64,
    filename: String,
    content_type: String,
    data: Vec<u8>,
}

impl NotificationRepository {
    /// Create a new notification repository.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Insert a new notification with its attachments.
    ///
    /// Fails with a `Conflict` error when the `notification_id` already
    /// exists. Returns the stored copy with its surrogate key populated.
    pub async fn create(&self, notification: &Notification) -> AppResult<Notification> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let result = sqlx::query(
            "INSERT INTO notifications (notification_id, kind, recipient, subject, message, \
             provider_message_id, status, retry_count, last_attempted_at, scheduled_for, \
             created_at, updated_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(notification.notification_id.as_str())
        .bind(notification.kind)
        .bind(&notification.recipient)
        .bind(&notification.subject)
        .bind(&notification.message)
        .bind(&notification.provider_message_id)
        .bind(notification.status)
        .bind(notification.retry_count)
        .bind(notification.last_attempted_at)
        .bind(notification.scheduled_for)
        .bind(notification.created_at)
        .bind(notification.updated_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| {
            if e.as_database_error()
                .is_some_and(|db| db.is_unique_violation())
            {
                AppError::conflict(format!(
                    "Notification {} already exists",
                    notification.notification_id
                ))
            } else {
                AppError::with_source(ErrorKind::Database, "Failed to create notification", e)
            }
        })?;

        let row_id = result.last_insert_rowid();

        for (position, attachment) in notification.attachments.iter().enumerate() {
            sqlx::query(
                "INSERT INTO notification_attachments \
                 (notification_row_id, position, filename, content_type, data) \
                 VALUES (?, ?, ?, ?, ?)",
            )
            .bind(row_id)
            .bind(position as i64)
            .bind(&attachment.filename)
            .bind(&attachment.content_type)
            .bind(&attachment.data)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to store attachment", e)
            })?;
        }

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit notification", e)
        })?;

        let mut stored = notification.clone();
        stored.row_id = row_id;
        Ok(stored)
    }

    /// Fetch a notification by its external identifier, attachments included.
    pub async fn get(&self, id: &NotificationId) -> AppResult<Notification> {
        let notification = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications WHERE notification_id = ?",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to fetch notification", e)
        })?
        .ok_or_else(|| AppError::not_found(format!("Notification {id} not found")))?;

        let mut notifications = vec![notification];
        self.load_attachments(&mut notifications).await?;
        Ok(notifications.remove(0))
    }

    /// Full-row update of the lifecycle columns, advancing `updated_at`.
    ///
    /// Attachments are immutable after creation and are not rewritten.
    /// Fails with `NotFound` when the row has disappeared.
    pub async fn save(&self, notification: &Notification) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE notifications SET kind = ?, recipient = ?, subject = ?, message = ?, \
             provider_message_id = ?, status = ?, retry_count = ?, last_attempted_at = ?, \
             scheduled_for = ?, updated_at = ? \
             WHERE notification_id = ?",
        )
        .bind(notification.kind)
        .bind(&notification.recipient)
        .bind(&notification.subject)
        .bind(&notification.message)
        .bind(&notification.provider_message_id)
        .bind(notification.status)
        .bind(notification.retry_count)
        .bind(notification.last_attempted_at)
        .bind(notification.scheduled_for)
        .bind(Utc::now())
        .bind(notification.notification_id.as_str())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to save notification", e)
        })?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!(
                "Notification {} not found",
                notification.notification_id
            )));
        }
        Ok(())
    }

    /// Return the retry candidate set: rows that are `queued` or `failed`
    /// with attempts remaining. The scheduled-for gate is applied by the
    /// worker so schedule policy lives in one place.
    ///
    /// Attachments are loaded because email candidates are redispatched
    /// with their original payloads.
    pub async fn list_pending(&self, max_retries: u32) -> AppResult<Vec<Notification>> {
        let mut notifications = sqlx::query_as::<_, Notification>(
            "SELECT * FROM notifications \
             WHERE (status = ? OR status = ?) AND retry_count < ? \
             ORDER BY created_at ASC",
        )
        .bind(NotificationStatus::Queued)
        .bind(NotificationStatus::Failed)
        .bind(max_retries)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list pending notifications", e)
        })?;

        self.load_attachments(&mut notifications).await?;
        Ok(notifications)
    }

    /// List notifications, optionally restricted to a status set.
    ///
    /// A read projection: attachments are not loaded.
    pub async fn list(&self, filter: &NotificationFilter) -> AppResult<Vec<Notification>> {
        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT * FROM notifications");

        if !filter.is_unfiltered() {
            builder.push(" WHERE status IN (");
            let mut separated = builder.separated(", ");
            for status in &filter.statuses {
                separated.push_bind(*status);
            }
            separated.push_unseparated(")");
        }
        builder.push(" ORDER BY created_at DESC");

        builder
            .build_query_as::<Notification>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to list notifications", e)
            })
    }

    /// Populate `attachments` for every email notification in the slice.
    async fn load_attachments(&self, notifications: &mut [Notification]) -> AppResult<()> {
        let row_ids: Vec<i64> = notifications
            .iter()
            .filter(|n| n.kind == NotificationKind::Email)
            .map(|n| n.row_id)
            .collect();
        if row_ids.is_empty() {
            return Ok(());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(
            "SELECT notification_row_id, filename, content_type, data \
             FROM notification_attachments WHERE notification_row_id IN (",
        );
        let mut separated = builder.separated(", ");
        for row_id in &row_ids {
            separated.push_bind(*row_id);
        }
        separated.push_unseparated(") ORDER BY notification_row_id, position");

        let rows = builder
            .build_query_as::<AttachmentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to load attachments", e)
            })?;

        for row in rows {
            if let Some(notification) = notifications
                .iter_mut()
                .find(|n| n.row_id == row.notification_row_id)
            {
                notification.attachments.push(EmailAttachment::new(
                    row.filename,
                    row.content_type,
                    row.data,
                ));
            }
        }
        Ok(())
    }
}
