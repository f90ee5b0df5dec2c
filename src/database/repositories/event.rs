//! Event repository implementation

use std::time::Instant;

use sqlx::PgPool;
use chrono::Utc;
use crate::models::event::{Event, UserEvent, CreateEventRequest};
use crate::models::user::User;
use crate::utils::errors::CalendarError;
use crate::utils::logging::log_database_operation;

const EVENT_COLUMNS: &str = r#"id, title, start, "end", location, content, owner_id, created_at"#;

#[derive(Clone)]
#[derive(Debug)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create a new event
    pub async fn create(&self, request: CreateEventRequest) -> Result<Event, CalendarError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            r#"
            INSERT INTO events (title, start, "end", location, content, owner_id, created_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING {EVENT_COLUMNS}
            "#
        ))
        .bind(request.title)
        .bind(request.start)
        .bind(request.end)
        .bind(request.location)
        .bind(request.content)
        .bind(request.owner_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(event)
    }

    /// Find event by ID
    pub async fn find_by_id(&self, id: i64) -> Result<Option<Event>, CalendarError> {
        let event = sqlx::query_as::<_, Event>(&format!(
            "SELECT {EVENT_COLUMNS} FROM events WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(event)
    }

    /// Register a user as participant of an event
    pub async fn add_participant(&self, event_id: i64, user_id: i64) -> Result<UserEvent, CalendarError> {
        let participation = sqlx::query_as::<_, UserEvent>(
            r#"
            INSERT INTO user_events (user_id, event_id)
            VALUES ($1, $2)
            RETURNING id, user_id, event_id
            "#
        )
        .bind(user_id)
        .bind(event_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(participation)
    }

    /// Remove a participant from an event
    pub async fn remove_participant(&self, event_id: i64, user_id: i64) -> Result<(), CalendarError> {
        sqlx::query("DELETE FROM user_events WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Get the users participating in an event
    pub async fn get_participants(&self, event_id: i64) -> Result<Vec<User>, CalendarError> {
        let started = Instant::now();
        let result = sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.password, u.full_name, u.language_id, u.created_at
            FROM users u
            INNER JOIN user_events ue ON u.id = ue.user_id
            WHERE ue.event_id = $1
            ORDER BY ue.id ASC
            "#
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await;

        log_database_operation(
            "select_participants",
            "user_events",
            started.elapsed().as_millis() as u64,
            result.is_ok(),
        );

        Ok(result?)
    }

    /// Check if user participates in event
    pub async fn is_participant(&self, event_id: i64, user_id: i64) -> Result<bool, CalendarError> {
        let count: (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM user_events WHERE event_id = $1 AND user_id = $2"
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(count.0 > 0)
    }
}
