//! Event model

use serde::{Deserialize, Serialize};
use chrono::{DateTime, NaiveDateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: Option<String>,
    pub content: Option<String>,
    pub owner_id: i64,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Whether `user_id` owns this event
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.owner_id == user_id
    }
}

/// Participation of a user in an event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct UserEvent {
    pub id: i64,
    pub user_id: i64,
    pub event_id: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateEventRequest {
    pub title: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub location: Option<String>,
    pub content: Option<String>,
    pub owner_id: i64,
}
