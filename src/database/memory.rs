//! In-memory [`CalendarStore`] for development and testing.
//!
//! Rows live in vectors behind a lock and are lost when the store is dropped.
//! Ids are assigned sequentially from 1, like a fresh database.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use super::CalendarStore;
use crate::models::*;
use crate::utils::errors::{CalendarError, Result};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    events: Vec<Event>,
    user_events: Vec<UserEvent>,
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    tables: Arc<RwLock<Tables>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        let mut tables = self.tables.write().await;
        if tables
            .users
            .iter()
            .any(|u| u.username == request.username || u.email == request.email)
        {
            return Err(CalendarError::InvalidInput(format!(
                "User already exists: {}",
                request.username
            )));
        }

        let user = User {
            id: tables.users.len() as i64 + 1,
            username: request.username,
            email: request.email,
            password: request.password,
            full_name: request.full_name,
            language_id: request.language_id.unwrap_or_else(|| "english".to_string()),
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == request.owner_id) {
            return Err(CalendarError::UserNotFound { user_id: request.owner_id });
        }

        let event = Event {
            id: tables.events.len() as i64 + 1,
            title: request.title,
            start: request.start,
            end: request.end,
            location: request.location,
            content: request.content,
            owner_id: request.owner_id,
            created_at: Utc::now(),
        };
        tables.events.push(event.clone());
        Ok(event)
    }

    pub async fn register_participant(&self, event_id: i64, user_id: i64) -> Result<UserEvent> {
        let mut tables = self.tables.write().await;
        if !tables.events.iter().any(|e| e.id == event_id) {
            return Err(CalendarError::EventNotFound { event_id });
        }
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(CalendarError::UserNotFound { user_id });
        }
        if tables
            .user_events
            .iter()
            .any(|ue| ue.event_id == event_id && ue.user_id == user_id)
        {
            return Err(CalendarError::InvalidInput(
                "User is already a participant of this event".to_string(),
            ));
        }

        let participation = UserEvent {
            id: tables.user_events.len() as i64 + 1,
            user_id,
            event_id,
        };
        tables.user_events.push(participation.clone());
        Ok(participation)
    }
}

#[async_trait]
impl CalendarStore for MemoryStore {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == user_id).cloned())
    }

    async fn find_event(&self, event_id: i64) -> Result<Option<Event>> {
        let tables = self.tables.read().await;
        Ok(tables.events.iter().find(|e| e.id == event_id).cloned())
    }

    async fn event_participants(&self, event_id: i64) -> Result<Vec<User>> {
        let tables = self.tables.read().await;
        let participants = tables
            .user_events
            .iter()
            .filter(|ue| ue.event_id == event_id)
            .filter_map(|ue| tables.users.iter().find(|u| u.id == ue.user_id).cloned())
            .collect();
        Ok(participants)
    }
}
