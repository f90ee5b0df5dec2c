//! Database service layer
//!
//! This module provides a high-level interface to database operations

use async_trait::async_trait;

use crate::database::{CalendarStore, DatabasePool, EventRepository, UserRepository};
use crate::models::*;
use crate::utils::errors::{CalendarError, Result};

#[derive(Debug, Clone)]
pub struct DatabaseService {
    pub users: UserRepository,
    pub events: EventRepository,
}

impl DatabaseService {
    pub fn new(pool: DatabasePool) -> Self {
        Self {
            users: UserRepository::new(pool.clone()),
            events: EventRepository::new(pool),
        }
    }

    /// Create a new user
    pub async fn create_user(&self, request: CreateUserRequest) -> Result<User> {
        self.users.create(request).await
    }

    /// Create a new event owned by an existing user
    pub async fn create_event(&self, request: CreateEventRequest) -> Result<Event> {
        if self.users.find_by_id(request.owner_id).await?.is_none() {
            return Err(CalendarError::UserNotFound { user_id: request.owner_id });
        }

        self.events.create(request).await
    }

    /// Register user as participant of an event
    pub async fn register_participant(&self, event_id: i64, user_id: i64) -> Result<UserEvent> {
        if self.events.find_by_id(event_id).await?.is_none() {
            return Err(CalendarError::EventNotFound { event_id });
        }

        if self.users.find_by_id(user_id).await?.is_none() {
            return Err(CalendarError::UserNotFound { user_id });
        }

        if self.events.is_participant(event_id, user_id).await? {
            return Err(CalendarError::InvalidInput(
                "User is already a participant of this event".to_string(),
            ));
        }

        self.events.add_participant(event_id, user_id).await
    }
}

#[async_trait]
impl CalendarStore for DatabaseService {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>> {
        self.users.find_by_id(user_id).await
    }

    async fn find_event(&self, event_id: i64) -> Result<Option<Event>> {
        self.events.find_by_id(event_id).await
    }

    async fn event_participants(&self, event_id: i64) -> Result<Vec<User>> {
        self.events.get_participants(event_id).await
    }
}
