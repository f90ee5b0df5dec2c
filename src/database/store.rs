//! Read-only data session used by the notifiers

use async_trait::async_trait;

use crate::models::{Event, User};
use crate::utils::errors::Result;

/// Lookups the mail notifiers perform before composing a message.
///
/// Implemented by [`crate::database::DatabaseService`] for PostgreSQL and by
/// [`crate::database::MemoryStore`] for tests and dry runs.
#[async_trait]
pub trait CalendarStore: Send + Sync {
    async fn find_user(&self, user_id: i64) -> Result<Option<User>>;

    async fn find_event(&self, event_id: i64) -> Result<Option<Event>>;

    /// Users registered as participants of the event
    async fn event_participants(&self, event_id: i64) -> Result<Vec<User>>;
}
