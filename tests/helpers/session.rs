//! Data session with the standard calendar fixtures

use chrono::{NaiveDate, NaiveDateTime};

use calendar_mail::database::MemoryStore;
use calendar_mail::models::{CreateEventRequest, CreateUserRequest, Event, User};

/// 2021-05-05 at the given wall-clock time
pub fn may_fifth(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2021, 5, 5)
        .and_then(|day| day.and_hms_opt(hour, minute, 0))
        .expect("valid fixture timestamp")
}

/// Fresh in-memory session. Dropped with the test.
#[derive(Clone, Default)]
pub struct TestSession {
    pub store: MemoryStore,
}

impl TestSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create_user(&self, username: &str, password: &str, email: &str) -> User {
        self.store
            .create_user(CreateUserRequest {
                username: username.to_string(),
                email: email.to_string(),
                password: password.to_string(),
                full_name: None,
                language_id: Some("english".to_string()),
            })
            .await
            .expect("Failed to create fixture user")
    }

    pub async fn create_event(&self, title: &str, location: &str, owner_id: i64) -> Event {
        self.store
            .create_event(CreateEventRequest {
                title: title.to_string(),
                start: may_fifth(14, 59),
                end: may_fifth(15, 1),
                location: Some(location.to_string()),
                content: Some("content".to_string()),
                owner_id,
            })
            .await
            .expect("Failed to create fixture event")
    }

    pub async fn register(&self, event: &Event, user: &User) {
        self.store
            .register_participant(event.id, user.id)
            .await
            .expect("Failed to register participant");
    }

    /// A user who doesn't own any event
    pub async fn no_event_user(&self) -> User {
        self.create_user(
            "new_test_username",
            "new_test_password",
            "new2_test.email@gmail.com",
        )
        .await
    }

    /// A user who already owns an event
    pub async fn event_owning_user(&self) -> User {
        let user = self
            .create_user(
                "new_test_username2",
                "new_test_password2",
                "new_test_love231.email@gmail.com",
            )
            .await;
        self.create_event(
            "event_owning_user event",
            "https://us02web.zoom.us/j/875384596",
            user.id,
        )
        .await;
        user
    }

    pub async fn user1(&self) -> User {
        self.create_user("user2user2", "verynicepass", "trulyyours1.email@gmail.com")
            .await
    }

    pub async fn event_example(&self, owner: &User) -> Event {
        self.create_event(
            "test event title",
            "https://us02web.zoom.us/j/87538459r6",
            owner.id,
        )
        .await
    }
}
