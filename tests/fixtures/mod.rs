//! Generated test data
//!
//! Builders for users and events with random but well-formed values, for
//! tests that need many distinct rows.

#![allow(dead_code)]

use chrono::{Duration, NaiveDateTime};
use fake::faker::internet::en::{Password, SafeEmail, Username};
use fake::faker::lorem::en::Sentence;
use fake::faker::name::en::Name;
use fake::Fake;

use calendar_mail::models::{CreateEventRequest, CreateUserRequest};

/// Test user data structure
#[derive(Debug, Clone)]
pub struct TestUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

impl TestUser {
    /// A user with a unique username and a valid address
    pub fn fake(index: usize) -> Self {
        let username: String = Username().fake();
        Self {
            username: format!("{}_{}", username, index),
            email: format!("{}.{}", index, SafeEmail().fake::<String>()),
            password: Password(8..16).fake(),
            full_name: Some(Name().fake()),
        }
    }

    pub fn with_email(mut self, email: &str) -> Self {
        self.email = email.to_string();
        self
    }

    pub fn request(&self) -> CreateUserRequest {
        CreateUserRequest {
            username: self.username.clone(),
            email: self.email.clone(),
            password: self.password.clone(),
            full_name: self.full_name.clone(),
            language_id: None,
        }
    }
}

/// Test event data structure
#[derive(Debug, Clone)]
pub struct TestEvent {
    pub title: String,
    pub start: NaiveDateTime,
    pub length: Duration,
    pub content: Option<String>,
}

impl TestEvent {
    pub fn fake(start: NaiveDateTime) -> Self {
        Self {
            title: Sentence(2..4).fake(),
            start,
            length: Duration::minutes((15..120).fake::<i64>()),
            content: Some(Sentence(3..8).fake()),
        }
    }

    pub fn request(&self, owner_id: i64) -> CreateEventRequest {
        CreateEventRequest {
            title: self.title.clone(),
            start: self.start,
            end: self.start + self.length,
            location: None,
            content: self.content.clone(),
            owner_id,
        }
    }
}

/// Addresses the validator must refuse
pub const INVALID_EMAILS: &[&str] = &[
    "",
    "not-an-email",
    "@example.com",
    "user@",
    "user@localhost",
    "two@@example.com",
    "spaced user@example.com",
];
