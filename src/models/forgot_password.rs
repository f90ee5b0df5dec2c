//! Password reset request

use serde::{Deserialize, Serialize};

/// Details needed to mail a password reset link. Never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForgotPassword {
    pub email: String,
    pub username: String,
    pub email_verification_token: String,
}
