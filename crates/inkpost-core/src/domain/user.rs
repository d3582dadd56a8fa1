use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - identity is keyed by email, not by a username.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a regular user with generated ID and timestamps.
    pub fn new(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            password_hash,
            first_name,
            last_name,
            is_staff: false,
            is_superuser: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Create a superuser. Staff, superuser and active flags are all forced on.
    pub fn new_superuser(
        email: String,
        password_hash: String,
        first_name: String,
        last_name: String,
    ) -> Self {
        let mut user = Self::new(email, password_hash, first_name, last_name);
        user.is_staff = true;
        user.is_superuser = true;
        user.is_active = true;
        user
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}
