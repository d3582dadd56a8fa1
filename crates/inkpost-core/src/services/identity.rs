//! Identity service - user creation and credential verification.

use std::sync::Arc;

use crate::domain::User;
use crate::error::{DomainError, RepoError};
use crate::ports::{PasswordService, UserRepository};

const MIN_PASSWORD_LEN: usize = 8;

/// Input for user creation.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Owns user records and credential verification.
pub struct IdentityService {
    users: Arc<dyn UserRepository>,
    passwords: Arc<dyn PasswordService>,
}

impl IdentityService {
    pub fn new(users: Arc<dyn UserRepository>, passwords: Arc<dyn PasswordService>) -> Self {
        Self { users, passwords }
    }

    /// Create and persist a regular user.
    ///
    /// The email is normalized before storage; uniqueness is enforced by the
    /// store's constraint on save, so concurrent signups with the same email
    /// cannot both succeed.
    pub async fn create_user(&self, new_user: NewUser) -> Result<User, DomainError> {
        let (email, password_hash) = self.validate_and_hash(&new_user)?;
        let user = User::new(
            email,
            password_hash,
            new_user.first_name.trim().to_string(),
            new_user.last_name.trim().to_string(),
        );
        let saved = self.save_user(user).await?;
        tracing::info!(user_id = %saved.id, "user registered");
        Ok(saved)
    }

    /// Create and persist a superuser (staff/superuser/active all forced on).
    pub async fn create_superuser(&self, new_user: NewUser) -> Result<User, DomainError> {
        let (email, password_hash) = self.validate_and_hash(&new_user)?;
        let user = User::new_superuser(
            email,
            password_hash,
            new_user.first_name.trim().to_string(),
            new_user.last_name.trim().to_string(),
        );
        let saved = self.save_user(user).await?;
        tracing::info!(user_id = %saved.id, "superuser provisioned");
        Ok(saved)
    }

    /// Verify an email/password pair.
    ///
    /// Returns `Ok(None)` for an unknown email, a wrong password, or an
    /// inactive account - indistinguishably. Only infrastructure failures
    /// are errors.
    pub async fn verify_credentials(
        &self,
        email: &str,
        password: &str,
    ) -> Result<Option<User>, DomainError> {
        let email = normalize_email(email);
        let Some(user) = self
            .users
            .find_by_email(&email)
            .await
            .map_err(internal)?
        else {
            return Ok(None);
        };

        if !user.is_active {
            return Ok(None);
        }

        let matches = self
            .passwords
            .verify(password, &user.password_hash)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok(matches.then_some(user))
    }

    fn validate_and_hash(&self, new_user: &NewUser) -> Result<(String, String), DomainError> {
        let email = normalize_email(&new_user.email);
        if email.is_empty() {
            return Err(DomainError::required("email"));
        }
        if !email.contains('@') {
            return Err(DomainError::validation(
                "email",
                "Enter a valid email address.",
            ));
        }
        if new_user.password.is_empty() {
            return Err(DomainError::required("password1"));
        }
        if new_user.password.len() < MIN_PASSWORD_LEN {
            return Err(DomainError::validation(
                "password1",
                format!("Password must be at least {MIN_PASSWORD_LEN} characters."),
            ));
        }

        let password_hash = self
            .passwords
            .hash(&new_user.password)
            .map_err(|e| DomainError::Internal(e.to_string()))?;

        Ok((email, password_hash))
    }

    async fn save_user(&self, user: User) -> Result<User, DomainError> {
        match self.users.save(user).await {
            Ok(saved) => Ok(saved),
            // Unique-constraint violation on email: surface as a field-level
            // conflict next to the email input.
            Err(RepoError::Constraint(_)) => Err(DomainError::Conflict {
                field: "email",
                message: "A user with this email already exists.".to_string(),
            }),
            Err(e) => Err(internal(e)),
        }
    }
}

/// Canonicalize an email address: trim surrounding whitespace and lowercase
/// the domain part. The local part is left as typed.
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();
    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{}@{}", local, domain.to_lowercase()),
        None => email.to_string(),
    }
}

fn internal(e: RepoError) -> DomainError {
    DomainError::Internal(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_lowercases_domain_only() {
        assert_eq!(
            normalize_email("  Jane.Doe@Example.COM "),
            "Jane.Doe@example.com"
        );
    }

    #[test]
    fn normalize_leaves_non_email_input_alone() {
        assert_eq!(normalize_email(" not-an-email "), "not-an-email");
    }
}
