use std::sync::Arc;

use async_trait::async_trait;
use auth::AuthenticationError;
use auth::Authenticator;
use auth::Claims;
use chrono::Utc;

use crate::domain::user::models::LoginCommand;
use crate::domain::user::models::LoginOutcome;
use crate::domain::user::models::RegisterUserCommand;
use crate::domain::user::models::User;
use crate::domain::user::models::UserId;
use crate::user::errors::UserError;
use crate::user::ports::UserRepository;
use crate::user::ports::UserServicePort;

/// Domain service implementation for registration, login and token resolution.
///
/// Argon2 work runs on the blocking pool.
pub struct UserService<UR>
where
    UR: UserRepository,
{
    repository: Arc<UR>,
    authenticator: Arc<Authenticator>,
    token_lifetime_hours: Option<i64>,
}

impl<UR> UserService<UR>
where
    UR: UserRepository,
{
    /// Create a new user service with injected dependencies.
    ///
    /// # Arguments
    /// * `repository` - User persistence implementation
    /// * `authenticator` - Password hashing and token signing, bound to the secret
    /// * `token_lifetime_hours` - Lifetime of issued tokens; `None` for no expiry
    pub fn new(
        repository: Arc<UR>,
        authenticator: Arc<Authenticator>,
        token_lifetime_hours: Option<i64>,
    ) -> Self {
        Self {
            repository,
            authenticator,
            token_lifetime_hours,
        }
    }
}

#[async_trait]
impl<UR> UserServicePort for UserService<UR>
where
    UR: UserRepository,
{
    async fn register(&self, command: RegisterUserCommand) -> Result<User, UserError> {
        if self.repository.find_by_email(&command.email).await?.is_some() {
            tracing::info!("Registration rejected: email already registered");
            return Err(UserError::EmailAlreadyExists(command.email.to_string()));
        }

        let authenticator = Arc::clone(&self.authenticator);
        let password = command.password;
        let password_hash =
            tokio::task::spawn_blocking(move || authenticator.hash_password(password.expose()))
                .await
                .map_err(|e| UserError::Unknown(format!("Password hashing task failed: {}", e)))??;

        let user = User {
            id: UserId::new(),
            email: command.email,
            password_hash,
            created_at: Utc::now(),
        };

        let created_user = self.repository.create(user).await?;
        tracing::info!(user_id = %created_user.id, "User registered");

        Ok(created_user)
    }

    async fn login(&self, command: LoginCommand) -> Result<LoginOutcome, UserError> {
        let user = match self.repository.find_by_email(&command.email).await? {
            Some(user) => user,
            None => {
                // Same Argon2 cost as a real verification, result discarded
                let authenticator = Arc::clone(&self.authenticator);
                let password = command.password;
                let _ = tokio::task::spawn_blocking(move || {
                    authenticator.hash_password(password.expose())
                })
                .await;

                tracing::warn!(reason = "unknown email", "Login rejected");
                return Err(UserError::InvalidCredentials);
            }
        };

        let claims = Claims::for_user(user.id, self.token_lifetime_hours);
        let authenticator = Arc::clone(&self.authenticator);
        let stored_hash = user.password_hash.clone();
        let password = command.password;

        let result = tokio::task::spawn_blocking(move || {
            authenticator.authenticate(password.expose(), &stored_hash, &claims)
        })
        .await
        .map_err(|e| UserError::Unknown(format!("Password verification task failed: {}", e)))?;

        match result {
            Ok(authenticated) => {
                tracing::info!(user_id = %user.id, "Login succeeded");
                Ok(LoginOutcome {
                    user,
                    access_token: authenticated.access_token,
                })
            }
            Err(AuthenticationError::InvalidCredentials) => {
                tracing::warn!(user_id = %user.id, reason = "wrong password", "Login rejected");
                Err(UserError::InvalidCredentials)
            }
            Err(AuthenticationError::PasswordError(e)) => Err(e.into()),
            Err(AuthenticationError::JwtError(e)) => Err(e.into()),
        }
    }

    async fn resolve_principal(&self, token: &str) -> Result<User, UserError> {
        let claims = self.authenticator.validate_token(token).map_err(|e| {
            tracing::warn!(error = %e, "Token rejected");
            UserError::InvalidCredentials
        })?;

        let user_id = UserId::from_string(claims.subject()).map_err(|e| {
            tracing::warn!(error = %e, "Token subject is not a user id");
            UserError::InvalidCredentials
        })?;

        self.repository.find_by_id(&user_id).await?.ok_or_else(|| {
            tracing::warn!(user_id = %user_id, "Token subject no longer exists");
            UserError::InvalidCredentials
        })
    }
}
