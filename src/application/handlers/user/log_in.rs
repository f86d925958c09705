//! LogInHandler - checks credentials and starts an authenticated session.
//!
//! A successful login moves the visitor onto a fresh session token: the
//! previous session is destroyed and only the user id is written to the new
//! one. A failed login leaves the previous session untouched.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{AuthError, LoginForm, USER_SESSION_KEY};
use crate::ports::{SessionHandle, UserRepository};

pub struct LogInHandler {
    users: Arc<dyn UserRepository>,
}

impl LogInHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(
        &self,
        previous: &SessionHandle,
        fresh: &SessionHandle,
        form: LoginForm,
    ) -> Result<UserId, AuthError> {
        form.validate()?;

        let user_id = self
            .users
            .authenticate(form.email.trim(), &form.password)
            .await?;

        previous.destroy().await?;
        fresh.put(USER_SESSION_KEY, &user_id).await?;

        tracing::info!(user_id = %user_id, "User logged in");
        Ok(user_id)
    }
}
