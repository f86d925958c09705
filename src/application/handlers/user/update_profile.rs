//! UpdateProfileHandler - a logged-in user edits their own name and email.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::user::{AuthError, Profile, User};
use crate::ports::UserRepository;

use super::user_lookup_error;

#[derive(Debug, Clone)]
pub struct UpdateProfileCommand {
    pub user_id: UserId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

pub struct UpdateProfileHandler {
    users: Arc<dyn UserRepository>,
}

impl UpdateProfileHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    pub async fn handle(&self, cmd: UpdateProfileCommand) -> Result<User, AuthError> {
        let profile = Profile::parse(&cmd.first_name, &cmd.last_name, &cmd.email)
            .map_err(AuthError::Validation)?;

        let mut user = self
            .users
            .get_user_by_id(cmd.user_id)
            .await
            .map_err(user_lookup_error(cmd.user_id))?;
        user.apply_profile(profile);

        self.users
            .update_user(&user)
            .await
            .map_err(user_lookup_error(cmd.user_id))?;

        tracing::info!(user_id = %cmd.user_id, "Profile updated");
        Ok(user)
    }
}
