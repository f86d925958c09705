//! Staff login, logout, and the admin's own profile.

mod current_user;
mod log_in;
mod log_out;
mod update_profile;

pub use current_user::CurrentUserHandler;
pub use log_in::LogInHandler;
pub use log_out::LogOutHandler;
pub use update_profile::{UpdateProfileCommand, UpdateProfileHandler};

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::user::AuthError;

/// Maps a failed user lookup, keeping not-found distinct.
fn user_lookup_error(id: UserId) -> impl FnOnce(DomainError) -> AuthError {
    move |e| {
        if e.is_not_found() {
            AuthError::UserNotFound(id)
        } else {
            AuthError::from(e)
        }
    }
}
