//! CurrentUserHandler - resolves the logged-in user from the session.

use std::sync::Arc;

use crate::domain::user::{AuthError, User, USER_SESSION_KEY};
use crate::ports::{SessionHandle, SessionRead, UserRepository};

pub struct CurrentUserHandler {
    users: Arc<dyn UserRepository>,
}

impl CurrentUserHandler {
    pub fn new(users: Arc<dyn UserRepository>) -> Self {
        Self { users }
    }

    /// `None` when nobody is logged in. An unreadable id, or one whose
    /// account no longer exists, is removed and treated the same way.
    pub async fn handle(&self, session: &SessionHandle) -> Result<Option<User>, AuthError> {
        let user_id = match session.get(USER_SESSION_KEY).await? {
            SessionRead::Present(id) => id,
            SessionRead::Absent => return Ok(None),
            SessionRead::Malformed(reason) => {
                tracing::warn!(%reason, "Discarding unreadable user id");
                session.remove(USER_SESSION_KEY).await?;
                return Ok(None);
            }
        };

        match self.users.get_user_by_id(user_id).await {
            Ok(user) => Ok(Some(user)),
            Err(e) if e.is_not_found() => {
                tracing::warn!(user_id = %user_id, "Session names a user that no longer exists");
                session.remove(USER_SESSION_KEY).await?;
                Ok(None)
            }
            Err(e) => Err(AuthError::Store(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::reservation::test_support::session;
    use crate::application::handlers::user::test_support::users_with_admin;
    use crate::domain::foundation::UserId;

    #[tokio::test]
    async fn logged_in_user_is_loaded() {
        let (users, id) = users_with_admin().await;
        let session = session();
        session.put(USER_SESSION_KEY, &id).await.unwrap();

        let user = CurrentUserHandler::new(users).handle(&session).await.unwrap();
        assert_eq!(user.map(|u| u.email).as_deref(), Some("admin@here.com"));
    }

    #[tokio::test]
    async fn anonymous_session_has_no_user() {
        let (users, _) = users_with_admin().await;
        let user = CurrentUserHandler::new(users).handle(&session()).await.unwrap();
        assert!(user.is_none());
    }

    #[tokio::test]
    async fn stale_or_unreadable_id_is_dropped() {
        let (users, _) = users_with_admin().await;
        let handler = CurrentUserHandler::new(users);

        for stored in [serde_json::json!(99), serde_json::json!("admin")] {
            let session = session();
            session.put(USER_SESSION_KEY, &stored).await.unwrap();

            assert!(handler.handle(&session).await.unwrap().is_none());
            let read: SessionRead<UserId> = session.get(USER_SESSION_KEY).await.unwrap();
            assert_eq!(read, SessionRead::Absent);
        }
    }
}
