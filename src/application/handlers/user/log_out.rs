//! LogOutHandler - ends the visitor's session.

use crate::domain::user::AuthError;
use crate::ports::SessionHandle;

#[derive(Debug, Default)]
pub struct LogOutHandler;

impl LogOutHandler {
    pub fn new() -> Self {
        Self
    }

    /// Drops every session value, the user id included.
    pub async fn handle(&self, session: &SessionHandle) -> Result<(), AuthError> {
        session.destroy().await?;
        tracing::info!(session = %session.token(), "Session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::handlers::reservation::test_support::session;
    use crate::domain::foundation::UserId;
    use crate::domain::user::USER_SESSION_KEY;
    use crate::ports::SessionRead;

    #[tokio::test]
    async fn logout_forgets_the_user() {
        let session = session();
        session.put(USER_SESSION_KEY, &UserId::new(1)).await.unwrap();

        LogOutHandler::new().handle(&session).await.unwrap();

        let read: SessionRead<UserId> = session.get(USER_SESSION_KEY).await.unwrap();
        assert_eq!(read, SessionRead::Absent);
    }
}
