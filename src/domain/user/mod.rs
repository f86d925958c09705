//! Staff accounts and the login that guards the admin pages.
//!
//! Password hashes never leave the repository; the domain only sees the
//! account fields and the id stored in the visitor session on login.

mod account;
mod errors;
mod login;

pub use account::{Profile, User, USER_SESSION_KEY};
pub use errors::AuthError;
pub use login::LoginForm;
