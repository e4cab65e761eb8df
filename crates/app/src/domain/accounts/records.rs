//! Account Records

use jiff::Timestamp;

use crate::{domain::sessions::records::IssuedSession, uuids::TypedUuid};

/// User UUID
pub type UserUuid = TypedUuid<UserRecord>;

/// User Record
#[derive(Debug, Clone)]
pub struct UserRecord {
    pub uuid: UserUuid,
    pub username: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A user bound to a session whose token was reissued in the same step.
#[derive(Debug, Clone)]
pub struct SignedIn {
    pub user: UserRecord,
    pub session: IssuedSession,
}

/// A user together with their stored password hash.
#[derive(Clone)]
pub(crate) struct UserCredentialsRecord {
    pub user: UserRecord,
    pub password_hash: String,
}

impl std::fmt::Debug for UserCredentialsRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserCredentialsRecord")
            .field("user", &self.user)
            .field("password_hash", &"**redacted**")
            .finish()
    }
}
