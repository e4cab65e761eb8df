//! Session Records

use jiff::{SignedDuration, Timestamp};

use crate::{
    domain::{accounts::records::UserUuid, carts::records::CartUuid},
    uuids::TypedUuid,
};

/// Two weeks.
pub const DEFAULT_SESSION_TTL: SignedDuration = SignedDuration::from_secs(14 * 24 * 60 * 60);

/// Session UUID
pub type SessionUuid = TypedUuid<SessionRecord>;

/// Session Record
#[derive(Debug, Clone)]
pub struct SessionRecord {
    pub uuid: SessionUuid,

    /// Active cart; cleared at checkout.
    pub cart_uuid: Option<CartUuid>,

    /// Logged-in user.
    pub user_uuid: Option<UserUuid>,

    /// The token stops resolving after this.
    pub expires_at: Timestamp,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A session and the raw token to hand to the client, returned whenever a
/// token is minted: on start, and on login, registration and logout.
#[derive(Debug, Clone)]
pub struct IssuedSession {
    /// Only shown once; storage keeps its hash.
    pub token: String,
    pub session: SessionRecord,
}

/// What a purge removed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PurgedSessions {
    pub sessions: usize,

    /// Open carts no live session points at any more.
    pub carts: u64,
}
