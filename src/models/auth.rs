use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Claims embedded in the session access token
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user UUID
    pub exp: usize,
    pub iat: usize,
}

/// Identity hint for the current request. Never rejects: a missing or
/// invalid token is simply anonymous.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Session {
    Anonymous,
    User(Uuid),
}

impl Session {
    pub fn user_id(&self) -> Option<Uuid> {
        match self {
            Session::Anonymous => None,
            Session::User(id) => Some(*id),
        }
    }
}
