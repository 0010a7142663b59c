#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use serde_derive::Deserialize;
use serde_derive::Serialize;

use super::decode_claims;

/// Client side authentication state. Both flags are derived from the token, so
/// the only way to build one is through [`Session::from_token`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    token: Option<String>,
    is_authenticated: bool,
    is_guest: bool,
}

impl Session {
    pub fn from_token(token: Option<String>) -> Session {
        let token = match token {
            Some(token) if !token.is_empty() => token,
            _ => return Session::default(),
        };

        match decode_claims(&token) {
            Ok(claims) => {
                tracing::debug!(
                    user_id = ?claims.user_id(),
                    is_guest = claims.is_guest(),
                    "Decoded session token"
                );
                return Session {
                    is_guest: claims.is_guest(),
                    is_authenticated: true,
                    token: Some(token),
                };
            }
            Err(err) => {
                tracing::warn!(error = %err, "Failed to decode token, discarding it");
                return Session::default();
            }
        }
    }

    pub fn token(&self) -> Option<&str> {
        return self.token.as_deref();
    }

    pub fn is_authenticated(&self) -> bool {
        return self.is_authenticated;
    }

    pub fn is_guest(&self) -> bool {
        return self.is_guest;
    }
}

/// On-disk envelope for the session, shaped like a persisted browser store
/// entry so both clients can share the same file format.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersistedSession {
    pub state: Session,
    #[serde(default)]
    pub version: u32,
}
