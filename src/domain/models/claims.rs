#[cfg(test)]
#[path = "claims_test.rs"]
mod tests;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("token does not contain a payload segment")]
    Malformed,
    #[error("token payload is not valid base64url: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("token payload is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Decoded JWT payload. Only the guest flag is read, so any JSON value is
/// accepted and fields of unexpected shape are simply ignored.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TokenClaims {
    payload: Value,
}

impl TokenClaims {
    pub fn is_guest(&self) -> bool {
        return self.payload.pointer("/user/isGuest") == Some(&Value::Bool(true));
    }

    pub fn user_id(&self) -> Option<String> {
        match self.payload.pointer("/user/id")? {
            Value::String(id) => return Some(id.to_string()),
            Value::Number(id) => return Some(id.to_string()),
            _ => return None,
        }
    }
}

/// Reads the claims out of a JWT payload without verifying the signature.
/// The backend is the only party that trusts these claims, the client just
/// uses them to tell guest sessions apart.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let payload = match token.split('.').nth(1) {
        Some(segment) if !segment.is_empty() => segment,
        _ => return Err(TokenError::Malformed),
    };

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('='))?;
    let payload: Value = serde_json::from_slice(&bytes)?;

    return Ok(TokenClaims { payload });
}
