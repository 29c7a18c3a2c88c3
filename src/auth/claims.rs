use serde::{Deserialize, Serialize};

/// JWT payload of an access token. Identity only, no scopes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub iss: String, // issuer
    pub sub: String, // user ID, parsed on validation
    pub iat: i64,    // issued at (unix timestamp)
    pub exp: i64,    // expires at (unix timestamp)
}
