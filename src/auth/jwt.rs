use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::error::{CryptError, CryptResult};

/// Claims carried by the `SID` cookie. Identity itself is issued elsewhere;
/// this service only reads it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub exp: i64,
    #[serde(default)]
    pub loyalty_points: u32,
}

impl UserClaims {
    pub fn new(user_id: Uuid, loyalty_points: u32, valid_for: Duration) -> Self {
        Self {
            sub: user_id.to_string(),
            exp: (Utc::now() + valid_for).timestamp(),
            loyalty_points,
        }
    }

    pub fn user_id(&self) -> CryptResult<Uuid> {
        Uuid::parse_str(&self.sub).map_err(|_| CryptError::InvalidSubject)
    }
}

pub fn generate_token<K: AsRef<[u8]>>(claims: &UserClaims, key: K) -> CryptResult<String> {
    let header = Header::default();
    let key = EncodingKey::from_secret(key.as_ref());

    Ok(jsonwebtoken::encode(&header, claims, &key)?)
}

pub fn process_token<K: AsRef<[u8]>>(token: &str, key: K) -> CryptResult<TokenData<UserClaims>> {
    let validation = Validation::default();
    let key = DecodingKey::from_secret(key.as_ref());

    Ok(jsonwebtoken::decode::<UserClaims>(token, &key, &validation)?)
}
