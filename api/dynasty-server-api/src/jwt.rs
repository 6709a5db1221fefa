use std::sync::LazyLock;

use dynasty_server_app::{ServiceError, domain::AccountId};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use log::info;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const TOKEN_LIFETIME_DAYS: i64 = 7;

#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
}

struct Keys {
    encoding: EncodingKey,
    decoding: DecodingKey,
}

impl Keys {
    fn new(secret: &[u8]) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
        }
    }
}

static KEYS: LazyLock<Keys> = LazyLock::new(|| {
    let secret = read_or_generate_secret();
    Keys::new(&secret)
});

fn read_or_generate_secret() -> Vec<u8> {
    if let Ok(secret) = std::env::var("DYNASTY_JWT_SECRET") {
        secret.as_bytes().to_vec()
    } else {
        info!("JWT secret not found, generating a random one...");
        Uuid::new_v4().as_bytes().to_vec()
    }
}

pub fn generate_jwt(account_id: AccountId) -> Result<String, ServiceError> {
    let claims = Claims {
        sub: account_id.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(TOKEN_LIFETIME_DAYS)).timestamp()
            as usize,
    };
    encode(&Header::default(), &claims, &KEYS.encoding).map_err(|e| {
        log::error!("Failed to sign token for {}: {}", account_id, e);
        ServiceError::Internal("Failed to issue token".to_string())
    })
}

pub fn validate_jwt(token: &str) -> Option<AccountId> {
    match decode::<Claims>(token, &KEYS.decoding, &Validation::default()) {
        Ok(data) => {
            let uuid = Uuid::parse_str(&data.claims.sub).ok()?;
            Some(AccountId(uuid))
        }
        Err(e) => {
            log::debug!("Rejected token: {}", e);
            None
        }
    }
}
