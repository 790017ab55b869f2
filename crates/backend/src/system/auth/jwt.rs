use anyhow::{Context, Result};
use chrono::Utc;
use contracts::system::auth::TokenClaims;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use once_cell::sync::OnceCell;
use rand::Rng;

const DEFAULT_TOKEN_LIFETIME_HOURS: i64 = 24;

static TOKEN_LIFETIME_HOURS: OnceCell<i64> = OnceCell::new();

/// Срок жизни access-токена из `[auth]`; вызывается один раз при старте
pub fn configure(access_token_hours: i64) {
    let _ = TOKEN_LIFETIME_HOURS.set(access_token_hours);
}

fn token_lifetime_hours() -> i64 {
    TOKEN_LIFETIME_HOURS
        .get()
        .copied()
        .unwrap_or(DEFAULT_TOKEN_LIFETIME_HOURS)
}

pub fn build_claims(user_id: &str, username: &str, is_admin: bool, lifetime_hours: i64) -> TokenClaims {
    let now = Utc::now();
    TokenClaims {
        sub: user_id.to_string(),
        username: username.to_string(),
        is_admin,
        exp: (now + chrono::Duration::hours(lifetime_hours)).timestamp() as usize,
        iat: now.timestamp() as usize,
    }
}

pub fn encode_claims(claims: &TokenClaims, secret: &str) -> Result<String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .context("Failed to encode JWT token")
}

pub fn decode_claims(token: &str, secret: &str) -> Result<TokenClaims> {
    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .context("Failed to decode JWT token")?;
    Ok(data.claims)
}

/// Access-токен для пользователя
pub async fn generate_access_token(user_id: &str, username: &str, is_admin: bool) -> Result<String> {
    let claims = build_claims(user_id, username, is_admin, token_lifetime_hours());
    let secret = get_jwt_secret().await?;
    encode_claims(&claims, &secret)
}

pub async fn validate_token(token: &str) -> Result<TokenClaims> {
    let secret = get_jwt_secret().await?;
    decode_claims(token, &secret)
}

/// Секрет из sys_settings; при первом запуске генерируется и сохраняется
pub async fn get_jwt_secret() -> Result<String> {
    if let Some(secret) = get_jwt_secret_from_db().await? {
        return Ok(secret);
    }
    let secret = generate_jwt_secret();
    save_jwt_secret_to_db(&secret).await?;
    tracing::info!("JWT secret generated");
    Ok(secret)
}

/// 256 бит случайных данных в base64
fn generate_jwt_secret() -> String {
    use base64::{engine::general_purpose, Engine as _};
    let mut rng = rand::thread_rng();
    let random_bytes: [u8; 32] = rng.gen();
    general_purpose::STANDARD.encode(random_bytes)
}

async fn get_jwt_secret_from_db() -> Result<Option<String>> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let row = get_connection()
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT value FROM sys_settings WHERE key = ?",
            ["jwt_secret".into()],
        ))
        .await?;

    match row {
        Some(row) => Ok(Some(row.try_get("", "value")?)),
        None => Ok(None),
    }
}

async fn save_jwt_secret_to_db(secret: &str) -> Result<()> {
    use crate::shared::data::db::get_connection;
    use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};

    let now = Utc::now().to_rfc3339();
    get_connection()
        .execute(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "INSERT OR IGNORE INTO sys_settings (key, value, description, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            [
                "jwt_secret".into(),
                secret.to_string().into(),
                "Auto-generated JWT secret".into(),
                now.clone().into(),
                now.into(),
            ],
        ))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_decode_roundtrip() {
        let claims = build_claims("u-1", "thukho", false, 2);
        let token = encode_claims(&claims, "secret").unwrap();
        let decoded = decode_claims(&token, "secret").unwrap();
        assert_eq!(decoded.sub, "u-1");
        assert_eq!(decoded.username, "thukho");
        assert!(!decoded.is_admin);
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let token = encode_claims(&build_claims("u-1", "a", true, 1), "one").unwrap();
        assert!(decode_claims(&token, "two").is_err());
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let claims = build_claims("u-1", "a", true, -2);
        let token = encode_claims(&claims, "s").unwrap();
        assert!(decode_claims(&token, "s").is_err());
    }

    #[test]
    fn test_generated_secret_length() {
        use base64::{engine::general_purpose, Engine as _};
        let secret = generate_jwt_secret();
        assert_eq!(general_purpose::STANDARD.decode(secret).unwrap().len(), 32);
    }
}
