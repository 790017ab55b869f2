use anyhow::Result;
use chrono::Utc;
use contracts::system::users::{CreateUserDto, User};

use super::repository;
use crate::system::auth::password;

/// Create a new user
pub async fn create(dto: CreateUserDto) -> Result<String> {
    dto.validate().map_err(|e| anyhow::anyhow!(e))?;

    if repository::get_by_username(&dto.username).await?.is_some() {
        anyhow::bail!("Username already exists");
    }

    password::validate_password_strength(&dto.password)?;
    let password_hash = password::hash_password(&dto.password)?;

    let now = Utc::now().to_rfc3339();
    let user = User {
        id: uuid::Uuid::new_v4().to_string(),
        username: dto.username,
        full_name: dto.full_name,
        is_active: true,
        is_admin: dto.is_admin,
        created_at: now.clone(),
        updated_at: now,
        last_login_at: None,
    };

    repository::create_with_password(&user, &password_hash).await?;
    Ok(user.id)
}

pub async fn get_by_id(id: &str) -> Result<Option<User>> {
    repository::get_by_id(id).await
}

/// Проверка логина и пароля; `None` при неверной паре или отключённом пользователе
pub async fn verify_credentials(username: &str, password: &str) -> Result<Option<User>> {
    let Some(user) = repository::get_by_username(username).await? else {
        return Ok(None);
    };
    if !user.is_active {
        tracing::warn!("login attempt for inactive user '{}'", username);
        return Ok(None);
    }
    let Some(hash) = repository::get_password_hash(&user.id).await? else {
        return Ok(None);
    };
    if !password::verify_password(password, &hash)? {
        return Ok(None);
    }
    repository::update_last_login(&user.id).await?;
    Ok(Some(user))
}
