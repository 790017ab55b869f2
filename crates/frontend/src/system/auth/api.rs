use contracts::system::auth::{LoginRequest, LoginResponse, UserInfo};

use crate::shared::api_client::ApiClient;

/// Login with username and password
pub async fn login(
    client: &ApiClient,
    username: String,
    password: String,
) -> Result<LoginResponse, String> {
    let request = LoginRequest { username, password };
    client
        .post_json::<_, LoginResponse>("/api/system/auth/login", &request)
        .await
        .map_err(|e| match e.status() {
            Some(401) => "Sai tên đăng nhập hoặc mật khẩu".to_string(),
            _ => e.to_string(),
        })
}

/// Пользователь, которому принадлежит токен клиента
pub async fn get_current_user(client: &ApiClient) -> Result<UserInfo, String> {
    client
        .get_json::<UserInfo>("/api/system/auth/me")
        .await
        .map_err(|e| e.to_string())
}
