use contracts::system::auth::{LoginResponse, UserInfo};
use leptos::prelude::*;
use leptos::task::spawn_local;

use super::{api, storage};
use crate::shared::api_client::ApiClient;
use crate::shared::api_utils::api_base;

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AuthState {
    pub access_token: Option<String>,
    pub user_info: Option<UserInfo>,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Клиент API текущей сессии
#[derive(Clone, Copy)]
pub struct ApiClientContext(pub Signal<ApiClient>);

/// Auth context provider component.
///
/// Токен читается из localStorage один раз при старте. Дальше страницы и
/// операции получают [`ApiClient`] из контекста.
#[component]
pub fn AuthProvider(children: ChildrenFn) -> impl IntoView {
    let restored = storage::get_access_token();
    let (auth_state, set_auth_state) = signal(AuthState {
        access_token: restored.clone(),
        user_info: None,
    });

    if let Some(token) = restored {
        spawn_local(async move {
            let client = ApiClient::new(api_base(), Some(token));
            match api::get_current_user(&client).await {
                Ok(user_info) => set_auth_state.update(|s| s.user_info = Some(user_info)),
                Err(e) => {
                    log::warn!("stored session rejected: {}", e);
                    storage::clear_tokens();
                    set_auth_state.set(AuthState::default());
                }
            }
        });
    }

    let client = Signal::derive(move || {
        ApiClient::new(api_base(), auth_state.with(|s| s.access_token.clone()))
    });

    provide_context(auth_state);
    provide_context(set_auth_state);
    provide_context(ApiClientContext(client));

    children()
}

/// Hook to access auth state
pub fn use_auth() -> (ReadSignal<AuthState>, WriteSignal<AuthState>) {
    let auth_state =
        use_context::<ReadSignal<AuthState>>().expect("AuthProvider not found in component tree");
    let set_auth_state =
        use_context::<WriteSignal<AuthState>>().expect("AuthProvider not found in component tree");

    (auth_state, set_auth_state)
}

pub fn use_api_client() -> Signal<ApiClient> {
    use_context::<ApiClientContext>()
        .expect("AuthProvider not found in component tree")
        .0
}

/// Запомнить сессию после успешного входа
pub fn complete_login(set_auth_state: WriteSignal<AuthState>, response: LoginResponse) {
    storage::save_access_token(&response.access_token);
    set_auth_state.set(AuthState {
        access_token: Some(response.access_token),
        user_info: Some(response.user),
    });
}

pub fn do_logout(set_auth_state: WriteSignal<AuthState>) {
    storage::clear_tokens();
    set_auth_state.set(AuthState::default());
}
