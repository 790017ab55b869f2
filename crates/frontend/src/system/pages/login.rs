use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::shared::api_client::ApiClient;
use crate::shared::api_utils::api_base;
use crate::system::auth::api;
use crate::shared::notifications::use_notifications;
use crate::system::auth::context::{complete_login, use_auth};

#[component]
pub fn LoginPage() -> impl IntoView {
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (error_message, set_error_message) = signal(Option::<String>::None);
    let (is_loading, set_is_loading) = signal(false);

    let (_, set_auth_state) = use_auth();
    let notifications = use_notifications();

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();

        let username_val = username.get();
        let password_val = password.get();

        set_is_loading.set(true);
        set_error_message.set(None);

        spawn_local(async move {
            let client = ApiClient::anonymous(api_base());
            match api::login(&client, username_val, password_val).await {
                Ok(response) => {
                    set_is_loading.set(false);
                    notifications.success(format!("Xin chào, {}", response.user.display_name()));
                    // переключает AppRoutes на основной layout
                    complete_login(set_auth_state, response);
                }
                Err(e) => {
                    set_error_message.set(Some(format!("Đăng nhập thất bại: {}", e)));
                    set_is_loading.set(false);
                }
            }
        });
    };

    view! {
        <div class="login-container">
            <div class="login-box">
                <h1>"Quản lý kho"</h1>
                <h2>"Đăng nhập"</h2>

                <Show when=move || error_message.get().is_some()>
                    <div class="error-message">
                        {move || error_message.get().unwrap_or_default()}
                    </div>
                </Show>

                <form on:submit=on_submit>
                    <div class="form-group">
                        <label for="username">"Tên đăng nhập"</label>
                        <input
                            type="text"
                            id="username"
                            placeholder="admin"
                            value=move || username.get()
                            on:input=move |ev| set_username.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <div class="form-group">
                        <label for="password">"Mật khẩu"</label>
                        <input
                            type="password"
                            id="password"
                            placeholder="admin"
                            value=move || password.get()
                            on:input=move |ev| set_password.set(event_target_value(&ev))
                            required
                            disabled=move || is_loading.get()
                        />
                    </div>

                    <button
                        type="submit"
                        class="btn-primary"
                        disabled=move || is_loading.get()
                    >
                        {move || if is_loading.get() { "Đang đăng nhập..." } else { "Đăng nhập" }}
                    </button>
                </form>

                <div class="login-info">
                    <p>"Mặc định: " <strong>"admin"</strong> " / " <strong>"admin"</strong></p>
                </div>
            </div>
        </div>
    }
}
