//! Адрес бэкенда.
//!
//! API всегда слушает порт 3000 на том же хосте, с которого открыта консоль.

pub const API_PORT: u16 = 3000;

/// Базовый URL API из `window.location`; пустая строка вне браузера
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    base_for(&protocol, &hostname)
}

pub fn base_for(protocol: &str, hostname: &str) -> String {
    let protocol = if protocol.is_empty() { "http:" } else { protocol };
    let hostname = if hostname.is_empty() { "127.0.0.1" } else { hostname };
    format!("{}//{}:{}", protocol, hostname, API_PORT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_for() {
        assert_eq!(base_for("https:", "kho.local"), "https://kho.local:3000");
        assert_eq!(base_for("", ""), "http://127.0.0.1:3000");
    }
}
