use web_sys::{window, Storage};

const ACCESS_TOKEN_KEY: &str = "whc.access_token";
const WAREHOUSE_KEY: &str = "whc.warehouse_id";

fn local_storage() -> Option<Storage> {
    window()?.local_storage().ok()?
}

fn read(key: &str) -> Option<String> {
    local_storage()?.get_item(key).ok()?
}

fn write(key: &str, value: &str) {
    if let Some(storage) = local_storage() {
        if storage.set_item(key, value).is_err() {
            log::warn!("localStorage: cannot write {}", key);
        }
    }
}

fn remove(key: &str) {
    if let Some(storage) = local_storage() {
        let _ = storage.remove_item(key);
    }
}

pub fn save_access_token(token: &str) {
    write(ACCESS_TOKEN_KEY, token);
}

pub fn get_access_token() -> Option<String> {
    read(ACCESS_TOKEN_KEY).filter(|t| !t.is_empty())
}

/// Выход: токен удаляется, выбранный склад остаётся за браузером
pub fn clear_tokens() {
    remove(ACCESS_TOKEN_KEY);
}

/// Последний выбранный склад, если URL его не задаёт
pub fn get_last_warehouse() -> Option<i64> {
    read(WAREHOUSE_KEY).as_deref().and_then(parse_warehouse)
}

pub fn save_last_warehouse(warehouse_id: Option<i64>) {
    match warehouse_id {
        Some(id) => write(WAREHOUSE_KEY, &id.to_string()),
        None => remove(WAREHOUSE_KEY),
    }
}

fn parse_warehouse(raw: &str) -> Option<i64> {
    raw.trim().parse::<i64>().ok().filter(|id| *id > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_warehouse() {
        assert_eq!(parse_warehouse("12"), Some(12));
        assert_eq!(parse_warehouse(" 3 "), Some(3));
        assert_eq!(parse_warehouse("0"), None);
        assert_eq!(parse_warehouse("kho"), None);
    }
}
