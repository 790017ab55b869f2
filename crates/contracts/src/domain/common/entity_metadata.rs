use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Служебные поля документа.
///
/// `version` растёт на каждой смене статуса; сервер сверяет её при записи,
/// чтобы два оператора не применили переход к одной и той же версии.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityMetadata {
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub version: i32,
}

impl EntityMetadata {
    pub fn new() -> Self {
        let now = Utc::now();
        Self {
            created_at: now,
            updated_at: now,
            version: 0,
        }
    }

    /// Зафиксировать изменение; возвращает версию, на которой оно сделано
    pub fn record_change(&mut self) -> i32 {
        let previous = self.version;
        self.updated_at = Utc::now();
        self.version = previous + 1;
        previous
    }
}

impl Default for EntityMetadata {
    fn default() -> Self {
        Self::new()
    }
}
