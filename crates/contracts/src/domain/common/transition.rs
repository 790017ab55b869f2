use thiserror::Error;

/// Отказ в переходе статуса документа
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("action '{action}' is not allowed in status '{from}'")]
pub struct TransitionError {
    /// Статус, в котором находится документ (как пришёл из хранилища)
    pub from: String,
    /// Действие, которое пытались выполнить ("plan", "approve", ...)
    pub action: &'static str,
}

impl TransitionError {
    pub fn new(from: impl Into<String>, action: &'static str) -> Self {
        Self {
            from: from.into(),
            action,
        }
    }
}
