//! Состояние модального диалога с отправкой на сервер.

use super::operation_error::OperationError;

/// Состояние диалога с действием (карточка, планирование, утверждение строки)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialogState {
    pub open: bool,
    pub submitting: bool,
    pub error: Option<String>,
}

impl DialogState {
    pub fn opened() -> Self {
        Self {
            open: true,
            ..Self::default()
        }
    }

    pub fn close(&mut self) {
        *self = Self::default();
    }

    /// `false`, если запрос уже в полёте (повторный клик)
    pub fn begin_submit(&mut self) -> bool {
        if self.submitting {
            return false;
        }
        self.submitting = true;
        self.error = None;
        true
    }

    /// Успех закрывает диалог, ошибка оставляет его открытым для повтора
    pub fn finish(&mut self, result: &Result<(), OperationError>) {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.open = false;
                self.error = None;
            }
            Err(e) => self.error = Some(e.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_double_submit_is_ignored() {
        let mut dialog = DialogState::opened();
        assert!(dialog.begin_submit());
        assert!(!dialog.begin_submit());
        dialog.close();
        assert_eq!(dialog, DialogState::default());
    }

    #[test]
    fn test_failure_keeps_dialog_open() {
        let mut dialog = DialogState::opened();
        dialog.begin_submit();
        dialog.finish(&Err(OperationError::Transport("timeout".into())));
        assert!(dialog.open);
        assert!(!dialog.submitting);
        assert!(dialog.error.is_some());

        dialog.begin_submit();
        assert_eq!(dialog.error, None);
        dialog.finish(&Ok(()));
        assert!(!dialog.open);
    }
}
