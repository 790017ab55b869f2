use contracts::domain::a004_export_receipt::aggregate::ExportReceipt;
use crate::shared::operation_error::OperationError;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct ExportReceiptListState {
    pub receipts: Vec<ExportReceipt>,
    pub loading: bool,
    pub is_loaded: bool,
    pub error: Option<String>,
}

impl ExportReceiptListState {
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn apply_collection(&mut self, receipts: Vec<ExportReceipt>) {
        self.receipts = receipts;
        self.loading = false;
        self.is_loaded = true;
        self.error = None;
    }

    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Устаревший ответ отбрасывается; последний всегда снимает флаг загрузки
    pub fn settle(
        &mut self,
        current: bool,
        reloaded: Option<Result<Vec<ExportReceipt>, OperationError>>,
    ) -> bool {
        if !current {
            return false;
        }
        match reloaded {
            Some(Ok(items)) => self.apply_collection(items),
            Some(Err(e)) => self.apply_error(e.to_string()),
            None => self.loading = false,
        }
        true
    }

    pub fn find(&self, receipt_id: &str) -> Option<&ExportReceipt> {
        self.receipts
            .iter()
            .find(|r| r.to_string_id() == receipt_id)
    }
}

pub fn create_state() -> RwSignal<ExportReceiptListState> {
    RwSignal::new(ExportReceiptListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::request_guard::RequestGeneration;

    #[test]
    fn test_stale_reload_does_not_overwrite_newer_one() {
        let generation = RequestGeneration::new();
        let mut state = ExportReceiptListState::default();

        let first = generation.begin();
        state.begin_loading();
        let second = generation.begin();

        assert!(state.settle(
            generation.is_current(second),
            Some(Err(OperationError::Transport("timeout".into())))
        ));
        assert!(!state.settle(generation.is_current(first), Some(Ok(Vec::new()))));
        assert!(!state.is_loaded);
        assert!(state.error.is_some());
        assert!(!state.loading);
    }
}
