use contracts::domain::a003_export_request::aggregate::ExportRequest;
use crate::shared::operation_error::OperationError;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct ExportRequestListState {
    pub requests: Vec<ExportRequest>,
    pub loading: bool,
    pub is_loaded: bool,
    pub error: Option<String>,
}

impl ExportRequestListState {
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    pub fn apply_collection(&mut self, requests: Vec<ExportRequest>) {
        self.requests = requests;
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
        reloaded: Option<Result<Vec<ExportRequest>, OperationError>>,
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
}

pub fn create_state() -> RwSignal<ExportRequestListState> {
    RwSignal::new(ExportRequestListState::default())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::request_guard::RequestGeneration;

    #[test]
    fn test_failed_action_after_superseded_load_clears_loading() {
        let generation = RequestGeneration::new();
        let mut state = ExportRequestListState::default();

        let load = generation.begin();
        state.begin_loading();
        let approve = generation.begin();

        assert!(!state.settle(generation.is_current(load), Some(Ok(Vec::new()))));
        assert!(state.loading);
        assert!(!state.is_loaded);

        assert!(state.settle(generation.is_current(approve), None));
        assert!(!state.loading);
    }
}
