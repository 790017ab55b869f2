use crate::shared::operation_error::OperationError;
use contracts::domain::a002_warehouse_transfer::aggregate::WarehouseTransfer;
use leptos::prelude::*;

#[derive(Clone, Debug, Default)]
pub struct TransferListState {
    pub transfers: Vec<WarehouseTransfer>,
    pub loading: bool,
    // load flag
    pub is_loaded: bool,
    pub error: Option<String>,
}

impl TransferListState {
    pub fn begin_loading(&mut self) {
        self.loading = true;
        self.error = None;
    }

    /// Коллекция заменяется целиком, локальных патчей статуса нет
    pub fn apply_collection(&mut self, transfers: Vec<WarehouseTransfer>) {
        self.transfers = transfers;
        self.loading = false;
        self.is_loaded = true;
        self.error = None;
    }

    /// Ошибка загрузки не стирает уже показанные данные
    pub fn apply_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Ответ загрузки или действия; `current` - билет запроса ещё последний.
    ///
    /// Устаревший ответ ничего не меняет: флаг загрузки снимет запрос, который
    /// его вытеснил. Последний ответ снимает флаг всегда, даже когда
    /// действие не удалось и коллекция не перезагружалась (`None`).
    /// Возвращает, был ли ответ применён.
    pub fn settle(
        &mut self,
        current: bool,
        reloaded: Option<Result<Vec<WarehouseTransfer>, OperationError>>,
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

    /// Сброс при смене склада
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn find(&self, transfer_id: &str) -> Option<&WarehouseTransfer> {
        self.transfers
            .iter()
            .find(|t| t.to_string_id() == transfer_id)
    }
}

pub fn create_state() -> RwSignal<TransferListState> {
    RwSignal::new(TransferListState::default())
}
