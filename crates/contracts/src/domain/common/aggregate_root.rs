use super::EntityMetadata;

/// Общее для документов склада: идентификатор, код для сообщений
/// оператору и служебные поля
pub trait AggregateRoot {
    type Id;

    fn id(&self) -> Self::Id;

    /// Код документа, который видит оператор ("TR-2025-001")
    fn code(&self) -> &str;

    fn metadata(&self) -> &EntityMetadata;

    fn metadata_mut(&mut self) -> &mut EntityMetadata;

    /// Вызывается каждым переходом статуса перед сохранением
    fn before_write(&mut self) {
        self.metadata_mut().record_change();
    }
}
