//! Правила доступности действий и переходы статусов перемещения.
//!
//! Одни и те же предикаты используются frontend для показа кнопок и backend
//! для проверки запроса, поэтому кнопка появляется только для действия,
//! которое сервер примет.
//!
//! Все функции принимают сырую строку статуса и определены для любой строки.

use super::status::{TransferDirection, TransferStatus};
use crate::domain::common::TransitionError;

/// Просмотр карточки доступен всегда
pub fn can_view(_status: &str) -> bool {
    true
}

/// Планирование (назначение склада-исполнителя).
/// Запрещено только в конечных статусах; неизвестный статус планировать можно.
pub fn can_plan(status: &str) -> bool {
    !matches!(
        TransferStatus::parse(status),
        Some(TransferStatus::Completed | TransferStatus::Cancelled)
    )
}

/// Утверждение перемещения (только полное, без количества)
pub fn can_approve(status: &str) -> bool {
    !matches!(
        TransferStatus::parse(status),
        Some(TransferStatus::Approved | TransferStatus::Completed | TransferStatus::Cancelled)
    )
}

/// Отмена возможна только до утверждения
pub fn can_cancel(status: &str) -> bool {
    matches!(
        TransferStatus::parse(status),
        Some(TransferStatus::Pending | TransferStatus::Planned)
    )
}

/// Завершение возможно только после утверждения
pub fn can_complete(status: &str) -> bool {
    matches!(TransferStatus::parse(status), Some(TransferStatus::Approved))
}

/// Набор флагов для отрисовки кнопок одной строкой
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransferActions {
    pub view: bool,
    pub plan: bool,
    pub approve: bool,
    pub cancel: bool,
    pub complete: bool,
}

impl TransferActions {
    pub fn for_status(status: &str) -> Self {
        Self {
            view: can_view(status),
            plan: can_plan(status),
            approve: can_approve(status),
            cancel: can_cancel(status),
            complete: can_complete(status),
        }
    }

    /// Флаги для страницы одного направления: утверждает склад-получатель,
    /// поэтому в исходящих кнопки утверждения нет
    pub fn for_view(status: &str, direction: TransferDirection) -> Self {
        let mut actions = Self::for_status(status);
        if direction == TransferDirection::Outgoing {
            actions.approve = false;
        }
        actions
    }
}

// ============================================================================
// Переходы (применяются на сервере)
// ============================================================================

/// Статус после планирования.
///
/// pending и неизвестные значения переходят в planned; planned и approved
/// сохраняют статус (меняется только склад-исполнитель), назад статус не идёт.
pub fn plan_target(current: &str) -> Result<TransferStatus, TransitionError> {
    if !can_plan(current) {
        return Err(TransitionError::new(current, "plan"));
    }
    Ok(match TransferStatus::parse(current) {
        Some(TransferStatus::Approved) => TransferStatus::Approved,
        _ => TransferStatus::Planned,
    })
}

pub fn approve_target(current: &str) -> Result<TransferStatus, TransitionError> {
    if !can_approve(current) {
        return Err(TransitionError::new(current, "approve"));
    }
    Ok(TransferStatus::Approved)
}

pub fn cancel_target(current: &str) -> Result<TransferStatus, TransitionError> {
    if !can_cancel(current) {
        return Err(TransitionError::new(current, "cancel"));
    }
    Ok(TransferStatus::Cancelled)
}

pub fn complete_target(current: &str) -> Result<TransferStatus, TransitionError> {
    if !can_complete(current) {
        return Err(TransitionError::new(current, "complete"));
    }
    Ok(TransferStatus::Completed)
}
