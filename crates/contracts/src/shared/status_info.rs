//! Отображение статуса в бейдж (подпись, цвета, иконка).
//!
//! Единственная таблица стилей для всех экранов: списки исходящих и входящих
//! перемещений, карточка, диалог планирования, заявки и расходные документы.
//! Экраны не держат собственных копий таблицы.
//!
//! Функции тотальны: любая строка даёт дескриптор с непустой подписью.
//! Неизвестное значение показывается нейтральным бейджем с исходным текстом.

use crate::domain::a002_warehouse_transfer::status::TransferStatus;
use crate::domain::a003_export_request::status::ExportRequestStatus;
use serde::Serialize;

/// Категория оформления бейджа
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusCategory {
    Completed,
    Pending,
    Approved,
    Planned,
    Cancelled,
    Requested,
    Processing,
    /// Нейтральный вариант для значений вне словаря
    Info,
}

impl StatusCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Completed => "completed",
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Planned => "planned",
            Self::Cancelled => "cancelled",
            Self::Requested => "requested",
            Self::Processing => "processing",
            Self::Info => "info",
        }
    }

    // (color, background, hover, icon)
    fn palette(&self) -> (&'static str, &'static str, &'static str, &'static str) {
        match self {
            Self::Completed => ("#15803d", "#dcfce7", "#bbf7d0", "check-circle"),
            Self::Pending => ("#b45309", "#fef3c7", "#fde68a", "clock"),
            Self::Approved => ("#1d4ed8", "#dbeafe", "#bfdbfe", "check"),
            Self::Planned => ("#6d28d9", "#ede9fe", "#ddd6fe", "calendar"),
            Self::Cancelled => ("#b91c1c", "#fee2e2", "#fecaca", "x-circle"),
            Self::Requested => ("#0e7490", "#cffafe", "#a5f3fc", "send"),
            Self::Processing => ("#c2410c", "#ffedd5", "#fed7aa", "loader"),
            Self::Info => ("#475569", "#f1f5f9", "#e2e8f0", "info"),
        }
    }

    fn label(&self) -> Option<&'static str> {
        match self {
            Self::Completed => Some("Hoàn thành"),
            Self::Pending => Some("Chờ xử lý"),
            Self::Approved => Some("Đã duyệt"),
            Self::Planned => Some("Đã lên kế hoạch"),
            Self::Cancelled => Some("Đã hủy"),
            Self::Requested => Some("Đã yêu cầu"),
            Self::Processing => Some("Đang xử lý"),
            Self::Info => None,
        }
    }
}

/// Дескриптор бейджа статуса. Вычисляется, не хранится.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusInfo {
    pub category: StatusCategory,
    pub color: &'static str,
    pub background_color: &'static str,
    pub hover_color: &'static str,
    pub label: String,
    pub icon: &'static str,
}

impl StatusInfo {
    fn build(category: StatusCategory, raw: &str) -> Self {
        let (color, background_color, hover_color, icon) = category.palette();
        let label = match category.label() {
            Some(label) => label.to_string(),
            None => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    "—".to_string()
                } else {
                    trimmed.to_string()
                }
            }
        };
        Self {
            category,
            color,
            background_color,
            hover_color,
            label,
            icon,
        }
    }

    /// CSS-класс бейджа: `status-badge status-badge--{category}`
    pub fn badge_class(&self) -> String {
        format!("status-badge status-badge--{}", self.category.as_str())
    }

    /// Inline-стиль для мест, где CSS-классы недоступны
    pub fn inline_style(&self) -> String {
        format!(
            "color: {}; background-color: {}; --status-hover: {};",
            self.color, self.background_color, self.hover_color
        )
    }

    pub fn is_fallback(&self) -> bool {
        self.category == StatusCategory::Info
    }
}

/// Статусы перемещений и документов (pending/planned/approved/completed/cancelled)
pub fn resolve_status(status: &str) -> StatusInfo {
    let category = match TransferStatus::parse(status) {
        Some(TransferStatus::Completed) => StatusCategory::Completed,
        Some(TransferStatus::Pending) => StatusCategory::Pending,
        Some(TransferStatus::Approved) => StatusCategory::Approved,
        Some(TransferStatus::Planned) => StatusCategory::Planned,
        Some(TransferStatus::Cancelled) => StatusCategory::Cancelled,
        None => StatusCategory::Info,
    };
    StatusInfo::build(category, status)
}

/// Статусы заявок на отгрузку (requested/processing/approved/cancelled)
pub fn resolve_export_request_status(status: &str) -> StatusInfo {
    let category = match ExportRequestStatus::parse(status) {
        Some(ExportRequestStatus::Requested) => StatusCategory::Requested,
        Some(ExportRequestStatus::Processing) => StatusCategory::Processing,
        Some(ExportRequestStatus::Approved) => StatusCategory::Approved,
        Some(ExportRequestStatus::Cancelled) => StatusCategory::Cancelled,
        None => StatusCategory::Info,
    };
    StatusInfo::build(category, status)
}
