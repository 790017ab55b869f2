use serde::{Deserialize, Serialize};

/// Статус перемещения между складами.
///
/// На проводе статус остаётся строкой: сервер может прислать значение вне
/// словаря, поэтому разбор через [`TransferStatus::parse`] возвращает `Option`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferStatus {
    Pending,
    Planned,
    Approved,
    Completed,
    Cancelled,
}

impl TransferStatus {
    pub const ALL: [TransferStatus; 5] = [
        TransferStatus::Pending,
        TransferStatus::Planned,
        TransferStatus::Approved,
        TransferStatus::Completed,
        TransferStatus::Cancelled,
    ];

    /// Регистронезависимый разбор строки статуса
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "planned" => Some(Self::Planned),
            "approved" => Some(Self::Approved),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Каноническое значение для хранения и передачи
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Planned => "planned",
            Self::Approved => "approved",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Порядок в основной цепочке pending → planned → approved → completed.
    /// `Cancelled` вне цепочки.
    pub fn rank(&self) -> Option<u8> {
        match self {
            Self::Pending => Some(0),
            Self::Planned => Some(1),
            Self::Approved => Some(2),
            Self::Completed => Some(3),
            Self::Cancelled => None,
        }
    }
}

impl std::fmt::Display for TransferStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Направление перемещения относительно выбранного склада
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransferDirection {
    /// Склад является отправителем
    Outgoing,
    /// Склад является получателем
    Incoming,
}

impl TransferDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Outgoing => "outgoing",
            Self::Incoming => "incoming",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "outgoing" => Some(Self::Outgoing),
            "incoming" => Some(Self::Incoming),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(TransferStatus::parse("PENDING"), Some(TransferStatus::Pending));
        assert_eq!(TransferStatus::parse(" Planned "), Some(TransferStatus::Planned));
        assert_eq!(TransferStatus::parse("Canceled"), Some(TransferStatus::Cancelled));
        assert_eq!(TransferStatus::parse("in-transit"), None);
        assert_eq!(TransferStatus::parse(""), None);
    }

    #[test]
    fn test_as_str_roundtrip() {
        for status in TransferStatus::ALL {
            assert_eq!(TransferStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn test_rank_is_monotonic() {
        assert!(TransferStatus::Pending.rank() < TransferStatus::Planned.rank());
        assert!(TransferStatus::Planned.rank() < TransferStatus::Approved.rank());
        assert!(TransferStatus::Approved.rank() < TransferStatus::Completed.rank());
        assert_eq!(TransferStatus::Cancelled.rank(), None);
    }

    #[test]
    fn test_direction_parse() {
        assert_eq!(TransferDirection::parse("Incoming"), Some(TransferDirection::Incoming));
        assert_eq!(TransferDirection::parse("sideways"), None);
    }
}
