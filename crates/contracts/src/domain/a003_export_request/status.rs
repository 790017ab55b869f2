use serde::{Deserialize, Serialize};

/// Статус заявки на отгрузку (экспорт).
///
/// Отдельный словарь, не совпадающий со статусами перемещений: связь между
/// жизненными циклами не предполагается.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportRequestStatus {
    Requested,
    Processing,
    Approved,
    Cancelled,
}

impl ExportRequestStatus {
    pub const ALL: [ExportRequestStatus; 4] = [
        ExportRequestStatus::Requested,
        ExportRequestStatus::Processing,
        ExportRequestStatus::Approved,
        ExportRequestStatus::Cancelled,
    ];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "requested" => Some(Self::Requested),
            "processing" => Some(Self::Processing),
            "approved" => Some(Self::Approved),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Processing => "processing",
            Self::Approved => "approved",
            Self::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Cancelled)
    }
}

impl std::fmt::Display for ExportRequestStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(ExportRequestStatus::parse("REQUESTED"), Some(ExportRequestStatus::Requested));
        assert_eq!(ExportRequestStatus::parse("processing"), Some(ExportRequestStatus::Processing));
        // словарь перемещений сюда не относится
        assert_eq!(ExportRequestStatus::parse("pending"), None);
        assert_eq!(ExportRequestStatus::parse("planned"), None);
    }

    #[test]
    fn test_roundtrip() {
        for s in ExportRequestStatus::ALL {
            assert_eq!(ExportRequestStatus::parse(s.as_str()), Some(s));
        }
    }
}
