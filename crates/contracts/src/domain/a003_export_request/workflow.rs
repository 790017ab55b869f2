//! Доступность действий по заявке на отгрузку

use super::status::ExportRequestStatus;
use crate::domain::common::TransitionError;

/// Создать расходный документ можно только по утверждённой заявке
pub fn can_create_export_from_approved_request(status: &str) -> bool {
    matches!(
        ExportRequestStatus::parse(status),
        Some(ExportRequestStatus::Approved)
    )
}

pub fn can_process(status: &str) -> bool {
    matches!(
        ExportRequestStatus::parse(status),
        Some(ExportRequestStatus::Requested)
    )
}

pub fn can_approve_request(status: &str) -> bool {
    matches!(
        ExportRequestStatus::parse(status),
        Some(ExportRequestStatus::Requested | ExportRequestStatus::Processing)
    )
}

pub fn can_cancel_request(status: &str) -> bool {
    can_approve_request(status)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ExportRequestActions {
    pub process: bool,
    pub approve: bool,
    pub cancel: bool,
    pub create_receipt: bool,
}

impl ExportRequestActions {
    pub fn for_status(status: &str) -> Self {
        Self {
            process: can_process(status),
            approve: can_approve_request(status),
            cancel: can_cancel_request(status),
            create_receipt: can_create_export_from_approved_request(status),
        }
    }
}

pub fn process_target(current: &str) -> Result<ExportRequestStatus, TransitionError> {
    if !can_process(current) {
        return Err(TransitionError::new(current, "process"));
    }
    Ok(ExportRequestStatus::Processing)
}

pub fn approve_target(current: &str) -> Result<ExportRequestStatus, TransitionError> {
    if !can_approve_request(current) {
        return Err(TransitionError::new(current, "approve"));
    }
    Ok(ExportRequestStatus::Approved)
}

pub fn cancel_target(current: &str) -> Result<ExportRequestStatus, TransitionError> {
    if !can_cancel_request(current) {
        return Err(TransitionError::new(current, "cancel"));
    }
    Ok(ExportRequestStatus::Cancelled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_export_only_from_approved() {
        assert!(can_create_export_from_approved_request("approved"));
        assert!(can_create_export_from_approved_request("Approved"));
        assert!(!can_create_export_from_approved_request("requested"));
        assert!(!can_create_export_from_approved_request("processing"));
        assert!(!can_create_export_from_approved_request("cancelled"));
        // статус перемещения "completed" не из этого словаря
        assert!(!can_create_export_from_approved_request("completed"));
        assert!(!can_create_export_from_approved_request(""));
    }

    #[test]
    fn test_request_flow() {
        assert_eq!(process_target("requested"), Ok(ExportRequestStatus::Processing));
        assert!(process_target("processing").is_err());
        assert_eq!(approve_target("processing"), Ok(ExportRequestStatus::Approved));
        assert_eq!(approve_target("requested"), Ok(ExportRequestStatus::Approved));
        assert!(approve_target("approved").is_err());
        assert_eq!(cancel_target("requested"), Ok(ExportRequestStatus::Cancelled));
        assert!(cancel_target("approved").is_err());
    }

    #[test]
    fn test_actions_bundle() {
        let a = ExportRequestActions::for_status("approved");
        assert!(a.create_receipt);
        assert!(!a.approve && !a.cancel && !a.process);
    }
}
