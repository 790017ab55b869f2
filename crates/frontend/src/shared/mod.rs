pub mod api_client;
pub mod api_utils;
pub mod components;
pub mod dialog;
pub mod format;
pub mod icons;
pub mod modal;
pub mod notifications;
pub mod operation_error;
pub mod page_frame;
pub mod request_guard;
