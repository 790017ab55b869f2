pub mod list_toolbar;
pub mod pagination_controls;
pub mod select;
pub mod status_badge;
