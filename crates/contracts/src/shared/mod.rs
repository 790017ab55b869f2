pub mod list_query;
pub mod status_info;
