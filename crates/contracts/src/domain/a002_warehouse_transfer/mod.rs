pub mod aggregate;
pub mod row;
pub mod status;
pub mod workflow;
