pub mod a001_warehouse;
pub mod a002_warehouse_transfer;
pub mod a003_export_request;
pub mod a004_export_receipt;
