pub mod aggregate;
pub mod quantity;
