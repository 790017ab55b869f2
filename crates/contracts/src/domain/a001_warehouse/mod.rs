pub mod aggregate;
pub mod lookup;
