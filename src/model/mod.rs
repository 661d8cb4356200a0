pub mod identity;
pub mod mount;
pub mod types;
