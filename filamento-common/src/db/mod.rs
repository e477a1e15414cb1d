//! Database models and queries

pub mod catalog;
pub mod init;
pub mod inventory;
pub mod models;

pub use catalog::*;
pub use init::*;
pub use inventory::*;
pub use models::*;
