pub mod client;
pub mod error;
pub mod queries;
pub mod retry;
pub mod types;

pub use client::WarehouseClient;
pub use error::WarehouseError;
pub use types::{CrazyDealRow, PromotionRow};
