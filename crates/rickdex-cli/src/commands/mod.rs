pub mod browse;
pub mod common;
pub mod favorites;
pub mod list;
pub mod toggle;
