pub mod list;
pub mod low_stock;
