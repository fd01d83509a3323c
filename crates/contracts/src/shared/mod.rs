pub mod pagination;
pub mod quantity;
