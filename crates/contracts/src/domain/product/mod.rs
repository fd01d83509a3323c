pub mod aggregate;
pub mod normalize;
pub mod rows;

pub use aggregate::{DisplayRef, Product, Variant};
pub use normalize::normalize_product;
pub use rows::{display_row, expandable_rows, DisplayRow, EditTarget};
