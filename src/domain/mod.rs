//! Domain module - image candidates, priority classes and product image slots
//!
//! Types shared by the resolution engine and the batch driver.

pub mod constants;
pub mod image_candidate;
pub mod product_images;

// Re-export commonly used items
pub use image_candidate::{Candidate, PriorityClass, Strategy};
pub use product_images::{ProductImageRow, ProductImageSlots};
