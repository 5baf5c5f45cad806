//! Product image slots
//!
//! Maps a ranked image list onto the output row: main image, numbered gallery
//! fields and a comma-joined overflow.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Separator used when several image URLs share one output field
pub const IMAGE_LIST_SEPARATOR: &str = ", ";

/// Output slots for one product: a main image, a fixed number of numbered
/// gallery images and a comma-joined overflow for everything that did not fit.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImageSlots {
    /// First resolved image
    pub main_image: Option<String>,
    /// Images 1..=N
    pub gallery: Vec<String>,
    /// Remaining images joined by [`IMAGE_LIST_SEPARATOR`]
    pub overflow: Option<String>,
}

impl ProductImageSlots {
    /// Distribute an ordered image list over the slots
    pub fn from_images(images: &[String], gallery_slots: usize) -> Self {
        let Some((main, rest)) = images.split_first() else {
            return Self::default();
        };

        let split = rest.len().min(gallery_slots);
        let (gallery, overflow) = rest.split_at(split);

        Self {
            main_image: Some(main.clone()),
            gallery: gallery.to_vec(),
            overflow: if overflow.is_empty() {
                None
            } else {
                Some(overflow.join(IMAGE_LIST_SEPARATOR))
            },
        }
    }

    /// Whether any image beyond the main one exists
    pub fn has_gallery(&self) -> bool {
        !self.gallery.is_empty() || self.overflow.is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.main_image.is_none()
    }

    /// Every non-main image joined into one field
    pub fn other_images(&self) -> Option<String> {
        let mut others: Vec<&str> = self.gallery.iter().map(String::as_str).collect();
        if let Some(overflow) = &self.overflow {
            others.extend(overflow.split(IMAGE_LIST_SEPARATOR));
        }
        if others.is_empty() {
            None
        } else {
            Some(others.join(IMAGE_LIST_SEPARATOR))
        }
    }

    /// Total number of images held
    pub fn len(&self) -> usize {
        let overflow = self
            .overflow
            .as_deref()
            .map_or(0, |o| o.split(IMAGE_LIST_SEPARATOR).count());
        usize::from(self.main_image.is_some()) + self.gallery.len() + overflow
    }
}

/// One output row of the batch driver
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImageRow {
    /// Product page the images were resolved from
    pub product_url: String,
    #[serde(flatten)]
    pub slots: ProductImageSlots,
}

impl ProductImageRow {
    pub fn new(product_url: impl Into<String>, slots: ProductImageSlots) -> Self {
        Self {
            product_url: product_url.into(),
            slots,
        }
    }
}

impl fmt::Display for ProductImageRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (main: {}, images: {})",
            self.product_url,
            self.slots.main_image.as_deref().unwrap_or("-"),
            self.slots.len()
        )
    }
}
