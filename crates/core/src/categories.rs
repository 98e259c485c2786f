//! Artwork category constants.
//!
//! These must match the CHECK constraint on `artworks.category`.

pub const CATEGORY_SKETCH: &str = "sketch";
pub const CATEGORY_CANVAS: &str = "canvas";
pub const CATEGORY_WALLART: &str = "wallart";
pub const CATEGORY_DIGITAL: &str = "digital";
pub const CATEGORY_PHOTOGRAPHY: &str = "photography";

/// All recognized artwork categories.
pub const ALL_CATEGORIES: [&str; 5] = [
    CATEGORY_SKETCH,
    CATEGORY_CANVAS,
    CATEGORY_WALLART,
    CATEGORY_DIGITAL,
    CATEGORY_PHOTOGRAPHY,
];

/// Whether `category` is one of the recognized artwork categories.
pub fn is_valid_category(category: &str) -> bool {
    ALL_CATEGORIES.contains(&category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_validity() {
        for c in ALL_CATEGORIES {
            assert!(is_valid_category(c));
        }
        assert!(!is_valid_category("oil"));
        assert!(!is_valid_category(""));
    }
}
