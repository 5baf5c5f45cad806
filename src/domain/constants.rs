//! Resolution rule tables and limits
//!
//! Default values for every keyword list and attribute table the resolver
//! consults. `ResolverConfig::default()` is built from these; deployments tune
//! them through configuration rather than by editing the logic.

/// Result limits
pub mod limits {
    /// Maximum number of image URLs returned for one page
    pub const DEFAULT_MAX_RESULTS: usize = 10;

    /// A `/<W>x<H>/` path segment is a thumbnail marker when either side is at most this
    pub const DEFAULT_SMALL_DIMENSION_THRESHOLD: u32 = 200;

    /// Numbered gallery fields filled after the main image
    pub const DEFAULT_GALLERY_SLOTS: usize = 5;
}

/// Attribute tables, consulted in the listed order
pub mod attributes {
    /// Explicit zoom / gallery attributes carrying full-size URLs
    pub const ZOOM_ATTRIBUTES: &[&str] = &[
        "data-zoom-url",
        "data-large-url",
        "data-full-url",
        "data-original",
        "data-zoom",
        "data-lightbox",
        "data-gallery-url",
        "data-href",
        "data-image",
    ];

    /// Width/density annotated candidate lists
    pub const SRCSET_ATTRIBUTES: &[&str] = &["srcset", "data-srcset"];

    /// Direct and lazy sources emitted as a fallback for every `img`
    pub const SOURCE_ATTRIBUTES: &[&str] = &["src", "data-src"];

    /// Lazy-load source attributes
    pub const LAZY_ATTRIBUTES: &[&str] = &["data-src", "data-lazy-src", "data-lazy"];

    /// Effective source lookup order for keyword matching
    pub const EFFECTIVE_SOURCE_ATTRIBUTES: &[&str] = &["src", "data-src", "data-lazy-src"];
}

/// Keyword tables (matched case-insensitively as substrings)
pub mod keywords {
    /// Keywords that mark an `img` source as a product image
    pub const PRODUCT_IMAGE_KEYWORDS: &[&str] = &["product", "gallery", "main", "zoom", "big", "large"];

    /// Keywords and path markers that raise a URL to product priority
    pub const PRODUCT_PRIORITY_MARKERS: &[&str] = &[
        "product", "gallery", "main", "zoom", "big", "large", "/p/", "/products/",
    ];

    /// URLs already pointing at the largest rendition
    pub const ALREADY_MAXIMAL_MARKERS: &[&str] = &["videoluxzoom", "videoluxproduct", "product-zoom"];

    /// Assets that are never product images
    pub const EXCLUDED_KEYWORDS: &[&str] = &[
        "logo",
        "icon",
        "banner",
        "placeholder",
        "blank",
        "no-image",
        "social",
    ];

    /// Path tokens rewritten to `large`
    pub const THUMBNAIL_TOKENS: &[&str] = &["thumb", "thumbs", "thumbnail", "thumbnails", "small"];

    /// Replacement for thumbnail tokens
    pub const FULL_SIZE_TOKEN: &str = "large";

    /// Recognized image file extensions
    pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "gif"];
}

/// Script and JSON mining tables
pub mod scripts {
    /// JSON object keys whose values are treated as image URLs
    pub const JSON_IMAGE_KEY_HINTS: &[&str] = &["image", "photo", "img", "media", "gallery"];

    /// Top-level keys holding the vendor state tree
    pub const VENDOR_STATE_KEYS: &[&str] = &["cx-state", "state"];

    /// Preferred and fallback rendition fields inside vendor image entries
    pub const VENDOR_ZOOM_FIELD: &str = "videoluxZoom";
    pub const VENDOR_PRODUCT_FIELD: &str = "videoluxProduct";

    /// Image groups inside vendor variant entries
    pub const VENDOR_IMAGE_GROUPS: &[&str] = &["PRIMARY", "GALLERY"];

    /// Variable/property names holding image arrays in inline scripts
    pub const SCRIPT_ARRAY_KEYS: &[&str] = &[
        "images",
        "productImages",
        "gallery",
        "media",
        "productMedia",
        "zoomImages",
        "largeImages",
        "fullImages",
    ];
}

/// Query parameters that carry rendition size
pub mod query {
    /// Keys stripped when they contain one of these
    pub const SIZE_KEY_SUBSTRINGS: &[&str] = &["width", "height", "size"];

    /// Keys stripped when ending in one of these (`w`, `maxw`, `imgh` ...)
    pub const SIZE_KEY_SUFFIXES: &[&str] = &["w", "h"];
}
