//! Property tests for resolver output invariants
use product_image_resolver::domain::constants::keywords::EXCLUDED_KEYWORDS;
use product_image_resolver::infrastructure::parsing::{ImageResolver, ResolverConfig, SizeCanonicalizer};
use proptest::prelude::*;
use std::collections::HashSet;
use url::Url;

const PAGE: &str = "https://shop.example/catalog/item-7";

const NAMES: &[&str] = &[
    "product-1",
    "gallery/2",
    "shot-3",
    "logo",
    "icon-cart",
    "thumbs/4",
    "71x71/5",
    "banner-top",
    "p/6",
    "detail_120x120_7",
];

const EXTENSIONS: &[&str] = &["jpg", "PNG", "webp", "gif", "svg", "jpeg"];

const PREFIXES: &[&str] = &["/img/", "//cdn.example/m/", "https://static.example/", "rel/", "../up/"];

/// One image reference in one of the markup shapes the resolver understands
fn fragment(kind: usize, url: &str) -> String {
    match kind {
        0 => format!(r#"<img src="{url}">"#),
        1 => format!(r#"<img data-src="{url}">"#),
        2 => format!(r#"<div data-zoom-url="{url}"></div>"#),
        3 => format!(r#"<picture><source srcset="{url}?w=100 100w, {url} 900w"></picture>"#),
        4 => format!(r#"<div data-lazy="{url}"></div>"#),
        _ => format!(r#"<script>var cfg = {{ images: ["{url}"] }};</script>"#),
    }
}

fn page_strategy() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (0..6usize, 0..NAMES.len(), 0..EXTENSIONS.len(), 0..PREFIXES.len()),
        0..40,
    )
    .prop_map(|parts| {
        parts
            .into_iter()
            .map(|(kind, name, ext, prefix)| {
                let url = format!("{}{}.{}", PREFIXES[prefix], NAMES[name], EXTENSIONS[ext]);
                fragment(kind, &url)
            })
            .collect()
    })
}

fn url_strategy() -> impl Strategy<Value = String> {
    let segments = prop::collection::vec(
        prop::sample::select(vec![
            "img", "thumb", "Thumbs", "small", "71x71", "800x800", "150x900", "p", "a_120x120_b", "media",
            "p1_thumb150", "productThumbnail", "thumb@2x", "x_small2",
        ]),
        1..6,
    );
    let query = prop::collection::vec(
        prop::sample::select(vec!["w=100", "width=5", "v=2", "size=l", "h=", "x=1", "maxHeight=9", "maxw=300", "imgh=80"]),
        0..4,
    );
    (segments, query, prop::sample::select(vec!["jpg", "png", "webp"])).prop_map(|(segments, query, ext)| {
        let mut url = format!("https://cdn.example/{}.{}", segments.join("/"), ext);
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        url
    })
}

proptest! {
    #[test]
    fn test_output_is_bounded_unique_and_clean(html in page_strategy()) {
        let resolver = ImageResolver::new().unwrap();
        let images = resolver.resolve_html(&html, PAGE).unwrap();

        prop_assert!(images.len() <= resolver.config().max_results);

        let mut paths = HashSet::new();
        for image in &images {
            let url = Url::parse(image).unwrap();
            prop_assert!(matches!(url.scheme(), "http" | "https"));
            prop_assert!(paths.insert(url.path().to_lowercase()), "duplicate path in {:?}", images);

            let lowered = image.to_lowercase();
            prop_assert!(!EXCLUDED_KEYWORDS.iter().any(|k| lowered.contains(k)), "excluded asset {}", image);
        }
    }

    #[test]
    fn test_resolution_is_deterministic(html in page_strategy()) {
        let resolver = ImageResolver::new().unwrap();
        let first = resolver.resolve_html(&html, PAGE).unwrap();
        let second = resolver.resolve_html(&html, PAGE).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_max_results_is_honored(html in page_strategy(), max_results in 1usize..6) {
        let config = ResolverConfig { max_results, ..ResolverConfig::default() };
        let resolver = ImageResolver::with_config(config).unwrap();
        prop_assert!(resolver.resolve_html(&html, PAGE).unwrap().len() <= max_results);
    }

    #[test]
    fn test_canonicalization_is_idempotent(raw in url_strategy()) {
        let canonicalizer = SizeCanonicalizer::new(&ResolverConfig::default()).unwrap();
        let url = Url::parse(&raw).unwrap();
        let once = canonicalizer.canonicalize(&url);
        let twice = canonicalizer.canonicalize(&once);
        prop_assert_eq!(once, twice);
    }
}
