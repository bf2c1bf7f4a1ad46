use campaign_studio::errors::StudioError;
use campaign_studio::scrape::{
    FALLBACK_TITLE, NO_TEXT_PLACEHOLDER, check_domain, clean_description, scrape_product,
    strip_query,
};

fn allowlist() -> Vec<String> {
    vec![
        "bankekuku.com".to_string(),
        "banke-kuku.myshopify.com".to_string(),
    ]
}

#[test]
fn test_allowlist_accepts_product_urls() {
    let urls = [
        "https://bankekuku.com/products/amara-kimono",
        "https://www.bankekuku.com/collections/silk/products/amara-kimono",
        "https://banke-kuku.myshopify.com/products/amara-kimono?variant=40000000",
        "http://bankekuku.com/products/amara-kimono",
    ];
    for url in urls {
        assert!(check_domain(url, &allowlist()), "should accept {url}");
    }
}

#[test]
fn test_allowlist_rejects_foreign_and_lookalike_urls() {
    let urls = [
        "https://shopify.com/products/amara-kimono",
        "https://bankekuku.com.attacker.io/products/x",
        "https://attacker.io/?utm=bankekuku.com",
        "https://mybankekuku.com/products/x",
        "ftp-nonsense",
        "",
    ];
    for url in urls {
        assert!(!check_domain(url, &allowlist()), "should reject {url}");
    }
}

#[test]
fn test_strip_query_removes_variant_selectors() {
    assert_eq!(
        strip_query("https://bankekuku.com/products/robe?variant=1&utm_source=ig"),
        "https://bankekuku.com/products/robe"
    );
}

#[test]
fn test_clean_description_end_to_end() {
    let raw = "The Amara kimono wraps you in our signature Delta print.\n\
               Cut from heavyweight silk twill with a relaxed fall.\n\
               SHIPPING & RETURNS\n\
               Free worldwide shipping over £200\n\
               Size up for an oversized silhouette\n\
               Need help? WhatsApp our stylists\n\
               add to cart\n\
               ok\n\
               Finished with hand-rolled hems.";

    let cleaned = clean_description(raw);
    let lines: Vec<&str> = cleaned.lines().collect();
    assert_eq!(
        lines,
        vec![
            "The Amara kimono wraps you in our signature Delta print.",
            "Cut from heavyweight silk twill with a relaxed fall.",
            "Finished with hand-rolled hems.",
        ]
    );
}

#[test]
fn test_constants_match_operator_expectations() {
    assert_eq!(FALLBACK_TITLE, "Banke Kuku Piece");
    assert_eq!(NO_TEXT_PLACEHOLDER, "[NO TEXT FOUND]");
}

#[tokio::test]
async fn test_scrape_rejects_off_storefront_url_without_network() {
    let err = scrape_product("https://attacker.io/products/x", &allowlist())
        .await
        .unwrap_err();
    assert!(matches!(err, StudioError::DomainNotAllowed(_)));
    assert!(err.to_string().contains("attacker.io"));
}
