use cookiepack::cookies::attributes::CookieOptions;
use cookiepack::cookies::document::{CookieDocument, MemoryDocument};
use cookiepack::cookies::monster::CookieMonster;
use cookiepack::cookies::store::CookieStore;
use url::Url;

fn store_at(url: &str) -> CookieStore<MemoryDocument> {
    CookieStore::new(MemoryDocument::parse(url).unwrap())
}

fn bag() -> CookieOptions {
    CookieOptions::new().with_base_key("bag")
}

#[test]
fn test_set_get_round_trip() {
    let store = store_at("https://example.com/");
    for (name, value) in [
        ("plain", "value"),
        ("spaces", "a b c"),
        ("unicode", "héllo wörld"),
        ("symbols", "1;2,3/4?5"),
    ] {
        store.set(name, value, CookieOptions::new());
        assert_eq!(store.get(name, None), value, "cookie {}", name);
    }
}

#[test]
fn test_packed_round_trip() {
    let store = store_at("https://example.com/");
    for (key, value) in [("a", "1"), ("b", "x&y=z"), ("c d", "%41"), ("e", "é")] {
        store.set(key, value, bag());
        assert_eq!(store.get(key, Some("bag")), value, "sub-key {}", key);
    }
    assert_eq!(store.keys(), vec!["bag"]);
}

#[test]
fn test_packed_order_independent() {
    let first = store_at("https://example.com/");
    first.set("a", "1", bag());
    first.set("b", "2", bag());

    let second = store_at("https://example.com/");
    second.set("b", "2", bag());
    second.set("a", "1", bag());

    for store in [&first, &second] {
        assert_eq!(store.get("a", Some("bag")), "1");
        assert_eq!(store.get("b", Some("bag")), "2");
    }
}

#[test]
fn test_remove_one_of_many() {
    let store = store_at("https://example.com/");
    let keys = ["k0", "k1", "k2", "k3", "k4"];
    for (i, key) in keys.iter().enumerate() {
        store.set(key, &format!("v{}", i), bag());
    }

    store.remove("k2", Some("bag"), None);

    assert_eq!(store.get("k2", Some("bag")), "");
    for (i, key) in keys.iter().enumerate().filter(|(_, k)| **k != "k2") {
        assert_eq!(store.get(key, Some("bag")), format!("v{}", i));
    }
    assert_eq!(store.get_packed("bag").len(), keys.len() - 1);
}

#[test]
fn test_bag_example() {
    let store = store_at("https://example.com/");
    store.set("a", "1", bag());
    store.set("b", "2", bag());
    assert_eq!(store.get("a", Some("bag")), "1");
    assert_eq!(store.get("b", Some("bag")), "2");

    store.remove("a", Some("bag"), None);
    assert_eq!(store.get("a", Some("bag")), "");
    assert_eq!(store.get("b", Some("bag")), "2");
}

#[test]
fn test_clear_empties_enumeration() {
    let store = store_at("https://example.com/");
    store.set("a", "1", CookieOptions::new());
    store.set("b", "2", CookieOptions::new().with_expires(48));
    store.set("c", "3", bag());

    store.clear(None);
    assert!(store.keys().is_empty());
    assert_eq!(store.document().cookie_string(), "");
}

#[test]
fn test_clear_cannot_reach_other_paths() {
    let jar = CookieMonster::new();
    let root = CookieStore::new(MemoryDocument::with_jar(
        Url::parse("https://example.com/").unwrap(),
        jar.clone(),
    ));
    let shop = CookieStore::new(MemoryDocument::with_jar(
        Url::parse("https://example.com/shop/").unwrap(),
        jar.clone(),
    ));

    shop.set("cart", "3", CookieOptions::new().with_path("/shop"));
    root.set("lang", "en", CookieOptions::new());

    // Cleared from the shop page: "cart" is visible but lives at /shop.
    shop.clear(None);
    assert_eq!(jar.total_cookie_count(), 1);
    assert_eq!(shop.get("cart", None), "3");
}

#[test]
fn test_positional_options() {
    let store = store_at("https://www.example.com/app/");
    store.set(
        "a",
        "1",
        CookieOptions::positional(1, Some("/app"), Some("example.com"), true, None),
    );

    let cookie = store.document().jar().iter_all_cookies().next().unwrap();
    assert_eq!(cookie.path, "/app");
    assert_eq!(cookie.domain, "example.com");
    assert!(cookie.secure);
    assert!(!cookie.is_session());
}

#[test]
fn test_json_options() {
    let store = store_at("https://example.com/");
    let options = CookieOptions::from_json(r#"{"expires": 0, "baseKey": "bag"}"#).unwrap();
    store.set("a", "1", options);

    let cookie = store.document().jar().iter_all_cookies().next().unwrap();
    assert_eq!(cookie.name, "bag");
    assert!(cookie.is_session());
}

#[test]
fn test_remove_with_keeps_pack_persistent() {
    let store = store_at("https://example.com/");
    let opts = bag().with_expires(24);
    store.set("a", "1", opts.clone());
    store.set("b", "2", opts.clone());

    store.remove_with("a", opts);

    let cookie = store.document().jar().iter_all_cookies().next().unwrap();
    assert_eq!(cookie.name, "bag");
    assert!(!cookie.is_session());
    assert_eq!(store.get("b", Some("bag")), "2");
}

#[test]
fn test_plain_remove_leaves_session_pack() {
    let store = store_at("https://example.com/");
    let opts = bag().with_expires(24);
    store.set("a", "1", opts.clone());
    store.set("b", "2", opts);

    store.remove("a", Some("bag"), None);

    let cookie = store.document().jar().iter_all_cookies().next().unwrap();
    assert_eq!(cookie.name, "bag");
    assert!(cookie.is_session());
    assert_eq!(store.get("b", Some("bag")), "2");
}

#[test]
fn test_rejected_domain_is_silent() {
    let store = store_at("https://example.com/");
    store.set("a", "1", CookieOptions::new().with_domain("com"));
    store.set("b", "1", CookieOptions::new().with_domain("elsewhere.org"));

    assert!(store.keys().is_empty());
    assert_eq!(store.get("a", None), "");
}

#[test]
fn test_secure_on_insecure_page_is_dropped() {
    let store = store_at("http://example.com/");
    store.set("a", "1", CookieOptions::new().with_secure(true));
    assert_eq!(store.get("a", None), "");
}

#[test]
fn test_name_is_trimmed() {
    let store = store_at("https://example.com/");
    store.set("  padded  ", "1", CookieOptions::new());
    assert_eq!(store.keys(), vec!["padded"]);
    assert_eq!(store.get(" padded", None), "1");
}

#[test]
fn test_prefix_names_do_not_collide() {
    let store = store_at("https://example.com/");
    store.set("foobar", "long", CookieOptions::new());
    assert_eq!(store.get("foo", None), "");

    store.set("foo", "short", CookieOptions::new());
    assert_eq!(store.get("foo", None), "short");
    assert_eq!(store.get("foobar", None), "long");
}

#[test]
fn test_reads_pack_written_by_legacy_writer() {
    // Sub-key names written unescaped and the pack encoded once more as a value.
    let doc = MemoryDocument::parse("https://example.com/").unwrap();
    doc.set_cookie("bag=user%20name%3Dbob%26n%3D1; path=/").unwrap();

    let store = CookieStore::new(doc);
    assert_eq!(store.get("user name", Some("bag")), "bob");
    assert_eq!(store.get("n", Some("bag")), "1");
}

#[test]
fn test_reads_legacy_sub_key_that_looks_escaped() {
    let doc = MemoryDocument::parse("https://example.com/").unwrap();
    doc.set_cookie("bag=k%2541%3D1; path=/").unwrap();

    let store = CookieStore::new(doc);
    assert_eq!(store.get("k%41", Some("bag")), "1");
    assert_eq!(store.get("kA", Some("bag")), "");
}
