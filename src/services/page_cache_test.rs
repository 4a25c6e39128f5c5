use super::*;

#[test]
fn renders_once_per_path() {
    let cache = PageCache::new();
    let mut calls = 0;
    let first = cache.get_or_render("/", || {
        calls += 1;
        "home".into()
    });
    let second = cache.get_or_render("/", || {
        calls += 1;
        "other".into()
    });
    assert_eq!(&*first, "home");
    assert_eq!(&*second, "home");
    assert_eq!(calls, 1);
}

#[test]
fn root_layout_invalidation_drops_everything() {
    let cache = PageCache::new();
    cache.get_or_render("/", || "home".into());
    cache.get_or_render("/login", || "login".into());
    cache.invalidate_layout("/");
    assert!(cache.is_empty());
    assert_eq!(cache.invalidation_count(), 1);
}

#[test]
fn nested_layout_invalidation_keeps_siblings() {
    let cache = PageCache::new();
    cache.get_or_render("/admin", || "a".into());
    cache.get_or_render("/admin/login", || "al".into());
    cache.get_or_render("/admin?member", || "am".into());
    cache.get_or_render("/administrators", || "x".into());
    cache.get_or_render("/login", || "l".into());
    cache.invalidate_layout("/admin");
    assert!(!cache.contains("/admin"));
    assert!(!cache.contains("/admin/login"));
    assert!(!cache.contains("/admin?member"));
    assert!(cache.contains("/administrators"));
    assert!(cache.contains("/login"));
}

#[test]
fn rerenders_after_invalidation() {
    let cache = PageCache::new();
    cache.get_or_render("/", || "v1".into());
    cache.invalidate_layout("/");
    let page = cache.get_or_render("/", || "v2".into());
    assert_eq!(&*page, "v2");
}

#[test]
fn clones_share_storage() {
    let cache = PageCache::new();
    let other = cache.clone();
    cache.get_or_render("/", || "home".into());
    assert!(other.contains("/"));
    other.invalidate_layout("/");
    assert_eq!(cache.invalidation_count(), 1);
    assert!(cache.is_empty());
}

#[test]
fn variants_are_cached_separately() {
    let cache = PageCache::new();
    cache.get_or_render("/", || "anonymous".into());
    let member = cache.get_or_render("/?member", || "member".into());
    assert_eq!(&*member, "member");
    assert_eq!(cache.len(), 2);
    cache.invalidate_layout("/");
    assert!(cache.is_empty());
}
