use super::*;

#[test]
fn builtin_sprites_parse_and_have_size() {
    let store = SpriteStore::new();
    let sheet = store.get_or_load().unwrap();
    assert_eq!(sheet.len(), SPRITE_COUNT);
    for i in 0..SPRITE_COUNT {
        let tree = sheet.get(i).unwrap();
        assert!(tree.size().width() > 0.0);
        assert!(tree.size().height() > 0.0);
    }
    assert!(sheet.get(SPRITE_COUNT).is_none());
}

#[test]
fn second_load_is_memoized() {
    let store = SpriteStore::new();
    assert!(!store.is_loaded());
    let a = store.get_or_load().unwrap();
    let b = store.get_or_load().unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(store.load_count(), 1);
    assert!(store.is_loaded());
}

#[test]
fn concurrent_callers_share_one_load() {
    let store = Arc::new(SpriteStore::new());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let store = store.clone();
            std::thread::spawn(move || store.get_or_load().unwrap())
        })
        .collect();
    let sheets: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(store.load_count(), 1);
    for s in &sheets[1..] {
        assert!(Arc::ptr_eq(&sheets[0], s));
    }
}

#[test]
fn invalid_custom_source_is_an_asset_error_and_retried() {
    let store = SpriteStore::from_svg_sources(b"<svg".to_vec(), b"<svg".to_vec());
    let err = store.get_or_load().unwrap_err();
    assert!(err.to_string().contains("asset error:"));
    assert!(!store.is_loaded());
    assert!(store.get_or_load().is_err());
    assert_eq!(store.load_count(), 2);
}

#[test]
fn shared_store_is_a_singleton() {
    assert!(Arc::ptr_eq(&SpriteStore::shared(), &SpriteStore::shared()));
}
