use super::*;
use crate::effects::params::{NoiseTone, SparkleAnchor};
use crate::foundation::core::Span;

#[test]
fn empty_object_is_all_defaults() {
    let cfg = GlimmerConfig::from_json_str("{}").unwrap();
    assert_eq!(cfg, GlimmerConfig::default());
    assert_eq!(cfg.effects.glitter.density, 0.3);
    assert_eq!(cfg.effects.glitter.lightness, Span::new(105, 185));
    assert_eq!(cfg.effects.sparkle.size, Span::new(10.0, 70.0));
    assert_eq!(cfg.gif.delay_ms, 100);
    assert!(cfg.gif.repeat);
    assert_eq!(cfg.seed, None);
}

#[test]
fn partial_overrides_keep_other_defaults() {
    let cfg = GlimmerConfig::from_json_str(
        r#"{
            "seed": 42,
            "effects": {
                "glitter": { "density": 0.5, "tone": "colored" },
                "sparkle": { "alpha": { "min": 0.1, "max": 0.2 }, "anchor": "corner" }
            },
            "gif": { "speed": 20 }
        }"#,
    )
    .unwrap();
    assert_eq!(cfg.seed, Some(42));
    assert_eq!(cfg.session_opts().seed, Some(42));
    assert_eq!(cfg.effects.glitter.density, 0.5);
    assert_eq!(cfg.effects.glitter.tone, NoiseTone::Colored);
    assert_eq!(cfg.effects.glitter.opacity, 0.3);
    assert_eq!(cfg.effects.sparkle.alpha, Span::new(0.1, 0.2));
    assert_eq!(cfg.effects.sparkle.anchor, SparkleAnchor::Corner);
    assert_eq!(cfg.effects.sparkle.density, 0.001);
    assert_eq!(cfg.gif.speed, 20);
    assert_eq!(cfg.gif.delay_ms, 100);
}

#[test]
fn pretty_json_parses_back() {
    let mut cfg = GlimmerConfig::default();
    cfg.seed = Some(7);
    cfg.effects.sparkle.size = Span::new(5.0, 9.0);
    let json = cfg.to_json_pretty().unwrap();
    assert_eq!(GlimmerConfig::from_json_str(&json).unwrap(), cfg);
}

#[test]
fn bad_json_is_a_config_error() {
    let err = GlimmerConfig::from_json_str("{ \"effects\": 3 }").unwrap_err();
    assert!(matches!(err, GlimmerError::Config(_)));
    assert!(err.to_string().starts_with("config error:"));

    let err = GlimmerConfig::from_json_str("{ \"colour\": 1 }").unwrap_err();
    assert!(matches!(err, GlimmerError::Config(_)));
}

#[test]
fn missing_file_is_a_config_error() {
    let err = GlimmerConfig::from_path("/definitely/not/here.json").unwrap_err();
    assert!(matches!(err, GlimmerError::Config(_)));
}

#[test]
fn reader_and_path_agree() {
    let dir = std::env::temp_dir().join(format!("glimmer-config-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("cfg.json");
    std::fs::write(&path, r#"{ "seed": 3 }"#).unwrap();

    let from_path = GlimmerConfig::from_path(&path).unwrap();
    let from_reader = GlimmerConfig::from_reader(std::io::Cursor::new(r#"{ "seed": 3 }"#)).unwrap();
    assert_eq!(from_path, from_reader);

    let _ = std::fs::remove_dir_all(&dir);
}
