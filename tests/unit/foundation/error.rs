use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(GlimmerError::setup("x").to_string().contains("setup error:"));
    assert!(GlimmerError::asset("x").to_string().contains("asset error:"));
    assert!(GlimmerError::render("x").to_string().contains("render error:"));
    assert!(GlimmerError::export("x").to_string().contains("export error:"));
    assert!(GlimmerError::config("x").to_string().contains("config error:"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = GlimmerError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
