use super::*;
use crate::effects::params::{GlitterParams, SparkleParams};
use crate::encode::gif::GifExporter;
use crate::encode::still::EncodedFrame;

fn blue(w: u32, h: u32) -> SourceImage {
    SourceImage::from_rgba8(w, h, [0u8, 0, 255, 255].repeat((w * h) as usize)).unwrap()
}

fn seeded(seed: u64) -> EffectSession {
    EffectSession::with_store(SessionOpts { seed: Some(seed) }, Arc::new(SpriteStore::new()))
}

#[test]
fn seeded_previews_repeat() {
    let src = blue(18, 12);
    let a = seeded(11).preview(&src, &EffectParams::default()).unwrap();
    let b = seeded(11).preview(&src, &EffectParams::default()).unwrap();
    assert_eq!(a, b);
}

#[test]
fn previews_do_not_compound() {
    let src = blue(10, 10);
    let quiet = EffectParams {
        glitter: GlitterParams {
            density: 0.0,
            ..GlitterParams::default()
        },
        sparkle: SparkleParams {
            density: 0.0,
            ..SparkleParams::default()
        },
    };
    let mut session = seeded(1);
    session.preview(&src, &EffectParams::default()).unwrap();
    let frame = session.preview(&src, &quiet).unwrap();
    assert_eq!(frame.data.as_slice(), src.premul_bytes());
}

#[test]
fn surface_follows_source_size() {
    let mut session = seeded(2);
    let small = session.preview(&blue(4, 4), &EffectParams::default()).unwrap();
    let large = session.preview(&blue(9, 5), &EffectParams::default()).unwrap();
    assert_eq!((small.width, small.height), (4, 4));
    assert_eq!((large.width, large.height), (9, 5));
}

#[test]
fn render_animation_produces_gif() {
    let mut session = seeded(3);
    let anim = session
        .render_animation(&blue(12, 8), &EffectParams::default(), &mut GifExporter::default())
        .unwrap();
    assert_eq!(anim.frame_count, 5);
    assert_eq!((anim.width, anim.height), (12, 8));
}

#[test]
fn render_animation_surfaces_encoder_failure() {
    let mut session = seeded(4);
    let mut seen = 0;
    let mut encoder = |frames: &[EncodedFrame], _: u32, _: u32| -> GlimmerResult<EncodedAnimation> {
        seen = frames.len();
        Err(crate::GlimmerError::export("disk full"))
    };
    let out = session.render_animation(&blue(6, 6), &EffectParams::default(), &mut encoder);
    assert!(matches!(out, Err(crate::GlimmerError::Export(_))));
    assert_eq!(seen, 5);
}
