use std::io::Cursor;

use image::AnimationDecoder;
use image::codecs::gif::GifDecoder;

use super::*;
use crate::render::surface::FrameRGBA;

fn solid(w: u32, h: u32, rgba: [u8; 4]) -> EncodedFrame {
    EncodedFrame::from_frame(&FrameRGBA {
        width: w,
        height: h,
        data: rgba.repeat((w * h) as usize),
    })
    .unwrap()
}

fn decoded_frames(bytes: &[u8]) -> Vec<image::Frame> {
    GifDecoder::new(Cursor::new(bytes))
        .unwrap()
        .into_frames()
        .collect_frames()
        .unwrap()
}

#[test]
fn gif_has_one_frame_per_input() {
    let frames = vec![
        solid(6, 4, [255, 0, 0, 255]),
        solid(6, 4, [0, 255, 0, 255]),
        solid(6, 4, [0, 0, 255, 255]),
    ];
    let anim = GifExporter::default().encode(&frames, 6, 4).unwrap();
    assert!(anim.bytes.starts_with(b"GIF89a"));
    assert_eq!(anim.frame_count, 3);

    let decoded = decoded_frames(&anim.bytes);
    assert_eq!(decoded.len(), 3);
    assert_eq!(decoded[0].buffer().dimensions(), (6, 4));
    let (num, den) = decoded[0].delay().numer_denom_ms();
    assert_eq!(num / den, 100);
}

#[test]
fn frames_are_resized_to_target() {
    let frames = vec![solid(8, 8, [10, 20, 30, 255]), solid(8, 8, [30, 20, 10, 255])];
    let anim = GifExporter::default().encode(&frames, 4, 2).unwrap();
    assert_eq!((anim.width, anim.height), (4, 2));
    let decoded = decoded_frames(&anim.bytes);
    assert_eq!(decoded[1].buffer().dimensions(), (4, 2));
}

#[test]
fn empty_input_is_an_export_error() {
    let err = GifExporter::default().encode(&[], 4, 4).unwrap_err();
    assert!(matches!(err, GlimmerError::Export(_)));
}

#[test]
fn export_calls_encoder_once_and_passes_error_through() {
    let seq = FrameSequence {
        width: 2,
        height: 2,
        frames: vec![solid(2, 2, [1, 2, 3, 255])],
    };
    let mut calls = 0;
    let mut failing = |_: &[EncodedFrame], _: u32, _: u32| -> GlimmerResult<EncodedAnimation> {
        calls += 1;
        Err(GlimmerError::export("adapter reported error"))
    };
    let err = export_animation(&mut failing, &seq).unwrap_err();
    assert_eq!(calls, 1);
    assert_eq!(err.to_string(), "export error: adapter reported error");
}

#[test]
fn export_forwards_sequence_size() {
    let seq = FrameSequence {
        width: 3,
        height: 2,
        frames: vec![solid(3, 2, [9, 9, 9, 255]); 2],
    };
    let anim = export_animation(&mut GifExporter::new(GifOpts::default()), &seq).unwrap();
    assert_eq!((anim.width, anim.height, anim.frame_count), (3, 2, 2));
}
