use super::*;

fn checker(w: u32, h: u32) -> FrameRGBA {
    let mut data = Vec::with_capacity((w * h * 4) as usize);
    for y in 0..h {
        for x in 0..w {
            let v = if (x + y) % 2 == 0 { 255 } else { 0 };
            data.extend_from_slice(&[v, 64, 255 - v, 255]);
        }
    }
    FrameRGBA {
        width: w,
        height: h,
        data,
    }
}

#[test]
fn png_payload_decodes_to_same_pixels() {
    let frame = checker(7, 5);
    let enc = EncodedFrame::from_frame(&frame).unwrap();
    assert_eq!((enc.width(), enc.height()), (7, 5));
    assert!(enc.bytes().starts_with(b"\x89PNG"));
    assert_eq!(enc.decode().unwrap(), frame);
}

#[test]
fn short_buffer_is_rejected() {
    let frame = FrameRGBA {
        width: 4,
        height: 4,
        data: vec![0; 10],
    };
    let err = EncodedFrame::from_frame(&frame).unwrap_err();
    assert!(matches!(err, GlimmerError::Render(_)));
}

#[test]
fn corrupt_payload_fails_to_decode() {
    let mut enc = EncodedFrame::from_frame(&checker(2, 2)).unwrap();
    enc.bytes.truncate(8);
    assert!(enc.decode().is_err());
}
