use std::sync::Arc;

use super::*;
use crate::assets::sprites::SpriteStore;
use crate::pipeline::session::SessionOpts;

fn request(seed_pixel: u8) -> PreviewRequest {
    PreviewRequest {
        source: SourceImage::from_rgba8(6, 6, [seed_pixel, 0, 0, 255].repeat(36)).unwrap(),
        params: EffectParams::default(),
    }
}

fn session() -> EffectSession {
    EffectSession::with_store(SessionOpts { seed: Some(1) }, Arc::new(SpriteStore::new()))
}

#[test]
fn newer_submission_replaces_pending() {
    let slot = PreviewSlot::new();
    let first = slot.submit("a");
    let second = slot.submit("b");
    assert!(second > first);
    assert!(!slot.is_current(first));
    assert!(slot.is_current(second));
    assert_eq!(slot.take(), Some((second, "b")));
    assert_eq!(slot.take(), None);
}

#[test]
fn close_drains_then_ends() {
    let slot = PreviewSlot::new();
    let t = slot.submit(1);
    slot.close();
    assert!(slot.is_closed());
    assert_eq!(slot.wait_take(), Some((t, 1)));
    assert_eq!(slot.wait_take(), None);
    slot.submit(2);
    assert_eq!(slot.take(), None);
}

#[test]
fn worker_renders_only_latest_request() {
    let slot = PreviewSlot::new();
    slot.submit(request(10));
    slot.submit(request(20));
    let last = slot.submit(request(30));
    slot.close();

    let mut session = session();
    let mut seen = Vec::new();
    let delivered = run_preview_worker(&slot, &mut session, |ticket, frame| {
        seen.push((ticket, frame.map(|f| (f.width, f.height))));
    });
    assert_eq!(delivered, 1);
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, last);
    assert_eq!(seen[0].1.as_ref().ok(), Some(&(6, 6)));
}

#[test]
fn worker_delivers_final_request_from_producer_thread() {
    let slot = Arc::new(PreviewSlot::new());
    let producer = {
        let slot = slot.clone();
        std::thread::spawn(move || {
            let mut last = None;
            for i in 0..8 {
                last = Some(slot.submit(request(i * 20)));
            }
            slot.close();
            last
        })
    };

    let mut session = session();
    let mut tickets = Vec::new();
    run_preview_worker(&slot, &mut session, |ticket, frame| {
        assert!(frame.is_ok());
        tickets.push(ticket);
    });
    let last = producer.join().unwrap();

    assert!(tickets.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(tickets.last().copied(), last);
}
