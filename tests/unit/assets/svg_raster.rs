use super::*;
use crate::assets::decode::parse_svg;

fn square_svg() -> std::sync::Arc<usvg::Tree> {
    parse_svg(
        br##"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="10">
  <rect x="0" y="0" width="10" height="10" fill="#ffffff"/>
</svg>"##,
    )
    .unwrap()
}

#[test]
fn raster_size_follows_scale_not_rotation() {
    let tree = square_svg();
    let (w, h, _) = svg_raster_params(&tree, Affine::scale(4.0), MAX_DIM).unwrap();
    assert_eq!((w, h), (40, 40));

    let rotated = Affine::scale(4.0) * Affine::rotate(1.1);
    let (w, h, _) = svg_raster_params(&tree, rotated, MAX_DIM).unwrap();
    assert_eq!((w, h), (40, 40));
}

#[test]
fn raster_adjust_maps_pixels_back_to_target_extent() {
    let tree = square_svg();
    let target = Affine::translate((5.0, 7.0)) * Affine::scale(2.5);
    let (w, h, adjust) = svg_raster_params(&tree, target, MAX_DIM).unwrap();
    let corner = adjust * kurbo::Point::new(f64::from(w), f64::from(h));
    assert!((corner.x - 30.0).abs() < 1e-9);
    assert!((corner.y - 32.0).abs() < 1e-9);
}

#[test]
fn huge_scales_are_capped_and_stretched() {
    let tree = square_svg();
    let target = Affine::scale(10_000.0);
    let (w, h, adjust) = svg_raster_params(&tree, target, 32).unwrap();
    assert_eq!((w, h), (32, 32));
    let corner = adjust * kurbo::Point::new(32.0, 32.0);
    assert!((corner.x - 100_000.0).abs() < 1e-6);
    assert!((corner.y - 100_000.0).abs() < 1e-6);

    let (w, _, _) = svg_raster_params(&tree, target, u32::MAX).unwrap();
    assert_eq!(w, MAX_DIM);
}

#[test]
fn rasterize_fills_opaque_square() {
    let tree = square_svg();
    let px = rasterize_svg_to_premul_rgba8(&tree, 4, 4).unwrap();
    assert_eq!(px.len(), 4 * 4 * 4);
    assert_eq!(&px[0..4], &[255, 255, 255, 255]);
}
