//! Color quantization regression test
//!
//! Checks palette size bounds, exact reproduction of images with few
//! colors, and the reserved transparent slot.

use rasterop_color::{ColorSelection, QuantizeOptions, dither_copy, quantize, quantize_with_options};
use rasterop_core::PixelBuffer;
use rasterop_test::{RegParams, images};

fn red_over_blue() -> PixelBuffer {
    let mut data = Vec::new();
    for y in 0..8 {
        for _ in 0..8 {
            if y < 4 {
                data.extend_from_slice(&[255, 0, 0]);
            } else {
                data.extend_from_slice(&[0, 0, 255]);
            }
        }
    }
    PixelBuffer::from_u8(8, 8, 3, data).unwrap()
}

#[test]
fn quantize_two_color_reg() {
    let mut rp = RegParams::new("quantize_two_color");

    let src = red_over_blue();
    let pal = quantize(&src, 2, false).unwrap();
    rp.compare_values(2.0, pal.len() as f64, 0.0);
    let has = |rgb: u32| pal.entries().iter().any(|c| c.to_rgb() == rgb);
    rp.compare_values(1.0, if has(0xff0000) && has(0x0000ff) { 1.0 } else { 0.0 }, 0.0);

    // Nearest-color mapping reproduces the source exactly.
    let indexed = dither_copy(&src, &pal).unwrap();
    let restored = indexed.expand_palette().unwrap();
    rp.compare_buffers(&src, &restored);

    assert!(rp.cleanup(), "quantize_two_color regression test failed");
}

#[test]
fn quantize_palette_bounds_reg() {
    let mut rp = RegParams::new("quantize_bounds");

    let src = images::gradient_rgb(96, 64).unwrap();
    for max_colors in [1u32, 2, 16, 64, 256] {
        let pal = quantize(&src, max_colors, false).unwrap();
        rp.compare_values(1.0, (pal.len() <= max_colors as usize) as u8 as f64, 0.0);
        rp.compare_values(1.0, (!pal.is_empty()) as u8 as f64, 0.0);

        let indexed = dither_copy(&src, &pal).unwrap();
        rp.compare_values(src.width() as f64, indexed.width() as f64, 0.0);
        rp.compare_values(src.height() as f64, indexed.height() as f64, 0.0);
        let used = images::distinct_colors(&indexed);
        rp.compare_values(1.0, (used <= max_colors as usize) as u8 as f64, 0.0);
    }

    assert!(rp.cleanup(), "quantize_bounds regression test failed");
}

#[test]
fn quantize_few_colors_reg() {
    let mut rp = RegParams::new("quantize_few_colors");

    // Eight distinct colors along the red/blue diagonal.
    let src = images::gradient_rgb(8, 1).unwrap();
    let distinct = images::distinct_colors(&src);
    rp.compare_values(8.0, distinct as f64, 0.0);

    let pal = quantize(&src, 16, false).unwrap();
    rp.compare_values(distinct as f64, pal.len() as f64, 0.0);
    let restored = dither_copy(&src, &pal).unwrap().expand_palette().unwrap();
    rp.compare_buffers(&src, &restored);

    let cb = images::checkerboard(16, 16, 4, 0x20c040, 0xe01060).unwrap();
    let pal = quantize(&cb, 256, false).unwrap();
    rp.compare_values(2.0, pal.len() as f64, 0.0);

    assert!(rp.cleanup(), "quantize_few_colors regression test failed");
}

#[test]
fn quantize_distinct_reg() {
    let mut rp = RegParams::new("quantize_distinct");

    // Every pixel a different color, so most cubes end with one sample.
    for (w, h) in [(4, 4), (3, 3), (5, 7)] {
        let src = images::gradient_rgb(w, h).unwrap();
        let distinct = images::distinct_colors(&src);
        for max_colors in [distinct as u32, distinct as u32 + 3, 256] {
            let pal = quantize(&src, max_colors, false).unwrap();
            rp.compare_values(distinct as f64, pal.len() as f64, 0.0);
            let restored = dither_copy(&src, &pal).unwrap().expand_palette().unwrap();
            rp.compare_buffers(&src, &restored);
        }
    }

    assert!(rp.cleanup(), "quantize_distinct regression test failed");
}

#[test]
fn quantize_selection_reg() {
    let mut rp = RegParams::new("quantize_selection");

    let src = images::noise_rgb(200, 200, 11).unwrap();
    for selection in [ColorSelection::Fast, ColorSelection::Quality] {
        let opts = QuantizeOptions {
            max_colors: 32,
            selection,
            ..Default::default()
        };
        let pal = quantize_with_options(&src, &opts).unwrap();
        rp.compare_values(1.0, (pal.len() <= 32) as u8 as f64, 0.0);
        rp.compare_values(1.0, (pal.len() >= 16) as u8 as f64, 0.0);
    }

    assert!(rp.cleanup(), "quantize_selection regression test failed");
}

#[test]
fn quantize_transparency_reg() {
    let mut rp = RegParams::new("quantize_transparency");

    let src = images::gradient_rgb(32, 32).unwrap();
    let pal = quantize(&src, 8, true).unwrap();
    rp.compare_values(1.0, (pal.len() <= 8) as u8 as f64, 0.0);
    let t = pal.transparent_index();
    rp.compare_values((pal.len() - 1) as f64, t.map_or(-1.0, |t| t as f64), 0.0);
    rp.compare_values(0.0, pal.get(pal.len() - 1).map_or(255.0, |c| c.alpha as f64), 0.0);

    rp.compare_values(1.0, quantize(&src, 1, true).is_err() as u8 as f64, 0.0);
    rp.compare_values(1.0, quantize(&src, 0, false).is_err() as u8 as f64, 0.0);
    rp.compare_values(1.0, quantize(&src, 257, false).is_err() as u8 as f64, 0.0);

    assert!(rp.cleanup(), "quantize_transparency regression test failed");
}
