//! Area average and pixelize regression test

use rasterop_core::{ImageOp, Palette, PixelBuffer, color};
use rasterop_test::{RegParams, images};
use rasterop_transform::{PixelizeOp, Region, area_average, pixelize, pixelize_region};

#[test]
fn area_average_reg() {
    let mut rp = RegParams::new("area_average");

    // Uniform in, uniform out, at any size.
    let src = images::solid_rgb(37, 23, 0x3c7fa0).unwrap();
    for (w, h) in [(10, 10), (37, 23), (50, 5), (1, 1)] {
        let out = area_average(&src, w, h).unwrap();
        rp.compare_buffers(&images::solid_rgb(w, h, 0x3c7fa0).unwrap(), &out);
    }

    // Each 2x2 checker cell collapses to its own color.
    let cb = images::checkerboard(8, 8, 2, 0xff0000, 0x0000ff).unwrap();
    let out = area_average(&cb, 4, 4).unwrap();
    rp.compare_buffers(&images::checkerboard(4, 4, 1, 0xff0000, 0x0000ff).unwrap(), &out);

    // Whole-image mean, truncated.
    let out = area_average(&cb, 1, 1).unwrap();
    rp.compare_values(127.0, out.sample(0, 0, 0).unwrap_or(0) as f64, 0.0);
    rp.compare_values(127.0, out.sample(0, 0, 2).unwrap_or(0) as f64, 0.0);

    // Indexed input is averaged in color space.
    let mut idx = PixelBuffer::new_indexed(4, 4, Palette::monochrome()).unwrap().to_mut();
    for y in 0..4 {
        for x in 0..2 {
            idx.set_sample(x, y, 0, 1).unwrap();
        }
    }
    let out = area_average(&idx.into(), 2, 1).unwrap();
    rp.compare_values(0xffffff as f64, (out.argb(0, 0).unwrap_or(0) & color::RGB_MASK) as f64, 0.0);
    rp.compare_values(0.0, (out.argb(1, 0).unwrap_or(1) & color::RGB_MASK) as f64, 0.0);

    assert!(rp.cleanup(), "area_average regression test failed");
}

#[test]
fn pixelize_reg() {
    let mut rp = RegParams::new("pixelize");

    let src = images::noise_rgb(21, 17, 8).unwrap();
    rp.compare_buffers(&src, &pixelize(&src, 1, 1).unwrap());

    // Blocks become uniform and keep the block mean.
    let out = PixelizeOp::with_blocks(4, 3).apply(&src).unwrap();
    rp.compare_values(21.0, out.width() as f64, 0.0);
    let mut uniform = true;
    for by in (0..17).step_by(3) {
        for bx in (0..21).step_by(4) {
            let first = out.argb_unchecked(bx, by);
            for y in by..(by + 3).min(17) {
                for x in bx..(bx + 4).min(21) {
                    uniform &= out.argb_unchecked(x, y) == first;
                }
            }
        }
    }
    rp.compare_values(1.0, uniform as u8 as f64, 0.0);
    rp.compare_values(images::band_mean(&src, 0), images::band_mean(&out, 0), 2.0);

    // Outside the region nothing changes.
    let region = Region::new(5, 4, 8, 6);
    let out = pixelize_region(&src, 3, 3, region).unwrap();
    let mut outside_same = true;
    for y in 0..17 {
        for x in 0..21 {
            let inside = (5..13).contains(&x) && (4..10).contains(&y);
            if !inside {
                outside_same &= out.argb_unchecked(x, y) == src.argb_unchecked(x, y);
            }
        }
    }
    rp.compare_values(1.0, outside_same as u8 as f64, 0.0);
    // The last column of blocks is 2 wide: x 11..13.
    rp.compare_values(
        out.argb_unchecked(11, 4) as f64,
        out.argb_unchecked(12, 6) as f64,
        0.0,
    );

    rp.compare_values(1.0, pixelize(&src, 2, 0).is_err() as u8 as f64, 0.0);
    rp.compare_values(
        1.0,
        pixelize_region(&src, 2, 2, Region::new(20, 0, 2, 2)).is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "pixelize regression test failed");
}
