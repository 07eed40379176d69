//! Inverse color map regression test
//!
//! Every palette entry must map to itself, and every grid query must land
//! on an entry that is nearest to the query's cell center.

use rasterop_color::{InverseColorMap, PaletteLookup};
use rasterop_core::{Palette, Rgba};
use rasterop_test::RegParams;

fn color_cube() -> Vec<u32> {
    let mut colors = Vec::new();
    for r in 0..6u32 {
        for g in 0..6u32 {
            for b in 0..6u32 {
                colors.push((r * 51) << 16 | (g * 51) << 8 | b * 51);
            }
        }
    }
    colors
}

fn dist_sq(a: u32, b: (i32, i32, i32)) -> i32 {
    let dr = ((a >> 16) & 0xff) as i32 - b.0;
    let dg = ((a >> 8) & 0xff) as i32 - b.1;
    let db = (a & 0xff) as i32 - b.2;
    dr * dr + dg * dg + db * db
}

fn cell_center(rgb: u32) -> (i32, i32, i32) {
    let c = |v: u32| ((v & 0xf8) + 4) as i32;
    (c(rgb >> 16), c(rgb >> 8), c(rgb))
}

#[test]
fn inverse_self_consistency_reg() {
    let mut rp = RegParams::new("inverse_self");

    let cube = color_cube();
    let map = InverseColorMap::from_rgb(&cube, None).unwrap();
    rp.compare_values(216.0, map.palette_len() as f64, 0.0);
    for (i, &c) in cube.iter().enumerate() {
        rp.compare_values(i as f64, map.nearest(c) as f64, 0.0);
    }

    let gray = Palette::grayscale(16).unwrap();
    let map = InverseColorMap::new(&gray).unwrap();
    for i in 0..gray.len() {
        rp.compare_values(i as f64, map.nearest(gray.rgb(i).unwrap()) as f64, 0.0);
    }

    assert!(rp.cleanup(), "inverse_self regression test failed");
}

#[test]
fn inverse_nearest_reg() {
    let mut rp = RegParams::new("inverse_nearest");

    let colors = [
        0x0a1b2c, 0xf0e0d0, 0x808080, 0x33cc33, 0xcc3333, 0x3333cc, 0x101010, 0xfafa00,
    ];
    let map = InverseColorMap::from_rgb(&colors, None).unwrap();

    // Stride through the color space with an odd step.
    let mut q = 0u32;
    while q <= 0xff_ffff {
        let center = cell_center(q);
        let got = map.nearest(q);
        let best = colors.iter().map(|&c| dist_sq(c, center)).min().unwrap_or(0);
        rp.compare_values(best as f64, dist_sq(colors[got], center) as f64, 0.0);
        q += 40_009;
    }

    assert!(rp.cleanup(), "inverse_nearest regression test failed");
}

#[test]
fn inverse_transparent_reg() {
    let mut rp = RegParams::new("inverse_transparent");

    let mut pal = Palette::from_rgb(&[0x000000, 0xffffff]).unwrap();
    let t = pal.push(Rgba::TRANSPARENT).unwrap();
    pal.set_transparent_index(Some(t)).unwrap();

    let lookup = PaletteLookup::new(&pal).unwrap();
    rp.compare_values(0.0, lookup.index_of(0x000000) as f64, 0.0);
    rp.compare_values(1.0, lookup.index_of(0xffffff) as f64, 0.0);
    rp.compare_values(t as f64, lookup.index_of_argb(0x0000_0000) as f64, 0.0);
    rp.compare_values(0.0, lookup.index_of_argb(0xff00_0000) as f64, 0.0);

    // The transparent entry is black too, but only opaque black is reachable.
    let mut q = 0u32;
    while q <= 0xff_ffff {
        rp.compare_values(1.0, (lookup.index_of(q) != t) as u8 as f64, 0.0);
        q += 65_537;
    }

    assert!(rp.cleanup(), "inverse_transparent regression test failed");
}
