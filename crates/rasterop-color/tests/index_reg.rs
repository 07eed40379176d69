//! Indexing pipeline regression test
//!
//! Runs whole buffers of every layout through quantize + dither, including
//! bitmask transparency and a resample-then-index chain.

use rasterop_color::{
    ColorSelection, DitherMode, IndexOp, IndexOptions, Transparency, index_image,
    index_image_with_palette,
};
use rasterop_core::{ImageOp, Palette, Rgba, SampleType};
use rasterop_test::{RegParams, images};
use rasterop_transform::{FilterType, resample};

#[test]
fn index_layouts_reg() {
    let mut rp = RegParams::new("index_layouts");

    let inputs = vec![
        images::gradient_rgb(40, 30).unwrap(),
        images::gray_ramp(40, 30).unwrap(),
        images::solid_u16(40, 30, 3, 40000).unwrap(),
        images::half_transparent(40, 30, 0x3366cc).unwrap(),
    ];
    for src in &inputs {
        let Some(out) = rp.check(index_image(src, &IndexOptions::default())) else {
            continue;
        };
        rp.compare_values(1.0, out.is_indexed() as u8 as f64, 0.0);
        rp.compare_values(SampleType::U8.bits() as f64, out.sample_type().bits() as f64, 0.0);
        rp.compare_values(src.width() as f64, out.width() as f64, 0.0);
        rp.compare_values(src.height() as f64, out.height() as f64, 0.0);
    }

    // A uniform 16-bit image reduces to one 8-bit color.
    let out = index_image(&inputs[2], &IndexOptions::default()).unwrap();
    rp.compare_values(1.0, out.palette().map_or(0, |p| p.len()) as f64, 0.0);
    rp.compare_values((40000u32 >> 8) as f64, out.rgb(5, 5).map_or(0, |c| c.0) as f64, 0.0);

    assert!(rp.cleanup(), "index_layouts regression test failed");
}

#[test]
fn index_color_budget_reg() {
    let mut rp = RegParams::new("index_budget");

    let src = images::gradient_rgb(80, 60).unwrap();
    for (max_colors, dither) in [
        (4u32, DitherMode::None),
        (16, DitherMode::Diffusion),
        (64, DitherMode::DiffusionAlternateScans),
    ] {
        let opts = IndexOptions {
            max_colors,
            dither,
            selection: ColorSelection::Fast,
            ..Default::default()
        };
        let out = IndexOp::new(opts).apply(&src).unwrap();
        let n = images::distinct_colors(&out);
        rp.compare_values(1.0, (n <= max_colors as usize) as u8 as f64, 0.0);
        let rgb = out.expand_palette().unwrap();
        rp.compare_values(images::band_mean(&src, 0), images::band_mean(&rgb, 0), 16.0);
    }

    assert!(rp.cleanup(), "index_budget regression test failed");
}

#[test]
fn index_transparency_reg() {
    let mut rp = RegParams::new("index_transparency");

    let src = images::half_transparent(16, 8, 0x00aa55).unwrap();
    let opts = IndexOptions {
        transparency: Transparency::Bitmask,
        ..Default::default()
    };
    let out = index_image(&src, &opts).unwrap();
    let t = out.palette().and_then(|p| p.transparent_index());
    rp.compare_values(1.0, t.is_some() as u8 as f64, 0.0);
    let t = t.unwrap_or(0) as u32;
    for y in 0..8 {
        rp.compare_values(t as f64, out.sample(0, y, 0).unwrap_or(999) as f64, 0.0);
        rp.compare_values(t as f64, out.sample(7, y, 0).unwrap_or(999) as f64, 0.0);
        rp.compare_values(0.0, (out.sample(8, y, 0) == Some(t)) as u8 as f64, 0.0);
    }
    rp.compare_values(0x00aa55 as f64, (out.argb(15, 7).unwrap_or(0) & 0xffffff) as f64, 0.0);

    // Flattening onto a matte removes the need for a transparent entry.
    let flat = index_image(
        &src,
        &IndexOptions {
            matte: Some(Rgba::rgb(0, 0, 0)),
            ..opts.clone()
        },
    )
    .unwrap();
    let flat_t = flat.palette().and_then(|p| p.transparent_index());
    rp.compare_values(0.0, flat_t.is_some() as u8 as f64, 0.0);
    rp.compare_values(0.0, (flat.argb(0, 0).unwrap_or(1) & 0xffffff) as f64, 0.0);

    // A fixed palette with a transparent slot.
    let mut pal = Palette::monochrome();
    let slot = pal.push(Rgba::TRANSPARENT).unwrap();
    pal.set_transparent_index(Some(slot)).unwrap();
    let fixed = index_image_with_palette(&src, &pal, &opts).unwrap();
    rp.compare_values(slot as f64, fixed.sample(0, 0, 0).unwrap_or(0) as f64, 0.0);
    let right = fixed.sample(15, 0, 0).unwrap_or(9) as usize;
    rp.compare_values(1.0, (right < slot) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "index_transparency regression test failed");
}

#[test]
fn index_after_resample_reg() {
    let mut rp = RegParams::new("index_after_resample");

    let src = images::gradient_rgb(64, 64).unwrap();
    let small = resample(&src, 32, 24, FilterType::Mitchell).unwrap();
    let opts = IndexOptions {
        max_colors: 16,
        ..Default::default()
    };
    let out = index_image(&small, &opts).unwrap();
    rp.compare_values(32.0, out.width() as f64, 0.0);
    rp.compare_values(24.0, out.height() as f64, 0.0);
    rp.compare_values(1.0, (images::distinct_colors(&out) <= 16) as u8 as f64, 0.0);

    // Point sampling keeps an indexed buffer indexed.
    let bigger = resample(&out, 64, 48, FilterType::Point).unwrap();
    rp.compare_values(1.0, (bigger.palette() == out.palette()) as u8 as f64, 0.0);

    assert!(rp.cleanup(), "index_after_resample regression test failed");
}
