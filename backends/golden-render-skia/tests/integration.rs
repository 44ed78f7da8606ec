//! Rendering against real host fonts
//!
//! Every test skips when fontconfig cannot resolve a usable font, so the
//! suite stays green on minimal CI images.

// this_file: backends/golden-render-skia/tests/integration.rs

use std::sync::Arc;

use golden_core::{
    traits::{FontRef, Renderer, Shaper},
    Color, FontResolver, GoldenImage, RenderParams, ShapingParams,
};
use golden_fontdb::{FcMatchResolver, Font};
use golden_render_skia::SkiaRenderer;
use golden_shape_hr::HarfrustShaper;

fn host_font(family: &str) -> Option<Arc<dyn FontRef>> {
    let resolved = FcMatchResolver::new().resolve(family).ok()?;
    let font = Font::from_file(&resolved.path).ok()?;
    Some(Arc::new(font))
}

fn render(font: Arc<dyn FontRef>, text: &str, params: &RenderParams) -> GoldenImage {
    let shaped = HarfrustShaper::new()
        .shape(
            text,
            font.clone(),
            &ShapingParams { size: params.size },
        )
        .expect("shaping should succeed");
    SkiaRenderer::new()
        .render(&shaped, font, params)
        .expect("rendering should succeed")
}

fn params(size: f32, width: u32, height: u32) -> RenderParams {
    RenderParams {
        size,
        width,
        height,
        ..RenderParams::default()
    }
}

/// Columns and rows holding any pixel brighter than `threshold`
fn ink_bounds(image: &GoldenImage, threshold: u8) -> Option<(u32, u32, u32, u32)> {
    let mut bounds: Option<(u32, u32, u32, u32)> = None;
    for y in 0..image.height {
        for x in 0..image.width {
            let px = image.pixel(x, y)?;
            if px.r > threshold {
                bounds = Some(match bounds {
                    None => (x, y, x, y),
                    Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
                });
            }
        }
    }
    bounds
}

#[test]
fn test_hello_when_rendered_then_exact_canvas_with_white_on_black() {
    let Some(font) = host_font("monospace") else {
        eprintln!("Skipping test: no monospace font on this host");
        return;
    };

    let image = render(font, "Hello, World!", &params(15.0, 200, 40));

    assert_eq!(image.dimensions(), (200, 40));
    assert!(image.pixels().all(|px| px.a == 255), "every pixel is opaque");
    assert!(image.pixels().all(|px| px.r == px.g && px.g == px.b), "grayscale only");
    assert_eq!(image.pixel(0, 0), Some(Color::black()));
    assert_eq!(image.pixel(199, 39), Some(Color::black()));
    assert!(image.pixels().any(|px| px.r > 200), "stems render close to full white");

    let (x0, y0, _, _) = ink_bounds(&image, 64).expect("text should leave ink");
    assert!((8..=14).contains(&x0), "ink starts near left=10, got {x0}");
    assert!((10..=22).contains(&y0), "ink starts below top=10, got {y0}");
}

#[test]
fn test_overflowing_text_when_rendered_then_clipped_not_resized() {
    let Some(font) = host_font("monospace") else {
        eprintln!("Skipping test: no monospace font on this host");
        return;
    };

    let long = "mmmmmmmmmmmmmmmmmmmmmmmm";
    let image = render(font, long, &params(22.0, 100, 50));

    assert_eq!(image.dimensions(), (100, 50));
    let (_, _, x1, _) = ink_bounds(&image, 64).expect("text should leave ink");
    assert!(x1 >= 90, "ink runs up to the right edge, got {x1}");
}

#[test]
fn test_monospace_run_when_hinted_then_uniform_pitch() {
    let Some(font) = host_font("monospace") else {
        eprintln!("Skipping test: no monospace font on this host");
        return;
    };

    // Right ink edge of a run of n m's; each extra m moves it by one pitch
    let right_edge = |n: usize| {
        let image = render(font.clone(), &"m".repeat(n), &params(22.0, 250, 60));
        ink_bounds(&image, 64).expect("text should leave ink").2
    };

    let first = right_edge(1);
    let pitch = right_edge(2) - first;
    assert!(pitch > 0);
    for n in 3..=8 {
        assert_eq!(
            right_edge(n) - first,
            (n as u32 - 1) * pitch,
            "m #{n} is off the {pitch}px grid"
        );
    }
}

#[test]
fn test_document_when_hinted_then_every_origin_on_one_pitch() {
    let Some(font) = host_font("monospace") else {
        eprintln!("Skipping test: no monospace font on this host");
        return;
    };

    // Each letter drawn alone at its slot on the "mm" pitch spans the same
    // columns as the word drawn in one go
    let word = "document";
    let full = render(font.clone(), word, &params(22.0, 250, 60));
    let pitch = {
        let one = ink_bounds(&render(font.clone(), "m", &params(22.0, 250, 60)), 64)
            .expect("ink")
            .2;
        let two = ink_bounds(&render(font.clone(), "mm", &params(22.0, 250, 60)), 64)
            .expect("ink")
            .2;
        (two - one) as i32
    };

    let mut composed = GoldenImage::new_filled(250, 60, Color::black());
    for (i, ch) in word.chars().enumerate() {
        let letter = render(
            font.clone(),
            &ch.to_string(),
            &RenderParams {
                left: 10 + i as i32 * pitch,
                ..params(22.0, 250, 60)
            },
        );
        for (dst, src) in composed.data.chunks_exact_mut(4).zip(letter.data.chunks_exact(4)) {
            if src[0] > dst[0] {
                dst.copy_from_slice(src);
            }
        }
    }

    let (fx0, _, fx1, _) = ink_bounds(&full, 64).expect("word ink");
    let (cx0, _, cx1, _) = ink_bounds(&composed, 64).expect("composed ink");
    assert_eq!((fx0, fx1), (cx0, cx1), "letters sit on a {pitch}px pitch");
}

#[test]
fn test_same_inputs_when_rendered_twice_then_identical() {
    let Some(font) = host_font("serif") else {
        eprintln!("Skipping test: no serif font on this host");
        return;
    };

    let p = params(22.0, 100, 50);
    let first = render(font.clone(), "AV", &p);
    let second = render(font, "AV", &p);
    assert_eq!(first, second);
}

#[test]
fn test_origin_when_moved_then_ink_moves_with_it() {
    let Some(font) = host_font("monospace") else {
        eprintln!("Skipping test: no monospace font on this host");
        return;
    };

    let base = render(font.clone(), "mm", &params(22.0, 100, 50));
    let shifted = render(
        font,
        "mm",
        &RenderParams {
            left: 20,
            top: 15,
            ..params(22.0, 100, 50)
        },
    );

    let (bx, by, _, _) = ink_bounds(&base, 64).expect("base ink");
    let (sx, sy, _, _) = ink_bounds(&shifted, 64).expect("shifted ink");
    assert_eq!(sx, bx + 10);
    assert_eq!(sy, by + 5);
}

#[test]
fn test_unhinted_when_requested_then_still_exact_canvas() {
    let Some(font) = host_font("monospace") else {
        eprintln!("Skipping test: no monospace font on this host");
        return;
    };

    let image = render(
        font,
        "fn main() {",
        &RenderParams {
            hinting: false,
            ..params(15.0, 200, 40)
        },
    );
    assert_eq!(image.dimensions(), (200, 40));
    assert!(ink_bounds(&image, 64).is_some());
}

#[test]
fn test_empty_text_when_rendered_then_plain_background() {
    let Some(font) = host_font("monospace") else {
        eprintln!("Skipping test: no monospace font on this host");
        return;
    };

    let image = render(font, "", &params(22.0, 30, 20));
    assert_eq!(image, GoldenImage::new_filled(30, 20, Color::black()));
}
