//! The compositing engine: one decoded image + one size spec → one output
//! image.
//!
//! Branch precedence (most specific first):
//!
//! 1. One dimension unset — derive it from the source aspect ratio; never
//!    upscale along the driving axis.
//! 2. Outbound — resize-and-crop to exactly fill the box (canvas settings
//!    are irrelevant, the crop already yields exact dimensions).
//! 3. Fixed canvas — fit content within the box, paste centered onto a
//!    background-filled canvas of exactly the requested dimensions.
//! 4. Plain inset/exact — resize without padding.
//!
//! For inset and exact without a forced canvas, a pre-check returns an
//! unmodified copy when the source already fits within the box on both axes
//! or the box is degenerate (both dimensions zero). This avoids upscaling
//! small originals and a zero-size resize.
//!
//! All per-call options travel in [`RenderTarget`]; the engine holds no
//! state between invocations.

use super::calculations::{MimeFamily, canvas_alpha_channel, centered_offset, derive_box, fit_within};
use crate::config::FitMode;
use crate::registry::SizeSpec;
use image::imageops::{self, FilterType};
use image::{DynamicImage, GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};

/// Per-invocation rendering options: background fill and the output format
/// family that selects the alpha convention.
#[derive(Debug, Clone, Copy)]
pub struct RenderTarget {
    pub background: [u8; 3],
    pub family: MimeFamily,
}

/// Produce the output image for `spec` from a decoded source.
pub fn render(img: &DynamicImage, spec: &SizeSpec, target: &RenderTarget) -> DynamicImage {
    let (src_w, src_h) = img.dimensions();

    let (width, height) = match (spec.width, spec.height) {
        (Some(w), Some(h)) => (w, h),
        // derive case: the one configured axis drives
        (Some(_), None) | (None, Some(_)) => return render_derived(img, spec, (src_w, src_h)),
        // rejected by the registry; nothing sensible to do
        (None, None) => return img.clone(),
    };

    if spec.mode == FitMode::Outbound {
        if width == 0 || height == 0 {
            return img.clone();
        }
        return img.resize_to_fill(width, height, FilterType::Lanczos3);
    }

    let degenerate = width == 0 && height == 0;
    let fits = src_w <= width && src_h <= height;
    if degenerate || (fits && !spec.fixed_canvas) {
        return img.clone();
    }

    let content = match spec.mode {
        FitMode::Exact => img.resize_exact(width, height, FilterType::Lanczos3),
        _ => {
            let (content_w, content_h) = fit_within((src_w, src_h), (width, height));
            if (content_w, content_h) == (src_w, src_h) {
                img.clone()
            } else {
                img.resize_exact(content_w, content_h, FilterType::Lanczos3)
            }
        }
    };

    if !spec.fixed_canvas {
        return content;
    }

    let (content_w, content_h) = content.dimensions();
    if content_w == width && content_h == height {
        return content;
    }

    compose_on_canvas(&content, (width, height), spec, target)
}

/// Resize to a box with one axis derived from the source aspect ratio.
fn render_derived(img: &DynamicImage, spec: &SizeSpec, source: (u32, u32)) -> DynamicImage {
    let (src_w, src_h) = source;
    let no_upscale = match (spec.width, spec.height) {
        (Some(w), None) => w >= src_w,
        (None, Some(h)) => h >= src_h,
        _ => unreachable!("render_derived requires exactly one configured axis"),
    };
    if no_upscale {
        return img.clone();
    }
    let (w, h) = derive_box(source, spec.width, spec.height);
    img.resize_exact(w, h, FilterType::Lanczos3)
}

/// Paste `content` centered onto a background-filled canvas of exactly
/// `canvas_size`.
///
/// The canvas pixel format follows the output family: the png family gets an
/// RGBA canvas so a transparent background survives encoding, opaque formats
/// get plain RGB.
fn compose_on_canvas(
    content: &DynamicImage,
    canvas_size: (u32, u32),
    spec: &SizeSpec,
    target: &RenderTarget,
) -> DynamicImage {
    let (width, height) = canvas_size;
    let (content_w, content_h) = content.dimensions();
    let x = centered_offset(width, content_w) as i64;
    let y = centered_offset(height, content_h) as i64;
    let [r, g, b] = target.background;

    match target.family {
        MimeFamily::Png => {
            let alpha = canvas_alpha_channel(target.family, spec.background_transparent);
            let mut canvas = RgbaImage::from_pixel(width, height, Rgba([r, g, b, alpha]));
            imageops::overlay(&mut canvas, &content.to_rgba8(), x, y);
            DynamicImage::ImageRgba8(canvas)
        }
        MimeFamily::Opaque => {
            let mut canvas = RgbImage::from_pixel(width, height, Rgb([r, g, b]));
            imageops::overlay(&mut canvas, &content.to_rgb8(), x, y);
            DynamicImage::ImageRgb8(canvas)
        }
    }
}
