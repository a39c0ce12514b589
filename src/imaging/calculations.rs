//! Pure calculation functions for the resize engine.
//!
//! All functions here are pure and testable without any I/O or pixel data:
//! dimension math for the fit/derive cases, centered paste offsets, and the
//! background-alpha lookup table.

/// Compute the content box that fits within `target` preserving the source
/// aspect ratio, never scaling up beyond the source.
///
/// A zero target axis is treated as unconstrained.
pub fn fit_within(source: (u32, u32), target: (u32, u32)) -> (u32, u32) {
    let (src_w, src_h) = source;
    let (tgt_w, tgt_h) = target;
    if src_w == 0 || src_h == 0 {
        return source;
    }

    let ratio_w = if tgt_w == 0 {
        1.0
    } else {
        tgt_w as f64 / src_w as f64
    };
    let ratio_h = if tgt_h == 0 {
        1.0
    } else {
        tgt_h as f64 / src_h as f64
    };
    let ratio = ratio_w.min(ratio_h).min(1.0);

    (
        (src_w as f64 * ratio).round().max(1.0) as u32,
        (src_h as f64 * ratio).round().max(1.0) as u32,
    )
}

/// Derive the missing dimension of a one-axis size from the source aspect
/// ratio. Returns the full target box.
///
/// Exactly one of `width`/`height` must be set; the set one drives.
pub fn derive_box(source: (u32, u32), width: Option<u32>, height: Option<u32>) -> (u32, u32) {
    let (src_w, src_h) = source;
    match (width, height) {
        (Some(w), None) => {
            let h = (src_h as f64 * w as f64 / src_w.max(1) as f64).round() as u32;
            (w, h.max(1))
        }
        (None, Some(h)) => {
            let w = (src_w as f64 * h as f64 / src_h.max(1) as f64).round() as u32;
            (w.max(1), h)
        }
        _ => (width.unwrap_or(src_w), height.unwrap_or(src_h)),
    }
}

/// Offset for pasting content of size `content` centered on a canvas axis of
/// size `canvas`: `ceil((canvas - content) / 2)` when the content is smaller,
/// 0 otherwise.
pub fn centered_offset(canvas: u32, content: u32) -> u32 {
    if content < canvas {
        (canvas - content).div_ceil(2)
    } else {
        0
    }
}

/// Output format family for background-alpha selection, keyed off the output
/// MIME type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MimeFamily {
    /// MIME type contains "png" — alpha-capable, inverted alpha convention.
    Png,
    /// Everything else (jpeg, gif, ...) — opaque-default convention.
    Opaque,
}

impl MimeFamily {
    pub fn from_mime(mime: &str) -> Self {
        if mime.contains("png") {
            MimeFamily::Png
        } else {
            MimeFamily::Opaque
        }
    }
}

/// Background alpha table, in the codec's 0–100 scale.
///
/// The two format families read the same two numbers inverted: opaque-default
/// formats use the value literally (0 = opaque, 100 = transparent), while the
/// png family inverts it. Kept as an explicit table so the inversion is
/// auditable in one place. Rows: (family, background_transparent, value).
const BACKGROUND_ALPHA: [(MimeFamily, bool, u8); 4] = [
    (MimeFamily::Opaque, false, 0),
    (MimeFamily::Opaque, true, 0), // opaque formats cannot carry transparency
    (MimeFamily::Png, false, 0),
    (MimeFamily::Png, true, 100),
];

/// Codec-scale background alpha for an output family and transparency flag.
pub fn background_alpha(family: MimeFamily, transparent: bool) -> u8 {
    BACKGROUND_ALPHA
        .iter()
        .find(|(f, t, _)| *f == family && *t == transparent)
        .map(|(_, _, v)| *v)
        .unwrap_or(0)
}

/// The 8-bit alpha channel value for a canvas pixel.
///
/// This is where the per-family inversion lands: the png family maps
/// 100 → fully transparent (0), 0 → fully opaque (255); opaque-default
/// families always produce an opaque pixel.
pub fn canvas_alpha_channel(family: MimeFamily, transparent: bool) -> u8 {
    match family {
        MimeFamily::Png => {
            let pct = background_alpha(family, transparent) as u32;
            (255 - pct * 255 / 100) as u8
        }
        MimeFamily::Opaque => 255,
    }
}
