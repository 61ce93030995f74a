use glam::Vec2;
use ripple_core::{normalize_key, Rect};

// ---------------- Pointer helpers ----------------

/// Client-space point to canvas backing-store pixels, given the canvas's
/// client rectangle and its backing size.
#[inline]
pub fn client_to_canvas_px(client: Vec2, canvas_rect: Rect, backing: Vec2) -> Vec2 {
    let local = client - canvas_rect.origin;
    let (w, h) = (canvas_rect.width(), canvas_rect.height());
    if w > 0.0 && h > 0.0 {
        Vec2::new(local.x / w * backing.x, local.y / h * backing.y)
    } else {
        local
    }
}

/// Frame delta in seconds; stalls (background tabs) are capped at `max_sec`.
#[inline]
pub fn clamp_frame_dt(dt_sec: f32, max_sec: f32) -> f32 {
    if dt_sec.is_finite() && dt_sec > 0.0 {
        dt_sec.min(max_sec)
    } else {
        0.0
    }
}

// ---------------- Override helpers ----------------

/// `data-base-delay` -> `base-delay`. Attributes outside the `data-`
/// namespace are not overrides.
pub fn override_key_from_attribute(attr: &str) -> Option<String> {
    let lower = attr.trim().to_ascii_lowercase();
    let key = normalize_key(lower.strip_prefix("data-")?);
    (!key.is_empty()).then_some(key)
}

/// Keep only the `data-*` attributes, in document order.
pub fn collect_overrides<I>(attrs: I) -> Vec<(String, String)>
where
    I: IntoIterator<Item = (String, String)>,
{
    attrs
        .into_iter()
        .filter_map(|(name, value)| override_key_from_attribute(&name).map(|k| (k, value)))
        .collect()
}
