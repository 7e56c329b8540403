use super::record::{CircleId, DataPoint, ScreenPoint};

/// Key of a glyph on the render surface. At most one preview glyph exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GlyphKey {
    Circle(CircleId),
    Preview,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlyphStyle {
    Preview,
    Committed,
}

/// Screen/data coordinate mapping owned by the host shell (pan and zoom).
pub trait ViewportAdapter {
    /// Must be stable for the duration of one gesture.
    fn to_data_space(&self, screen: ScreenPoint) -> DataPoint;

    fn reset_view(&mut self);
}

/// Glyph sink owned by the host shell. Both calls are idempotent per key.
pub trait RenderSurface {
    fn draw_circle(&mut self, key: GlyphKey, center: DataPoint, radius: f64, style: GlyphStyle);

    fn remove_circle(&mut self, key: GlyphKey);

    /// Drop every glyph, preview included.
    fn clear(&mut self);
}
