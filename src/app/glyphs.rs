use super::view::CanvasView;
use crate::annot::{DataPoint, GlyphKey, GlyphStyle, RenderSurface};
use crate::config::AppConfig;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Glyph {
    center: DataPoint,
    radius: f64,
    style: GlyphStyle,
}

/// Circles currently shown over the image, keyed like the store. Painted in
/// key order, so the preview lands on top of committed circles.
#[derive(Debug, Default)]
pub struct GlyphLayer {
    glyphs: BTreeMap<GlyphKey, Glyph>,
}

impl GlyphLayer {
    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn paint(&self, painter: &egui::Painter, view: &CanvasView, config: &AppConfig) {
        let committed = config.circle.stroke();
        let preview = config.preview.stroke();
        for glyph in self.glyphs.values() {
            let stroke = match glyph.style {
                GlyphStyle::Committed => committed,
                GlyphStyle::Preview => preview,
            };
            let center = view.to_screen(glyph.center);
            let radius = view.screen_length(glyph.radius);
            if radius < 0.5 {
                painter.circle_filled(center, stroke.width, stroke.color);
            } else {
                painter.circle_stroke(center, radius, stroke);
            }
        }
    }
}

impl RenderSurface for GlyphLayer {
    fn draw_circle(&mut self, key: GlyphKey, center: DataPoint, radius: f64, style: GlyphStyle) {
        self.glyphs.insert(
            key,
            Glyph {
                center,
                radius,
                style,
            },
        );
    }

    fn remove_circle(&mut self, key: GlyphKey) {
        self.glyphs.remove(&key);
    }

    fn clear(&mut self) {
        self.glyphs.clear();
    }
}
