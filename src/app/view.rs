use crate::annot::{DataPoint, ScreenPoint, ViewportAdapter};
use egui::{Pos2, Rect, Vec2, pos2};

const FIT_MARGIN: f32 = 0.98;

/// Pan/zoom state of the canvas. Image pixel `(0, 0)` sits at
/// `rect.min + pan`, one pixel spans `zoom` screen points.
#[derive(Debug, Clone)]
pub struct CanvasView {
    rect: Rect,
    image_size: Vec2,
    zoom: f32,
    pan: Vec2,
    zoom_range: (f32, f32),
    pending_fit: bool,
}

impl CanvasView {
    pub const fn new(zoom_range: (f32, f32)) -> Self {
        Self {
            rect: Rect::NOTHING,
            image_size: Vec2::ZERO,
            zoom: 1.0,
            pan: Vec2::ZERO,
            zoom_range,
            pending_fit: false,
        }
    }

    pub const fn zoom(&self) -> f32 {
        self.zoom
    }

    /// A new image was loaded; fit it on the next frame the canvas is laid out.
    pub const fn set_image_size(&mut self, size: Vec2) {
        self.image_size = size;
        self.pending_fit = true;
    }

    /// Record where the canvas is this frame.
    pub fn set_viewport(&mut self, rect: Rect) {
        self.rect = rect;
        if self.pending_fit && rect.is_positive() {
            self.fit();
        }
    }

    pub fn image_rect(&self) -> Rect {
        Rect::from_min_size(self.rect.min + self.pan, self.image_size * self.zoom)
    }

    pub fn to_screen(&self, p: DataPoint) -> Pos2 {
        #[allow(clippy::cast_possible_truncation)]
        let local = Vec2::new(p.x as f32, p.y as f32) * self.zoom;
        self.rect.min + self.pan + local
    }

    pub fn to_data(&self, pos: Pos2) -> DataPoint {
        let local = (pos - self.rect.min - self.pan) / self.zoom;
        DataPoint::new(f64::from(local.x), f64::from(local.y))
    }

    pub fn screen_length(&self, data_len: f64) -> f32 {
        #[allow(clippy::cast_possible_truncation)]
        let len = data_len as f32;
        len * self.zoom
    }

    pub fn pan_by(&mut self, delta: Vec2) {
        self.pan += delta;
    }

    /// Multiply zoom by `factor`, keeping the data point under `anchor` fixed.
    pub fn zoom_at(&mut self, anchor: Pos2, factor: f32) {
        let (min, max) = self.zoom_range;
        let new_zoom = (self.zoom * factor).clamp(min, max);
        if (new_zoom - self.zoom).abs() <= f32::EPSILON {
            return;
        }
        let anchor_local = anchor - self.rect.min;
        let ratio = new_zoom / self.zoom;
        self.pan = anchor_local - (anchor_local - self.pan) * ratio;
        self.zoom = new_zoom;
    }

    /// Show the whole image centred in the canvas.
    pub fn fit(&mut self) {
        self.pending_fit = false;
        let viewport = self.rect.size();
        if self.image_size.x <= 0.0
            || self.image_size.y <= 0.0
            || !viewport.x.is_finite()
            || viewport.x <= 0.0
            || viewport.y <= 0.0
        {
            self.zoom = 1.0;
            self.pan = Vec2::ZERO;
            return;
        }
        let (min, max) = self.zoom_range;
        let fit_zoom =
            (viewport.x / self.image_size.x).min(viewport.y / self.image_size.y) * FIT_MARGIN;
        self.zoom = fit_zoom.clamp(min, max);
        self.pan = (viewport - self.image_size * self.zoom) * 0.5;
    }
}

impl ViewportAdapter for CanvasView {
    fn to_data_space(&self, screen: ScreenPoint) -> DataPoint {
        self.to_data(pos2(screen.x, screen.y))
    }

    fn reset_view(&mut self) {
        self.fit();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view_800x600_with_400x300_image() -> CanvasView {
        let mut view = CanvasView::new((0.05, 40.0));
        view.set_image_size(Vec2::new(400.0, 300.0));
        view.set_viewport(Rect::from_min_size(pos2(10.0, 20.0), Vec2::new(800.0, 600.0)));
        view
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn fit_centres_image() {
        let view = view_800x600_with_400x300_image();
        assert!((view.zoom() - 2.0 * FIT_MARGIN).abs() < 1e-5);
        let img = view.image_rect();
        assert!((img.center().x - 410.0).abs() < 1e-3);
        assert!((img.center().y - 320.0).abs() < 1e-3);
    }

    #[test]
    fn screen_data_roundtrip() {
        let mut view = view_800x600_with_400x300_image();
        view.pan_by(Vec2::new(-37.0, 12.5));
        let p = DataPoint::new(123.0, 45.5);
        let back = view.to_data(view.to_screen(p));
        assert!(close(back.x, p.x) && close(back.y, p.y));
    }

    #[test]
    fn zoom_keeps_anchor_fixed() {
        let mut view = view_800x600_with_400x300_image();
        let anchor = pos2(300.0, 250.0);
        let before = view.to_data(anchor);
        view.zoom_at(anchor, 1.1);
        view.zoom_at(anchor, 1.1);
        let after = view.to_data(anchor);
        assert!(close(before.x, after.x) && close(before.y, after.y));
        assert!(view.zoom() > 2.0);
    }

    #[test]
    fn zoom_is_clamped() {
        let mut view = view_800x600_with_400x300_image();
        for _ in 0..200 {
            view.zoom_at(pos2(0.0, 0.0), 2.0);
        }
        assert!((view.zoom() - 40.0).abs() < 1e-3);
    }

    #[test]
    fn reset_view_refits_after_pan_and_zoom() {
        let mut view = view_800x600_with_400x300_image();
        let fitted = view.image_rect();
        view.pan_by(Vec2::new(100.0, -50.0));
        view.zoom_at(pos2(200.0, 200.0), 1.5);
        ViewportAdapter::reset_view(&mut view);
        let refit = view.image_rect();
        assert!((refit.min - fitted.min).length() < 1e-3);
        assert!((refit.max - fitted.max).length() < 1e-3);
    }

    #[test]
    fn adapter_maps_screen_points() {
        let view = view_800x600_with_400x300_image();
        let origin = view.image_rect().min;
        let p = view.to_data_space(ScreenPoint::new(origin.x, origin.y));
        assert!(close(p.x, 0.0) && close(p.y, 0.0));
    }
}
