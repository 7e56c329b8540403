use super::host::{GlyphKey, GlyphStyle, RenderSurface, ViewportAdapter};
use super::record::{CircleRecord, DataPoint, ScreenPoint, circle_from_diameter};
use super::store::CircleStore;
use super::undo::{UndoKind, UndoLog};
use log::{debug, info, warn};

/// Pointer buttons the controller reacts to. Pan/zoom buttons stay with the
/// viewport and are never forwarded here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerButton {
    Draw,
    Delete,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press {
        button: PointerButton,
        at: ScreenPoint,
    },
    Move {
        at: ScreenPoint,
    },
    Release {
        button: PointerButton,
        at: ScreenPoint,
    },
    /// Pointer left the canvas, or the draw button was released outside it.
    Leave,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureState {
    Idle,
    Drawing { anchor: DataPoint },
}

/// What a single event did, for status reporting in the host shell.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureOutcome {
    Ignored,
    DrawStarted,
    PreviewUpdated,
    Committed(CircleRecord),
    /// Zero-length drag: nothing committed.
    Discarded,
    Cancelled,
    Deleted(CircleRecord),
    /// Delete click that hit no circle.
    Missed,
}

/// Owns the circles and their history for one open document and turns
/// pointer events into store mutations and render requests.
#[derive(Debug)]
pub struct GestureController {
    store: CircleStore,
    history: UndoLog,
    state: GestureState,
}

impl Default for GestureController {
    fn default() -> Self {
        Self {
            store: CircleStore::new(),
            history: UndoLog::new(),
            state: GestureState::Idle,
        }
    }
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub const fn store(&self) -> &CircleStore {
        &self.store
    }

    pub const fn state(&self) -> GestureState {
        self.state
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.len()
    }

    pub fn handle(
        &mut self,
        event: PointerEvent,
        viewport: &impl ViewportAdapter,
        surface: &mut impl RenderSurface,
    ) -> GestureOutcome {
        match event {
            PointerEvent::Press {
                button: PointerButton::Draw,
                at,
            } => {
                let anchor = viewport.to_data_space(at);
                self.state = GestureState::Drawing { anchor };
                surface.draw_circle(GlyphKey::Preview, anchor, 0.0, GlyphStyle::Preview);
                debug!("Drawing from ({:.1}, {:.1})", anchor.x, anchor.y);
                GestureOutcome::DrawStarted
            }
            PointerEvent::Press {
                button: PointerButton::Delete,
                at,
            } => self.delete_at(viewport.to_data_space(at), surface),
            PointerEvent::Move { at } => {
                let GestureState::Drawing { anchor } = self.state else {
                    return GestureOutcome::Ignored;
                };
                let (center, radius) = circle_from_diameter(anchor, viewport.to_data_space(at));
                surface.draw_circle(GlyphKey::Preview, center, radius, GlyphStyle::Preview);
                GestureOutcome::PreviewUpdated
            }
            PointerEvent::Release {
                button: PointerButton::Draw,
                at,
            } => {
                let GestureState::Drawing { anchor } = self.state else {
                    return GestureOutcome::Ignored;
                };
                self.state = GestureState::Idle;
                let (center, radius) = circle_from_diameter(anchor, viewport.to_data_space(at));
                self.commit(center, radius, surface)
            }
            PointerEvent::Release {
                button: PointerButton::Delete,
                ..
            } => GestureOutcome::Ignored,
            PointerEvent::Leave => self.cancel(surface),
        }
    }

    fn commit(
        &mut self,
        center: DataPoint,
        radius: f64,
        surface: &mut impl RenderSurface,
    ) -> GestureOutcome {
        surface.remove_circle(GlyphKey::Preview);
        let record = match self.store.add(center.x, center.y, radius) {
            Ok(id) => CircleRecord {
                id,
                x: center.x,
                y: center.y,
                r: radius,
            },
            Err(err) => {
                debug!("Drag discarded: {err}");
                return GestureOutcome::Discarded;
            }
        };
        self.history.push_add(record);
        surface.draw_circle(
            GlyphKey::Circle(record.id),
            record.center(),
            record.r,
            GlyphStyle::Committed,
        );
        info!("Add a circle at ({:.1}, {:.1})", record.x, record.y);
        GestureOutcome::Committed(record)
    }

    fn delete_at(&mut self, p: DataPoint, surface: &mut impl RenderSurface) -> GestureOutcome {
        let Some(id) = self.store.find_at(p) else {
            return GestureOutcome::Missed;
        };
        match self.store.remove(id) {
            Ok(record) => {
                self.history.push_delete(record);
                surface.remove_circle(GlyphKey::Circle(id));
                info!("Delete a circle at ({:.1}, {:.1})", record.x, record.y);
                GestureOutcome::Deleted(record)
            }
            Err(err) => {
                warn!("Delete failed: {err}");
                GestureOutcome::Missed
            }
        }
    }

    /// Abandon an in-progress drag and drop its preview.
    pub fn cancel(&mut self, surface: &mut impl RenderSurface) -> GestureOutcome {
        if matches!(self.state, GestureState::Idle) {
            return GestureOutcome::Ignored;
        }
        self.state = GestureState::Idle;
        surface.remove_circle(GlyphKey::Preview);
        debug!("Drawing cancelled");
        GestureOutcome::Cancelled
    }

    /// Reverse the last add/delete. Returns `false` when there was nothing to undo.
    pub fn undo(&mut self, surface: &mut impl RenderSurface) -> bool {
        let Some(entry) = self.history.peek().copied() else {
            return false;
        };
        match self.history.undo(&mut self.store) {
            Ok(false) => false,
            Ok(true) => {
                let record = entry.record;
                match entry.kind {
                    UndoKind::Add => surface.remove_circle(GlyphKey::Circle(record.id)),
                    UndoKind::Delete => surface.draw_circle(
                        GlyphKey::Circle(record.id),
                        record.center(),
                        record.r,
                        GlyphStyle::Committed,
                    ),
                }
                debug!("Undid {:?} of circle {}", entry.kind, record.id);
                true
            }
            Err(err) => {
                warn!("Undo found the circle table out of sync: {err}");
                self.resync(surface);
                true
            }
        }
    }

    pub fn reset_view(&self, viewport: &mut impl ViewportAdapter) {
        viewport.reset_view();
    }

    /// Replace every circle (e.g. after loading a table). History is cleared.
    pub fn replace_all(
        &mut self,
        records: impl IntoIterator<Item = CircleRecord>,
        surface: &mut impl RenderSurface,
    ) {
        self.store.replace_all(records);
        self.history.clear();
        self.state = GestureState::Idle;
        self.resync(surface);
    }

    /// Start an empty document.
    pub fn clear(&mut self, surface: &mut impl RenderSurface) {
        self.store.clear();
        self.history.clear();
        self.state = GestureState::Idle;
        surface.clear();
    }

    /// Redraw every committed glyph from the store. Any preview is dropped.
    pub fn resync(&mut self, surface: &mut impl RenderSurface) {
        surface.clear();
        self.state = GestureState::Idle;
        for record in self.store.list() {
            surface.draw_circle(
                GlyphKey::Circle(record.id),
                record.center(),
                record.r,
                GlyphStyle::Committed,
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annot::record::CircleId;
    use std::collections::BTreeMap;

    /// Screen pixels map to data space with a fixed scale and offset.
    struct AffineView {
        scale: f64,
        offset: (f64, f64),
        resets: usize,
    }

    impl ViewportAdapter for AffineView {
        fn to_data_space(&self, screen: ScreenPoint) -> DataPoint {
            DataPoint::new(
                f64::from(screen.x).mul_add(self.scale, self.offset.0),
                f64::from(screen.y).mul_add(self.scale, self.offset.1),
            )
        }

        fn reset_view(&mut self) {
            self.resets += 1;
        }
    }

    fn identity() -> AffineView {
        AffineView {
            scale: 1.0,
            offset: (0.0, 0.0),
            resets: 0,
        }
    }

    #[derive(Default)]
    struct Recorder {
        glyphs: BTreeMap<GlyphKey, (DataPoint, f64, GlyphStyle)>,
        preview_draws: usize,
    }

    impl RenderSurface for Recorder {
        fn draw_circle(&mut self, key: GlyphKey, center: DataPoint, radius: f64, style: GlyphStyle) {
            if key == GlyphKey::Preview {
                self.preview_draws += 1;
            }
            self.glyphs.insert(key, (center, radius, style));
        }

        fn remove_circle(&mut self, key: GlyphKey) {
            self.glyphs.remove(&key);
        }

        fn clear(&mut self) {
            self.glyphs.clear();
        }
    }

    impl Recorder {
        fn circle_keys(&self) -> Vec<u64> {
            self.glyphs
                .keys()
                .filter_map(|k| match k {
                    GlyphKey::Circle(id) => Some(id.0),
                    GlyphKey::Preview => None,
                })
                .collect()
        }

        fn has_preview(&self) -> bool {
            self.glyphs.contains_key(&GlyphKey::Preview)
        }
    }

    fn press(button: PointerButton, x: f32, y: f32) -> PointerEvent {
        PointerEvent::Press {
            button,
            at: ScreenPoint::new(x, y),
        }
    }

    fn moved(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Move {
            at: ScreenPoint::new(x, y),
        }
    }

    fn release(x: f32, y: f32) -> PointerEvent {
        PointerEvent::Release {
            button: PointerButton::Draw,
            at: ScreenPoint::new(x, y),
        }
    }

    fn drag(
        ctl: &mut GestureController,
        view: &AffineView,
        surface: &mut Recorder,
        from: (f32, f32),
        to: (f32, f32),
    ) -> GestureOutcome {
        ctl.handle(press(PointerButton::Draw, from.0, from.1), view, surface);
        ctl.handle(moved(to.0, to.1), view, surface);
        ctl.handle(release(to.0, to.1), view, surface)
    }

    #[test]
    fn drag_commits_circle_on_its_diameter() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();

        assert_eq!(
            ctl.handle(press(PointerButton::Draw, 0.0, 0.0), &view, &mut surface),
            GestureOutcome::DrawStarted
        );
        assert!(surface.has_preview());
        assert!(matches!(ctl.state(), GestureState::Drawing { .. }));

        let outcome = ctl.handle(release(6.0, 8.0), &view, &mut surface);
        let GestureOutcome::Committed(record) = outcome else {
            panic!("expected commit, got {outcome:?}");
        };
        assert_eq!(record.id, CircleId(0));
        assert_eq!((record.x, record.y), (3.0, 4.0));
        assert!((record.r - 5.0).abs() < 1e-9);
        assert!(!surface.has_preview());
        assert_eq!(surface.circle_keys(), vec![0]);
        assert_eq!(ctl.state(), GestureState::Idle);
        assert!(ctl.can_undo());
    }

    #[test]
    fn preview_is_replaced_not_accumulated() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();
        ctl.handle(press(PointerButton::Draw, 0.0, 0.0), &view, &mut surface);
        for step in 1..=5_u8 {
            let v = f32::from(step);
            assert_eq!(
                ctl.handle(moved(v, 0.0), &view, &mut surface),
                GestureOutcome::PreviewUpdated
            );
            assert_eq!(surface.glyphs.len(), 1);
        }
        let (center, radius, style) = surface.glyphs[&GlyphKey::Preview];
        assert_eq!(center, DataPoint::new(2.5, 0.0));
        assert!((radius - 2.5).abs() < 1e-9);
        assert_eq!(style, GlyphStyle::Preview);
        assert_eq!(surface.preview_draws, 6);
    }

    #[test]
    fn zero_length_drag_commits_nothing() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();
        ctl.handle(press(PointerButton::Draw, 4.0, 4.0), &view, &mut surface);
        assert_eq!(
            ctl.handle(release(4.0, 4.0), &view, &mut surface),
            GestureOutcome::Discarded
        );
        assert!(ctl.store().is_empty());
        assert!(!ctl.can_undo());
        assert!(surface.glyphs.is_empty());
    }

    #[test]
    fn coordinates_go_through_viewport() {
        let mut ctl = GestureController::new();
        let view = AffineView {
            scale: 0.5,
            offset: (100.0, 200.0),
            resets: 0,
        };
        let mut surface = Recorder::default();
        let outcome = drag(&mut ctl, &view, &mut surface, (0.0, 0.0), (40.0, 0.0));
        let GestureOutcome::Committed(record) = outcome else {
            panic!("expected commit, got {outcome:?}");
        };
        assert_eq!((record.x, record.y, record.r), (110.0, 200.0, 10.0));
    }

    #[test]
    fn moves_and_releases_while_idle_are_ignored() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();
        assert_eq!(ctl.handle(moved(1.0, 1.0), &view, &mut surface), GestureOutcome::Ignored);
        assert_eq!(ctl.handle(release(1.0, 1.0), &view, &mut surface), GestureOutcome::Ignored);
        assert_eq!(ctl.handle(PointerEvent::Leave, &view, &mut surface), GestureOutcome::Ignored);
        assert!(surface.glyphs.is_empty());
    }

    #[test]
    fn leaving_canvas_cancels_drawing() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();
        ctl.handle(press(PointerButton::Draw, 0.0, 0.0), &view, &mut surface);
        ctl.handle(moved(10.0, 0.0), &view, &mut surface);
        assert_eq!(
            ctl.handle(PointerEvent::Leave, &view, &mut surface),
            GestureOutcome::Cancelled
        );
        assert!(!surface.has_preview());
        assert_eq!(ctl.state(), GestureState::Idle);
        // The eventual release no longer commits anything.
        assert_eq!(ctl.handle(release(10.0, 0.0), &view, &mut surface), GestureOutcome::Ignored);
        assert!(ctl.store().is_empty());
        assert!(!ctl.can_undo());
    }

    #[test]
    fn delete_click_removes_topmost_hit() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();
        drag(&mut ctl, &view, &mut surface, (0.0, 0.0), (20.0, 0.0));
        drag(&mut ctl, &view, &mut surface, (5.0, 0.0), (15.0, 0.0));

        let outcome = ctl.handle(press(PointerButton::Delete, 10.0, 0.0), &view, &mut surface);
        let GestureOutcome::Deleted(record) = outcome else {
            panic!("expected delete, got {outcome:?}");
        };
        assert_eq!(record.id, CircleId(1));
        assert_eq!(surface.circle_keys(), vec![0]);
        assert_eq!(ctl.undo_depth(), 3);

        assert_eq!(
            ctl.handle(press(PointerButton::Delete, 500.0, 500.0), &view, &mut surface),
            GestureOutcome::Missed
        );
        assert_eq!(ctl.undo_depth(), 3);
    }

    #[test]
    fn delete_during_drawing_keeps_the_drag() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();
        drag(&mut ctl, &view, &mut surface, (0.0, 0.0), (10.0, 0.0));

        ctl.handle(press(PointerButton::Draw, 50.0, 50.0), &view, &mut surface);
        let outcome = ctl.handle(press(PointerButton::Delete, 5.0, 0.0), &view, &mut surface);
        assert!(matches!(outcome, GestureOutcome::Deleted(_)));
        assert!(matches!(ctl.state(), GestureState::Drawing { .. }));
        assert!(surface.has_preview());

        let outcome = ctl.handle(release(60.0, 50.0), &view, &mut surface);
        assert!(matches!(outcome, GestureOutcome::Committed(r) if r.id == CircleId(1)));
    }

    #[test]
    fn undo_resyncs_surface_for_add_and_delete() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();
        drag(&mut ctl, &view, &mut surface, (0.0, 0.0), (20.0, 0.0));
        drag(&mut ctl, &view, &mut surface, (100.0, 0.0), (104.0, 0.0));
        ctl.handle(press(PointerButton::Delete, 10.0, 0.0), &view, &mut surface);
        assert_eq!(surface.circle_keys(), vec![1]);

        assert!(ctl.undo(&mut surface));
        assert_eq!(surface.circle_keys(), vec![0, 1]);
        let (center, radius, style) = surface.glyphs[&GlyphKey::Circle(CircleId(0))];
        assert_eq!((center, radius, style), (DataPoint::new(10.0, 0.0), 10.0, GlyphStyle::Committed));

        assert!(ctl.undo(&mut surface));
        assert_eq!(surface.circle_keys(), vec![0]);
        assert!(ctl.undo(&mut surface));
        assert!(surface.circle_keys().is_empty());
        assert!(!ctl.can_undo());
        assert!(!ctl.undo(&mut surface));
    }

    #[test]
    fn replace_all_clears_history_and_redraws() {
        let mut ctl = GestureController::new();
        let view = identity();
        let mut surface = Recorder::default();
        drag(&mut ctl, &view, &mut surface, (0.0, 0.0), (20.0, 0.0));
        ctl.handle(press(PointerButton::Draw, 0.0, 0.0), &view, &mut surface);

        let loaded = [
            CircleRecord {
                id: CircleId(0),
                x: 1.0,
                y: 1.0,
                r: 1.0,
            },
            CircleRecord {
                id: CircleId(1),
                x: 2.0,
                y: 2.0,
                r: 2.0,
            },
        ];
        ctl.replace_all(loaded, &mut surface);
        assert!(!ctl.can_undo());
        assert!(!surface.has_preview());
        assert_eq!(surface.circle_keys(), vec![0, 1]);
        assert_eq!(ctl.state(), GestureState::Idle);

        ctl.clear(&mut surface);
        assert!(ctl.store().is_empty());
        assert!(surface.glyphs.is_empty());
    }

    #[test]
    fn reset_view_is_forwarded() {
        let ctl = GestureController::new();
        let mut view = identity();
        ctl.reset_view(&mut view);
        assert_eq!(view.resets, 1);
        assert!(ctl.store().is_empty());
    }
}
