//! Annotation interaction engine: circle records, undo history and the
//! pointer gesture state machine, independent of any rendering toolkit.

mod error;
mod gesture;
mod host;
mod record;
mod store;
mod undo;

pub use gesture::{GestureController, GestureOutcome, GestureState, PointerButton, PointerEvent};
pub use host::{GlyphKey, GlyphStyle, RenderSurface, ViewportAdapter};
pub use record::{CircleId, CircleRecord, DataPoint, ScreenPoint};
pub use store::CircleStore;
