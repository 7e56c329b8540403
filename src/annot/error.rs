use super::record::CircleId;

/// Failures raised by [`super::CircleStore`] and [`super::UndoLog`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnnotError {
    #[error("circle at ({x}, {y}) with radius {r} is not drawable")]
    InvalidGeometry { x: f64, y: f64, r: f64 },
    #[error("no circle with id {0}")]
    NotFound(CircleId),
    #[error("circle id {0} is already in use")]
    DuplicateId(CircleId),
}
