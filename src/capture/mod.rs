//! Grid capture core: the logical bitmap, the training batch and the pointer
//! protocol that paints cells. Nothing here touches the network or egui, so
//! the controller can drive it from any event source.

mod batch;
mod bitmap;
mod pointer;
mod widget;

pub use batch::{DigitLabel, TrainingBatch, TrainingSample};
pub use bitmap::{CellIndex, LogicalBitmap};
pub use pointer::{PointerDrawState, PointerEvent};
pub use widget::{GridCapture, TrainOutcome, ValidationError};

/// Width and height of the drawing surface in logical units.
pub const CANVAS_WIDTH: f32 = 200.0;
/// Number of logical cells along each axis.
pub const TRANSLATED_WIDTH: usize = 20;
/// Size of one logical cell in surface units.
pub const PIXEL_WIDTH: f32 = 10.0;
/// Total number of cells in the bitmap.
pub const CELL_COUNT: usize = TRANSLATED_WIDTH * TRANSLATED_WIDTH;
/// Number of training samples accumulated before a flush.
pub const BATCH_SIZE: usize = 10;
