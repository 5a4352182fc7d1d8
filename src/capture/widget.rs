use thiserror::Error;

use crate::collaborator::CollaboratorRequest;

use super::{
    CellIndex, DigitLabel, LogicalBitmap, PointerDrawState, PointerEvent, TrainingBatch,
    TrainingSample,
};

/// Input problems that abort an action before any state changes.
///
/// The `Display` text is shown to the user as-is.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// Train was triggered without a label or without a drawing.
    #[error("Please draw a digit and enter its value.")]
    IncompleteSample,
    /// The label is present but is not a digit from 0 to 9.
    #[error("Digit value must be a whole number from 0 to 9.")]
    InvalidLabel(String),
    /// Test was triggered on a blank drawing.
    #[error("Please draw a digit first.")]
    EmptyDrawing,
}

/// Result of a successful train action.
#[derive(Clone, Debug)]
pub struct TrainOutcome {
    /// Label recorded for the queued sample.
    pub label: DigitLabel,
    /// Samples waiting after this submission (zero right after a flush).
    pub queued: usize,
    /// Full-batch request to send, present only when this sample filled the batch.
    pub flush: Option<CollaboratorRequest>,
}

/// All mutable widget state: the bitmap, the pending batch and the pointer.
///
/// Owned by the controller and mutated only from the UI thread.
#[derive(Clone, Debug, Default)]
pub struct GridCapture {
    bitmap: LogicalBitmap,
    batch: TrainingBatch,
    pointer: PointerDrawState,
}

impl GridCapture {
    pub fn new() -> Self {
        Self {
            bitmap: LogicalBitmap::new(),
            batch: TrainingBatch::new(),
            pointer: PointerDrawState::Up,
        }
    }

    pub fn bitmap(&self) -> &LogicalBitmap {
        &self.bitmap
    }

    pub fn batch(&self) -> &TrainingBatch {
        &self.batch
    }

    pub fn pointer_state(&self) -> PointerDrawState {
        self.pointer
    }

    /// Apply one pointer event, returning the cell it painted (if any).
    pub fn handle_pointer(&mut self, event: PointerEvent) -> Option<CellIndex> {
        match event {
            PointerEvent::Down { x, y } => {
                self.pointer = PointerDrawState::Down;
                self.bitmap.paint_at(x, y)
            }
            PointerEvent::Move { x, y } => {
                if !self.pointer.is_drawing() {
                    return None;
                }
                self.bitmap.paint_at(x, y)
            }
            PointerEvent::Up => {
                self.pointer = PointerDrawState::Up;
                None
            }
        }
    }

    /// Clear the drawing. The pending batch is untouched.
    pub fn reset(&mut self) {
        self.bitmap.reset();
    }

    /// Queue the current drawing under `label_input` and clear the surface.
    ///
    /// Rejected input leaves the bitmap and the batch exactly as they were.
    pub fn train(&mut self, label_input: &str) -> Result<TrainOutcome, ValidationError> {
        let trimmed = label_input.trim();
        if trimmed.is_empty() || self.bitmap.is_blank() {
            return Err(ValidationError::IncompleteSample);
        }
        let label = DigitLabel::parse(trimmed)
            .ok_or_else(|| ValidationError::InvalidLabel(trimmed.to_string()))?;

        let sample = TrainingSample::new(self.bitmap.snapshot(), label);
        let flush = self.batch.push(sample).map(CollaboratorRequest::train);
        self.reset();
        Ok(TrainOutcome {
            label,
            queued: self.batch.len(),
            flush,
        })
    }

    /// Build a prediction request for the current drawing.
    ///
    /// The drawing stays on the surface so it remains visible next to the result.
    pub fn test(&self) -> Result<CollaboratorRequest, ValidationError> {
        if self.bitmap.is_blank() {
            return Err(ValidationError::EmptyDrawing);
        }
        Ok(CollaboratorRequest::predict(self.bitmap.snapshot()))
    }
}
