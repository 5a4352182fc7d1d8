/// Whether the primary pointer is currently held over the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerDrawState {
    #[default]
    Up,
    Down,
}

impl PointerDrawState {
    pub fn is_drawing(self) -> bool {
        matches!(self, Self::Down)
    }
}

/// Pointer input translated into surface coordinates (logical units).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Down { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Up,
}
