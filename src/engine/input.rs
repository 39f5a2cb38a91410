//! Pointer event handling: maps [`InputEvent`]s onto the drag state.

use super::CarouselEngine;
use crate::input::{InputEvent, MouseButton};

impl CarouselEngine {
    /// Apply one input event. Returns `true` when the drag state flipped.
    ///
    /// A left press anywhere in the surface begins a drag; moves and the
    /// release are honored regardless of position, so a drag survives the
    /// cursor leaving the window.
    pub(super) fn apply_input(&mut self, event: InputEvent) -> bool {
        match event {
            InputEvent::CursorMoved { x, y } => {
                self.cursor = (x, y);
                self.scroll
                    .pointer_move(x, self.options.drag_sensitivity);
                false
            }
            InputEvent::MouseButton {
                button: MouseButton::Left,
                pressed,
            } => {
                let was_dragging = self.scroll.is_dragging;
                if pressed {
                    self.scroll.pointer_down(self.cursor.0);
                } else {
                    self.scroll.pointer_up();
                }
                was_dragging != self.scroll.is_dragging
            }
            InputEvent::MouseButton { .. } => false,
        }
    }
}
