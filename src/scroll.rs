//! Drag/autoplay scroll model.
//!
//! [`ScrollState`] is the single source of truth for the carousel's scroll
//! position: `time` accumulates drag deltas immediately as pointer events
//! arrive, and the per-frame [`tick`](ScrollState::tick) adds the autoplay
//! drift while no drag is active. Releasing the pointer stops motion
//! instantly (no inertia).

/// Fixed scale applied to pointer deltas before they reach `time`.
pub const DRAG_SCALE: f32 = 1e-3;

/// Autoplay drift added to `time` once per frame while idle.
pub const AUTOPLAY_STEP: f32 = 2e-5;

/// Tracks drag state and the cumulative scroll position.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrollState {
    /// Whether autoplay drift is suspended.
    pub is_paused: bool,
    /// Whether a drag is in progress.
    pub is_dragging: bool,
    /// Pointer position at drag start.
    pub drag_start: (f32, f32),
    /// Most recent pointer position during a drag.
    pub drag_current: (f32, f32),
    /// Scaled delta of the most recent move event. Written for every move;
    /// carried state only, never re-read across frames (no inertia).
    pub drag_velocity: f32,
    /// Reserved for momentum scrolling; currently never read.
    pub target_velocity: f32,
    /// Cumulative scroll position. Scene offset = `time * speed`.
    pub time: f32,
}

impl Default for ScrollState {
    fn default() -> Self {
        Self::new()
    }
}

impl ScrollState {
    /// Create an idle scroll state at position zero.
    #[must_use]
    pub fn new() -> Self {
        Self {
            is_paused: false,
            is_dragging: false,
            drag_start: (0.0, 0.0),
            drag_current: (0.0, 0.0),
            drag_velocity: 0.0,
            target_velocity: 0.0,
            time: 0.0,
        }
    }

    /// Begin a drag at the given pointer x position.
    pub fn pointer_down(&mut self, x: f32) {
        self.is_dragging = true;
        self.drag_start.0 = x;
        self.drag_current.0 = x;
    }

    /// Process a pointer move. No-op unless a drag is active; otherwise the
    /// scroll position advances synchronously by
    /// `delta * sensitivity * DRAG_SCALE`, so scrubbing responds per event
    /// rather than per frame.
    pub fn pointer_move(&mut self, x: f32, sensitivity: f32) {
        if !self.is_dragging {
            return;
        }
        let delta = x - self.drag_current.0;
        self.drag_current.0 = x;
        self.drag_velocity = delta * sensitivity * DRAG_SCALE;
        self.time += self.drag_velocity;
    }

    /// End the drag. Motion stops immediately; the last drag velocity is
    /// not carried into subsequent frames.
    pub fn pointer_up(&mut self) {
        self.is_dragging = false;
    }

    /// Per-frame autoplay: while idle and unpaused, drift by
    /// `direction * AUTOPLAY_STEP`.
    pub fn tick(&mut self, direction: f32) {
        if !self.is_dragging && !self.is_paused {
            self.time += direction * AUTOPLAY_STEP;
        }
    }

    /// Suspend or resume the autoplay drift. Dragging is unaffected.
    pub fn set_paused(&mut self, paused: bool) {
        self.is_paused = paused;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drag_accumulates_scaled_deltas() {
        let mut s = ScrollState::new();
        s.pointer_down(100.0);
        s.pointer_move(150.0, 0.9);
        // delta 50 * 0.9 * 0.001
        assert!((s.time - 0.045).abs() < 1e-7);
    }

    #[test]
    fn accumulation_is_linear_in_event_splits() {
        // One 60px move and three 20px moves must land on the same time.
        let mut a = ScrollState::new();
        a.pointer_down(0.0);
        a.pointer_move(60.0, 0.5);

        let mut b = ScrollState::new();
        b.pointer_down(0.0);
        b.pointer_move(20.0, 0.5);
        b.pointer_move(40.0, 0.5);
        b.pointer_move(60.0, 0.5);

        assert!((a.time - b.time).abs() < 1e-6);
    }

    #[test]
    fn move_without_drag_is_noop() {
        let mut s = ScrollState::new();
        s.pointer_move(500.0, 0.9);
        assert_eq!(s.time, 0.0);
        assert_eq!(s.drag_velocity, 0.0);
    }

    #[test]
    fn no_inertia_after_release() {
        let mut s = ScrollState::new();
        s.pointer_down(0.0);
        s.pointer_move(200.0, 1.0);
        s.pointer_up();
        let after_release = s.time;

        // Ticks only add the autoplay step; the drag velocity is gone.
        s.tick(-1.0);
        s.tick(-1.0);
        let expected = after_release - 2.0 * AUTOPLAY_STEP;
        assert!((s.time - expected).abs() < 1e-7);
    }

    #[test]
    fn tick_is_suspended_while_dragging() {
        let mut s = ScrollState::new();
        s.pointer_down(10.0);
        s.tick(1.0);
        assert_eq!(s.time, 0.0);
    }

    #[test]
    fn tick_is_suspended_while_paused() {
        let mut s = ScrollState::new();
        s.set_paused(true);
        s.tick(1.0);
        assert_eq!(s.time, 0.0);
        s.set_paused(false);
        s.tick(1.0);
        assert!((s.time - AUTOPLAY_STEP).abs() < 1e-9);
    }

    #[test]
    fn direction_sign_flips_drift() {
        let mut s = ScrollState::new();
        s.tick(1.0);
        assert!(s.time > 0.0);
        let mut r = ScrollState::new();
        r.tick(-1.0);
        assert!(r.time < 0.0);
    }

    #[test]
    fn pointer_down_records_both_drag_points() {
        let mut s = ScrollState::new();
        s.pointer_down(42.0);
        assert_eq!(s.drag_start.0, 42.0);
        assert_eq!(s.drag_current.0, 42.0);
        assert!(s.is_dragging);
    }
}
