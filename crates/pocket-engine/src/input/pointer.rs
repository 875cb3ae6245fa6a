use glam::Vec2;

use crate::input::queue::{InputEvent, InputQueue};

/// Per-tick pointer snapshot folded from the input queue.
///
/// `position` persists across ticks; the edge flags describe only the
/// events seen since the last `begin_tick`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Last known pointer position in screen pixels.
    pub position: Vec2,
    /// The primary button is currently held.
    pub held: bool,
    /// The button went down this tick.
    pub pressed: bool,
    /// The button went up this tick.
    pub released: bool,
}

impl PointerState {
    /// Clear edge flags; keep position and held state.
    pub fn begin_tick(&mut self) {
        self.pressed = false;
        self.released = false;
    }

    /// Fold one event. Non-pointer events are ignored.
    pub fn apply(&mut self, event: &InputEvent) {
        match *event {
            InputEvent::PointerDown { x, y } => {
                self.position = Vec2::new(x, y);
                self.held = true;
                self.pressed = true;
            }
            InputEvent::PointerMove { x, y } => {
                self.position = Vec2::new(x, y);
            }
            InputEvent::PointerUp { x, y } => {
                self.position = Vec2::new(x, y);
                self.held = false;
                self.released = true;
            }
            _ => {}
        }
    }

    /// Begin a tick and fold every pending event from `input`.
    pub fn update(&mut self, input: &InputQueue) {
        self.begin_tick();
        for event in input.iter() {
            self.apply(event);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn click_in_one_tick_sets_both_edges() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 1.0, y: 2.0 });
        q.push(InputEvent::PointerMove { x: 5.0, y: 2.0 });
        q.push(InputEvent::PointerUp { x: 6.0, y: 2.0 });

        let mut p = PointerState::default();
        p.update(&q);
        assert!(p.pressed && p.released);
        assert!(!p.held);
        assert_eq!(p.position, Vec2::new(6.0, 2.0));
    }

    #[test]
    fn edges_clear_but_position_persists() {
        let mut q = InputQueue::new();
        q.push(InputEvent::PointerDown { x: 3.0, y: 4.0 });
        let mut p = PointerState::default();
        p.update(&q);
        assert!(p.pressed && p.held);

        p.update(&InputQueue::new());
        assert!(!p.pressed);
        assert!(p.held, "button still held until PointerUp");
        assert_eq!(p.position, Vec2::new(3.0, 4.0));
    }
}
