//! Input tracking for brush strokes
//!
//! `InputState` turns winit window events into a queue of stroke-level
//! events. Each queued event becomes one `FrameInput`, which is what the
//! stroke controller evaluates.

use winit::event::{ElementState, KeyEvent, MouseButton, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::core::types::Vec2;
use crate::math::Ray;

/// Stroke-level interaction kind for one evaluation cycle
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum InputEvent {
    /// Hover or repaint, no button or key transition
    #[default]
    None,
    /// Primary button went down
    PointerDown,
    /// Pointer moved with the primary button held
    PointerDrag,
    /// Primary button went up
    PointerUp,
    KeyDown(KeyCode),
    /// OS auto-repeat of a held key
    KeyRepeat(KeyCode),
    KeyUp(KeyCode),
}

impl InputEvent {
    /// True for the events that are allowed to commit instances
    pub fn is_press_or_drag(&self) -> bool {
        matches!(self, InputEvent::PointerDown | InputEvent::PointerDrag)
    }
}

/// Host input for a single evaluation cycle
#[derive(Clone, Copy, Debug)]
pub struct FrameInput {
    /// World-space ray under the pointer
    pub pointer_ray: Ray,
    pub event: InputEvent,
    /// Pointer movement since the previous event, in screen pixels
    pub pointer_delta: Vec2,
    consumed: bool,
}

impl FrameInput {
    pub fn new(pointer_ray: Ray, event: InputEvent) -> Self {
        Self {
            pointer_ray,
            event,
            pointer_delta: Vec2::ZERO,
            consumed: false,
        }
    }

    pub fn with_delta(mut self, delta: Vec2) -> Self {
        self.pointer_delta = delta;
        self
    }

    /// Mark the event as used so the host does not run its own hotkey for it
    pub fn consume(&mut self) {
        self.consumed = true;
    }

    pub fn is_consumed(&self) -> bool {
        self.consumed
    }
}

/// Tracks pointer and keyboard state and queues stroke events
pub struct InputState {
    /// Current pointer position
    pointer_position: Vec2,
    /// Whether the primary button is held
    primary_down: bool,
    /// Events queued since the last drain, with the pointer position and delta at that time
    pending: Vec<(InputEvent, Vec2, Vec2)>,
}

impl InputState {
    /// Create new input state
    pub fn new() -> Self {
        Self {
            pointer_position: Vec2::ZERO,
            primary_down: false,
            pending: Vec::new(),
        }
    }

    /// Process a window event
    pub fn process_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput {
                event: KeyEvent {
                    physical_key: PhysicalKey::Code(key_code),
                    state,
                    repeat,
                    ..
                },
                ..
            } => {
                self.on_key(*key_code, *state == ElementState::Pressed, *repeat);
            }
            WindowEvent::CursorMoved { position, .. } => {
                self.on_cursor_moved(Vec2::new(position.x as f32, position.y as f32));
            }
            WindowEvent::MouseInput { state, button: MouseButton::Left, .. } => {
                self.on_primary_button(*state == ElementState::Pressed);
            }
            _ => {}
        }
    }

    fn on_key(&mut self, key: KeyCode, pressed: bool, repeat: bool) {
        let event = match (pressed, repeat) {
            (true, false) => InputEvent::KeyDown(key),
            (true, true) => InputEvent::KeyRepeat(key),
            (false, _) => InputEvent::KeyUp(key),
        };
        self.pending.push((event, self.pointer_position, Vec2::ZERO));
    }

    fn on_cursor_moved(&mut self, position: Vec2) {
        let delta = position - self.pointer_position;
        self.pointer_position = position;
        let event = if self.primary_down { InputEvent::PointerDrag } else { InputEvent::None };
        self.pending.push((event, position, delta));
    }

    fn on_primary_button(&mut self, pressed: bool) {
        if pressed == self.primary_down {
            return;
        }
        self.primary_down = pressed;
        let event = if pressed { InputEvent::PointerDown } else { InputEvent::PointerUp };
        self.pending.push((event, self.pointer_position, Vec2::ZERO));
    }

    /// Drain queued events into frame inputs, projecting each pointer position with `to_ray`
    pub fn drain_frames(&mut self, mut to_ray: impl FnMut(Vec2) -> Ray) -> Vec<FrameInput> {
        self.pending
            .drain(..)
            .map(|(event, position, delta)| FrameInput::new(to_ray(position), event).with_delta(delta))
            .collect()
    }

    /// Current pointer position
    pub fn pointer_position(&self) -> Vec2 {
        self.pointer_position
    }

    /// Check if the primary button is held
    pub fn is_primary_down(&self) -> bool {
        self.primary_down
    }

    /// Number of events waiting to be drained
    pub fn pending_len(&self) -> usize {
        self.pending.len()
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Vec3;

    fn ray_at(p: Vec2) -> Ray {
        Ray::new(Vec3::new(p.x, 10.0, p.y), Vec3::NEG_Y)
    }

    #[test]
    fn test_press_drag_release_sequence() {
        let mut input = InputState::new();
        input.on_cursor_moved(Vec2::new(1.0, 1.0));
        input.on_primary_button(true);
        input.on_cursor_moved(Vec2::new(4.0, 1.0));
        input.on_primary_button(false);

        let frames = input.drain_frames(ray_at);
        let events: Vec<_> = frames.iter().map(|f| f.event).collect();
        assert_eq!(
            events,
            vec![InputEvent::None, InputEvent::PointerDown, InputEvent::PointerDrag, InputEvent::PointerUp]
        );
        assert_eq!(frames[2].pointer_delta, Vec2::new(3.0, 0.0));
        assert_eq!(frames[2].pointer_ray.origin, Vec3::new(4.0, 10.0, 1.0));
        assert_eq!(input.pending_len(), 0);
    }

    #[test]
    fn test_key_repeat_forwarded() {
        let mut input = InputState::new();
        input.on_key(KeyCode::KeyE, true, false);
        input.on_key(KeyCode::KeyE, true, true);
        input.on_key(KeyCode::KeyE, false, false);

        let frames = input.drain_frames(ray_at);
        let events: Vec<_> = frames.iter().map(|f| f.event).collect();
        assert_eq!(
            events,
            vec![
                InputEvent::KeyDown(KeyCode::KeyE),
                InputEvent::KeyRepeat(KeyCode::KeyE),
                InputEvent::KeyUp(KeyCode::KeyE),
            ]
        );
    }

    #[test]
    fn test_press_or_drag() {
        assert!(InputEvent::PointerDown.is_press_or_drag());
        assert!(InputEvent::PointerDrag.is_press_or_drag());
        assert!(!InputEvent::PointerUp.is_press_or_drag());
        assert!(!InputEvent::None.is_press_or_drag());
    }

    #[test]
    fn test_consume() {
        let mut frame = FrameInput::new(ray_at(Vec2::ZERO), InputEvent::KeyDown(KeyCode::KeyE));
        assert!(!frame.is_consumed());
        frame.consume();
        assert!(frame.is_consumed());
    }
}
