//! Player input
//!
//! Keys and buttons are described with local enums so the command mapping
//! can be driven without a window. The event loop converts platform events,
//! queues them, and the frame drains the queue before simulating.

use std::collections::VecDeque;

use glam::Vec2;

use crate::consts::{
    BASKET_NUDGE, CANNON_NUDGE, CANNON_TURN_DEGREES, CURSOR_PIXELS_PER_UNIT, FIELD_HALF_EXTENT,
    PAN_STEP,
};
use crate::sim::state::{BasketColor, GameState};

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Escape,
    Q,
    Space,
    Left,
    Right,
    Up,
    Down,
    A,
    D,
    S,
    F,
    N,
    M,
    J,
    L,
    I,
    K,
    ControlRight,
    AltRight,
}

impl Key {
    /// Keys matched on the typed character rather than the physical key
    pub fn from_typed(text: &str) -> Option<Key> {
        match text {
            "q" | "Q" => Some(Key::Q),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Press,
    Release,
    /// Auto-repeat while held
    Repeat,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    Press,
    Release,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Key(Key, KeyAction),
    Mouse(MouseButton, ButtonAction),
    /// Cursor position in window pixels
    CursorMoved { x: f64, y: f64 },
}

/// What the frame loop should do after an event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Signal {
    Continue,
    Quit,
}

/// Events collected between frames
#[derive(Debug, Default)]
pub struct InputQueue {
    events: VecDeque<InputEvent>,
}

impl InputQueue {
    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Apply every queued event in arrival order. Stops at the first quit.
    pub fn drain_into(&mut self, state: &mut GameState) -> Signal {
        while let Some(event) = self.events.pop_front() {
            if apply(state, event) == Signal::Quit {
                self.events.clear();
                return Signal::Quit;
            }
        }
        Signal::Continue
    }
}

/// Command state held between events
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct InputState {
    /// Right mouse button held
    pub drag_active: bool,
    /// Right Ctrl held
    pub move_red_armed: bool,
    /// Right Alt held
    pub move_green_armed: bool,
    /// Last cursor position in world units
    pub cursor: Vec2,
}

/// Window pixels to world units (fixed 600×600 reference scale)
pub fn cursor_to_world(x: f64, y: f64) -> Vec2 {
    let half = FIELD_HALF_EXTENT as f64;
    Vec2::new(
        (x / CURSOR_PIXELS_PER_UNIT - half) as f32,
        (half - y / CURSOR_PIXELS_PER_UNIT) as f32,
    )
}

/// Apply one input event to the game
pub fn apply(state: &mut GameState, event: InputEvent) -> Signal {
    match event {
        InputEvent::Key(key, action) => apply_key(state, key, action),
        InputEvent::Mouse(button, action) => {
            apply_mouse(state, button, action);
            Signal::Continue
        }
        InputEvent::CursorMoved { x, y } => {
            state.input.cursor = cursor_to_world(x, y);
            Signal::Continue
        }
    }
}

fn apply_key(state: &mut GameState, key: Key, action: KeyAction) -> Signal {
    if key == Key::Q {
        return Signal::Quit;
    }

    match action {
        KeyAction::Press => match key {
            Key::Escape => return Signal::Quit,
            Key::ControlRight => state.input.move_red_armed = true,
            Key::AltRight => state.input.move_green_armed = true,
            Key::Space => fire(state),
            _ => {}
        },
        KeyAction::Release => match key {
            Key::ControlRight => state.input.move_red_armed = false,
            Key::AltRight => state.input.move_green_armed = false,
            Key::N => state.set_level(state.level.raised()),
            Key::M => state.set_level(state.level.lowered()),
            Key::Up => state.camera.zoom_in(),
            Key::Down => state.camera.zoom_out(),
            _ => held_command(state, key),
        },
        KeyAction::Repeat => held_command(state, key),
    }
    Signal::Continue
}

/// Commands that fire on release and keep firing while the key repeats
fn held_command(state: &mut GameState, key: Key) {
    match key {
        Key::Left => nudge_armed_basket(state, -BASKET_NUDGE),
        Key::Right => nudge_armed_basket(state, BASKET_NUDGE),
        Key::J => state.camera.pan_by(PAN_STEP, 0.0),
        Key::L => state.camera.pan_by(-PAN_STEP, 0.0),
        Key::I => state.camera.pan_by(0.0, -PAN_STEP),
        Key::K => state.camera.pan_by(0.0, PAN_STEP),
        Key::S => state.scene.cannon.nudge_y(CANNON_NUDGE),
        Key::F => state.scene.cannon.nudge_y(-CANNON_NUDGE),
        Key::A => turn_cannon(state, CANNON_TURN_DEGREES),
        Key::D => turn_cannon(state, -CANNON_TURN_DEGREES),
        _ => {}
    }
}

fn apply_mouse(state: &mut GameState, button: MouseButton, action: ButtonAction) {
    match (button, action) {
        (MouseButton::Left, ButtonAction::Release) => fire(state),
        (MouseButton::Right, ButtonAction::Press) => state.input.drag_active = true,
        (MouseButton::Right, ButtonAction::Release) => state.input.drag_active = false,
        (MouseButton::Left, ButtonAction::Press) => {}
    }
}

fn fire(state: &mut GameState) {
    let pan_x = state.camera.pan.x;
    let scene = &mut state.scene;
    if scene.laser.fire(&scene.cannon.barrel, pan_x) {
        log::debug!("Laser fired at {:.0}°", scene.laser.body.angle);
    }
}

/// Red wins when both baskets are armed
fn nudge_armed_basket(state: &mut GameState, dx: f32) {
    let color = if state.input.move_red_armed {
        BasketColor::Red
    } else if state.input.move_green_armed {
        BasketColor::Green
    } else {
        return;
    };
    state.scene.baskets.get_mut(color).body.pos.x += dx;
}

/// The barrel only turns while the laser sits in it
fn turn_cannon(state: &mut GameState, degrees: f32) {
    if state.scene.laser.is_idle() {
        state.scene.cannon.turn(degrees);
    }
}

/// Drag whatever sits under the cursor while the right button is held
pub fn apply_drag(state: &mut GameState) {
    if !state.input.drag_active {
        return;
    }
    let cursor = state.input.cursor;
    let scene = &mut state.scene;

    for basket in scene.baskets.iter_mut() {
        if basket.body.grab_square_contains(cursor) {
            basket.body.pos.x = cursor.x;
        }
    }

    if scene.cannon.base.grab_square_contains(cursor) {
        scene.cannon.set_y(cursor.y);
        // atan2 is undefined on the vertical axis; keep the old heading
        if cursor.x != 0.0 {
            scene.cannon.barrel.angle = cursor.y.atan2(cursor.x).to_degrees();
        }
    }
}
