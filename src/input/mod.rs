//! Input module - window mouse, touch and keyboard captured into GolfInput

use bevy::math::DVec2;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::aim::PointerSource;
use crate::game::{AngleKey, GolfInput, GolfSystems, Notice, PointerEvent};
use crate::render::{CanvasLayout, GolfCamera};

/// Window input systems. Runs before the game applies buffered input.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct InputSystems;

/// Captures window input for the game
pub struct WindowInputPlugin;

impl Plugin for WindowInputPlugin {
    fn build(&self, app: &mut App) {
        app.configure_sets(Update, InputSystems.before(GolfSystems))
            .add_systems(
                Update,
                (capture_pointer_input, capture_keyboard_input).in_set(InputSystems),
            );
    }
}

/// Window position to canvas-local pixels
fn window_to_canvas(
    position: Vec2,
    camera: &Camera,
    camera_transform: &GlobalTransform,
    layout: &CanvasLayout,
) -> Option<DVec2> {
    camera
        .viewport_to_world_2d(camera_transform, position)
        .ok()
        .map(|world| layout.world_to_canvas(world))
}

/// Mouse (left button) and touch contacts as pointer events.
/// Presses that start outside the canvas are dropped.
pub fn capture_pointer_input(
    mouse: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform), With<GolfCamera>>,
    layout: Option<Res<CanvasLayout>>,
    notice: Res<Notice>,
    mut input: ResMut<GolfInput>,
    mut last_cursor: Local<Option<Vec2>>,
) {
    if notice.is_visible() && (mouse.get_just_pressed().next().is_some() || touches.any_just_pressed()) {
        input.dismiss_pressed = true;
    }

    let Some(layout) = layout else {
        return;
    };
    let Ok(window) = windows.single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.single() else {
        return;
    };
    let to_canvas = |position: Vec2| window_to_canvas(position, camera, camera_transform, &layout);

    // Mouse
    let cursor = window.cursor_position();
    let moved = cursor.is_some() && cursor != *last_cursor;
    if let Some(position) = cursor {
        *last_cursor = Some(position);
    }

    // Only releases get through the notice, so a session in progress can end
    if notice.is_visible() {
        if mouse.just_released(MouseButton::Left) {
            if let Some(point) = cursor.or(*last_cursor).and_then(to_canvas) {
                input.push_pointer(PointerEvent::end(PointerSource::Mouse, point));
            }
        }
        for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
            if let Some(point) = to_canvas(touch.position()) {
                input.push_pointer(PointerEvent::end(PointerSource::Touch(touch.id()), point));
            }
        }
        return;
    }

    if mouse.just_pressed(MouseButton::Left) {
        if let Some(point) = cursor.and_then(to_canvas) {
            if layout.contains(point) {
                input.push_pointer(PointerEvent::start(PointerSource::Mouse, point));
            }
        }
    } else if mouse.pressed(MouseButton::Left) && moved {
        if let Some(point) = cursor.and_then(to_canvas) {
            input.push_pointer(PointerEvent::moved(PointerSource::Mouse, point));
        }
    }
    if mouse.just_released(MouseButton::Left) {
        // Released outside the window: end at the last known position
        if let Some(point) = cursor.or(*last_cursor).and_then(to_canvas) {
            input.push_pointer(PointerEvent::end(PointerSource::Mouse, point));
        }
    }

    // Touch. Only the finger that started a session can drive it.
    for touch in touches.iter_just_pressed() {
        if let Some(point) = to_canvas(touch.position()) {
            if layout.contains(point) {
                input.push_pointer(PointerEvent::start(PointerSource::Touch(touch.id()), point));
            }
        }
    }
    for touch in touches.iter() {
        if touch.delta() != Vec2::ZERO && !touches.just_pressed(touch.id()) {
            if let Some(point) = to_canvas(touch.position()) {
                input.push_pointer(PointerEvent::moved(PointerSource::Touch(touch.id()), point));
            }
        }
    }
    for touch in touches.iter_just_released().chain(touches.iter_just_canceled()) {
        if let Some(point) = to_canvas(touch.position()) {
            input.push_pointer(PointerEvent::end(PointerSource::Touch(touch.id()), point));
        }
    }
}

/// Keys typed into the angle field
fn angle_key(key: KeyCode) -> Option<AngleKey> {
    let c = match key {
        KeyCode::Digit0 | KeyCode::Numpad0 => '0',
        KeyCode::Digit1 | KeyCode::Numpad1 => '1',
        KeyCode::Digit2 | KeyCode::Numpad2 => '2',
        KeyCode::Digit3 | KeyCode::Numpad3 => '3',
        KeyCode::Digit4 | KeyCode::Numpad4 => '4',
        KeyCode::Digit5 | KeyCode::Numpad5 => '5',
        KeyCode::Digit6 | KeyCode::Numpad6 => '6',
        KeyCode::Digit7 | KeyCode::Numpad7 => '7',
        KeyCode::Digit8 | KeyCode::Numpad8 => '8',
        KeyCode::Digit9 | KeyCode::Numpad9 => '9',
        KeyCode::Minus | KeyCode::NumpadSubtract => '-',
        KeyCode::Period | KeyCode::NumpadDecimal => '.',
        KeyCode::Backspace => return Some(AngleKey::Backspace),
        _ => return None,
    };
    Some(AngleKey::Char(c))
}

/// Space/Enter swings, C cycles the club, digits edit the angle field
pub fn capture_keyboard_input(
    keyboard: Res<ButtonInput<KeyCode>>,
    notice: Res<Notice>,
    mut input: ResMut<GolfInput>,
) {
    if notice.is_visible() {
        if keyboard.get_just_pressed().next().is_some() {
            input.dismiss_pressed = true;
        }
        return;
    }

    if keyboard.just_pressed(KeyCode::Space)
        || keyboard.just_pressed(KeyCode::Enter)
        || keyboard.just_pressed(KeyCode::NumpadEnter)
    {
        input.swing_pressed = true;
    }
    if keyboard.just_pressed(KeyCode::KeyC) {
        input.cycle_club_pressed = true;
    }
    for key in keyboard.get_just_pressed() {
        if let Some(edit) = angle_key(*key) {
            input.angle_keys.push(edit);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_angle_keys() {
        assert_eq!(angle_key(KeyCode::Digit4), Some(AngleKey::Char('4')));
        assert_eq!(angle_key(KeyCode::NumpadSubtract), Some(AngleKey::Char('-')));
        assert_eq!(angle_key(KeyCode::Period), Some(AngleKey::Char('.')));
        assert_eq!(angle_key(KeyCode::Backspace), Some(AngleKey::Backspace));
        assert_eq!(angle_key(KeyCode::KeyC), None);
    }
}
