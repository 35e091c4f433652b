//! HUD below the canvas: status prompt, club selector, angle field and swing button

use bevy::prelude::*;

use crate::constants::*;
use crate::game::{GolfGame, GolfInput, Notice};

/// Status prompt text
#[derive(Component)]
pub struct StatusText;

/// Club selector button
#[derive(Component)]
pub struct ClubButton;

#[derive(Component)]
pub struct ClubButtonLabel;

/// Typed angle display (numeric aim only)
#[derive(Component)]
pub struct AngleFieldText;

/// Swing trigger button
#[derive(Component)]
pub struct SwingButton;

fn label(text: impl Into<String>, size: f32, color: Color) -> (Text, TextFont, TextColor) {
    (
        Text::new(text),
        TextFont {
            font_size: size,
            ..default()
        },
        TextColor(color),
    )
}

fn button_node() -> Node {
    Node {
        padding: UiRect::axes(Val::Px(16.0), Val::Px(8.0)),
        justify_content: JustifyContent::Center,
        align_items: AlignItems::Center,
        ..default()
    }
}

/// Spawn the HUD just under the canvas
pub fn setup_hud(mut commands: Commands, game: Res<GolfGame>) {
    let top = CANVAS_TOP_MARGIN + game.course().height as f32 + 12.0;
    let numeric = game.aim().numeric().is_some();

    commands
        .spawn(Node {
            position_type: PositionType::Absolute,
            top: Val::Px(top),
            left: Val::Px(0.0),
            right: Val::Px(0.0),
            flex_direction: FlexDirection::Column,
            align_items: AlignItems::Center,
            row_gap: Val::Px(10.0),
            ..default()
        })
        .with_children(|parent| {
            parent.spawn((label(game.prompt(), 22.0, TEXT_PRIMARY), StatusText));

            parent
                .spawn(Node {
                    flex_direction: FlexDirection::Row,
                    align_items: AlignItems::Center,
                    column_gap: Val::Px(12.0),
                    ..default()
                })
                .with_children(|row| {
                    row.spawn((Button, button_node(), BackgroundColor(BUTTON_ENABLED), ClubButton))
                        .with_children(|button| {
                            button.spawn((
                                label(format!("Club: {}", game.club()), 18.0, TEXT_PRIMARY),
                                ClubButtonLabel,
                            ));
                        });

                    if numeric {
                        row.spawn((
                            Node {
                                padding: UiRect::axes(Val::Px(10.0), Val::Px(8.0)),
                                min_width: Val::Px(140.0),
                                ..default()
                            },
                            BackgroundColor(UI_BACKGROUND),
                        ))
                        .with_children(|field| {
                            field.spawn((label("Angle: _", 18.0, TEXT_PRIMARY), AngleFieldText));
                        });
                    }

                    row.spawn((Button, button_node(), BackgroundColor(BUTTON_DISABLED), SwingButton))
                        .with_children(|button| {
                            button.spawn(label("Swing!", 18.0, TEXT_PRIMARY));
                        });
                });

            let help = if numeric {
                "Type an angle | Space: swing | C: change club"
            } else {
                "Drag from the ball to aim | Space: swing | C: change club"
            };
            parent.spawn(label(help, 13.0, TEXT_MUTED));
        });
}

/// Button presses become buffered input. A disabled swing button does nothing.
pub fn handle_hud_buttons(
    game: Res<GolfGame>,
    notice: Res<Notice>,
    mut input: ResMut<GolfInput>,
    buttons: Query<
        (&Interaction, Has<SwingButton>, Has<ClubButton>),
        (Changed<Interaction>, With<Button>),
    >,
) {
    for (interaction, is_swing, is_club) in &buttons {
        if *interaction != Interaction::Pressed {
            continue;
        }
        if notice.is_visible() {
            input.dismiss_pressed = true;
        } else if is_swing && game.swing_enabled() {
            input.swing_pressed = true;
        } else if is_club {
            input.cycle_club_pressed = true;
        }
    }
}

/// Button colours follow enabled state and hover
pub fn style_hud_buttons(
    game: Res<GolfGame>,
    mut buttons: Query<(&Interaction, &mut BackgroundColor, Has<SwingButton>), With<Button>>,
) {
    for (interaction, mut background, is_swing) in &mut buttons {
        let enabled = !is_swing || game.swing_enabled();
        let color = match (enabled, interaction) {
            (false, _) => BUTTON_DISABLED,
            (true, Interaction::Hovered | Interaction::Pressed) => BUTTON_HOVERED,
            (true, Interaction::None) => BUTTON_ENABLED,
        };
        if background.0 != color {
            background.0 = color;
        }
    }
}

/// Refresh prompt, club label and typed angle
pub fn update_hud_text(
    game: Res<GolfGame>,
    mut status: Query<&mut Text, (With<StatusText>, Without<ClubButtonLabel>, Without<AngleFieldText>)>,
    mut club: Query<&mut Text, (With<ClubButtonLabel>, Without<StatusText>, Without<AngleFieldText>)>,
    mut angle: Query<&mut Text, (With<AngleFieldText>, Without<StatusText>, Without<ClubButtonLabel>)>,
) {
    if !game.is_changed() {
        return;
    }

    if let Ok(mut text) = status.single_mut() {
        text.0 = game.prompt().to_string();
    }
    if let Ok(mut text) = club.single_mut() {
        text.0 = format!("Club: {}", game.club());
    }
    if let (Ok(mut text), Some(numeric)) = (angle.single_mut(), game.aim().numeric()) {
        text.0 = format!("Angle: {}_", numeric.text());
    }
}
