//! Blocking notice overlay

use bevy::prelude::*;

use crate::constants::*;
use crate::game::Notice;

/// Full-window overlay, visible while a notice is pending
#[derive(Component)]
pub struct NoticeOverlay;

#[derive(Component)]
pub struct NoticeText;

pub fn setup_notice(mut commands: Commands) {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.5)),
            GlobalZIndex(10),
            Visibility::Hidden,
            NoticeOverlay,
        ))
        .with_children(|parent| {
            parent
                .spawn((
                    Node {
                        flex_direction: FlexDirection::Column,
                        align_items: AlignItems::Center,
                        padding: UiRect::all(Val::Px(20.0)),
                        row_gap: Val::Px(12.0),
                        ..default()
                    },
                    BackgroundColor(UI_BACKGROUND),
                ))
                .with_children(|panel| {
                    panel.spawn((
                        Text::new(""),
                        TextFont {
                            font_size: 20.0,
                            ..default()
                        },
                        TextColor(TEXT_PRIMARY),
                        NoticeText,
                    ));
                    panel.spawn((
                        Text::new("Click or press any key"),
                        TextFont {
                            font_size: 13.0,
                            ..default()
                        },
                        TextColor(TEXT_MUTED),
                    ));
                });
        });
}

/// Show or hide the overlay to match the Notice resource
pub fn update_notice_overlay(
    notice: Res<Notice>,
    mut overlay: Query<&mut Visibility, With<NoticeOverlay>>,
    mut text: Query<&mut Text, With<NoticeText>>,
) {
    if !notice.is_changed() {
        return;
    }

    if let Ok(mut visibility) = overlay.single_mut() {
        *visibility = if notice.is_visible() {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }
    if let (Ok(mut text), Some(message)) = (text.single_mut(), notice.message.as_ref()) {
        text.0 = message.clone();
        info!("Notice: {}", message);
    }
}
