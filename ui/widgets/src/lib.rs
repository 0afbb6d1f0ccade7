use bevy::prelude::*;

pub mod icon;
pub mod recipe;

pub use {
    icon::{
        format_amount, icon_layers, spawn_icon, spawn_icon_with_amount, LayerPlacement,
        AMOUNT_BOX_SIZE, ICON_SIZE,
    },
    recipe::{
        recipe_strip, resolve_strip, spawn_recipe_strip, time_marker, ResolvedCell, StripCell,
    },
};

/// Color palette shared by the editor dialogs.
pub struct UiTheme;

impl UiTheme {
    pub const DIALOG_BG: Color = Color::srgba(0.12, 0.12, 0.12, 0.95);
    pub const DIALOG_BORDER: Color = Color::srgba(1.0, 1.0, 1.0, 0.12);
    pub const SLOT_BG: Color = Color::srgba(0.0, 0.0, 0.0, 0.4);
    pub const SLOT_ACTIVE_BG: Color = Color::srgba(0.9, 0.62, 0.19, 0.55);
    pub const TEXT_PRIMARY: Color = Color::WHITE;
    pub const TEXT_MUTED: Color = Color::srgb_u8(156, 163, 175);
    pub const AMOUNT_TEXT: Color = Color::WHITE;
}

/// Spawns an absolutely positioned dialog surface with the standard
/// background and border. Domain content is composed into it by the
/// caller; there is no dialog base class.
pub fn spawn_dialog_panel(
    commands: &mut Commands,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    marker: impl Bundle,
) -> Entity {
    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(x),
                top: Val::Px(y),
                width: Val::Px(width),
                height: Val::Px(height),
                border: UiRect::all(Val::Px(1.0)),
                ..default()
            },
            BackgroundColor(UiTheme::DIALOG_BG),
            BorderColor::all(UiTheme::DIALOG_BORDER),
            marker,
        ))
        .id()
}

/// Spawns the dialog title text at the standard offset.
pub fn spawn_dialog_title(parent: &mut ChildSpawnerCommands, title: &str) {
    parent.spawn((
        Text::new(title),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        TextColor(UiTheme::TEXT_PRIMARY),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            top: Val::Px(10.0),
            ..default()
        },
    ));
}

/// Spawns a close button in the dialog's top-right corner.
pub fn spawn_close_button(parent: &mut ChildSpawnerCommands, marker: impl Bundle) {
    parent
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                right: Val::Px(8.0),
                top: Val::Px(6.0),
                width: Val::Px(24.0),
                height: Val::Px(24.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(UiTheme::SLOT_BG),
            marker,
        ))
        .with_children(|button| {
            button.spawn((
                Text::new("x"),
                TextFont {
                    font_size: 14.0,
                    ..default()
                },
                TextColor(UiTheme::TEXT_MUTED),
            ));
        });
}

/// Spawns a square slot button at an absolute position, with its content
/// composed by the caller.
pub fn spawn_slot_button(
    parent: &mut ChildSpawnerCommands,
    x: f32,
    y: f32,
    size: f32,
    marker: impl Bundle,
    content: impl FnOnce(&mut ChildSpawnerCommands),
) -> Entity {
    parent
        .spawn((
            Button,
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(x),
                top: Val::Px(y),
                width: Val::Px(size),
                height: Val::Px(size),
                ..default()
            },
            BackgroundColor(UiTheme::SLOT_BG),
            marker,
        ))
        .with_children(content)
        .id()
}
