//! The item picker dialog: a group selector strip, stacked per-group
//! item grids (one visible at a time) and a hover-driven recipe preview
//! panel attached below the body.

mod layout;
mod state;
#[cfg(test)]
mod tests;

pub use {
    layout::{build_group_grids, GridSlot, GroupGrid, CREATIVE_GROUP, GRID_COLUMNS},
    state::{PanelRefresh, PickerState},
};

use {
    bevy::{prelude::*, window::PrimaryWindow},
    catalog_resources::Catalog,
    picker_events::{ItemPicked, OpenItemPicker},
    states::AppState,
    widgets::{icon, recipe, UiTheme},
};

const DIALOG_WIDTH: f32 = 404.0;
const DIALOG_BODY_HEIGHT: f32 = 442.0;
const RECIPE_PANEL_HEIGHT: f32 = 78.0;

/// Vertical footprint the dialog is centered against. Placement uses
/// this constant instead of the actual dialog height: the recipe panel
/// hangs below the body without being part of the surface, and must not
/// be clipped or double-offset.
const DIALOG_CLEARANCE: f32 = 520.0;

const GROUPS_ORIGIN: Vec2 = Vec2::new(12.0, 46.0);
const GRIDS_ORIGIN: Vec2 = Vec2::new(12.0, 126.0);

const GROUP_BUTTON_SIZE: f32 = 68.0;
const GROUP_PITCH: f32 = 70.0;
const GROUP_ICON_INSET: f32 = 18.0;

const SLOT_SIZE: f32 = 36.0;
const SLOT_PITCH: f32 = 38.0;
const SLOT_ICON_INSET: f32 = 2.0;

pub struct InventoryUiPlugin;

impl Plugin for InventoryUiPlugin {
    fn build(&self, app: &mut App) {
        app.add_observer(open_item_picker).add_systems(
            Update,
            (
                handle_group_buttons,
                handle_item_hover,
                handle_item_buttons,
                handle_close_button,
                close_on_escape,
                position_dialog,
            )
                .run_if(in_state(AppState::Running)),
        );
    }
}

// ============================================================================
// Components
// ============================================================================

/// Root of an open picker dialog; owns the interaction state.
#[derive(Component)]
pub struct ItemPickerRoot {
    pub state: PickerState,
}

#[derive(Component)]
struct PickerCloseButton;

/// Selector button for the group at this grid index.
#[derive(Component)]
struct GroupSelectorButton {
    index: usize,
}

/// Item grid container for the group at this selector index.
#[derive(Component)]
struct GroupGridContainer {
    index: usize,
}

/// Clickable item slot inside a group grid.
#[derive(Component)]
struct ItemSlotButton {
    item: String,
}

/// Recipe name (or creative) label in the preview panel.
#[derive(Component)]
struct RecipeLabel;

/// Host row for the rendered recipe strip.
#[derive(Component)]
struct RecipeStrip;

// ============================================================================
// Open Observer
// ============================================================================

fn open_item_picker(
    trigger: On<OpenItemPicker>,
    mut commands: Commands,
    catalog: Res<Catalog>,
    asset_server: Res<AssetServer>,
    windows: Query<&Window, With<PrimaryWindow>>,
    existing: Query<Entity, With<ItemPickerRoot>>,
) {
    // One picker at a time
    for picker in existing.iter() {
        commands.entity(picker).despawn();
    }

    let request = trigger.event();
    let grids = build_group_grids(&catalog, request.allow_list.as_deref());
    debug!(
        "opening picker '{}' with {} visible groups",
        request.title,
        grids.len()
    );

    let (left, top) = windows
        .single()
        .map(|window| dialog_position(window.width(), window.height()))
        .unwrap_or((0.0, 0.0));

    spawn_picker(
        &mut commands,
        &catalog,
        &asset_server,
        &request.title,
        &grids,
        left,
        top,
    );
}

/// Dialog placement, computed from the viewport center against
/// [`DIALOG_CLEARANCE`] rather than the dialog's own height.
fn dialog_position(viewport_width: f32, viewport_height: f32) -> (f32, f32) {
    (
        viewport_width / 2.0 - DIALOG_WIDTH / 2.0,
        viewport_height / 2.0 - DIALOG_CLEARANCE / 2.0,
    )
}

fn spawn_picker(
    commands: &mut Commands,
    catalog: &Catalog,
    asset_server: &AssetServer,
    title: &str,
    grids: &[GroupGrid],
    left: f32,
    top: f32,
) {
    let root = widgets::spawn_dialog_panel(
        commands,
        left,
        top,
        DIALOG_WIDTH,
        DIALOG_BODY_HEIGHT,
        ItemPickerRoot {
            state: PickerState::new(),
        },
    );

    commands.entity(root).with_children(|parent| {
        widgets::spawn_dialog_title(parent, title);
        widgets::spawn_close_button(parent, PickerCloseButton);

        // Group selector strip
        parent
            .spawn(Node {
                position_type: PositionType::Absolute,
                left: Val::Px(GROUPS_ORIGIN.x),
                top: Val::Px(GROUPS_ORIGIN.y),
                ..default()
            })
            .with_children(|strip| {
                for (index, grid) in grids.iter().enumerate() {
                    let layers = icon::icon_layers(catalog, &grid.name, false).unwrap_or_default();
                    let button = widgets::spawn_slot_button(
                        strip,
                        index as f32 * GROUP_PITCH,
                        0.0,
                        GROUP_BUTTON_SIZE,
                        GroupSelectorButton { index },
                        |content| {
                            icon::spawn_icon(
                                content,
                                &layers,
                                GROUP_ICON_INSET,
                                GROUP_ICON_INSET,
                                asset_server,
                            );
                        },
                    );
                    if index == 0 {
                        strip
                            .commands()
                            .entity(button)
                            .insert(BackgroundColor(UiTheme::SLOT_ACTIVE_BG));
                    }
                }
            });

        // Stacked per-group item grids; only the active one is displayed,
        // which also disables interaction on the rest.
        parent
            .spawn(Node {
                position_type: PositionType::Absolute,
                left: Val::Px(GRIDS_ORIGIN.x),
                top: Val::Px(GRIDS_ORIGIN.y),
                ..default()
            })
            .with_children(|area| {
                for (index, grid) in grids.iter().enumerate() {
                    area.spawn((
                        GroupGridContainer { index },
                        Node {
                            position_type: PositionType::Absolute,
                            left: Val::Px(0.0),
                            top: Val::Px(0.0),
                            display: if index == 0 {
                                Display::Flex
                            } else {
                                Display::None
                            },
                            ..default()
                        },
                    ))
                    .with_children(|grid_host| {
                        for slot in &grid.cells {
                            let layers =
                                icon::icon_layers(catalog, &slot.item, false).unwrap_or_default();
                            widgets::spawn_slot_button(
                                grid_host,
                                slot.col as f32 * SLOT_PITCH,
                                slot.row as f32 * SLOT_PITCH,
                                SLOT_SIZE,
                                ItemSlotButton {
                                    item: slot.item.clone(),
                                },
                                |content| {
                                    icon::spawn_icon(
                                        content,
                                        &layers,
                                        SLOT_ICON_INSET,
                                        SLOT_ICON_INSET,
                                        asset_server,
                                    );
                                },
                            );
                        }
                    });
                }
            });

        // Recipe preview panel, attached below the dialog body
        parent
            .spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(0.0),
                    top: Val::Px(DIALOG_BODY_HEIGHT),
                    width: Val::Px(DIALOG_WIDTH),
                    height: Val::Px(RECIPE_PANEL_HEIGHT),
                    border: UiRect::all(Val::Px(1.0)),
                    ..default()
                },
                BackgroundColor(UiTheme::DIALOG_BG),
                BorderColor::all(UiTheme::DIALOG_BORDER),
            ))
            .with_children(|panel| {
                panel.spawn((
                    RecipeLabel,
                    Text::new(""),
                    TextFont {
                        font_size: 14.0,
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
                panel.spawn((
                    RecipeStrip,
                    Node {
                        position_type: PositionType::Absolute,
                        left: Val::Px(12.0),
                        top: Val::Px(36.0),
                        flex_direction: FlexDirection::Row,
                        ..default()
                    },
                ));
            });
    });
}

// ============================================================================
// Interaction Systems
// ============================================================================

#[allow(clippy::type_complexity)]
fn handle_group_buttons(
    interactions: Query<
        (&Interaction, &GroupSelectorButton),
        (Changed<Interaction>, With<Button>),
    >,
    mut roots: Query<&mut ItemPickerRoot>,
    mut buttons: Query<(&GroupSelectorButton, &mut BackgroundColor)>,
    mut grids: Query<(&GroupGridContainer, &mut Node)>,
) {
    for (interaction, pressed) in interactions.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Ok(mut root) = roots.single_mut() else {
            return;
        };
        // Re-clicking the active group changes nothing
        if !root.state.select_group(pressed.index) {
            continue;
        }

        for (button, mut background) in buttons.iter_mut() {
            *background = if button.index == pressed.index {
                BackgroundColor(UiTheme::SLOT_ACTIVE_BG)
            } else {
                BackgroundColor(UiTheme::SLOT_BG)
            };
        }
        for (grid, mut node) in grids.iter_mut() {
            node.display = if grid.index == pressed.index {
                Display::Flex
            } else {
                Display::None
            };
        }
    }
}

fn handle_item_hover(
    mut commands: Commands,
    changed: Query<(&Interaction, &ItemSlotButton), Changed<Interaction>>,
    mut roots: Query<&mut ItemPickerRoot>,
) {
    let Ok(mut root) = roots.single_mut() else {
        return;
    };

    // Fold all interaction changes of this frame through the state
    // machine; the stale-out guard makes the outcome independent of
    // iteration order, and the panel reflects the final state.
    let mut refresh = None;
    for (interaction, slot) in changed.iter() {
        match interaction {
            Interaction::Hovered => refresh = Some(root.state.hover_item(&slot.item)),
            Interaction::None => {
                if let Some(cleared) = root.state.unhover_item(&slot.item) {
                    refresh = Some(cleared);
                }
            }
            Interaction::Pressed => {}
        }
    }

    if let Some(refresh) = refresh {
        commands.queue(RefreshRecipePanel {
            item: match refresh {
                PanelRefresh::Item(name) => Some(name),
                PanelRefresh::Cleared => None,
            },
        });
    }
}

#[allow(clippy::type_complexity)]
fn handle_item_buttons(
    mut commands: Commands,
    interactions: Query<(&Interaction, &ItemSlotButton), (Changed<Interaction>, With<Button>)>,
    roots: Query<Entity, With<ItemPickerRoot>>,
) {
    for (interaction, slot) in interactions.iter() {
        if *interaction != Interaction::Pressed {
            continue;
        }
        let Ok(root) = roots.single() else {
            return;
        };
        info!("picked item '{}'", slot.item);
        commands.entity(root).despawn();
        commands.trigger(ItemPicked {
            item: slot.item.clone(),
        });
        return;
    }
}

fn handle_close_button(
    mut commands: Commands,
    interactions: Query<&Interaction, (Changed<Interaction>, With<PickerCloseButton>)>,
    roots: Query<Entity, With<ItemPickerRoot>>,
) {
    for interaction in interactions.iter() {
        if *interaction == Interaction::Pressed {
            for root in roots.iter() {
                commands.entity(root).despawn();
            }
        }
    }
}

fn close_on_escape(
    mut commands: Commands,
    keyboard: Res<ButtonInput<KeyCode>>,
    roots: Query<Entity, With<ItemPickerRoot>>,
) {
    if keyboard.just_pressed(KeyCode::Escape) {
        for root in roots.iter() {
            commands.entity(root).despawn();
        }
    }
}

fn position_dialog(
    windows: Query<&Window, With<PrimaryWindow>>,
    mut dialogs: Query<&mut Node, With<ItemPickerRoot>>,
) {
    let Ok(window) = windows.single() else {
        return;
    };
    let (left, top) = dialog_position(window.width(), window.height());
    for mut node in dialogs.iter_mut() {
        if node.left != Val::Px(left) || node.top != Val::Px(top) {
            node.left = Val::Px(left);
            node.top = Val::Px(top);
        }
    }
}

// ============================================================================
// Recipe Panel Refresh Command
// ============================================================================

/// Clears the preview panel and, for a hovered item, repopulates it:
/// known recipe → name label plus rendered strip; recipe-less item →
/// creative label only; no item → left cleared.
struct RefreshRecipePanel {
    item: Option<String>,
}

impl Command for RefreshRecipePanel {
    fn apply(self, world: &mut World) {
        let mut labels = world.query_filtered::<&mut Text, With<RecipeLabel>>();
        if let Some(mut text) = labels.iter_mut(world).next() {
            *text = Text::new("");
        }

        let mut strips = world.query_filtered::<(Entity, Option<&Children>), With<RecipeStrip>>();
        let Some((strip, children)) = strips.iter(world).next() else {
            return;
        };
        let to_despawn: Vec<Entity> = children.map(|c| c.iter().collect()).unwrap_or_default();
        for child in to_despawn {
            world.commands().entity(child).despawn();
        }

        let Some(name) = self.item else {
            return;
        };

        let catalog = world.resource::<Catalog>();
        let (label, cells) = match catalog.recipe(&name) {
            Some(def) => {
                let strip_cells = recipe::recipe_strip(&def.ingredients, &def.results, def.time);
                (
                    def.ui_name.clone(),
                    Some(recipe::resolve_strip(catalog, &strip_cells)),
                )
            }
            // Creative items carry no recipe; only a label is shown
            None => (format!("[CREATIVE] - {}", catalog.display_name(&name)), None),
        };

        if let Some(mut text) = labels.iter_mut(world).next() {
            *text = Text::new(label);
        }

        if let Some(cells) = cells {
            let asset_server = world.resource::<AssetServer>().clone();
            world.commands().entity(strip).with_children(|parent| {
                recipe::spawn_recipe_strip(parent, &cells, &asset_server);
            });
        }
    }
}
