use {
    crate::*,
    bevy::prelude::*,
    catalog_assets::{
        GroupDefinition, ItemDefinition, RecipeDefinition, RecipeItem, SubgroupDefinition,
        TilePlacement,
    },
    catalog_resources::Catalog,
    picker_events::{ItemPicked, OpenItemPicker},
};

fn item(name: &str, ui_name: &str) -> ItemDefinition {
    ItemDefinition {
        name: name.to_string(),
        ui_name: ui_name.to_string(),
        icon: Some(format!("{name}.png")),
        icons: None,
        place_result: None,
        place_as_tile: None,
    }
}

fn placeable(name: &str, ui_name: &str, entity: &str) -> ItemDefinition {
    ItemDefinition {
        place_result: Some(entity.to_string()),
        ..item(name, ui_name)
    }
}

fn tile_placeable(name: &str, ui_name: &str, tile: &str) -> ItemDefinition {
    ItemDefinition {
        place_as_tile: Some(TilePlacement {
            result: tile.to_string(),
        }),
        ..item(name, ui_name)
    }
}

fn group(name: &str, subgroups: Vec<(&str, Vec<&str>)>) -> GroupDefinition {
    GroupDefinition {
        name: name.to_string(),
        icon: format!("group-{name}.png"),
        subgroups: subgroups
            .into_iter()
            .map(|(subgroup, items)| SubgroupDefinition {
                name: subgroup.to_string(),
                items: items.into_iter().map(str::to_string).collect(),
            })
            .collect(),
    }
}

fn recipe(name: &str, ui_name: &str, ingredients: Vec<(&str, u32)>, results: Vec<(&str, u32)>, time: f32) -> RecipeDefinition {
    RecipeDefinition {
        name: name.to_string(),
        ui_name: ui_name.to_string(),
        ingredients: ingredients
            .into_iter()
            .map(|(name, amount)| RecipeItem {
                name: name.to_string(),
                amount,
            })
            .collect(),
        results: results
            .into_iter()
            .map(|(name, amount)| RecipeItem {
                name: name.to_string(),
                amount,
            })
            .collect(),
        time,
    }
}

/// Catalog used across the dialog tests.
///
/// Default-filter expectations: `logistics` keeps transport-belt (known
/// entity), landfill (always-valid tile) and stone-brick-path (known
/// tile) but drops express-belt (unknown entity); `production` keeps
/// stone-furnace; `intermediates` has no placeable item and vanishes;
/// `creative` keeps infinity-chest, which has no recipe.
fn test_catalog() -> Catalog {
    let mut catalog = Catalog {
        groups: vec![
            group(
                "logistics",
                vec![
                    ("belt", vec!["transport-belt", "express-belt"]),
                    ("terrain", vec!["landfill", "stone-brick-path"]),
                ],
            ),
            group("production", vec![("smelting", vec!["stone-furnace"])]),
            group(
                "intermediates",
                vec![("plates", vec!["iron-plate", "copper-plate"])],
            ),
            group("creative", vec![("creative", vec!["infinity-chest"])]),
        ],
        entities: ["transport-belt", "stone-furnace", "infinity-chest"]
            .into_iter()
            .map(str::to_string)
            .collect(),
        tiles: ["stone-path".to_string()].into_iter().collect(),
        ..default()
    };

    for item in [
        placeable("transport-belt", "Transport belt", "transport-belt"),
        placeable("express-belt", "Express belt", "express-belt"),
        tile_placeable("landfill", "Landfill", "landfill"),
        tile_placeable("stone-brick-path", "Stone brick path", "stone-path"),
        placeable("stone-furnace", "Stone furnace", "stone-furnace"),
        item("iron-plate", "Iron plate"),
        item("copper-plate", "Copper plate"),
        placeable("infinity-chest", "Infinity chest", "infinity-chest"),
    ] {
        catalog.items.insert(item.name.clone(), item);
    }

    for recipe in [
        recipe(
            "transport-belt",
            "Transport belt",
            vec![("iron-plate", 1), ("iron-gear-wheel", 1)],
            vec![("transport-belt", 2)],
            0.5,
        ),
        recipe(
            "stone-furnace",
            "Stone furnace",
            vec![("stone", 5)],
            vec![("stone-furnace", 1)],
            0.5,
        ),
        recipe(
            "iron-plate",
            "Iron plate",
            vec![("iron-ore", 1)],
            vec![("iron-plate", 1)],
            3.2,
        ),
    ] {
        catalog.recipes.insert(recipe.name.clone(), recipe);
    }

    catalog
}

fn allow(names: &[&str]) -> Vec<String> {
    names.iter().map(|name| name.to_string()).collect()
}

// ============================================================================
// Layout Engine
// ============================================================================

#[test]
fn default_filter_keeps_placeable_items_only() {
    let grids = build_group_grids(&test_catalog(), None);

    let names: Vec<&str> = grids.iter().map(|grid| grid.name.as_str()).collect();
    assert_eq!(names, vec!["logistics", "production", "creative"]);

    let logistics: Vec<&str> = grids[0].cells.iter().map(|slot| slot.item.as_str()).collect();
    assert_eq!(
        logistics,
        vec!["transport-belt", "landfill", "stone-brick-path"]
    );
}

#[test]
fn first_surviving_group_comes_first() {
    let mut catalog = test_catalog();
    // Drop every logistics item from the entity/tile tables
    catalog.entities.remove("transport-belt");
    catalog.tiles.clear();
    catalog
        .items
        .get_mut("landfill")
        .expect("landfill should exist")
        .place_as_tile = Some(TilePlacement {
        result: "water".to_string(),
    });

    let grids = build_group_grids(&catalog, None);
    assert_eq!(grids[0].name, "production");
}

#[test]
fn no_surviving_items_yields_no_grids() {
    let mut catalog = test_catalog();
    catalog.entities.clear();
    catalog.tiles.clear();
    catalog
        .items
        .get_mut("landfill")
        .expect("landfill should exist")
        .place_as_tile = None;

    assert!(build_group_grids(&catalog, None).is_empty());
}

#[test]
fn subgroup_boundary_forces_a_new_row() {
    let grids = build_group_grids(&test_catalog(), None);

    // belt subgroup contributes one item on row 0; terrain starts on
    // row 1 even though row 0 had nine free columns
    let logistics = &grids[0];
    assert_eq!(logistics.cells[0], GridSlot { item: "transport-belt".to_string(), col: 0, row: 0 });
    assert_eq!(logistics.cells[1], GridSlot { item: "landfill".to_string(), col: 0, row: 1 });
    assert_eq!(logistics.cells[2], GridSlot { item: "stone-brick-path".to_string(), col: 1, row: 1 });
}

#[test]
fn eleven_item_subgroup_wraps_at_column_ten() {
    let names: Vec<String> = (0..11).map(|i| format!("module-{i}")).collect();
    let name_refs: Vec<&str> = names.iter().map(String::as_str).collect();

    let mut catalog = Catalog::default();
    catalog.groups = vec![group(
        "modules",
        vec![("slots", name_refs.clone()), ("tail", vec!["tail-item"])],
    )];
    for name in names.iter().chain([&"tail-item".to_string()]) {
        catalog.items.insert(name.clone(), item(name, name));
    }

    let mut allowed = names.clone();
    allowed.push("tail-item".to_string());
    let grids = build_group_grids(&catalog, Some(&allowed));

    let slots = &grids[0].cells;
    for (index, slot) in slots.iter().take(10).enumerate() {
        assert_eq!((slot.col, slot.row), (index as u32, 0));
    }
    assert_eq!((slots[10].col, slots[10].row), (0, 1));
    // Row advances again at the subgroup boundary even though the
    // wrapped row only holds one item
    assert_eq!((slots[11].col, slots[11].row), (0, 2));
}

#[test]
fn allow_list_bypasses_placement_and_hides_creative() {
    let grids = build_group_grids(
        &test_catalog(),
        Some(&allow(&["iron-plate", "copper-plate", "infinity-chest"])),
    );

    assert_eq!(grids.len(), 1);
    assert_eq!(grids[0].name, "intermediates");
    let items: Vec<&str> = grids[0].cells.iter().map(|slot| slot.item.as_str()).collect();
    assert_eq!(items, vec!["iron-plate", "copper-plate"]);
}

#[test]
fn dialog_centers_against_fixed_clearance() {
    assert_eq!(dialog_position(1920.0, 1080.0), (758.0, 280.0));
}

// ============================================================================
// Dialog
// ============================================================================

#[derive(Resource, Default)]
struct PickedSpy(Vec<String>);

fn picker_app() -> App {
    let mut app = App::new();
    app.add_plugins((MinimalPlugins, AssetPlugin::default()))
        .init_asset::<Image>()
        .insert_resource(test_catalog())
        .init_resource::<PickedSpy>()
        .add_observer(open_item_picker)
        .add_observer(
            |trigger: On<ItemPicked>, mut spy: ResMut<PickedSpy>| {
                spy.0.push(trigger.event().item.clone());
            },
        )
        .add_systems(
            Update,
            (
                handle_group_buttons,
                handle_item_hover,
                handle_item_buttons,
                handle_close_button,
            ),
        );
    app
}

fn open_default_picker(app: &mut App) {
    app.world_mut().trigger(OpenItemPicker::new("Inventory"));
    app.update();
}

fn find_item_button(app: &mut App, name: &str) -> Entity {
    let mut query = app.world_mut().query::<(Entity, &ItemSlotButton)>();
    query
        .iter(app.world())
        .find(|(_, button)| button.item == name)
        .map(|(entity, _)| entity)
        .unwrap_or_else(|| panic!("item button '{name}' should exist"))
}

fn find_group_button(app: &mut App, index: usize) -> Entity {
    let mut query = app.world_mut().query::<(Entity, &GroupSelectorButton)>();
    query
        .iter(app.world())
        .find(|(_, button)| button.index == index)
        .map(|(entity, _)| entity)
        .unwrap_or_else(|| panic!("group button {index} should exist"))
}

fn set_interaction(app: &mut App, entity: Entity, interaction: Interaction) {
    *app.world_mut()
        .get_mut::<Interaction>(entity)
        .expect("buttons should carry Interaction") = interaction;
}

fn recipe_label(app: &mut App) -> String {
    let mut query = app.world_mut().query_filtered::<&Text, With<RecipeLabel>>();
    query
        .iter(app.world())
        .next()
        .expect("recipe label should exist")
        .0
        .clone()
}

fn strip_child_count(app: &mut App) -> usize {
    let mut query = app
        .world_mut()
        .query_filtered::<Option<&Children>, With<RecipeStrip>>();
    query
        .iter(app.world())
        .next()
        .expect("recipe strip should exist")
        .map(|children| children.len())
        .unwrap_or(0)
}

fn grid_displays(app: &mut App) -> Vec<(usize, Display)> {
    let mut query = app.world_mut().query::<(&GroupGridContainer, &Node)>();
    let mut displays: Vec<_> = query
        .iter(app.world())
        .map(|(grid, node)| (grid.index, node.display))
        .collect();
    displays.sort_by_key(|(index, _)| *index);
    displays
}

#[test]
fn opening_shows_first_group_active() {
    let mut app = picker_app();
    open_default_picker(&mut app);

    let mut groups = app.world_mut().query::<&GroupSelectorButton>();
    assert_eq!(groups.iter(app.world()).count(), 3);
    let mut items = app.world_mut().query::<&ItemSlotButton>();
    assert_eq!(items.iter(app.world()).count(), 5);

    assert_eq!(
        grid_displays(&mut app),
        vec![(0, Display::Flex), (1, Display::None), (2, Display::None)]
    );
}

#[test]
fn allow_list_dialog_offers_exactly_the_listed_items() {
    let mut app = picker_app();
    app.world_mut().trigger(OpenItemPicker::with_allow_list(
        "Select item",
        allow(&["iron-plate", "copper-plate"]),
    ));
    app.update();

    let mut groups = app.world_mut().query::<&GroupSelectorButton>();
    assert_eq!(groups.iter(app.world()).count(), 1);

    let mut items = app.world_mut().query::<&ItemSlotButton>();
    let names: Vec<String> = items
        .iter(app.world())
        .map(|button| button.item.clone())
        .collect();
    assert_eq!(names, vec!["iron-plate", "copper-plate"]);
}

#[test]
fn primary_press_picks_the_item_and_closes() {
    let mut app = picker_app();
    open_default_picker(&mut app);

    let button = find_item_button(&mut app, "transport-belt");
    set_interaction(&mut app, button, Interaction::Pressed);
    app.update();

    assert_eq!(app.world().resource::<PickedSpy>().0, vec!["transport-belt"]);

    let mut roots = app.world_mut().query::<&ItemPickerRoot>();
    assert_eq!(roots.iter(app.world()).count(), 0);
    let mut items = app.world_mut().query::<&ItemSlotButton>();
    assert_eq!(items.iter(app.world()).count(), 0);
}

#[test]
fn close_button_dismisses_without_picking() {
    let mut app = picker_app();
    open_default_picker(&mut app);

    let mut close = app
        .world_mut()
        .query_filtered::<Entity, With<PickerCloseButton>>();
    let button = close
        .iter(app.world())
        .next()
        .expect("close button should exist");
    set_interaction(&mut app, button, Interaction::Pressed);
    app.update();

    assert!(app.world().resource::<PickedSpy>().0.is_empty());
    let mut roots = app.world_mut().query::<&ItemPickerRoot>();
    assert_eq!(roots.iter(app.world()).count(), 0);
}

#[test]
fn hovering_an_item_shows_its_recipe() {
    let mut app = picker_app();
    open_default_picker(&mut app);

    let belt = find_item_button(&mut app, "transport-belt");
    set_interaction(&mut app, belt, Interaction::Hovered);
    app.update();

    assert_eq!(recipe_label(&mut app), "Transport belt");
    // two ingredients, the time marker, one result
    assert_eq!(strip_child_count(&mut app), 4);
}

#[test]
fn stale_unhover_keeps_the_newer_recipe() {
    let mut app = picker_app();
    open_default_picker(&mut app);

    let belt = find_item_button(&mut app, "transport-belt");
    let furnace = find_item_button(&mut app, "stone-furnace");

    set_interaction(&mut app, belt, Interaction::Hovered);
    app.update();

    // The pointer moved to the furnace; the belt's pointer-out lands in
    // the same frame and must not clear the newer hover.
    set_interaction(&mut app, furnace, Interaction::Hovered);
    set_interaction(&mut app, belt, Interaction::None);
    app.update();

    let mut roots = app.world_mut().query::<&ItemPickerRoot>();
    let root = roots
        .iter(app.world())
        .next()
        .expect("picker should stay open");
    assert_eq!(root.state.hovered(), Some("stone-furnace"));
    assert_eq!(recipe_label(&mut app), "Stone furnace");
}

#[test]
fn unhovering_clears_the_panel() {
    let mut app = picker_app();
    open_default_picker(&mut app);

    let belt = find_item_button(&mut app, "transport-belt");
    set_interaction(&mut app, belt, Interaction::Hovered);
    app.update();
    set_interaction(&mut app, belt, Interaction::None);
    app.update();

    assert_eq!(recipe_label(&mut app), "");
    assert_eq!(strip_child_count(&mut app), 0);
}

#[test]
fn recipe_less_items_show_the_creative_label() {
    let mut app = picker_app();
    open_default_picker(&mut app);

    let chest = find_item_button(&mut app, "infinity-chest");
    set_interaction(&mut app, chest, Interaction::Hovered);
    app.update();

    assert_eq!(recipe_label(&mut app), "[CREATIVE] - Infinity chest");
    assert_eq!(strip_child_count(&mut app), 0);
}

#[test]
fn selecting_a_group_switches_grids_once() {
    let mut app = picker_app();
    open_default_picker(&mut app);

    let production = find_group_button(&mut app, 1);
    set_interaction(&mut app, production, Interaction::Pressed);
    app.update();

    assert_eq!(
        grid_displays(&mut app),
        vec![(0, Display::None), (1, Display::Flex), (2, Display::None)]
    );

    // Re-clicking the active group is a no-op
    set_interaction(&mut app, production, Interaction::None);
    app.update();
    set_interaction(&mut app, production, Interaction::Pressed);
    app.update();

    assert_eq!(
        grid_displays(&mut app),
        vec![(0, Display::None), (1, Display::Flex), (2, Display::None)]
    );
}
