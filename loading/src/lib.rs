//! Phased startup: load the catalog RON files, assemble the `Catalog`
//! resource, then hand over to `AppState::Running`.

mod resources;

use {
    crate::resources::{ItemsFolderHandle, RecipesFolderHandle},
    bevy::prelude::*,
    catalog_assets::{InventoryLayout, ItemDefinition, PlacementTable, RecipeDefinition},
    catalog_resources::Catalog,
    states::{AppState, LoadingPhase},
};

pub struct LoadingManagerPlugin;

impl Plugin for LoadingManagerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LoadingStatus>()
            .init_state::<LoadingPhase>()
            // Phase: Assets - load catalog folders and tables
            .add_systems(Startup, (start_loading, load_item_assets, load_recipe_assets))
            .add_systems(
                Update,
                check_assets_loaded
                    .run_if(in_state(AppState::Loading).and(in_state(LoadingPhase::Assets))),
            )
            // Phase: BuildCatalog - assemble the Catalog resource
            .add_systems(OnEnter(LoadingPhase::BuildCatalog), build_catalog)
            // Phase: Ready - transition to Running
            .add_systems(OnEnter(LoadingPhase::Ready), finish_loading)
            // Loading UI
            .add_systems(OnEnter(AppState::Loading), setup_loading_ui)
            .add_systems(
                Update,
                update_loading_ui.run_if(in_state(AppState::Loading)),
            )
            .add_systems(OnExit(AppState::Loading), cleanup_loading_ui);
    }
}

// --- Resources ---

/// Handles to the single-file catalog assets.
#[derive(Resource, Default)]
pub struct LoadingManager {
    pub inventory_layout: Handle<InventoryLayout>,
    pub placement_table: Handle<PlacementTable>,
}

#[derive(Resource, Default)]
pub struct LoadingStatus {
    pub current_phase: String,
    pub detail: String,
}

// --- Phase: Assets ---

fn start_loading(mut commands: Commands, asset_server: Res<AssetServer>) {
    info!("started loading catalog assets");
    commands.insert_resource(LoadingManager {
        inventory_layout: asset_server.load("catalog/inventory.layout.ron"),
        placement_table: asset_server.load("catalog/placement.table.ron"),
    });
}

fn load_item_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load_folder("catalog/items");
    commands.insert_resource(ItemsFolderHandle(handle));
}

fn load_recipe_assets(mut commands: Commands, asset_server: Res<AssetServer>) {
    let handle = asset_server.load_folder("catalog/recipes");
    commands.insert_resource(RecipesFolderHandle(handle));
}

fn check_assets_loaded(
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
    asset_server: Res<AssetServer>,
    loading_manager: Res<LoadingManager>,
    items: Res<ItemsFolderHandle>,
    recipes: Res<RecipesFolderHandle>,
) {
    status.current_phase = "Loading Assets".into();
    status.detail = "Loading catalog files from disk...".into();

    if asset_server.is_loaded_with_dependencies(&loading_manager.inventory_layout)
        && asset_server.is_loaded_with_dependencies(&loading_manager.placement_table)
        && asset_server.is_loaded_with_dependencies(items.0.id())
        && asset_server.is_loaded_with_dependencies(recipes.0.id())
    {
        info!("catalog assets loaded");
        next_phase.set(LoadingPhase::BuildCatalog);
    }
}

// --- Phase: BuildCatalog ---

fn build_catalog(
    mut catalog: ResMut<Catalog>,
    mut next_phase: ResMut<NextState<LoadingPhase>>,
    mut status: ResMut<LoadingStatus>,
    loading_manager: Res<LoadingManager>,
    layouts: Res<Assets<InventoryLayout>>,
    tables: Res<Assets<PlacementTable>>,
    items: Res<Assets<ItemDefinition>>,
    recipes: Res<Assets<RecipeDefinition>>,
) {
    status.current_phase = "Building Catalog".into();
    status.detail = "Indexing items and recipes...".into();

    let Some(layout) = layouts.get(&loading_manager.inventory_layout) else {
        error!("inventory layout not loaded even though the asset server said it is");
        return;
    };
    catalog.groups = layout.groups.clone();

    if let Some(table) = tables.get(&loading_manager.placement_table) {
        catalog.entities = table.entities.iter().cloned().collect();
        catalog.tiles = table.tiles.iter().cloned().collect();
    }

    for (_, item) in items.iter() {
        if let Some(previous) = catalog.items.insert(item.name.clone(), item.clone()) {
            warn!("duplicate item definition '{}', keeping the latest", previous.name);
        }
    }
    for (_, recipe) in recipes.iter() {
        if let Some(previous) = catalog.recipes.insert(recipe.name.clone(), recipe.clone()) {
            warn!(
                "duplicate recipe definition '{}', keeping the latest",
                previous.name
            );
        }
    }

    info!(
        "catalog ready: {} groups, {} items, {} recipes, {} entities, {} tiles",
        catalog.groups.len(),
        catalog.items.len(),
        catalog.recipes.len(),
        catalog.entities.len(),
        catalog.tiles.len()
    );

    next_phase.set(LoadingPhase::Ready);
}

// --- Phase: Ready ---

fn finish_loading(mut next_state: ResMut<NextState<AppState>>) {
    info!("loading complete, transitioning to Running");
    next_state.set(AppState::Running);
}

// --- Loading UI ---

#[derive(Component)]
struct LoadingUi;

fn setup_loading_ui(mut commands: Commands) {
    commands.spawn((
        Text::new("Loading..."),
        TextFont {
            font_size: 40.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(20.0),
            right: Val::Px(20.0),
            flex_direction: FlexDirection::Column,
            ..default()
        },
        LoadingUi,
    ));
}

fn update_loading_ui(status: Res<LoadingStatus>, mut query: Query<&mut Text, With<LoadingUi>>) {
    if let Ok(mut text) = query.single_mut() {
        *text = Text::new(format!(
            "Loading...\n{}\n{}",
            status.current_phase, status.detail
        ));
    }
}

fn cleanup_loading_ui(mut commands: Commands, query: Query<Entity, With<LoadingUi>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}
