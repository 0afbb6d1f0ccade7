use {
    bevy::prelude::*,
    catalog_assets::CatalogAssetsPlugin,
    catalog_resources::CatalogResourcesPlugin,
    inventory_ui::InventoryUiPlugin,
    loading::LoadingManagerPlugin,
    picker_events::{ItemPicked, OpenItemPicker},
    settings::SettingsPlugin,
    states::AppState,
};

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<AppState>()
            .add_plugins((
                CatalogAssetsPlugin,
                CatalogResourcesPlugin,
                LoadingManagerPlugin,
                SettingsPlugin,
                InventoryUiPlugin,
            ))
            .add_systems(Startup, setup_camera)
            .add_systems(
                Update,
                open_picker_on_keypress.run_if(in_state(AppState::Running)),
            )
            .add_observer(log_picked_item);
    }
}

fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

fn open_picker_on_keypress(keyboard: Res<ButtonInput<KeyCode>>, mut commands: Commands) {
    if keyboard.just_pressed(KeyCode::KeyE) {
        commands.trigger(OpenItemPicker::new("Inventory"));
    }
}

fn log_picked_item(trigger: On<ItemPicked>) {
    info!("selected '{}'", trigger.event().item);
}
