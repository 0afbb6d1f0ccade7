//! Catalog asset definitions for the blueprint editor.
//!
//! Items, recipes and the inventory layout are loaded from RON files with
//! typed extensions (`.item.ron`, `.recipe.ron`, `.layout.ron`, `.table.ron`).

use {
    bevy::prelude::*,
    bevy_common_assets::ron::RonAssetPlugin,
    serde::Deserialize,
};

pub struct CatalogAssetsPlugin;

impl Plugin for CatalogAssetsPlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((
            RonAssetPlugin::<ItemDefinition>::new(&["item.ron"]),
            RonAssetPlugin::<RecipeDefinition>::new(&["recipe.ron"]),
            RonAssetPlugin::<InventoryLayout>::new(&["layout.ron"]),
            RonAssetPlugin::<PlacementTable>::new(&["table.ron"]),
        ));
    }
}

/// Item definition loaded from `.item.ron` asset files.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct ItemDefinition {
    /// Unique identifier (e.g., "iron-plate")
    pub name: String,
    /// Display name shown in UI
    pub ui_name: String,
    /// Single icon image, when the item renders as one sprite
    #[serde(default)]
    pub icon: Option<String>,
    /// Ordered icon layers, when the item renders as a composite
    #[serde(default)]
    pub icons: Option<Vec<IconLayer>>,
    /// Entity this item places in the world
    #[serde(default)]
    pub place_result: Option<String>,
    /// Tile this item places, through the tile-placement indirection
    #[serde(default)]
    pub place_as_tile: Option<TilePlacement>,
}

/// One layer of a composite item icon.
#[derive(Debug, Clone, Deserialize)]
pub struct IconLayer {
    pub icon: String,
    /// Uniform scale factor applied to the layer sprite
    #[serde(default)]
    pub scale: Option<f32>,
    /// Pixel shift, center-relative
    #[serde(default)]
    pub shift: Option<[f32; 2]>,
    #[serde(default)]
    pub tint: Option<Tint>,
}

/// Color-adjustment tint for an icon layer. Alpha defaults to 1.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct Tint {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    #[serde(default)]
    pub a: Option<f32>,
}

/// Tile-placement indirection: the item resolves to a tile by name.
#[derive(Debug, Clone, Deserialize)]
pub struct TilePlacement {
    pub result: String,
}

/// Recipe definition loaded from `.recipe.ron` asset files.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct RecipeDefinition {
    pub name: String,
    pub ui_name: String,
    pub ingredients: Vec<RecipeItem>,
    pub results: Vec<RecipeItem>,
    /// Crafting time in seconds, fractional allowed
    pub time: f32,
}

/// An ingredient or result entry of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RecipeItem {
    pub name: String,
    pub amount: u32,
}

/// Ordered group/subgroup layout of the inventory, loaded from
/// `inventory.layout.ron`. File order is catalog order.
#[derive(Asset, TypePath, Debug, Clone, Deserialize)]
pub struct InventoryLayout {
    pub groups: Vec<GroupDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GroupDefinition {
    pub name: String,
    pub icon: String,
    pub subgroups: Vec<SubgroupDefinition>,
}

/// Ordered subdivision of a group, used purely for grid layout.
#[derive(Debug, Clone, Deserialize)]
pub struct SubgroupDefinition {
    pub name: String,
    pub items: Vec<String>,
}

/// Known entity and tile names, loaded from `placement.table.ron`.
/// Only membership is consulted when resolving placement results.
#[derive(Asset, TypePath, Debug, Clone, Default, Deserialize)]
pub struct PlacementTable {
    #[serde(default)]
    pub entities: Vec<String>,
    #[serde(default)]
    pub tiles: Vec<String>,
}
