use {
    bevy::prelude::*,
    catalog_assets::{GroupDefinition, ItemDefinition, RecipeDefinition},
    std::collections::{HashMap, HashSet},
};

/// Tile name that is always considered placeable, even when absent from
/// the tile table.
pub const LANDFILL_TILE: &str = "landfill";

/// The static game catalog: items, recipes, groups and the entity/tile
/// name sets. Assembled once during loading, read-only afterwards.
#[derive(Resource, Debug, Clone, Default)]
pub struct Catalog {
    /// Groups in catalog order
    pub groups: Vec<GroupDefinition>,
    pub items: HashMap<String, ItemDefinition>,
    pub recipes: HashMap<String, RecipeDefinition>,
    pub entities: HashSet<String>,
    pub tiles: HashSet<String>,
}

impl Catalog {
    pub fn item(&self, name: &str) -> Option<&ItemDefinition> {
        self.items.get(name)
    }

    pub fn recipe(&self, name: &str) -> Option<&RecipeDefinition> {
        self.recipes.get(name)
    }

    pub fn group(&self, name: &str) -> Option<&GroupDefinition> {
        self.groups.iter().find(|group| group.name == name)
    }

    /// Display name of an item, falling back to the raw name for entries
    /// missing from the item table.
    pub fn display_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.items
            .get(name)
            .map(|item| item.ui_name.as_str())
            .unwrap_or(name)
    }

    /// Whether an item's placement result resolves to a known entity, or
    /// through the tile indirection to a known tile or the literal
    /// `landfill` tile.
    pub fn placement_resolves(&self, item: &ItemDefinition) -> bool {
        if let Some(entity) = &item.place_result
            && self.entities.contains(entity)
        {
            return true;
        }
        if let Some(tile) = &item.place_as_tile {
            return self.tiles.contains(&tile.result) || tile.result == LANDFILL_TILE;
        }
        false
    }
}

pub struct CatalogResourcesPlugin;

impl Plugin for CatalogResourcesPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Catalog>();
    }
}
