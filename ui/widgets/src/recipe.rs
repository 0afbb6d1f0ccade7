//! Recipe strip layout: ingredient icons, a time marker, result icons.

use {
    crate::{icon, UiTheme},
    bevy::prelude::*,
    catalog_assets::RecipeItem,
    catalog_resources::Catalog,
};

/// Column pitch of ingredient and result icons in the strip.
pub const STRIP_CELL_SIZE: f32 = 36.0;

const MARKER_GAP_BEFORE: f32 = 2.0;
const MARKER_GAP_AFTER: f32 = 6.0;
const MARKER_TOP_OFFSET: f32 = 6.0;

/// One element of the horizontal recipe strip, in render order.
#[derive(Debug, Clone, PartialEq)]
pub enum StripCell {
    Ingredient { name: String, amount: u32 },
    TimeMarker(String),
    Result { name: String, amount: u32 },
}

/// The literal `=<time>s>` marker, default numeric formatting.
pub fn time_marker(time: f32) -> String {
    format!("={time}s>")
}

/// Pure layout sequence for a recipe: ingredients left to right, the
/// time marker, then results.
pub fn recipe_strip(ingredients: &[RecipeItem], results: &[RecipeItem], time: f32) -> Vec<StripCell> {
    let mut cells = Vec::with_capacity(ingredients.len() + results.len() + 1);
    for ingredient in ingredients {
        cells.push(StripCell::Ingredient {
            name: ingredient.name.clone(),
            amount: ingredient.amount,
        });
    }
    cells.push(StripCell::TimeMarker(time_marker(time)));
    for result in results {
        cells.push(StripCell::Result {
            name: result.name.clone(),
            amount: result.amount,
        });
    }
    cells
}

/// Strip cells with icon placements and amount text resolved against the
/// catalog, ready to spawn without further lookups.
#[derive(Debug, Clone)]
pub enum ResolvedCell {
    Icon {
        layers: Vec<icon::LayerPlacement>,
        amount: String,
    },
    Marker(String),
}

pub fn resolve_strip(catalog: &Catalog, cells: &[StripCell]) -> Vec<ResolvedCell> {
    cells
        .iter()
        .map(|cell| match cell {
            StripCell::Ingredient { name, amount } | StripCell::Result { name, amount } => {
                ResolvedCell::Icon {
                    layers: icon::icon_layers(catalog, name, false).unwrap_or_default(),
                    amount: icon::format_amount(*amount),
                }
            }
            StripCell::TimeMarker(text) => ResolvedCell::Marker(text.clone()),
        })
        .collect()
}

/// Renders a resolved strip into `parent`, a flex row. Stateless; each
/// call's output fully replaces prior content when the caller clears the
/// host first.
pub fn spawn_recipe_strip(
    parent: &mut ChildSpawnerCommands,
    cells: &[ResolvedCell],
    asset_server: &AssetServer,
) {
    for cell in cells {
        match cell {
            ResolvedCell::Icon { layers, amount } => {
                parent
                    .spawn(Node {
                        width: Val::Px(STRIP_CELL_SIZE),
                        height: Val::Px(STRIP_CELL_SIZE),
                        ..default()
                    })
                    .with_children(|slot| {
                        icon::spawn_icon(slot, layers, 0.0, 0.0, asset_server);
                        icon::spawn_amount_text(slot, 0.0, 0.0, amount);
                    });
            }
            ResolvedCell::Marker(text) => {
                parent.spawn((
                    Text::new(text),
                    TextFont {
                        font_size: 14.0,
                        ..default()
                    },
                    TextColor(UiTheme::TEXT_PRIMARY),
                    Node {
                        margin: UiRect {
                            left: Val::Px(MARKER_GAP_BEFORE),
                            right: Val::Px(MARKER_GAP_AFTER),
                            top: Val::Px(MARKER_TOP_OFFSET),
                            ..default()
                        },
                        ..default()
                    },
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, amount: u32) -> RecipeItem {
        RecipeItem {
            name: name.to_string(),
            amount,
        }
    }

    #[test]
    fn marker_uses_default_numeric_formatting() {
        assert_eq!(time_marker(0.5), "=0.5s>");
        assert_eq!(time_marker(3.0), "=3s>");
        assert_eq!(time_marker(12.75), "=12.75s>");
    }

    #[test]
    fn strip_orders_ingredients_marker_results() {
        let cells = recipe_strip(
            &[entry("iron-plate", 2), entry("iron-gear-wheel", 1)],
            &[entry("transport-belt", 2)],
            0.5,
        );

        assert_eq!(
            cells,
            vec![
                StripCell::Ingredient {
                    name: "iron-plate".to_string(),
                    amount: 2
                },
                StripCell::Ingredient {
                    name: "iron-gear-wheel".to_string(),
                    amount: 1
                },
                StripCell::TimeMarker("=0.5s>".to_string()),
                StripCell::Result {
                    name: "transport-belt".to_string(),
                    amount: 2
                },
            ]
        );
    }

    #[test]
    fn unresolvable_icons_resolve_to_empty_layer_sets() {
        let cells = recipe_strip(&[entry("nowhere", 1)], &[], 1.0);
        let resolved = resolve_strip(&Catalog::default(), &cells);

        match &resolved[0] {
            ResolvedCell::Icon { layers, amount } => {
                assert!(layers.is_empty());
                assert_eq!(amount, "1");
            }
            other => panic!("expected icon cell, got {other:?}"),
        }
    }
}
