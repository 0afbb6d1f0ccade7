//! Icon composition for items and inventory groups.
//!
//! Placement math is pure; spawning turns placements into `ImageNode`
//! children. An item renders either as a single sprite or as an ordered
//! stack of tinted/scaled/shifted layers.

use {
    crate::UiTheme,
    bevy::prelude::*,
    catalog_assets::IconLayer,
    catalog_resources::Catalog,
};

/// Base edge length of an icon sprite before layer scaling.
pub const ICON_SIZE: f32 = 32.0;

/// Edge length of the box an amount label is right/bottom aligned in.
pub const AMOUNT_BOX_SIZE: f32 = 33.0;

/// One icon layer with anchor, shift, scale and tint folded into a
/// final top-left offset and rendered size.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerPlacement {
    pub image: String,
    pub size: f32,
    pub offset: Vec2,
    pub tint: Color,
}

/// Resolves `name` to its icon layer placements. Item icons win over
/// group icons; group icons are not present in the item table. Returns
/// `None` when the definition carries neither a single icon nor a layer
/// list — a catalog fault surfaced to the caller, not handled here.
pub fn icon_layers(catalog: &Catalog, name: &str, centered: bool) -> Option<Vec<LayerPlacement>> {
    let item = catalog.item(name);
    let single = match item {
        Some(item) => item.icon.clone(),
        None => catalog.group(name).map(|group| group.icon.clone()),
    };

    if let Some(image) = single {
        let layer = IconLayer {
            icon: image,
            scale: None,
            shift: None,
            tint: None,
        };
        return Some(vec![place_layer(&layer, centered)]);
    }

    let layers = item?.icons.as_ref()?;
    Some(layers.iter().map(|layer| place_layer(layer, centered)).collect())
}

fn place_layer(layer: &IconLayer, centered: bool) -> LayerPlacement {
    let scale = layer.scale.unwrap_or(1.0);
    let size = ICON_SIZE * scale;
    let shift = layer.shift.map(Vec2::from).unwrap_or(Vec2::ZERO);

    let offset = if centered {
        shift - Vec2::splat(size / 2.0)
    } else if layer.shift.is_some() {
        // Top-left anchor while shift values assume center-relative
        // placement: compensate by half the rendered size.
        shift + Vec2::splat(size / 2.0)
    } else {
        shift
    };

    let tint = layer
        .tint
        .map(|tint| Color::srgba(tint.r, tint.g, tint.b, tint.a.unwrap_or(1.0)))
        .unwrap_or(Color::WHITE);

    LayerPlacement {
        image: layer.icon.clone(),
        size,
        offset,
        tint,
    }
}

pub fn icon_asset_path(image: &str) -> String {
    format!("graphics/icons/{image}")
}

/// Spawns one absolutely positioned image node per placement, with the
/// stack's origin at `(x, y)` in the parent.
pub fn spawn_icon(
    parent: &mut ChildSpawnerCommands,
    layers: &[LayerPlacement],
    x: f32,
    y: f32,
    asset_server: &AssetServer,
) {
    for layer in layers {
        parent.spawn((
            Node {
                position_type: PositionType::Absolute,
                left: Val::Px(x + layer.offset.x),
                top: Val::Px(y + layer.offset.y),
                width: Val::Px(layer.size),
                height: Val::Px(layer.size),
                ..default()
            },
            ImageNode {
                image: asset_server.load(icon_asset_path(&layer.image)),
                color: layer.tint,
                ..default()
            },
        ));
    }
}

/// Formats an item amount: plain integer below 1000, else floored
/// thousands with a `k` suffix.
pub fn format_amount(amount: u32) -> String {
    if amount < 1000 {
        amount.to_string()
    } else {
        format!("{}k", amount / 1000)
    }
}

/// Spawns a non-centered icon at `(x, y)` with its amount label right-
/// and bottom-aligned within a 33x33 box anchored at the same point.
pub fn spawn_icon_with_amount(
    parent: &mut ChildSpawnerCommands,
    x: f32,
    y: f32,
    name: &str,
    amount: u32,
    catalog: &Catalog,
    asset_server: &AssetServer,
) {
    if let Some(layers) = icon_layers(catalog, name, false) {
        spawn_icon(parent, &layers, x, y, asset_server);
    }
    spawn_amount_text(parent, x, y, &format_amount(amount));
}

pub(crate) fn spawn_amount_text(parent: &mut ChildSpawnerCommands, x: f32, y: f32, text: &str) {
    parent
        .spawn(Node {
            position_type: PositionType::Absolute,
            left: Val::Px(x),
            top: Val::Px(y),
            width: Val::Px(AMOUNT_BOX_SIZE),
            height: Val::Px(AMOUNT_BOX_SIZE),
            justify_content: JustifyContent::FlexEnd,
            align_items: AlignItems::FlexEnd,
            ..default()
        })
        .with_children(|amount_box| {
            amount_box.spawn((
                Text::new(text),
                TextFont {
                    font_size: 12.0,
                    ..default()
                },
                TextColor(UiTheme::AMOUNT_TEXT),
            ));
        });
}
