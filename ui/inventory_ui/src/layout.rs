//! Grid layout for the picker: partitions the catalog into per-group
//! item grids, filtering to placeable (or explicitly allowed) items.

use catalog_resources::Catalog;

/// Hard wrap width of an item grid.
pub const GRID_COLUMNS: u32 = 10;

/// Group literally named this is only offered in the unrestricted
/// inventory, never when picking against an allow-list.
pub const CREATIVE_GROUP: &str = "creative";

#[derive(Debug, Clone, PartialEq)]
pub struct GroupGrid {
    pub name: String,
    pub icon: String,
    pub cells: Vec<GridSlot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridSlot {
    pub item: String,
    pub col: u32,
    pub row: u32,
}

/// Builds the visible grids, one per group with at least one surviving
/// item, in catalog order. The first entry is the initially active group.
///
/// Items wrap at [`GRID_COLUMNS`]; additionally every subgroup that
/// contributed an item forces a new row when it ends, even if the
/// current row is not full.
pub fn build_group_grids(catalog: &Catalog, allow: Option<&[String]>) -> Vec<GroupGrid> {
    let mut grids = Vec::new();

    for group in &catalog.groups {
        if group.name == CREATIVE_GROUP && allow.is_some() {
            continue;
        }

        let mut cells = Vec::new();
        let mut col = 0u32;
        let mut row = 0u32;

        for subgroup in &group.subgroups {
            let mut subgroup_has_items = false;

            for item_name in &subgroup.items {
                let visible = match allow {
                    Some(list) => list.iter().any(|allowed| allowed == item_name),
                    None => catalog
                        .item(item_name)
                        .is_some_and(|item| catalog.placement_resolves(item)),
                };
                if !visible {
                    continue;
                }

                if col == GRID_COLUMNS {
                    col = 0;
                    row += 1;
                }

                cells.push(GridSlot {
                    item: item_name.clone(),
                    col,
                    row,
                });

                col += 1;
                subgroup_has_items = true;
            }

            if subgroup_has_items {
                row += 1;
                col = 0;
            }
        }

        if !cells.is_empty() {
            grids.push(GroupGrid {
                name: group.name.clone(),
                icon: group.icon.clone(),
                cells,
            });
        }
    }

    grids
}
