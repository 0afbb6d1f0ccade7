use bevy::{asset::LoadedFolder, prelude::*};

#[derive(Resource)]
pub struct ItemsFolderHandle(pub Handle<LoadedFolder>);

#[derive(Resource)]
pub struct RecipesFolderHandle(pub Handle<LoadedFolder>);
