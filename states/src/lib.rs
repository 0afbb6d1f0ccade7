use bevy::prelude::*;

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum AppState {
    #[default]
    Loading,
    Running,
}

#[derive(States, Default, Debug, Clone, PartialEq, Eq, Hash)]
pub enum LoadingPhase {
    #[default]
    Assets, // Load catalog folders and tables from disk
    BuildCatalog, // Assemble the Catalog resource from loaded definitions
    Ready,  // All done
}
