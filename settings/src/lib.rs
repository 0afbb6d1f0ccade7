//! Persisted application settings.
//!
//! Settings live in a single versioned resource, loaded from
//! `settings.ron` at startup and written back whenever a field changes.
//! Field changes additionally dispatch side-effect events so the
//! interested subsystems (spritesheet loader, quickbar, grid renderer)
//! can react without reaching into storage themselves.

use {
    bevy::prelude::*,
    serde::{Deserialize, Serialize},
    std::{fs, path::Path},
};

const SETTINGS_FILE: &str = "settings.ron";

fn settings_version() -> u32 {
    1
}

#[derive(Resource, Reflect, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[reflect(Resource)]
pub struct AppSettings {
    #[serde(default = "settings_version")]
    pub version: u32,
    /// Render entities from the high-resolution spritesheets
    pub hr_sprites: bool,
    /// Viewport pan speed
    pub move_speed: f32,
    pub quickbar_rows: u32,
    pub dark_theme: bool,
    pub grid_pattern: GridPattern,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            version: settings_version(),
            hr_sprites: false,
            move_speed: 10.0,
            quickbar_rows: 1,
            dark_theme: true,
            grid_pattern: GridPattern::Checker,
        }
    }
}

#[derive(Reflect, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridPattern {
    Checker,
    Grid,
}

// --- Side-effect events ---

/// Spritesheet quality flipped; sprites need reloading.
#[derive(Event, Debug, Clone)]
pub struct SpriteQualityChanged {
    pub hr_sprites: bool,
}

/// Quickbar row count changed; the quickbar needs regenerating.
#[derive(Event, Debug, Clone)]
pub struct QuickbarLayoutChanged {
    pub rows: u32,
}

/// Background pattern changed; the grid needs regenerating.
#[derive(Event, Debug, Clone)]
pub struct GridPatternChanged {
    pub pattern: GridPattern,
}

pub struct SettingsPlugin;

impl Plugin for SettingsPlugin {
    fn build(&self, app: &mut App) {
        app.register_type::<AppSettings>()
            .init_resource::<AppSettings>()
            .add_systems(Startup, load_settings_at_startup)
            .add_systems(
                Update,
                persist_and_dispatch.run_if(resource_changed::<AppSettings>),
            );
    }
}

// --- Persistence seam ---

/// Reads settings from `path`. Missing or malformed files fall back to
/// defaults; malformed content is logged.
pub fn load_settings(path: &Path) -> AppSettings {
    let Ok(contents) = fs::read_to_string(path) else {
        info!("no settings file at {}, using defaults", path.display());
        return AppSettings::default();
    };
    match ron::from_str(&contents) {
        Ok(settings) => settings,
        Err(e) => {
            warn!("failed to parse {}: {e}, using defaults", path.display());
            AppSettings::default()
        }
    }
}

pub fn store_settings(path: &Path, settings: &AppSettings) -> std::io::Result<()> {
    let contents = ron::ser::to_string_pretty(settings, ron::ser::PrettyConfig::default())
        .map_err(std::io::Error::other)?;
    fs::write(path, contents)
}

// --- Systems ---

fn load_settings_at_startup(mut settings: ResMut<AppSettings>) {
    *settings = load_settings(Path::new(SETTINGS_FILE));
    debug!("loaded settings: {settings:?}");
}

fn persist_and_dispatch(
    mut commands: Commands,
    settings: Res<AppSettings>,
    mut previous: Local<Option<AppSettings>>,
) {
    let Some(old) = previous.as_ref() else {
        // First sighting is the startup load, nothing changed yet
        *previous = Some(AppSettings::clone(&settings));
        return;
    };

    if *old == *settings {
        return;
    }

    for effect in side_effects(old, &settings) {
        match effect {
            SideEffect::SpriteQuality(hr_sprites) => {
                commands.trigger(SpriteQualityChanged { hr_sprites });
            }
            SideEffect::QuickbarRows(rows) => {
                commands.trigger(QuickbarLayoutChanged { rows });
            }
            SideEffect::GridPattern(pattern) => {
                commands.trigger(GridPatternChanged { pattern });
            }
        }
    }

    if let Err(e) = store_settings(Path::new(SETTINGS_FILE), &settings) {
        error!("failed to write {SETTINGS_FILE}: {e}");
    }

    *previous = Some(AppSettings::clone(&settings));
}

/// Which side effects a settings change requires.
#[derive(Debug, Clone, PartialEq)]
pub enum SideEffect {
    SpriteQuality(bool),
    QuickbarRows(u32),
    GridPattern(GridPattern),
}

pub fn side_effects(old: &AppSettings, new: &AppSettings) -> Vec<SideEffect> {
    let mut effects = Vec::new();
    if old.hr_sprites != new.hr_sprites {
        effects.push(SideEffect::SpriteQuality(new.hr_sprites));
    }
    if old.quickbar_rows != new.quickbar_rows {
        effects.push(SideEffect::QuickbarRows(new.quickbar_rows));
    }
    if old.grid_pattern != new.grid_pattern {
        effects.push(SideEffect::GridPattern(new.grid_pattern));
    }
    effects
}
