//! Graveyard themes: the closed set of five background presets.
//!
//! Themes are persisted as their kebab-case id (`"sunset-ridge"`), so the
//! database and the wire never see the enum discriminant.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// How tombstones are placed over a theme's background.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LayoutKind {
    /// Fixed named anchor slots, paginated into scenes.
    Anchored,
    /// Reflowing grid, no pagination.
    Grid,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Theme {
    Stillwater,
    Unremembered,
    FinalMeadow,
    SunsetRidge,
    ThundersReach,
}

/// Theme used when none has been chosen or a stored id is unknown.
pub const DEFAULT_THEME: Theme = Theme::Stillwater;

/// Every theme, in picker order.
pub const ALL_THEMES: [Theme; 5] = [
    Theme::Stillwater,
    Theme::Unremembered,
    Theme::FinalMeadow,
    Theme::SunsetRidge,
    Theme::ThundersReach,
];

/// Fallback graveyard title when neither a custom name nor a theme resolves.
pub const FALLBACK_GRAVEYARD_NAME: &str = "My Graveyard";

impl Theme {
    /// Parse a stored theme id. Returns `None` for unknown ids.
    pub fn from_id(id: &str) -> Option<Self> {
        ALL_THEMES.into_iter().find(|t| t.id() == id)
    }

    /// Resolve a stored id, falling back to [`DEFAULT_THEME`].
    pub fn resolve(id: Option<&str>) -> Self {
        id.and_then(Self::from_id).unwrap_or(DEFAULT_THEME)
    }

    pub fn id(self) -> &'static str {
        match self {
            Self::Stillwater => "stillwater",
            Self::Unremembered => "unremembered",
            Self::FinalMeadow => "final-meadow",
            Self::SunsetRidge => "sunset-ridge",
            Self::ThundersReach => "thunders-reach",
        }
    }

    /// Default title shown when a graveyard has no custom name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::Stillwater => "Stillwater Grounds",
            Self::Unremembered => "Unremembered Grove",
            Self::FinalMeadow => "Final Meadow",
            Self::SunsetRidge => "Sunset Ridge",
            Self::ThundersReach => "Thunder's Reach",
        }
    }

    /// Path of the background asset served by the frontend.
    pub fn background_asset(self) -> &'static str {
        match self {
            Self::Stillwater => "/graveyarddesign1.gif",
            Self::Unremembered => "/graveyarddesign2.gif",
            Self::FinalMeadow => "/graveyarddesign3.gif",
            Self::SunsetRidge => "/graveyarddesign4.gif",
            Self::ThundersReach => "/graveyarddesign5.gif",
        }
    }

    pub fn layout(self) -> LayoutKind {
        match self {
            Self::Stillwater => LayoutKind::Anchored,
            _ => LayoutKind::Grid,
        }
    }
}

/// Serializable catalog entry for a theme.
#[derive(Debug, Clone, Serialize)]
pub struct ThemeInfo {
    pub id: &'static str,
    pub name: &'static str,
    pub background: &'static str,
    pub layout: LayoutKind,
}

impl From<Theme> for ThemeInfo {
    fn from(theme: Theme) -> Self {
        Self {
            id: theme.id(),
            name: theme.display_name(),
            background: theme.background_asset(),
            layout: theme.layout(),
        }
    }
}

/// The full theme catalog in picker order.
pub fn catalog() -> Vec<ThemeInfo> {
    ALL_THEMES.into_iter().map(ThemeInfo::from).collect()
}

/// Validate a theme id supplied by a caller.
pub fn validate_theme_id(id: &str) -> Result<Theme, CoreError> {
    Theme::from_id(id).ok_or_else(|| {
        let known: Vec<&str> = ALL_THEMES.iter().map(|t| t.id()).collect();
        CoreError::Validation(format!(
            "Unknown theme '{id}'. Expected one of: {}",
            known.join(", ")
        ))
    })
}

/// Title shown above a graveyard scene.
///
/// A non-blank custom name wins; otherwise the theme's display name.
pub fn graveyard_title(custom_name: Option<&str>, theme_id: Option<&str>) -> String {
    if let Some(name) = custom_name.map(str::trim).filter(|n| !n.is_empty()) {
        return name.to_string();
    }
    match theme_id.and_then(Theme::from_id) {
        Some(theme) => theme.display_name().to_string(),
        None => FALLBACK_GRAVEYARD_NAME.to_string(),
    }
}
