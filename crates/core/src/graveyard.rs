//! Graveyard collection rules.

use crate::error::CoreError;
use crate::memorial::validate_required;

pub const MAX_GRAVEYARD_NAME_CHARS: usize = 50;

/// A user must always keep at least this many graveyards.
pub const MIN_GRAVEYARDS_PER_USER: usize = 1;

pub const LAST_GRAVEYARD_MESSAGE: &str = "You must have at least one graveyard";

pub fn validate_graveyard_name(name: &str) -> Result<(), CoreError> {
    validate_required("Graveyard name", name, MAX_GRAVEYARD_NAME_CHARS)
}

/// Whether a graveyard may be deleted from a collection of `count`.
pub fn can_delete_graveyard(count: usize) -> bool {
    count > MIN_GRAVEYARDS_PER_USER
}

/// Index of the graveyard to display by default.
///
/// The first flagged-active entry wins; with none flagged, the first entry.
pub fn pick_active<T>(items: &[T], is_active: impl Fn(&T) -> bool) -> Option<usize> {
    items
        .iter()
        .position(is_active)
        .or_else(|| (!items.is_empty()).then_some(0))
}
