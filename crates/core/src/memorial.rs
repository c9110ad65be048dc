//! Memorial (deceased record) limits and validation.
//!
//! Limits are counted in characters, matching what the entry form shows the
//! user ("37/100 characters"), not bytes.

use rand::Rng;

use crate::error::CoreError;

pub const MAX_NAME_CHARS: usize = 50;
pub const MAX_EPITAPH_CHARS: usize = 100;
pub const MAX_NOTES_CHARS: usize = 1000;

/// Positions are percentages on each axis, `0..POSITION_SPAN`.
pub const POSITION_SPAN: i32 = 100;

/// Fields of a memorial being created or patched. `None` means "not supplied".
#[derive(Debug, Default, Clone, Copy)]
pub struct MemorialFields<'a> {
    pub name: Option<&'a str>,
    pub epitaph: Option<&'a str>,
    pub notes: Option<&'a str>,
    pub tombstone_style: Option<i32>,
    pub position_x: Option<i32>,
    pub position_y: Option<i32>,
}

/// Validate every supplied field. Returns the first violation.
pub fn validate_memorial(fields: &MemorialFields<'_>) -> Result<(), CoreError> {
    if let Some(name) = fields.name {
        validate_required("Name", name, MAX_NAME_CHARS)?;
    }
    if let Some(epitaph) = fields.epitaph {
        validate_required("Epitaph", epitaph, MAX_EPITAPH_CHARS)?;
    }
    if let Some(notes) = fields.notes {
        validate_max("Notes", notes, MAX_NOTES_CHARS)?;
    }
    if let Some(style) = fields.tombstone_style {
        validate_style(style)?;
    }
    for position in [fields.position_x, fields.position_y].into_iter().flatten() {
        validate_position(position)?;
    }
    Ok(())
}

/// Validate that a memorial being created carries its required fields.
pub fn validate_new_memorial(fields: &MemorialFields<'_>) -> Result<(), CoreError> {
    if fields.name.is_none() {
        return Err(CoreError::Validation("Name is required".into()));
    }
    if fields.epitaph.is_none() {
        return Err(CoreError::Validation("Epitaph is required".into()));
    }
    validate_memorial(fields)
}

pub fn validate_style(style: i32) -> Result<(), CoreError> {
    if !(1..=8).contains(&style) {
        return Err(CoreError::Validation(format!(
            "Tombstone style must be between 1 and 8, got {style}"
        )));
    }
    Ok(())
}

pub fn validate_position(position: i32) -> Result<(), CoreError> {
    if !(0..POSITION_SPAN).contains(&position) {
        return Err(CoreError::Validation(format!(
            "Position must be between 0 and {}, got {position}",
            POSITION_SPAN - 1
        )));
    }
    Ok(())
}

/// Non-blank and at most `max_chars` characters.
pub fn validate_required(field: &str, value: &str, max_chars: usize) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("{field} is required")));
    }
    validate_max(field, value, max_chars)
}

pub fn validate_max(field: &str, value: &str, max_chars: usize) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len > max_chars {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max_chars} characters (got {len})"
        )));
    }
    Ok(())
}

/// Blank optional text is stored as `NULL`, not as an empty string.
pub fn normalize_optional_text(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Random freeform position for a memorial that did not specify one.
pub fn random_position() -> (i32, i32) {
    let mut rng = rand::rng();
    (
        rng.random_range(0..POSITION_SPAN),
        rng.random_range(0..POSITION_SPAN),
    )
}
