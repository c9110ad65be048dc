//! Tombstone styles and the pure rendering of a memorial onto a stone.
//!
//! Rendering produces a view model, not markup: the frontend owns pixels,
//! this module owns what text goes on which stone shape.

use serde::Serialize;

use crate::types::CalendarDate;

/// Compact stones show at most this many characters of the name.
pub const COMPACT_NAME_CHARS: usize = 24;

/// Compact stones clamp the epitaph to roughly two lines.
pub const COMPACT_EPITAPH_CHARS: usize = 60;

/// Placeholder for a missing year or date.
pub const UNKNOWN_DATE: &str = "?";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TombstoneStyle {
    ClassicRounded = 1,
    Cross = 2,
    RipStone = 3,
    OrnateMonument = 4,
    GothicPointed = 5,
    SimpleRectangular = 6,
    Weathered = 7,
    CelticCross = 8,
}

pub const DEFAULT_STYLE: TombstoneStyle = TombstoneStyle::ClassicRounded;

pub const ALL_STYLES: [TombstoneStyle; 8] = [
    TombstoneStyle::ClassicRounded,
    TombstoneStyle::Cross,
    TombstoneStyle::RipStone,
    TombstoneStyle::OrnateMonument,
    TombstoneStyle::GothicPointed,
    TombstoneStyle::SimpleRectangular,
    TombstoneStyle::Weathered,
    TombstoneStyle::CelticCross,
];

impl TombstoneStyle {
    pub fn from_number(n: i32) -> Option<Self> {
        ALL_STYLES.into_iter().find(|s| s.number() == n)
    }

    /// Unknown numbers render with the classic rounded shape.
    pub fn resolve(n: i32) -> Self {
        Self::from_number(n).unwrap_or(DEFAULT_STYLE)
    }

    pub fn number(self) -> i32 {
        self as i32
    }

    pub fn key(self) -> &'static str {
        match self {
            Self::ClassicRounded => "classic-rounded",
            Self::Cross => "cross",
            Self::RipStone => "rip-stone",
            Self::OrnateMonument => "ornate-monument",
            Self::GothicPointed => "gothic-pointed",
            Self::SimpleRectangular => "simple-rectangular",
            Self::Weathered => "weathered",
            Self::CelticCross => "celtic-cross",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::ClassicRounded => "Classic rounded top",
            Self::Cross => "Cross",
            Self::RipStone => "R.I.P. stone",
            Self::OrnateMonument => "Ornate monument",
            Self::GothicPointed => "Gothic pointed",
            Self::SimpleRectangular => "Simple rectangular",
            Self::Weathered => "Weathered stone",
            Self::CelticCross => "Celtic cross",
        }
    }

    /// The R.I.P. stone carves a header that pushes the text down.
    pub fn has_rip_header(self) -> bool {
        self == Self::RipStone
    }
}

/// What to draw for one memorial in the scene.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TombstoneView {
    /// Resolved style number (1-8); unknown inputs resolve to 1.
    pub style: i32,
    pub shape: &'static str,
    pub rip_header: bool,
    pub name: String,
    /// Year-only range, e.g. `"1931 - 2004"` or `"? - ?"`.
    pub dates: String,
    pub epitaph: String,
}

/// Render a memorial onto its stone.
pub fn render_tombstone(
    style: i32,
    name: &str,
    birth_date: Option<CalendarDate>,
    death_date: Option<CalendarDate>,
    epitaph: &str,
) -> TombstoneView {
    let resolved = TombstoneStyle::resolve(style);
    TombstoneView {
        style: resolved.number(),
        shape: resolved.key(),
        rip_header: resolved.has_rip_header(),
        name: clamp_text(name, COMPACT_NAME_CHARS),
        dates: year_range(birth_date, death_date),
        epitaph: clamp_text(epitaph, COMPACT_EPITAPH_CHARS),
    }
}

/// `"YYYY - YYYY"`, with `?` standing in for a missing end.
pub fn year_range(birth_date: Option<CalendarDate>, death_date: Option<CalendarDate>) -> String {
    let year = |d: Option<CalendarDate>| match d {
        Some(date) => date.format("%Y").to_string(),
        None => UNKNOWN_DATE.to_string(),
    };
    format!("{} - {}", year(birth_date), year(death_date))
}

/// Truncate to `max_chars` characters, ending in an ellipsis when cut.
pub fn clamp_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

/// Everything the memorial detail dialog shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemorialDetail {
    pub style: i32,
    pub shape: &'static str,
    pub name: String,
    /// Full ISO dates, `None` when both are unknown.
    pub dates: Option<String>,
    pub epitaph: String,
    pub notes: Option<String>,
}

pub fn render_detail(
    style: i32,
    name: &str,
    birth_date: Option<CalendarDate>,
    death_date: Option<CalendarDate>,
    epitaph: &str,
    notes: Option<&str>,
) -> MemorialDetail {
    let resolved = TombstoneStyle::resolve(style);
    let full = |d: Option<CalendarDate>| match d {
        Some(date) => date.format("%Y-%m-%d").to_string(),
        None => UNKNOWN_DATE.to_string(),
    };
    let dates = if birth_date.is_none() && death_date.is_none() {
        None
    } else {
        Some(format!("{} — {}", full(birth_date), full(death_date)))
    };

    MemorialDetail {
        style: resolved.number(),
        shape: resolved.key(),
        name: name.to_string(),
        dates,
        epitaph: epitaph.to_string(),
        notes: notes.map(str::to_string),
    }
}

/// One choice in the style picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleOption {
    pub number: i32,
    pub key: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// The eight picker options, with the (resolved) current choice marked.
pub fn style_picker(selected: i32) -> Vec<StyleOption> {
    let current = TombstoneStyle::resolve(selected);
    ALL_STYLES
        .into_iter()
        .map(|s| StyleOption {
            number: s.number(),
            key: s.key(),
            label: s.label(),
            selected: s == current,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> CalendarDate {
        CalendarDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn numbers_cover_one_through_eight() {
        let numbers: Vec<i32> = ALL_STYLES.iter().map(|s| s.number()).collect();
        assert_eq!(numbers, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn unknown_style_falls_back_to_classic() {
        assert_eq!(TombstoneStyle::resolve(0), TombstoneStyle::ClassicRounded);
        assert_eq!(TombstoneStyle::resolve(9), TombstoneStyle::ClassicRounded);
        assert_eq!(TombstoneStyle::resolve(-3), TombstoneStyle::ClassicRounded);
        assert_eq!(TombstoneStyle::resolve(5), TombstoneStyle::GothicPointed);
    }

    #[test]
    fn memorial_without_dates_shows_question_marks() {
        let view = render_tombstone(1, "Jane Doe", None, None, "Forever remembered");
        assert_eq!(view.name, "Jane Doe");
        assert_eq!(view.dates, "? - ?");
        assert_eq!(view.epitaph, "Forever remembered");
        assert_eq!(view.shape, "classic-rounded");
        assert!(!view.rip_header);
    }

    #[test]
    fn dates_are_truncated_to_years() {
        let view = render_tombstone(
            3,
            "Old Tom",
            Some(date(1931, 5, 17)),
            Some(date(2004, 11, 2)),
            "Gone fishing",
        );
        assert_eq!(view.dates, "1931 - 2004");
        assert!(view.rip_header);
    }

    #[test]
    fn half_known_range() {
        assert_eq!(year_range(None, Some(date(1999, 1, 1))), "? - 1999");
        assert_eq!(year_range(Some(date(1900, 1, 1)), None), "1900 - ?");
    }

    #[test]
    fn clamp_keeps_short_text() {
        assert_eq!(clamp_text("short", 10), "short");
        assert_eq!(clamp_text("exactly10!", 10), "exactly10!");
    }

    #[test]
    fn clamp_counts_characters_not_bytes() {
        let clamped = clamp_text("ééééééé", 4);
        assert_eq!(clamped, "ééé…");
        assert_eq!(clamped.chars().count(), 4);
    }

    #[test]
    fn long_epitaph_is_clamped_on_the_stone() {
        let epitaph = "a".repeat(100);
        let view = render_tombstone(2, "X", None, None, &epitaph);
        assert_eq!(view.epitaph.chars().count(), COMPACT_EPITAPH_CHARS);
        assert!(view.epitaph.ends_with('…'));
    }

    #[test]
    fn detail_shows_full_dates_and_notes() {
        let detail = render_detail(
            4,
            "Ada",
            Some(date(1815, 12, 10)),
            Some(date(1852, 11, 27)),
            "Enchantress of numbers",
            Some("First programmer."),
        );
        assert_eq!(detail.dates.as_deref(), Some("1815-12-10 — 1852-11-27"));
        assert_eq!(detail.notes.as_deref(), Some("First programmer."));
        assert_eq!(detail.shape, "ornate-monument");
    }

    #[test]
    fn detail_without_dates_has_no_date_line() {
        let detail = render_detail(1, "Jane Doe", None, None, "Forever remembered", None);
        assert_eq!(detail.dates, None);
    }

    #[test]
    fn picker_marks_exactly_one_option() {
        let options = style_picker(7);
        assert_eq!(options.len(), 8);
        let selected: Vec<i32> = options.iter().filter(|o| o.selected).map(|o| o.number).collect();
        assert_eq!(selected, vec![7]);

        let fallback = style_picker(42);
        assert!(fallback[0].selected);
    }
}
