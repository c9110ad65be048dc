//! Scene layout: where tombstones sit over a theme's background.
//!
//! Anchored themes place memorials on fixed, named spots of the artwork and
//! split long lists into scenes navigated with Prev/Next. Grid themes just
//! reflow every memorial in order.

use serde::{Deserialize, Serialize};

use crate::theme::{LayoutKind, Theme};

/// Shown instead of stones when a graveyard has no memorials.
pub const EMPTY_SCENE_MESSAGE: &str = "Your graveyard is empty...";
pub const EMPTY_SCENE_HINT: &str = "Create your first memorial";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Viewport {
    #[default]
    Desktop,
    /// Phones and landscape tablets.
    Narrow,
}

/// A named spot on the background, in percent of width/height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AnchorSlot {
    pub name: &'static str,
    pub x: u8,
    pub y: u8,
}

const fn slot(name: &'static str, x: u8, y: u8) -> AnchorSlot {
    AnchorSlot { name, x, y }
}

pub const DESKTOP_SLOTS: [AnchorSlot; 10] = [
    slot("chapel-gate", 12, 58),
    slot("old-oak", 24, 66),
    slot("lantern-post", 36, 60),
    slot("mossy-wall", 48, 68),
    slot("angel-statue", 60, 61),
    slot("iron-bench", 72, 67),
    slot("willow-shade", 84, 59),
    slot("crooked-path", 30, 80),
    slot("pond-edge", 54, 82),
    slot("hilltop", 76, 81),
];

pub const NARROW_SLOTS: [AnchorSlot; 5] = [
    slot("chapel-gate", 15, 62),
    slot("old-oak", 38, 70),
    slot("angel-statue", 62, 63),
    slot("willow-shade", 84, 71),
    slot("pond-edge", 50, 84),
];

impl Viewport {
    pub fn slots(self) -> &'static [AnchorSlot] {
        match self {
            Self::Desktop => &DESKTOP_SLOTS,
            Self::Narrow => &NARROW_SLOTS,
        }
    }
}

/// One memorial positioned in a scene. Grid layouts carry no slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Placement<T> {
    pub slot: Option<AnchorSlot>,
    pub item: T,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenePage<T> {
    pub layout: LayoutKind,
    /// Zero-based scene index actually shown (requests past the end are clamped).
    pub page: usize,
    pub page_count: usize,
    pub has_prev: bool,
    pub has_next: bool,
    pub placements: Vec<Placement<T>>,
}

/// Number of scenes needed for `total` memorials; never less than one.
pub fn page_count(total: usize, per_page: usize) -> usize {
    if per_page == 0 || total == 0 {
        return 1;
    }
    total.div_ceil(per_page)
}

/// Lay `items` out for `theme` on `viewport`, showing scene `page`.
pub fn layout_scene<T>(theme: Theme, viewport: Viewport, items: Vec<T>, page: usize) -> ScenePage<T> {
    match theme.layout() {
        LayoutKind::Grid => ScenePage {
            layout: LayoutKind::Grid,
            page: 0,
            page_count: 1,
            has_prev: false,
            has_next: false,
            placements: items
                .into_iter()
                .map(|item| Placement { slot: None, item })
                .collect(),
        },
        LayoutKind::Anchored => {
            let slots = viewport.slots();
            let pages = page_count(items.len(), slots.len());
            let page = page.min(pages - 1);

            let placements = items
                .into_iter()
                .skip(page * slots.len())
                .zip(slots.iter().copied())
                .map(|(item, slot)| Placement {
                    slot: Some(slot),
                    item,
                })
                .collect();

            ScenePage {
                layout: LayoutKind::Anchored,
                page,
                page_count: pages,
                has_prev: page > 0,
                has_next: page + 1 < pages,
                placements,
            }
        }
    }
}

/// Caption under the graveyard title, e.g. `"3 souls at rest"`.
pub fn soul_count_caption(count: usize) -> String {
    if count == 1 {
        "1 soul at rest".to_string()
    } else {
        format!("{count} souls at rest")
    }
}
