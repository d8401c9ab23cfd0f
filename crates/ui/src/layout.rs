//! Screen geometry of the inventory window and pointer hit-testing.

use blockcraft_world::{Section, SlotAddress};
use egui::{Pos2, Rect, Vec2};
use serde::Deserialize;

/// Placement of the four slot zones, in screen pixels.
///
/// Zones are laid out as grids of `slot_size` squares separated by `spacing`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SlotLayout {
    /// Side of one slot square.
    pub slot_size: f32,
    /// Gap between neighbouring slots.
    pub spacing: f32,
    /// Top-left corner of the 3x3 crafting grid.
    pub crafting_grid_origin: Pos2,
    /// Top-left corner of the crafting output slot.
    pub crafting_output_origin: Pos2,
    /// Top-left corner of the 3x9 main storage.
    pub main_origin: Pos2,
    /// Top-left corner of the 1x9 hotbar.
    pub hotbar_origin: Pos2,
}

impl Default for SlotLayout {
    fn default() -> Self {
        Self {
            slot_size: 36.0,
            spacing: 4.0,
            crafting_grid_origin: Pos2::new(60.0, 20.0),
            crafting_output_origin: Pos2::new(240.0, 60.0),
            main_origin: Pos2::new(8.0, 160.0),
            hotbar_origin: Pos2::new(8.0, 290.0),
        }
    }
}

/// Hit-test order: the first zone containing the pointer wins.
const ZONES: [(Section, usize, usize); 4] = [
    (Section::CraftingGrid, 3, 3),
    (Section::CraftingOutput, 1, 1),
    (Section::Main, 3, 9),
    (Section::Hotbar, 1, 9),
];

impl SlotLayout {
    fn stride(&self) -> f32 {
        self.slot_size + self.spacing
    }

    fn origin(&self, section: Section) -> Pos2 {
        match section {
            Section::CraftingGrid => self.crafting_grid_origin,
            Section::CraftingOutput => self.crafting_output_origin,
            Section::Main => self.main_origin,
            Section::Hotbar => self.hotbar_origin,
        }
    }

    fn columns(section: Section) -> usize {
        ZONES
            .iter()
            .find(|(s, _, _)| *s == section)
            .map(|(_, _, cols)| *cols)
            .unwrap_or(1)
    }

    /// Bounding rectangle of a whole zone.
    pub fn zone_rect(&self, section: Section) -> Rect {
        let (rows, cols) = ZONES
            .iter()
            .find(|(s, _, _)| *s == section)
            .map(|(_, rows, cols)| (*rows, *cols))
            .unwrap_or((1, 1));
        let size = Vec2::new(
            cols as f32 * self.stride() - self.spacing,
            rows as f32 * self.stride() - self.spacing,
        );
        Rect::from_min_size(self.origin(section), size)
    }

    /// Screen rectangle of one slot.
    pub fn slot_rect(&self, addr: SlotAddress) -> Rect {
        let cols = Self::columns(addr.section);
        let (row, col) = (addr.index / cols, addr.index % cols);
        let min = self.origin(addr.section)
            + Vec2::new(col as f32 * self.stride(), row as f32 * self.stride());
        Rect::from_min_size(min, Vec2::splat(self.slot_size))
    }

    /// Slot under `pos`, or `None` for empty space and the gaps between slots.
    pub fn get_clicked_slot(&self, pos: Pos2) -> Option<SlotAddress> {
        let (section, rows, cols) = ZONES
            .iter()
            .copied()
            .find(|(section, _, _)| self.zone_rect(*section).contains(pos))?;

        let offset = pos - self.origin(section);
        let stride = self.stride();
        let col = ((offset.x / stride).floor() as usize).min(cols - 1);
        let row = ((offset.y / stride).floor() as usize).min(rows - 1);
        let addr = SlotAddress::new(section, row * cols + col)?;
        self.slot_rect(addr).contains(pos).then_some(addr)
    }
}
