//! Fixed-palette color rotation for row highlighting.
//!
//! # Responsibility
//! - Own the ordered display palette.
//! - Advance a row's color index one slot per invocation.
//!
//! # Invariants
//! - The palette has exactly [`PALETTE_LEN`] slots; the last slot is the
//!   neutral white fallback.
//! - A row with no recorded index is treated as index 0, so the first
//!   advance lands on slot 1.

/// One palette slot: CSS color value plus human-readable name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaletteEntry {
    pub value: &'static str,
    pub name: &'static str,
}

/// Number of palette slots.
pub const PALETTE_LEN: usize = 7;

/// Ordered display palette. Slot order is part of the contract: repeated
/// advances walk every slot before repeating.
pub const PALETTE: [PaletteEntry; PALETTE_LEN] = [
    PaletteEntry { value: "#ff9999", name: "Red" },
    PaletteEntry { value: "#99ff99", name: "Green" },
    PaletteEntry { value: "#9999ff", name: "Blue" },
    PaletteEntry { value: "#ffff99", name: "Yellow" },
    PaletteEntry { value: "#ff99ff", name: "Pink" },
    PaletteEntry { value: "#99ffff", name: "Cyan" },
    PaletteEntry { value: "#fff", name: "White" },
];

/// Result of one color-cycle advance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColorStep {
    pub index: usize,
    pub value: &'static str,
    pub name: &'static str,
}

/// Advances the cycle one slot from `current_index`.
///
/// Out-of-range legacy indexes are reduced by the same modulo arithmetic
/// instead of being rejected.
pub fn next_color(current_index: usize) -> ColorStep {
    let index = (current_index + 1) % PALETTE_LEN;
    let entry = PALETTE[index];
    ColorStep {
        index,
        value: entry.value,
        name: entry.name,
    }
}
