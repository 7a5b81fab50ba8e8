//! Soil patch autotiling.
//!
//! Each tilled cell shows one of 16 patch variants chosen from which of its
//! four cardinal neighbors are also tilled. Variant names are directionally
//! inverted from the missing-neighbor side (a cell whose only tilled
//! neighbor is above shows the `b` patch), matching the soil tileset's
//! naming.

use crate::shared::{CellFlag, FarmGrid};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatchVariant {
    /// Isolated patch, no tilled neighbors.
    O,
    /// Surrounded on all four sides.
    X,
    T,
    B,
    L,
    R,
    Tb,
    Lr,
    Tl,
    Tr,
    Bl,
    Br,
    Tbl,
    Tbr,
    Lrt,
    Lrb,
}

impl PatchVariant {
    /// Tileset key, e.g. `"lrb"` for `soil/lrb.png`.
    pub fn sprite_key(self) -> &'static str {
        match self {
            PatchVariant::O => "o",
            PatchVariant::X => "x",
            PatchVariant::T => "t",
            PatchVariant::B => "b",
            PatchVariant::L => "l",
            PatchVariant::R => "r",
            PatchVariant::Tb => "tb",
            PatchVariant::Lr => "lr",
            PatchVariant::Tl => "tl",
            PatchVariant::Tr => "tr",
            PatchVariant::Bl => "bl",
            PatchVariant::Br => "br",
            PatchVariant::Tbl => "tbl",
            PatchVariant::Tbr => "tbr",
            PatchVariant::Lrt => "lrt",
            PatchVariant::Lrb => "lrb",
        }
    }

    /// Index into the soil tileset atlas (one column per variant in
    /// `sprite_key` order).
    pub fn atlas_index(self) -> usize {
        match self {
            PatchVariant::O => 0,
            PatchVariant::X => 1,
            PatchVariant::T => 2,
            PatchVariant::B => 3,
            PatchVariant::L => 4,
            PatchVariant::R => 5,
            PatchVariant::Tb => 6,
            PatchVariant::Lr => 7,
            PatchVariant::Tl => 8,
            PatchVariant::Tr => 9,
            PatchVariant::Bl => 10,
            PatchVariant::Br => 11,
            PatchVariant::Tbl => 12,
            PatchVariant::Tbr => 13,
            PatchVariant::Lrt => 14,
            PatchVariant::Lrb => 15,
        }
    }
}

/// Resolve the patch variant for a cell from its neighbors' tilled states
/// (t = above, b = below, l = left, r = right).
///
/// This is a priority-ordered rule list, evaluated top to bottom with later
/// rules overriding earlier matches — a decision table, not a lookup. Ties
/// are broken by rule order.
pub fn resolve_patch_variant(t: bool, b: bool, l: bool, r: bool) -> PatchVariant {
    let mut variant = PatchVariant::O;

    // all sides
    if t && b && r && l {
        variant = PatchVariant::X;
    }

    // horizontal runs only
    if l && !(t || b || r) {
        variant = PatchVariant::R;
    }
    if r && !(t || b || l) {
        variant = PatchVariant::L;
    }
    if r && l && !(t || b) {
        variant = PatchVariant::Lr;
    }

    // vertical runs only
    if t && !(b || r || l) {
        variant = PatchVariant::B;
    }
    if b && !(t || l || r) {
        variant = PatchVariant::T;
    }
    if t && b && !(l || r) {
        variant = PatchVariant::Tb;
    }

    // corners
    if l && b && !(t || r) {
        variant = PatchVariant::Tr;
    }
    if r && b && !(t || l) {
        variant = PatchVariant::Tl;
    }
    if l && t && !(b || r) {
        variant = PatchVariant::Br;
    }
    if r && t && !(b || l) {
        variant = PatchVariant::Bl;
    }

    // T shapes
    if t && b && r && !l {
        variant = PatchVariant::Tbr;
    }
    if t && b && l && !r {
        variant = PatchVariant::Tbl;
    }
    if l && r && t && !b {
        variant = PatchVariant::Lrb;
    }
    if l && r && b && !t {
        variant = PatchVariant::Lrt;
    }

    variant
}

/// Variant for a grid cell. Neighbors beyond the map edge read as not
/// tilled (`FarmGrid::get` returns the empty cell out of range).
pub fn variant_for_cell(grid: &FarmGrid, x: i32, y: i32) -> PatchVariant {
    let t = grid.has_flag(x, y + 1, CellFlag::Tilled);
    let b = grid.has_flag(x, y - 1, CellFlag::Tilled);
    let l = grid.has_flag(x - 1, y, CellFlag::Tilled);
    let r = grid.has_flag(x + 1, y, CellFlag::Tilled);
    resolve_patch_variant(t, b, l, r)
}
