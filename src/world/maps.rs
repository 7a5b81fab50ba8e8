//! Map data for the farm.
//!
//! The map is defined as a 2D grid of TileKind values generated in code.
//! The Dirt field rect is the farmable region handed to the soil grid at
//! load time.

use bevy::prelude::*;

use crate::shared::*;

/// Complete definition of the farm map.
#[derive(Debug, Clone)]
pub struct MapDef {
    pub width: i32,
    pub height: i32,
    /// Row-major tile data: tiles[y * width + x]
    pub tiles: Vec<TileKind>,
}

impl MapDef {
    pub fn get_tile(&self, x: i32, y: i32) -> TileKind {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            TileKind::Void
        } else {
            self.tiles[(y * self.width + x) as usize]
        }
    }

    /// Grid coordinates of every farmable (Dirt) tile.
    pub fn farmable_cells(&self) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.get_tile(x, y) == TileKind::Dirt {
                    out.push((x, y));
                }
            }
        }
        out
    }
}

// ---------------------------------------------------------------------------
// Farm map: 32x24
// Layout: fenced border, dirt field center, pond bottom-right,
// path across the field's south edge
// ---------------------------------------------------------------------------
pub fn generate_farm() -> MapDef {
    let w = 32i32;
    let h = 24i32;
    let mut tiles = vec![TileKind::Grass; (w * h) as usize];

    let fill_rect = |x0: i32, y0: i32, rw: i32, rh: i32, kind: TileKind, tiles: &mut Vec<TileKind>| {
        for dy in 0..rh {
            for dx in 0..rw {
                let xx = x0 + dx;
                let yy = y0 + dy;
                if xx >= 0 && yy >= 0 && xx < w && yy < h {
                    tiles[(yy * w + xx) as usize] = kind;
                }
            }
        }
    };

    // Fence ring around the whole farm.
    fill_rect(0, 0, w, 1, TileKind::Fence, &mut tiles);
    fill_rect(0, h - 1, w, 1, TileKind::Fence, &mut tiles);
    fill_rect(0, 0, 1, h, TileKind::Fence, &mut tiles);
    fill_rect(w - 1, 0, 1, h, TileKind::Fence, &mut tiles);

    // Central farming field (the tillable region).
    fill_rect(6, 6, 20, 10, TileKind::Dirt, &mut tiles);

    // Path along the field's south edge, where the player starts.
    fill_rect(6, 17, 20, 1, TileKind::Path, &mut tiles);

    // Pond (bottom-right corner).
    fill_rect(27, 1, 4, 4, TileKind::Water, &mut tiles);

    MapDef {
        width: w,
        height: h,
        tiles,
    }
}

/// Placeholder ground colour per tile kind.
pub fn tile_color(kind: TileKind) -> Color {
    match kind {
        TileKind::Grass => Color::srgb(0.35, 0.55, 0.3),
        TileKind::Dirt => Color::srgb(0.55, 0.42, 0.28),
        TileKind::Water => Color::srgb(0.25, 0.45, 0.7),
        TileKind::Fence => Color::srgb(0.4, 0.3, 0.2),
        TileKind::Path => Color::srgb(0.65, 0.58, 0.45),
        TileKind::Void => Color::BLACK,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn farm_field_is_farmable_and_fenced() {
        let map = generate_farm();
        let farmable = map.farmable_cells();

        assert_eq!(farmable.len(), 20 * 10);
        assert!(farmable.contains(&(6, 6)));
        assert!(farmable.contains(&(25, 15)));
        assert!(!farmable.contains(&(0, 0)), "fence ring is not farmable");
        assert_eq!(map.get_tile(0, 0), TileKind::Fence);
        assert_eq!(map.get_tile(-5, 3), TileKind::Void);
    }
}
