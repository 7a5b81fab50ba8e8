//! Shared components, resources, events, and states for Ferncroft.
//!
//! This is the type contract. Every domain plugin imports from here.
//! No domain imports from any other domain directly.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

// ═══════════════════════════════════════════════════════════════════════
// GAME STATE — top-level state machine
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, States, Default)]
pub enum GameState {
    #[default]
    Loading,
    Playing,
}

// ═══════════════════════════════════════════════════════════════════════
// CALENDAR & WEATHER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Weather {
    Sunny,
    Rainy,
}

#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct Calendar {
    pub day: u32,
    pub weather: Weather,
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            day: 1,
            weather: Weather::Sunny,
        }
    }
}

impl Calendar {
    pub fn is_raining(&self) -> bool {
        self.weather == Weather::Rainy
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLAYER
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Facing {
    Up,
    Down,
    Left,
    Right,
}

impl Default for Facing {
    fn default() -> Self {
        Facing::Down
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolKind {
    Hoe,
    WateringCan,
    Axe,
}

#[derive(Component, Debug, Clone, Default)]
pub struct Player;

#[derive(Component, Debug, Clone)]
pub struct PlayerMovement {
    pub facing: Facing,
    pub is_moving: bool,
    pub speed: f32,
}

impl Default for PlayerMovement {
    fn default() -> Self {
        Self {
            facing: Facing::Down,
            is_moving: false,
            speed: 80.0,
        }
    }
}

/// Equipment state: which tool is in hand and which seed is selected.
/// The seed index points into `SpeciesRegistry::ordered_ids`.
#[derive(Resource, Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub equipped_tool: ToolKind,
    pub selected_seed: usize,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self {
            equipped_tool: ToolKind::Hoe,
            selected_seed: 0,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

// ═══════════════════════════════════════════════════════════════════════
// INVENTORY
// ═══════════════════════════════════════════════════════════════════════

/// Unique identifier for every item type in the game.
/// Using string IDs for data-driven flexibility.
pub type ItemId = String;

#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct Inventory {
    /// Item id → quantity held.
    pub items: HashMap<ItemId, u32>,
}

impl Inventory {
    pub fn add(&mut self, item_id: &str, quantity: u32) {
        *self.items.entry(item_id.to_string()).or_insert(0) += quantity;
    }

    pub fn count(&self, item_id: &str) -> u32 {
        self.items.get(item_id).copied().unwrap_or(0)
    }
}

// ═══════════════════════════════════════════════════════════════════════
// SOIL — cell flags and the farm grid
// ═══════════════════════════════════════════════════════════════════════

/// Per-cell soil flags. A cell may only carry Tilled / Watered / Planted
/// while it also carries Farmable (set once at map load).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellFlag {
    Farmable,
    Tilled,
    Watered,
    Planted,
}

impl CellFlag {
    const fn bit(self) -> u8 {
        match self {
            CellFlag::Farmable => 0b0001,
            CellFlag::Tilled => 0b0010,
            CellFlag::Watered => 0b0100,
            CellFlag::Planted => 0b1000,
        }
    }
}

/// A soil cell: a set of `CellFlag`s packed into one byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SoilCell(u8);

impl SoilCell {
    pub const EMPTY: SoilCell = SoilCell(0);

    pub fn has(self, flag: CellFlag) -> bool {
        self.0 & flag.bit() != 0
    }

    pub fn insert(&mut self, flag: CellFlag) {
        self.0 |= flag.bit();
        debug_assert!(
            self.has(CellFlag::Farmable),
            "non-farmable cell carries gameplay flags"
        );
    }

    pub fn remove(&mut self, flag: CellFlag) {
        self.0 &= !flag.bit();
    }
}

/// The authoritative soil state: one `SoilCell` per map tile, row-major.
/// Grid y increases upward (world-space convention), so the neighbor
/// rendered above cell (x, y) is (x, y + 1).
#[derive(Resource, Debug, Clone, Default, Serialize, Deserialize)]
pub struct FarmGrid {
    pub width: i32,
    pub height: i32,
    cells: Vec<SoilCell>,
}

impl FarmGrid {
    pub fn new(width: i32, height: i32) -> Self {
        assert!(width >= 0 && height >= 0);
        Self {
            width,
            height,
            cells: vec![SoilCell::EMPTY; (width * height) as usize],
        }
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            None
        } else {
            Some((y * self.width + x) as usize)
        }
    }

    /// Out-of-range reads return the empty cell, so every flag reads as
    /// absent beyond the map edge. Neighbor lookups rely on this.
    pub fn get(&self, x: i32, y: i32) -> SoilCell {
        self.index(x, y)
            .map(|i| self.cells[i])
            .unwrap_or(SoilCell::EMPTY)
    }

    pub fn has_flag(&self, x: i32, y: i32, flag: CellFlag) -> bool {
        self.get(x, y).has(flag)
    }

    /// Marks a cell as farmable. Called once per farmable coordinate at
    /// map load; the flag never changes afterwards.
    pub fn mark_farmable(&mut self, x: i32, y: i32) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].insert(CellFlag::Farmable);
        } else {
            debug_assert!(false, "farmable coordinate ({x}, {y}) out of range");
        }
    }

    pub fn add_flag(&mut self, x: i32, y: i32, flag: CellFlag) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].insert(flag);
        } else {
            debug_assert!(false, "add_flag at ({x}, {y}) out of range");
        }
    }

    pub fn remove_flag(&mut self, x: i32, y: i32, flag: CellFlag) {
        if let Some(i) = self.index(x, y) {
            self.cells[i].remove(flag);
        } else {
            debug_assert!(false, "remove_flag at ({x}, {y}) out of range");
        }
    }

    /// Hit-testing facade: world-space point → grid cell, or None when
    /// the point falls outside every tillable (farmable) cell.
    pub fn cell_at(&self, point: Vec2) -> Option<(i32, i32)> {
        let x = (point.x / TILE_SIZE).round() as i32;
        let y = (point.y / TILE_SIZE).round() as i32;
        if self.has_flag(x, y, CellFlag::Farmable) {
            Some((x, y))
        } else {
            None
        }
    }

    /// All cells currently carrying `flag`, in row-major order.
    pub fn cells_with(&self, flag: CellFlag) -> Vec<(i32, i32)> {
        let mut out = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                if self.has_flag(x, y, flag) {
                    out.push((x, y));
                }
            }
        }
        out
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLANT SPECIES
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesDef {
    pub id: ItemId,
    pub name: String,
    /// Number of growth frames. A plant is harvestable at
    /// `age == frames - 1`.
    pub frames: u8,
    /// Age gained per watered growth tick. Fractional rates accumulate
    /// across ticks.
    pub grow_speed: f32,
    /// Tall species anchor higher above the tile (corn-style stalks).
    pub tall: bool,
    pub sell_price: u32,
    /// First atlas index of this species' frame run.
    pub sprite_base: usize,
}

#[derive(Resource, Debug, Clone, Default)]
pub struct SpeciesRegistry {
    pub species: HashMap<ItemId, SpeciesDef>,
    /// Stable ordering for seed cycling and UI.
    pub ordered_ids: Vec<ItemId>,
}

impl SpeciesRegistry {
    pub fn insert(&mut self, def: SpeciesDef) {
        self.ordered_ids.push(def.id.clone());
        self.species.insert(def.id.clone(), def);
    }

    pub fn get(&self, id: &str) -> Option<&SpeciesDef> {
        self.species.get(id)
    }

    pub fn seed_at(&self, index: usize) -> Option<&SpeciesDef> {
        self.ordered_ids
            .get(index)
            .and_then(|id| self.species.get(id))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PLANTS
// ═══════════════════════════════════════════════════════════════════════

/// A live plant rooted in a soil cell. Anchored by grid coordinate, not
/// by patch entity, so it survives soil-patch regeneration.
#[derive(Component, Debug, Clone, Serialize, Deserialize)]
pub struct Plant {
    pub species: ItemId,
    pub cell: (i32, i32),
    /// Continuous age in [0, max_age]; the displayed frame is
    /// `age as usize`.
    pub age: f32,
    pub max_age: f32,
    pub grow_speed: f32,
    pub tall: bool,
    pub harvestable: bool,
}

impl Plant {
    /// A sprouted plant (truncated age above zero) blocks movement and
    /// draws on the main layer alongside the player.
    pub fn is_sprouted(&self) -> bool {
        self.age.trunc() > 0.0
    }

    pub fn frame(&self) -> usize {
        self.age as usize
    }

    /// Collision hitbox inset from the plant's visual bounds. None until
    /// the plant has sprouted.
    pub fn hitbox(&self, center: Vec2) -> Option<Rect> {
        if !self.is_sprouted() {
            return None;
        }
        let size = Vec2::new(TILE_SIZE * 0.6, TILE_SIZE * 0.6);
        Some(Rect::from_center_size(center, size))
    }
}

// ═══════════════════════════════════════════════════════════════════════
// WORLD & MAP
// ═══════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TileKind {
    Grass,
    Dirt,
    Water,
    Fence,
    Path,
    Void,
}

/// Walkability and tile lookup for the loaded map. Populated by the
/// world domain at load; solid entries also cover standing trees.
#[derive(Resource, Debug, Clone, Default)]
pub struct WorldMap {
    pub width: i32,
    pub height: i32,
    /// Row-major tile data: tiles[y * width + x].
    pub tiles: Vec<TileKind>,
    /// Extra solid positions from world objects (trees).
    pub solid_tiles: HashSet<(i32, i32)>,
}

impl WorldMap {
    pub fn get_tile(&self, x: i32, y: i32) -> TileKind {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            TileKind::Void
        } else {
            self.tiles[(y * self.width + x) as usize]
        }
    }

    pub fn is_walkable(&self, x: i32, y: i32) -> bool {
        if self.solid_tiles.contains(&(x, y)) {
            return false;
        }
        !matches!(
            self.get_tile(x, y),
            TileKind::Water | TileKind::Fence | TileKind::Void
        )
    }
}

// ═══════════════════════════════════════════════════════════════════════
// EVENTS — cross-domain communication
// ═══════════════════════════════════════════════════════════════════════

/// The player swung a tool at a world-space target point. Consumers
/// hit-test the point themselves (soil grid, trees).
#[derive(Event, Debug, Clone)]
pub struct ToolUseEvent {
    pub tool: ToolKind,
    pub target: Vec2,
}

/// The player used the selected seed at a world-space target point.
#[derive(Event, Debug, Clone)]
pub struct SeedUseEvent {
    pub species: ItemId,
    pub target: Vec2,
}

/// The day ended (player slept). Growth ticks and the irrigation reset
/// hang off this event.
#[derive(Event, Debug, Clone)]
pub struct DayEndEvent {
    pub day: u32,
}

/// A new day began, with freshly rolled weather.
#[derive(Event, Debug, Clone)]
pub struct DayStartedEvent {
    pub day: u32,
    pub weather: Weather,
}

#[derive(Event, Debug, Clone)]
pub struct ItemPickupEvent {
    pub item_id: ItemId,
    pub quantity: u32,
}

#[derive(Event, Debug, Clone)]
pub struct CropHarvestedEvent {
    pub item_id: ItemId,
    pub x: i32,
    pub y: i32,
}

#[derive(Event, Debug, Clone)]
pub struct PlaySfxEvent {
    pub sfx_id: String,
}

// ═══════════════════════════════════════════════════════════════════════
// CONSTANTS
// ═══════════════════════════════════════════════════════════════════════

pub const TILE_SIZE: f32 = 16.0;
pub const PIXEL_SCALE: f32 = 3.0; // render scale (16px × 3 = 48px on screen)
pub const SCREEN_WIDTH: f32 = 960.0;
pub const SCREEN_HEIGHT: f32 = 540.0;

/// Daily chance of rain when the calendar rolls a new day.
pub const RAIN_CHANCE: f64 = 0.3;

// Draw-order layers, back to front.
pub const Z_GROUND: f32 = 0.0;
pub const Z_SOIL: f32 = 1.0;
pub const Z_SOIL_WATER: f32 = 2.0;
pub const Z_GROUND_PLANT: f32 = 3.0;
pub const Z_TREE: f32 = 9.0;
/// Sprouted plants are promoted here so they sort with the player.
pub const Z_MAIN: f32 = 9.0;
pub const Z_PLAYER: f32 = 10.0;

// ═══════════════════════════════════════════════════════════════════════
// TESTS
// ═══════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_flags_are_independent() {
        let mut cell = SoilCell::EMPTY;
        cell.insert(CellFlag::Farmable);
        cell.insert(CellFlag::Tilled);
        cell.insert(CellFlag::Watered);

        assert!(cell.has(CellFlag::Farmable));
        assert!(cell.has(CellFlag::Tilled));
        assert!(cell.has(CellFlag::Watered));
        assert!(!cell.has(CellFlag::Planted));

        cell.remove(CellFlag::Watered);
        assert!(!cell.has(CellFlag::Watered));
        assert!(cell.has(CellFlag::Tilled), "removal only clears its own flag");
    }

    #[test]
    fn grid_reads_are_guarded_at_the_edges() {
        let mut grid = FarmGrid::new(4, 3);
        grid.mark_farmable(0, 0);
        grid.add_flag(0, 0, CellFlag::Tilled);

        // Every out-of-range read is the empty cell.
        assert!(!grid.has_flag(-1, 0, CellFlag::Tilled));
        assert!(!grid.has_flag(0, -1, CellFlag::Tilled));
        assert!(!grid.has_flag(4, 0, CellFlag::Tilled));
        assert!(!grid.has_flag(0, 3, CellFlag::Tilled));
        assert!(grid.has_flag(0, 0, CellFlag::Tilled));
    }

    #[test]
    fn cell_at_rejects_points_outside_farmable_cells() {
        let mut grid = FarmGrid::new(5, 5);
        grid.mark_farmable(2, 2);

        let center = Vec2::new(2.0 * TILE_SIZE, 2.0 * TILE_SIZE);
        assert_eq!(grid.cell_at(center), Some((2, 2)));

        // Same map, non-farmable neighbor.
        let neighbor = Vec2::new(3.0 * TILE_SIZE, 2.0 * TILE_SIZE);
        assert_eq!(grid.cell_at(neighbor), None);

        // Way off the map.
        assert_eq!(grid.cell_at(Vec2::new(-200.0, 40.0)), None);
    }

    #[test]
    fn gameplay_flags_imply_farmable() {
        let mut grid = FarmGrid::new(3, 3);
        for y in 0..3 {
            for x in 0..3 {
                grid.mark_farmable(x, y);
            }
        }
        grid.add_flag(1, 1, CellFlag::Tilled);
        grid.add_flag(1, 1, CellFlag::Watered);
        grid.add_flag(1, 1, CellFlag::Planted);

        for flag in [CellFlag::Tilled, CellFlag::Watered, CellFlag::Planted] {
            for (x, y) in grid.cells_with(flag) {
                assert!(grid.has_flag(x, y, CellFlag::Farmable));
            }
        }
    }

    #[test]
    fn plant_hitbox_appears_once_sprouted() {
        let mut plant = Plant {
            species: "corn".to_string(),
            cell: (1, 1),
            age: 0.7,
            max_age: 3.0,
            grow_speed: 0.7,
            tall: true,
            harvestable: false,
        };
        assert!(plant.hitbox(Vec2::ZERO).is_none(), "seedlings are walkable");

        plant.age = 1.4;
        let hitbox = plant.hitbox(Vec2::ZERO).unwrap();
        assert!(hitbox.width() < TILE_SIZE, "hitbox is inset from the tile");
        assert_eq!(plant.frame(), 1);
    }
}
