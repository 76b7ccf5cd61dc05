//! Domain constants and runtime configuration defaults

// Board geometry
/// Tiles along one side of the town
pub const GRID_SIDE: usize = 3;
/// Tiles in a town, and positions on the board
pub const TILE_COUNT: usize = GRID_SIDE * GRID_SIDE;
/// Characters in a pattern string
pub const PATTERN_LENGTH: usize = TILE_COUNT * 2;
/// Global edge slots, four per position
pub const EDGE_SLOT_COUNT: usize = TILE_COUNT * 4;

/// Theme cards in the game
pub const THEME_COUNT: usize = 26;

// Synonym pruning
/// Road topology classes
pub const SYNONYM_CLASS_COUNT: usize = 5;
/// Game faces sharing each topology, which bounds how often a class may appear
pub const SYNONYM_CLASS_LIMITS: [usize; SYNONYM_CLASS_COUNT] = [3, 4, 4, 4, 3];
/// Rotations of each class that give distinct topologies
pub const SYNONYM_ROTATIONS: [u8; SYNONYM_CLASS_COUNT] = [1, 4, 2, 2, 1];
/// Feasible synonym arrangements
pub const SYNONYM_ARRANGEMENT_COUNT: usize = 254_088;

// Output settings
/// Default file for scored town records
pub const DEFAULT_OUTPUT: &str = "towns.csv";
/// Default file for synonym arrangements
pub const DEFAULT_SYNONYM_OUTPUT: &str = "synonyms.csv";

// Default values for configurable parameters
/// Fixed seed for reproducible sampling
pub const DEFAULT_SEED: u64 = 42;
/// Random patterns checked by the verify command
pub const DEFAULT_SAMPLES: usize = 100_000;

// Rendering
/// Edge length of one rendered tile in pixels
pub const TILE_PIXELS: u32 = 100;
/// Width of a rendered road in pixels
pub const ROAD_WIDTH: u32 = 16;
/// Edge length of an occupant marker in pixels
pub const MARKER_PIXELS: u32 = 10;
/// Background colour
pub const BACKGROUND_COLOR: [u8; 3] = [0xE6, 0xE7, 0xDD];
/// Road colour
pub const ROAD_COLOR: [u8; 3] = [0xFF, 0x79, 0x9A];
/// Marker outline colour
pub const CHAR_COLOR: [u8; 3] = [0x24, 0x19, 0x17];
/// On-road agent marker colour
pub const AGENT_COLOR: [u8; 3] = [0x2B, 0x4C, 0x9B];
/// On-road alien marker colour
pub const ALIEN_COLOR: [u8; 3] = [0x3F, 0xA3, 0x4D];
/// Hamburger marker colour
pub const HAMBURGER_COLOR: [u8; 3] = [0xE0, 0x8A, 0x1E];
/// Off-road marker colours: dog, girl, boy, house, UFO, agent, captured alien
pub const OCCUPANT_COLORS: [[u8; 3]; 7] = [
    [0x8B, 0x5A, 0x2B],
    [0xD9, 0x4F, 0x8A],
    [0x3B, 0x7D, 0xD8],
    [0x9E, 0x2A, 0x2B],
    [0x7A, 0x7A, 0x7A],
    [0x2B, 0x4C, 0x9B],
    [0x1F, 0x5E, 0x2A],
];

// Progress and cancellation
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
/// Exhaustive patterns examined between cancel-flag checks
pub const CANCEL_CHECK_INTERVAL: u64 = 4096;
/// Results buffered between the workers and the consumer before workers block
pub const RESULT_CHANNEL_CAPACITY: usize = 1024;
