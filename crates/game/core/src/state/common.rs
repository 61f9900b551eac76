use std::fmt;
use std::hash::{Hash, Hasher};

/// Unique identifier for any entity tracked in the world.
///
/// Ids are allocated from the world's historical entity count and are never
/// reused within a game, even after the entity is removed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates, plus an overlap
/// layer.
///
/// The layer exists solely so two entities (a switch and the boulder sitting
/// on it) can share an (x, y) cell without one concealing the other. Equality,
/// hashing, and ordering deliberately ignore `layer`: two positions are "the
/// same cell" regardless of layer, and every adjacency predicate is computed
/// from (x, y) only.
#[derive(Clone, Copy, Debug, Eq)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
    pub layer: i32,
}

impl PartialEq for Position {
    fn eq(&self, other: &Self) -> bool {
        self.x == other.x && self.y == other.y
    }
}

impl Hash for Position {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.x.hash(state);
        self.y.hash(state);
    }
}

impl PartialOrd for Position {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Position {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        (self.y, self.x).cmp(&(other.y, other.x))
    }
}

impl Position {
    pub const ORIGIN: Self = Self::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y, layer: 0 }
    }

    pub const fn with_layer(x: i32, y: i32, layer: i32) -> Self {
        Self { x, y, layer }
    }

    /// Same position with a different overlap layer.
    pub const fn as_layer(self, layer: i32) -> Self {
        Self { layer, ..self }
    }

    pub fn translate(self, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        Self {
            x: self.x + dx,
            y: self.y + dy,
            layer: self.layer,
        }
    }

    /// The four cardinal neighbours, in N/E/S/W order.
    pub fn cardinally_adjacent(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y),
            Position::new(self.x, self.y + 1),
            Position::new(self.x - 1, self.y),
        ]
    }

    /// The full 8-cell neighbourhood, clockwise from the top-left corner.
    pub fn adjacent(self) -> [Position; 8] {
        [
            Position::new(self.x - 1, self.y - 1),
            Position::new(self.x, self.y - 1),
            Position::new(self.x + 1, self.y - 1),
            Position::new(self.x + 1, self.y),
            Position::new(self.x + 1, self.y + 1),
            Position::new(self.x, self.y + 1),
            Position::new(self.x - 1, self.y + 1),
            Position::new(self.x - 1, self.y),
        ]
    }

    /// True when the positions share an (x, y) cell.
    pub fn coincides(self, other: Position) -> bool {
        self.x == other.x && self.y == other.y
    }

    /// Cardinally adjacent: in line on one axis and at most one cell apart.
    pub fn is_cardinally_adjacent(self, other: Position) -> bool {
        self.within_axis_range(other, 1)
    }

    /// Bribing range: in line on one axis and at most two cells apart.
    pub fn in_bribing_range(self, other: Position) -> bool {
        self.within_axis_range(other, 2)
    }

    /// Direction of a single-step move from `self` to a cardinally adjacent
    /// cell, or `None` when the cells are not exactly one step apart.
    pub fn direction_to(self, other: Position) -> Option<Direction> {
        match (other.x - self.x, other.y - self.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    fn within_axis_range(self, other: Position, range: i32) -> bool {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dy == 0 && dx.abs() <= range) || (dx == 0 && dy.abs() <= range)
    }
}

/// A requested movement direction, including the explicit "stay put" case.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
#[derive(strum::Display, strum::EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
    #[default]
    None,
}

impl Direction {
    pub const CARDINAL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    pub const fn offset(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
            Direction::None => (0, 0),
        }
    }
}
