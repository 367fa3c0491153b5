#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Phrase Push engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems and
//! presentation layers to react to. Systems consume event streams, query the
//! read-only [`BoardView`], and respond exclusively with new command batches.

mod layout;

pub use layout::{BlockPlacement, Layout, LayoutError, DEFAULT_PUSH_LIMIT, MAX_BOARD_SIDE};

use serde::{Deserialize, Serialize};

/// Fixed marker carried by the player token in place of a fragment.
pub const PLAYER_MARKER: &str = "player-tile";

/// Commands that express all permissible world mutations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    /// Requests that the player token advance a single cell, pushing any
    /// blocks standing in the way.
    MovePlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
    /// Requests that the world accept the provided blocks as the assembled
    /// phrase and freeze the board.
    DeclareVictory {
        /// Blocks whose fragments spell the phrase, in reading order.
        contributors: Vec<Contributor>,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    /// Reports that the occupant of a cell changed.
    TileChanged {
        /// Cell whose occupant changed.
        cell: CellIndex,
        /// Tile now occupying the cell, [`Tile::Vacant`] when emptied.
        tile: Tile,
    },
    /// Confirms that a block was shifted one cell by a push.
    BlockShifted {
        /// Identifier of the block that moved.
        block: BlockId,
        /// Cell the block occupied before the push.
        from: CellIndex,
        /// Cell the block occupies after the push.
        to: CellIndex,
    },
    /// Confirms that the player completed a step.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellIndex,
        /// Cell the player occupies after moving.
        to: CellIndex,
    },
    /// Reports that a move request left the board untouched.
    MoveRejected {
        /// Direction of the rejected move.
        direction: Direction,
        /// Specific reason the move was refused.
        reason: MoveRejection,
    },
    /// Announces that the phrase was assembled and the board is frozen.
    PuzzleSolved {
        /// Merge layout describing the winning blocks.
        victory: Victory,
    },
}

/// Reasons a move request may leave the board unchanged.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MoveRejection {
    /// The step would leave the board or wrap across a row edge.
    OutOfBounds,
    /// A block in the push chain cannot advance.
    PushBlocked,
    /// The puzzle is already solved and accepts no further moves.
    PuzzleSolved,
}

/// Cardinal movement directions available to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward decreasing column indices.
    West,
}

impl Direction {
    /// All directions in clockwise order starting from north.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::East,
        Direction::South,
        Direction::West,
    ];
}

/// Flat index of a board cell, encoding `row * side + column`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CellIndex(u32);

impl CellIndex {
    /// Creates a new cell index wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the index.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Index usable for slice access.
    #[must_use]
    pub const fn as_usize(&self) -> usize {
        self.0 as usize
    }
}

/// Side length of the square board measured in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoardSide(u32);

impl BoardSide {
    /// Creates a new board side wrapper.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the number of cells along one edge.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }

    /// Total number of cells on the board.
    #[must_use]
    pub const fn cell_count(&self) -> u32 {
        self.0.saturating_mul(self.0)
    }

    /// Reports whether the cell lies on the board.
    #[must_use]
    pub const fn contains(&self, cell: CellIndex) -> bool {
        cell.get() < self.cell_count()
    }

    /// Zero-based row containing the cell.
    #[must_use]
    pub const fn row(&self, cell: CellIndex) -> u32 {
        if self.0 == 0 {
            return 0;
        }
        cell.get() / self.0
    }

    /// Zero-based column containing the cell.
    #[must_use]
    pub const fn column(&self, cell: CellIndex) -> u32 {
        if self.0 == 0 {
            return 0;
        }
        cell.get() % self.0
    }

    /// Signed index offset produced by a single step in `direction`.
    #[must_use]
    pub const fn offset(&self, direction: Direction) -> i64 {
        let side = self.0 as i64;
        match direction {
            Direction::North => -side,
            Direction::East => 1,
            Direction::South => side,
            Direction::West => -1,
        }
    }

    /// Reports whether `target` is a valid single step away from `origin`.
    ///
    /// A vertical step spans exactly one board width. A horizontal step spans
    /// exactly one index and must stay on the same row, which rules out
    /// wrapping from the end of one row onto the start of the next. The target
    /// must lie on the board. A zero-distance step is never reachable.
    #[must_use]
    pub const fn is_reachable(&self, origin: i64, target: i64) -> bool {
        let side = self.0 as i64;
        if side == 0 {
            return false;
        }

        let distance = (target - origin).abs();
        let column_distance = (origin.rem_euclid(side) - target.rem_euclid(side)).abs();
        let adjacent = distance == side || (distance == 1 && column_distance == 1);

        adjacent && target >= 0 && target < side * side
    }

    /// Computes the neighbouring cell in `direction`, if it is reachable.
    #[must_use]
    pub fn step(&self, cell: CellIndex, direction: Direction) -> Option<CellIndex> {
        let origin = i64::from(cell.get());
        let target = origin + self.offset(direction);
        if !self.is_reachable(origin, target) {
            return None;
        }
        u32::try_from(target).ok().map(CellIndex::new)
    }
}

/// Stable identifier assigned to a block in layout order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockId(u32);

impl BlockId {
    /// Creates a new block identifier with the provided numeric value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Retrieves the numeric representation of the identifier.
    #[must_use]
    pub const fn get(&self) -> u32 {
        self.0
    }
}

/// Movable block carrying a fragment of the target phrase.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Block {
    id: BlockId,
    fragment: String,
}

impl Block {
    /// Creates a block with the provided identifier and fragment text.
    #[must_use]
    pub fn new(id: BlockId, fragment: impl Into<String>) -> Self {
        Self {
            id,
            fragment: fragment.into(),
        }
    }

    /// Identifier assigned to the block.
    #[must_use]
    pub const fn id(&self) -> BlockId {
        self.id
    }

    /// Text fragment carried by the block.
    #[must_use]
    pub fn fragment(&self) -> &str {
        &self.fragment
    }
}

/// Occupant of a single board cell.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tile {
    /// Empty cell.
    #[default]
    Vacant,
    /// Pushable block with a fragment payload.
    Block(Block),
    /// The player token.
    Player,
}

impl Tile {
    /// Reports whether anything occupies the cell.
    #[must_use]
    pub const fn is_occupied(&self) -> bool {
        !matches!(self, Self::Vacant)
    }

    /// Reports whether the tile is the player token.
    #[must_use]
    pub const fn is_player(&self) -> bool {
        matches!(self, Self::Player)
    }

    /// Returns the block stored in the tile, if any.
    #[must_use]
    pub const fn block(&self) -> Option<&Block> {
        match self {
            Self::Block(block) => Some(block),
            _ => None,
        }
    }

    /// Text carried by the tile; empty for vacant cells.
    #[must_use]
    pub fn fragment(&self) -> &str {
        match self {
            Self::Vacant => "",
            Self::Block(block) => block.fragment(),
            Self::Player => PLAYER_MARKER,
        }
    }
}

/// Block that took part in assembling the phrase.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Contributor {
    block: BlockId,
    cell: CellIndex,
}

impl Contributor {
    /// Creates a contributor record for a block at the provided cell.
    #[must_use]
    pub const fn new(block: BlockId, cell: CellIndex) -> Self {
        Self { block, cell }
    }

    /// Identifier of the contributing block.
    #[must_use]
    pub const fn block(&self) -> BlockId {
        self.block
    }

    /// Cell the block occupied when the phrase was completed.
    #[must_use]
    pub const fn cell(&self) -> CellIndex {
        self.cell
    }
}

/// Merge layout published when the phrase is assembled.
///
/// Presentation layers collapse the contributing cells into a single cell
/// anchored at [`Victory::anchor`] spanning [`Victory::span`] cells, hiding
/// every cell listed in [`Victory::hidden`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Victory {
    anchor: CellIndex,
    span: u32,
    hidden: Vec<CellIndex>,
    contributors: Vec<Contributor>,
    phrase: String,
}

impl Victory {
    /// Derives the merge layout from contributors listed in reading order.
    ///
    /// Returns `None` when no contributors are provided.
    #[must_use]
    pub fn from_contributors(
        contributors: Vec<Contributor>,
        phrase: impl Into<String>,
    ) -> Option<Self> {
        let anchor = contributors.iter().map(Contributor::cell).min()?;
        let hidden = contributors
            .iter()
            .map(Contributor::cell)
            .filter(|cell| *cell != anchor)
            .collect();
        let span = u32::try_from(contributors.len()).ok()?;
        Some(Self {
            anchor,
            span,
            hidden,
            contributors,
            phrase: phrase.into(),
        })
    }

    /// Leftmost contributing cell that hosts the merged presentation.
    #[must_use]
    pub const fn anchor(&self) -> CellIndex {
        self.anchor
    }

    /// Number of cells covered by the merged presentation.
    #[must_use]
    pub const fn span(&self) -> u32 {
        self.span
    }

    /// Cells that become hidden once merged into the anchor.
    #[must_use]
    pub fn hidden(&self) -> &[CellIndex] {
        &self.hidden
    }

    /// Blocks that spelled the phrase, in reading order.
    #[must_use]
    pub fn contributors(&self) -> &[Contributor] {
        &self.contributors
    }

    /// The completed phrase.
    #[must_use]
    pub fn phrase(&self) -> &str {
        &self.phrase
    }
}

/// Lifecycle phase of a puzzle board.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Moves are accepted.
    #[default]
    Playing,
    /// The phrase was assembled; the board is frozen.
    Solved,
}

/// Read-only view into the board's tiles.
#[derive(Clone, Copy, Debug)]
pub struct BoardView<'a> {
    tiles: &'a [Tile],
    side: BoardSide,
}

impl<'a> BoardView<'a> {
    /// Captures a new board view backed by the provided tile slice.
    #[must_use]
    pub fn new(tiles: &'a [Tile], side: BoardSide) -> Self {
        Self { tiles, side }
    }

    /// Side length of the viewed board.
    #[must_use]
    pub const fn side(&self) -> BoardSide {
        self.side
    }

    /// Returns the tile stored at the cell, if the cell exists.
    #[must_use]
    pub fn tile(&self, cell: CellIndex) -> Option<&'a Tile> {
        self.tiles.get(cell.as_usize())
    }

    /// Returns the block occupying the cell, if any.
    #[must_use]
    pub fn block_at(&self, cell: CellIndex) -> Option<&'a Block> {
        self.tile(cell).and_then(Tile::block)
    }

    /// Iterator over every cell paired with its tile, in index order.
    pub fn iter(&self) -> impl Iterator<Item = (CellIndex, &'a Tile)> + 'a {
        self.tiles
            .iter()
            .enumerate()
            .filter_map(|(index, tile)| {
                u32::try_from(index)
                    .ok()
                    .map(|index| (CellIndex::new(index), tile))
            })
    }
}
