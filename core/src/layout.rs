//! Declarative puzzle layouts and their construction-time validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{BoardSide, CellIndex};

/// Number of blocks a single move may push when a layout does not say otherwise.
pub const DEFAULT_PUSH_LIMIT: u32 = 1;

/// Largest board side accepted by [`Layout::validate`].
pub const MAX_BOARD_SIDE: u32 = 256;

/// Initial arrangement of a puzzle board.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Layout {
    /// Number of cells along each edge of the square board.
    pub side: u32,
    /// Cell the player token starts on.
    pub player: u32,
    /// Phrase the blocks must spell to solve the puzzle.
    pub phrase: String,
    /// Maximum number of blocks one move may push in a chain.
    #[serde(default = "default_push_limit")]
    pub push_limit: u32,
    /// Blocks placed on the board at start.
    #[serde(default)]
    pub blocks: Vec<BlockPlacement>,
}

/// Starting cell and fragment of a single block.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockPlacement {
    /// Cell the block starts on.
    pub cell: u32,
    /// Fragment of the phrase carried by the block.
    pub fragment: String,
}

impl BlockPlacement {
    /// Creates a placement for a block at the provided cell.
    #[must_use]
    pub fn new(cell: u32, fragment: impl Into<String>) -> Self {
        Self {
            cell,
            fragment: fragment.into(),
        }
    }
}

/// Invariant violations detected before a puzzle session starts.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LayoutError {
    /// The board side must be positive.
    #[error("board side must be at least 1")]
    EmptyBoard,
    /// The board side exceeds [`MAX_BOARD_SIDE`].
    #[error("board side {side} exceeds the maximum of {max}")]
    BoardTooLarge {
        /// Requested board side.
        side: u32,
        /// Largest accepted board side.
        max: u32,
    },
    /// The player starts outside the board.
    #[error("player cell {cell} lies outside a board of {cell_count} cells")]
    PlayerOutOfBounds {
        /// Requested player cell.
        cell: u32,
        /// Number of cells on the board.
        cell_count: u32,
    },
    /// A block starts outside the board.
    #[error("block '{fragment}' at cell {cell} lies outside a board of {cell_count} cells")]
    BlockOutOfBounds {
        /// Requested block cell.
        cell: u32,
        /// Fragment carried by the offending block.
        fragment: String,
        /// Number of cells on the board.
        cell_count: u32,
    },
    /// Two blocks share a starting cell.
    #[error("more than one block starts at cell {cell}")]
    DuplicateBlockCell {
        /// Cell claimed twice.
        cell: u32,
    },
    /// A block shares the player's starting cell.
    #[error("block '{fragment}' starts on the player cell {cell}")]
    BlockOnPlayer {
        /// Cell shared by the player and the block.
        cell: u32,
        /// Fragment carried by the offending block.
        fragment: String,
    },
    /// A block carries no text.
    #[error("block at cell {cell} has an empty fragment")]
    EmptyFragment {
        /// Cell of the offending block.
        cell: u32,
    },
    /// The target phrase is empty.
    #[error("target phrase must not be empty")]
    EmptyPhrase,
    /// The push limit must allow at least one block.
    #[error("push limit must be at least 1")]
    ZeroPushLimit,
}

impl Layout {
    /// Creates a layout with the default push limit and no blocks.
    #[must_use]
    pub fn new(side: u32, player: u32, phrase: impl Into<String>) -> Self {
        Self {
            side,
            player,
            phrase: phrase.into(),
            push_limit: DEFAULT_PUSH_LIMIT,
            blocks: Vec::new(),
        }
    }

    /// Adds a block to the layout.
    #[must_use]
    pub fn with_block(mut self, cell: u32, fragment: impl Into<String>) -> Self {
        self.blocks.push(BlockPlacement::new(cell, fragment));
        self
    }

    /// Overrides the number of blocks a single move may push.
    #[must_use]
    pub fn with_push_limit(mut self, push_limit: u32) -> Self {
        self.push_limit = push_limit;
        self
    }

    /// Side length of the described board.
    #[must_use]
    pub const fn board_side(&self) -> BoardSide {
        BoardSide::new(self.side)
    }

    /// Starting cell of the player token.
    #[must_use]
    pub const fn player_cell(&self) -> CellIndex {
        CellIndex::new(self.player)
    }

    /// Checks every construction-time invariant of the layout.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if self.side == 0 {
            return Err(LayoutError::EmptyBoard);
        }
        if self.side > MAX_BOARD_SIDE {
            return Err(LayoutError::BoardTooLarge {
                side: self.side,
                max: MAX_BOARD_SIDE,
            });
        }
        if self.phrase.is_empty() {
            return Err(LayoutError::EmptyPhrase);
        }
        if self.push_limit == 0 {
            return Err(LayoutError::ZeroPushLimit);
        }

        let side = self.board_side();
        let cell_count = side.cell_count();
        if !side.contains(self.player_cell()) {
            return Err(LayoutError::PlayerOutOfBounds {
                cell: self.player,
                cell_count,
            });
        }

        let mut claimed = HashSet::with_capacity(self.blocks.len());
        for placement in &self.blocks {
            if !side.contains(CellIndex::new(placement.cell)) {
                return Err(LayoutError::BlockOutOfBounds {
                    cell: placement.cell,
                    fragment: placement.fragment.clone(),
                    cell_count,
                });
            }
            if placement.fragment.is_empty() {
                return Err(LayoutError::EmptyFragment {
                    cell: placement.cell,
                });
            }
            if placement.cell == self.player {
                return Err(LayoutError::BlockOnPlayer {
                    cell: placement.cell,
                    fragment: placement.fragment.clone(),
                });
            }
            if !claimed.insert(placement.cell) {
                return Err(LayoutError::DuplicateBlockCell {
                    cell: placement.cell,
                });
            }
        }

        Ok(())
    }
}

fn default_push_limit() -> u32 {
    DEFAULT_PUSH_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_layout() -> Layout {
        Layout::new(3, 4, "abc").with_block(0, "a").with_block(2, "bc")
    }

    #[test]
    fn accepts_well_formed_layout() {
        assert_eq!(small_layout().validate(), Ok(()));
    }

    #[test]
    fn rejects_empty_board() {
        let layout = Layout::new(0, 0, "abc");
        assert_eq!(layout.validate(), Err(LayoutError::EmptyBoard));
    }

    #[test]
    fn rejects_oversized_board() {
        let layout = Layout::new(MAX_BOARD_SIDE + 1, 0, "abc");
        assert_eq!(
            layout.validate(),
            Err(LayoutError::BoardTooLarge {
                side: MAX_BOARD_SIDE + 1,
                max: MAX_BOARD_SIDE,
            })
        );
    }

    #[test]
    fn rejects_player_outside_board() {
        let layout = Layout::new(3, 9, "abc");
        assert_eq!(
            layout.validate(),
            Err(LayoutError::PlayerOutOfBounds {
                cell: 9,
                cell_count: 9
            })
        );
    }

    #[test]
    fn rejects_block_outside_board() {
        let layout = small_layout().with_block(12, "z");
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::BlockOutOfBounds { cell: 12, .. })
        ));
    }

    #[test]
    fn rejects_duplicate_block_cells() {
        let layout = small_layout().with_block(0, "z");
        assert_eq!(
            layout.validate(),
            Err(LayoutError::DuplicateBlockCell { cell: 0 })
        );
    }

    #[test]
    fn rejects_block_on_player() {
        let layout = small_layout().with_block(4, "z");
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::BlockOnPlayer { cell: 4, .. })
        ));
    }

    #[test]
    fn rejects_empty_fragment_and_phrase() {
        let layout = small_layout().with_block(5, "");
        assert_eq!(layout.validate(), Err(LayoutError::EmptyFragment { cell: 5 }));

        let layout = Layout::new(3, 4, "");
        assert_eq!(layout.validate(), Err(LayoutError::EmptyPhrase));
    }

    #[test]
    fn rejects_zero_push_limit() {
        let layout = small_layout().with_push_limit(0);
        assert_eq!(layout.validate(), Err(LayoutError::ZeroPushLimit));
    }

    #[test]
    fn error_messages_name_the_offending_cell() {
        let message = LayoutError::DuplicateBlockCell { cell: 7 }.to_string();
        assert_eq!(message, "more than one block starts at cell 7");
    }
}
