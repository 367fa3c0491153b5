#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative board state management for Phrase Push.

use phrase_push_core::{
    Block, BlockId, BoardSide, CellIndex, Command, Contributor, Direction, Event, Layout,
    LayoutError, MoveRejection, Phase, Tile, Victory,
};
use tracing::{debug, info, warn};

/// Represents the authoritative Phrase Push board state.
#[derive(Debug)]
pub struct World {
    side: BoardSide,
    tiles: Vec<Tile>,
    player: CellIndex,
    phrase: String,
    push_limit: u32,
    phase: Phase,
    move_count: u64,
}

impl World {
    /// Builds a world from the provided layout after validating it.
    pub fn from_layout(layout: &Layout) -> Result<Self, LayoutError> {
        layout.validate()?;

        let side = layout.board_side();
        let mut tiles = vec![Tile::Vacant; side.cell_count() as usize];
        let player = layout.player_cell();
        tiles[player.as_usize()] = Tile::Player;

        for (index, placement) in layout.blocks.iter().enumerate() {
            let id = BlockId::new(index as u32);
            let cell = CellIndex::new(placement.cell);
            tiles[cell.as_usize()] = Tile::Block(Block::new(id, placement.fragment.as_str()));
        }

        Ok(Self {
            side,
            tiles,
            player,
            phrase: layout.phrase.clone(),
            push_limit: layout.push_limit,
            phase: Phase::Playing,
            move_count: 0,
        })
    }

    fn tile(&self, cell: CellIndex) -> &Tile {
        &self.tiles[cell.as_usize()]
    }

    /// Walks the push chain ahead of the player.
    ///
    /// Returns the `(from, to)` shifts of every block that must move, nearest
    /// first, or the reason the move cannot happen.
    fn push_chain(
        &self,
        target: CellIndex,
        direction: Direction,
    ) -> Result<Vec<(CellIndex, CellIndex)>, MoveRejection> {
        let mut chain = Vec::new();
        let mut cursor = target;

        while self.tile(cursor).is_occupied() {
            if chain.len() >= self.push_limit as usize || self.tile(cursor).is_player() {
                return Err(MoveRejection::PushBlocked);
            }
            let Some(next) = self.side.step(cursor, direction) else {
                return Err(MoveRejection::PushBlocked);
            };
            chain.push((cursor, next));
            cursor = next;
        }

        Ok(chain)
    }

    fn shift(&mut self, from: CellIndex, to: CellIndex, out_events: &mut Vec<Event>) {
        let tile = std::mem::take(&mut self.tiles[from.as_usize()]);
        self.tiles[to.as_usize()] = tile.clone();
        out_events.push(Event::TileChanged {
            cell: from,
            tile: Tile::Vacant,
        });
        out_events.push(Event::TileChanged { cell: to, tile });
    }

    fn move_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        if self.phase == Phase::Solved {
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::PuzzleSolved,
            });
            return;
        }

        let Some(target) = self.side.step(self.player, direction) else {
            debug!(?direction, player = self.player.get(), "move leaves the board");
            out_events.push(Event::MoveRejected {
                direction,
                reason: MoveRejection::OutOfBounds,
            });
            return;
        };

        let chain = match self.push_chain(target, direction) {
            Ok(chain) => chain,
            Err(reason) => {
                debug!(?direction, target = target.get(), ?reason, "push refused");
                out_events.push(Event::MoveRejected { direction, reason });
                return;
            }
        };

        for &(from, to) in chain.iter().rev() {
            let block = self.tile(from).block().map(Block::id);
            self.shift(from, to, out_events);
            if let Some(block) = block {
                out_events.push(Event::BlockShifted { block, from, to });
            }
        }

        let from = self.player;
        self.shift(from, target, out_events);
        self.player = target;
        self.move_count = self.move_count.saturating_add(1);
        out_events.push(Event::PlayerMoved { from, to: target });
    }

    fn confirms_phrase(&self, contributors: &[Contributor]) -> bool {
        let mut spelled = String::with_capacity(self.phrase.len());
        for (index, contributor) in contributors.iter().enumerate() {
            let Some(block) = self.tile(contributor.cell()).block() else {
                return false;
            };
            if block.id() != contributor.block() {
                return false;
            }
            if index > 0 {
                let previous = contributors[index - 1].cell();
                if self.side.step(previous, Direction::East) != Some(contributor.cell()) {
                    return false;
                }
            }
            spelled.push_str(block.fragment());
        }
        spelled == self.phrase
    }

    fn declare_victory(&mut self, contributors: Vec<Contributor>, out_events: &mut Vec<Event>) {
        if self.phase == Phase::Solved {
            return;
        }
        if !self.confirms_phrase(&contributors) {
            warn!(count = contributors.len(), "victory declaration does not spell the phrase");
            return;
        }
        let Some(victory) = Victory::from_contributors(contributors, self.phrase.as_str()) else {
            return;
        };

        self.phase = Phase::Solved;
        info!(
            anchor = victory.anchor().get(),
            span = victory.span(),
            moves = self.move_count,
            "phrase assembled"
        );
        out_events.push(Event::PuzzleSolved { victory });
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::MovePlayer { direction } => world.move_player(direction, out_events),
        Command::DeclareVictory { contributors } => world.declare_victory(contributors, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::World;
    use phrase_push_core::{Block, BoardSide, BoardView, CellIndex, Phase, Tile};

    /// Side length of the board.
    #[must_use]
    pub fn side(world: &World) -> BoardSide {
        world.side
    }

    /// Phrase the blocks must spell.
    #[must_use]
    pub fn phrase(world: &World) -> &str {
        &world.phrase
    }

    /// Current lifecycle phase of the board.
    #[must_use]
    pub fn phase(world: &World) -> Phase {
        world.phase
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellIndex {
        world.player
    }

    /// Number of moves the player completed.
    #[must_use]
    pub fn move_count(world: &World) -> u64 {
        world.move_count
    }

    /// Returns the tile stored at the cell, if the cell exists.
    #[must_use]
    pub fn tile_at(world: &World, cell: CellIndex) -> Option<&Tile> {
        world.tiles.get(cell.as_usize())
    }

    /// Exposes a read-only view of every board cell.
    #[must_use]
    pub fn board_view(world: &World) -> BoardView<'_> {
        BoardView::new(&world.tiles, world.side)
    }

    /// Enumerates every block together with its current cell in index order.
    #[must_use]
    pub fn blocks(world: &World) -> Vec<(CellIndex, &Block)> {
        board_view(world)
            .iter()
            .filter_map(|(cell, tile)| tile.block().map(|block| (cell, block)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> Layout {
        Layout::new(3, 4, "ab").with_block(1, "a").with_block(5, "b")
    }

    #[test]
    fn from_layout_places_player_and_blocks() {
        let world = World::from_layout(&layout()).expect("valid layout");

        assert_eq!(query::player_cell(&world), CellIndex::new(4));
        assert_eq!(query::tile_at(&world, CellIndex::new(4)), Some(&Tile::Player));
        let blocks = query::blocks(&world);
        assert_eq!(blocks.len(), 2);
        assert_eq!(blocks[0].0, CellIndex::new(1));
        assert_eq!(blocks[0].1.id(), BlockId::new(0));
        assert_eq!(blocks[1].1.fragment(), "b");
        assert_eq!(query::phase(&world), Phase::Playing);
    }

    #[test]
    fn from_layout_rejects_invalid_layout() {
        let invalid = layout().with_block(1, "c");
        assert_eq!(
            World::from_layout(&invalid).err(),
            Some(LayoutError::DuplicateBlockCell { cell: 1 })
        );
    }

    #[test]
    fn declare_victory_requires_matching_blocks() {
        let mut world = World::from_layout(&layout()).expect("valid layout");
        let mut events = Vec::new();

        apply(
            &mut world,
            Command::DeclareVictory {
                contributors: vec![
                    Contributor::new(BlockId::new(0), CellIndex::new(1)),
                    Contributor::new(BlockId::new(1), CellIndex::new(5)),
                ],
            },
            &mut events,
        );

        assert!(events.is_empty());
        assert_eq!(query::phase(&world), Phase::Playing);
    }
}
