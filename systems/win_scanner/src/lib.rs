#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure win-detection system that looks for the assembled phrase after pushes.

use std::collections::HashSet;

use phrase_push_core::{BoardView, CellIndex, Command, Contributor, Direction, Event};

/// Scans the blocks around every pushed block for the target phrase.
#[derive(Debug, Default)]
pub struct WinScanner {
    visited: HashSet<(CellIndex, String)>,
}

impl WinScanner {
    /// Creates a new scanner with empty scratch buffers.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Consumes world events and emits a victory declaration when a pushed
    /// block completes the phrase.
    ///
    /// Every [`Event::BlockShifted`] in the batch is scanned against the board
    /// as it stands after the batch. At most one declaration is emitted.
    pub fn handle(
        &mut self,
        events: &[Event],
        board: BoardView<'_>,
        phrase: &str,
        out: &mut Vec<Command>,
    ) {
        for event in events {
            if matches!(event, Event::PuzzleSolved { .. }) {
                return;
            }
        }

        for event in events {
            let Event::BlockShifted { to, .. } = event else {
                continue;
            };
            if let Some(contributors) = self.scan(board, phrase, *to) {
                out.push(Command::DeclareVictory { contributors });
                return;
            }
        }
    }

    /// Walks the chain of blocks containing `start`, returning the blocks that
    /// spell `phrase` in reading order if the chain completes it.
    ///
    /// Fragments accumulate while they remain a substring of the phrase. A
    /// prefix match continues toward the next cell on the right. A match that
    /// is not anchored at the start of the phrase discards the accumulated
    /// text and restarts from the cell on the left, so the scan finds the
    /// phrase whichever block was pushed last. Revisiting a cell with the
    /// same accumulated text ends the scan.
    pub fn scan(
        &mut self,
        board: BoardView<'_>,
        phrase: &str,
        start: CellIndex,
    ) -> Option<Vec<Contributor>> {
        self.visited.clear();
        let mut suit = String::new();
        let mut contributors = Vec::new();
        let mut cell = start;

        loop {
            let block = board.block_at(cell)?;
            if !self.visited.insert((cell, suit.clone())) {
                return None;
            }

            suit.push_str(block.fragment());
            contributors.push(Contributor::new(block.id(), cell));

            if suit == phrase {
                return Some(contributors);
            }
            if !phrase.contains(suit.as_str()) {
                return None;
            }

            let direction = if phrase.starts_with(suit.as_str()) {
                Direction::East
            } else {
                suit.clear();
                contributors.clear();
                Direction::West
            };
            cell = board.side().step(cell, direction)?;
        }
    }
}
