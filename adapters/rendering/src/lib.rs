#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Phrase Push adapters.

use std::fmt::Write as _;

use anyhow::Result as AnyResult;
use phrase_push_core::{BoardSide, CellIndex, Tile, Victory};
use phrase_push_system_session::{EndReason, SessionObserver};

/// Glyph drawn for the player token.
pub const PLAYER_GLYPH: &str = "P";

/// Presentation state of a single board cell.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum CellPresentation {
    /// Nothing is drawn.
    #[default]
    Vacant,
    /// The player token.
    Player,
    /// A block showing its fragment.
    Fragment(String),
    /// Anchor of the merged winning cells, spanning several columns.
    Merged {
        /// Text drawn across the merged cells.
        text: String,
        /// Number of board cells covered.
        span: u32,
    },
    /// Cell folded into a merged anchor to its left.
    Hidden,
}

impl CellPresentation {
    fn label(&self) -> &str {
        match self {
            Self::Vacant | Self::Hidden => "",
            Self::Player => PLAYER_GLYPH,
            Self::Fragment(text) | Self::Merged { text, .. } => text,
        }
    }
}

/// Text scene kept in sync with a session through [`SessionObserver`].
#[derive(Clone, Debug)]
pub struct TextScene {
    side: BoardSide,
    cells: Vec<CellPresentation>,
    column_width: usize,
    ended: Option<EndReason>,
    solved_phrase: Option<String>,
}

impl TextScene {
    /// Creates an empty scene for a board of the provided side.
    #[must_use]
    pub fn new(side: BoardSide) -> Self {
        Self {
            side,
            cells: vec![CellPresentation::Vacant; side.cell_count() as usize],
            column_width: PLAYER_GLYPH.chars().count(),
            ended: None,
            solved_phrase: None,
        }
    }

    /// Presentation of the provided cell.
    #[must_use]
    pub fn cell(&self, cell: CellIndex) -> Option<&CellPresentation> {
        self.cells.get(cell.as_usize())
    }

    /// Reason the observed session ended, if it has.
    #[must_use]
    pub const fn ended(&self) -> Option<EndReason> {
        self.ended
    }

    /// Phrase displayed by the merged cell once the puzzle is solved.
    #[must_use]
    pub fn solved_phrase(&self) -> Option<&str> {
        self.solved_phrase.as_deref()
    }

    /// Column width only grows, so hiding merged blocks never narrows the grid.
    /// A merged cell wider than its columns widens every column until it fits.
    fn cell_width(&self) -> usize {
        self.cells
            .iter()
            .filter_map(|cell| match cell {
                CellPresentation::Merged { text, span } => {
                    let span = (*span as usize).max(1);
                    let free = text.chars().count().saturating_sub(span - 1);
                    Some(free.div_ceil(span))
                }
                _ => None,
            })
            .fold(self.column_width, usize::max)
            .max(1)
    }

    /// Draws the board as a monospace grid.
    #[must_use]
    pub fn render(&self) -> String {
        let side = self.side.get() as usize;
        let width = self.cell_width();
        let border = format!("+{}+\n", vec!["-".repeat(width); side].join("+"));

        let mut out = String::new();
        for row in self.cells.chunks(side.max(1)) {
            out.push_str(&border);
            out.push('|');
            for cell in row {
                match cell {
                    CellPresentation::Hidden => {}
                    CellPresentation::Merged { text, span } => {
                        let span = *span as usize;
                        let merged_width = span * width + span.saturating_sub(1);
                        let _ = write!(out, "{text:^merged_width$}|");
                    }
                    other => {
                        let _ = write!(out, "{:^width$}|", other.label());
                    }
                }
            }
            out.push('\n');
        }
        out.push_str(&border);
        out
    }
}

impl SessionObserver for TextScene {
    fn tile_changed(&mut self, cell: CellIndex, tile: &Tile) {
        let Some(slot) = self.cells.get_mut(cell.as_usize()) else {
            return;
        };
        *slot = match tile {
            Tile::Vacant => CellPresentation::Vacant,
            Tile::Player => CellPresentation::Player,
            Tile::Block(block) => CellPresentation::Fragment(block.fragment().to_owned()),
        };
        self.column_width = self.column_width.max(slot.label().chars().count());
    }

    fn puzzle_solved(&mut self, victory: &Victory) {
        for hidden in victory.hidden() {
            if let Some(slot) = self.cells.get_mut(hidden.as_usize()) {
                *slot = CellPresentation::Hidden;
            }
        }
        if let Some(anchor) = self.cells.get_mut(victory.anchor().as_usize()) {
            *anchor = CellPresentation::Merged {
                text: victory.phrase().to_owned(),
                span: victory.span(),
            };
        }
        self.solved_phrase = Some(victory.phrase().to_owned());
    }

    fn session_ended(&mut self, reason: EndReason) {
        self.ended = Some(reason);
    }
}

/// Rendering backend capable of presenting a [`TextScene`].
pub trait RenderingBackend {
    /// Presents the scene in its current state.
    fn present(&mut self, scene: &TextScene) -> AnyResult<()>;
}
