#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Session lifecycle that wires the world, the win scanner and an observer.
//!
//! A [`Session`] accepts directional input from [`Session::start`] until it is
//! ended explicitly, the phrase is assembled, or the session is dropped. Every
//! board change is forwarded to the borrowed [`SessionObserver`], which is how
//! presentation layers learn about the game without the core knowing about
//! them.

use phrase_push_core::{CellIndex, Command, Direction, Event, Layout, LayoutError, Tile, Victory};
use phrase_push_system_win_scanner::WinScanner;
use phrase_push_world::{self as world, query, World};
use tracing::{debug, info};

/// Receives board changes produced by a running session.
pub trait SessionObserver {
    /// Called whenever the occupant of `cell` changes, and once per occupied
    /// cell when the session starts.
    fn tile_changed(&mut self, cell: CellIndex, tile: &Tile);

    /// Called once when the phrase is assembled.
    fn puzzle_solved(&mut self, victory: &Victory) {
        let _ = victory;
    }

    /// Called exactly once when the session stops accepting input.
    fn session_ended(&mut self, reason: EndReason) {
        let _ = reason;
    }
}

/// Why a session stopped accepting input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EndReason {
    /// The phrase was assembled.
    Solved,
    /// The session was ended or dropped before the phrase was assembled.
    Stopped,
}

/// Observable result of submitting a single direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveOutcome {
    /// The player moved, possibly pushing blocks.
    Moved,
    /// The move was illegal and left the board untouched.
    Blocked,
    /// The move completed the phrase and ended the session.
    Solved,
    /// The session no longer accepts input.
    Inactive,
}

/// Running puzzle session bound to an observer for its whole lifetime.
#[derive(Debug)]
pub struct Session<'o, O: SessionObserver> {
    world: World,
    scanner: WinScanner,
    observer: &'o mut O,
    ended: Option<EndReason>,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl<'o, O: SessionObserver> Session<'o, O> {
    /// Builds the board from `layout`, paints it through `observer` and starts
    /// accepting input.
    pub fn start(layout: &Layout, observer: &'o mut O) -> Result<Self, LayoutError> {
        let world = World::from_layout(layout)?;
        for (cell, tile) in query::board_view(&world).iter() {
            if tile.is_occupied() {
                observer.tile_changed(cell, tile);
            }
        }
        info!(
            side = layout.side,
            blocks = layout.blocks.len(),
            "puzzle session started"
        );

        Ok(Self {
            world,
            scanner: WinScanner::new(),
            observer,
            ended: None,
            events: Vec::new(),
            commands: Vec::new(),
        })
    }

    /// Resolves one directional command, including every chained push and the
    /// win scan, before returning.
    pub fn submit(&mut self, direction: Direction) -> MoveOutcome {
        if self.ended.is_some() {
            debug!(?direction, "input ignored by inactive session");
            return MoveOutcome::Inactive;
        }

        self.events.clear();
        world::apply(
            &mut self.world,
            Command::MovePlayer { direction },
            &mut self.events,
        );
        let moved = self
            .events
            .iter()
            .any(|event| matches!(event, Event::PlayerMoved { .. }));

        self.commands.clear();
        self.scanner.handle(
            &self.events,
            query::board_view(&self.world),
            query::phrase(&self.world),
            &mut self.commands,
        );
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        let mut solved = false;
        for event in &self.events {
            match event {
                Event::TileChanged { cell, tile } => self.observer.tile_changed(*cell, tile),
                Event::PuzzleSolved { victory } => {
                    self.observer.puzzle_solved(victory);
                    solved = true;
                }
                _ => {}
            }
        }

        if solved {
            self.finish(EndReason::Solved);
            MoveOutcome::Solved
        } else if moved {
            MoveOutcome::Moved
        } else {
            MoveOutcome::Blocked
        }
    }

    /// Stops accepting input. Calling this more than once has no effect.
    pub fn end(&mut self) {
        self.finish(EndReason::Stopped);
    }

    /// Reports whether the session still accepts input.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.ended.is_none()
    }

    /// Reason the session ended, if it has.
    #[must_use]
    pub fn end_reason(&self) -> Option<EndReason> {
        self.ended
    }

    /// Read-only access to the board state.
    #[must_use]
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Read-only access to the observer bound to the session.
    #[must_use]
    pub fn observer(&self) -> &O {
        &*self.observer
    }

    fn finish(&mut self, reason: EndReason) {
        if self.ended.is_some() {
            return;
        }
        self.ended = Some(reason);
        info!(
            ?reason,
            moves = query::move_count(&self.world),
            "puzzle session ended"
        );
        self.observer.session_ended(reason);
    }
}

impl<O: SessionObserver> Drop for Session<'_, O> {
    fn drop(&mut self) {
        self.end();
    }
}
