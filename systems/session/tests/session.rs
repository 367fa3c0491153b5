use phrase_push_core::{BlockId, CellIndex, Direction, Layout, LayoutError, Tile, Victory};
use phrase_push_system_session::{EndReason, MoveOutcome, Session, SessionObserver};
use phrase_push_world::query;

/// Push sequence that lines the contact fragments up on row three.
const CONTACT_SOLUTION: &str =
    "DDLDRRRRRRDRUUUDLDLUULUUULDLDRURRRULLULDDLDDRRDLDLUUDLLLULURRULUURDD";

#[derive(Debug, Default)]
struct Recorder {
    changes: Vec<(CellIndex, Tile)>,
    victories: Vec<Victory>,
    endings: Vec<EndReason>,
}

impl SessionObserver for Recorder {
    fn tile_changed(&mut self, cell: CellIndex, tile: &Tile) {
        self.changes.push((cell, tile.clone()));
    }

    fn puzzle_solved(&mut self, victory: &Victory) {
        self.victories.push(victory.clone());
    }

    fn session_ended(&mut self, reason: EndReason) {
        self.endings.push(reason);
    }
}

fn contact_layout() -> Layout {
    Layout::new(10, 33, "toemah@protonmail.com")
        .with_block(12, "toe")
        .with_block(41, "mah")
        .with_block(55, "@")
        .with_block(17, "pro")
        .with_block(25, "ton")
        .with_block(58, "mail")
        .with_block(38, ".")
        .with_block(53, "com")
}

fn direction(letter: char) -> Direction {
    match letter {
        'U' => Direction::North,
        'R' => Direction::East,
        'D' => Direction::South,
        'L' => Direction::West,
        other => panic!("unexpected script letter {other}"),
    }
}

#[test]
fn start_paints_every_occupied_cell() {
    let mut recorder = Recorder::default();
    let session = Session::start(&contact_layout(), &mut recorder).expect("layout");

    assert!(session.is_active());
    let painted = &session.observer().changes;
    assert_eq!(painted.len(), 9);
    assert!(painted.contains(&(CellIndex::new(33), Tile::Player)));
}

#[test]
fn invalid_layout_is_reported_before_start() {
    let mut recorder = Recorder::default();
    let layout = contact_layout().with_block(12, "dup");

    let result = Session::start(&layout, &mut recorder);

    assert_eq!(
        result.err(),
        Some(LayoutError::DuplicateBlockCell { cell: 12 })
    );
    assert!(recorder.changes.is_empty());
    assert!(recorder.endings.is_empty());
}

#[test]
fn free_moves_succeed_and_edge_moves_do_not() {
    let mut recorder = Recorder::default();
    let mut session = Session::start(&Layout::new(3, 0, "x"), &mut recorder).expect("layout");

    assert_eq!(session.submit(Direction::North), MoveOutcome::Blocked);
    assert_eq!(session.submit(Direction::West), MoveOutcome::Blocked);
    assert_eq!(session.submit(Direction::East), MoveOutcome::Moved);
    assert_eq!(session.submit(Direction::South), MoveOutcome::Moved);
    assert_eq!(query::player_cell(session.world()), CellIndex::new(4));
}

#[test]
fn contact_phrase_is_solved_exactly_once() {
    let mut recorder = Recorder::default();
    {
        let mut session = Session::start(&contact_layout(), &mut recorder).expect("layout");
        let moves: Vec<Direction> = CONTACT_SOLUTION.chars().map(direction).collect();
        let (last, rest) = moves.split_last().expect("non-empty script");

        for (index, step) in rest.iter().enumerate() {
            let outcome = session.submit(*step);
            assert_ne!(outcome, MoveOutcome::Solved, "solved early at move {index}");
            assert_ne!(outcome, MoveOutcome::Inactive);
        }
        assert_eq!(session.submit(*last), MoveOutcome::Solved);
        assert!(!session.is_active());
        assert_eq!(session.end_reason(), Some(EndReason::Solved));

        let changes_before = session.observer().changes.len();
        for step in Direction::ALL {
            assert_eq!(session.submit(step), MoveOutcome::Inactive);
        }
        assert_eq!(session.observer().changes.len(), changes_before);
        session.end();
    }

    assert_eq!(recorder.victories.len(), 1);
    let victory = &recorder.victories[0];
    let cells: Vec<u32> = victory
        .contributors()
        .iter()
        .map(|contributor| contributor.cell().get())
        .collect();
    assert_eq!(cells, (32..40).collect::<Vec<u32>>());
    let blocks: Vec<BlockId> = victory
        .contributors()
        .iter()
        .map(|contributor| contributor.block())
        .collect();
    assert_eq!(blocks, (0..8).map(BlockId::new).collect::<Vec<_>>());
    assert_eq!(victory.anchor(), CellIndex::new(32));
    assert_eq!(victory.span(), 8);
    assert_eq!(
        victory.hidden(),
        (33..40).map(CellIndex::new).collect::<Vec<_>>().as_slice()
    );
    assert_eq!(victory.phrase(), "toemah@protonmail.com");
    assert_eq!(recorder.endings, vec![EndReason::Solved]);
}

#[test]
fn end_is_idempotent_and_blocks_input() {
    let mut recorder = Recorder::default();
    {
        let mut session = Session::start(&contact_layout(), &mut recorder).expect("layout");
        session.end();
        session.end();
        assert_eq!(session.submit(Direction::East), MoveOutcome::Inactive);
        assert_eq!(query::player_cell(session.world()), CellIndex::new(33));
    }

    assert_eq!(recorder.endings, vec![EndReason::Stopped]);
    assert!(recorder.victories.is_empty());
}

#[test]
fn dropping_a_session_ends_it() {
    let mut recorder = Recorder::default();
    {
        let mut session = Session::start(&contact_layout(), &mut recorder).expect("layout");
        assert_eq!(session.submit(Direction::East), MoveOutcome::Moved);
    }

    assert_eq!(recorder.endings, vec![EndReason::Stopped]);
}

#[test]
fn observer_sees_both_cells_of_every_shift() {
    let mut recorder = Recorder::default();
    {
        let mut session = Session::start(&contact_layout(), &mut recorder).expect("layout");
        // The player at 33 steps east to 34, then 35, 36, 37 and pushes "." at 38.
        for _ in 0..5 {
            let _ = session.submit(Direction::East);
        }
    }

    let after_paint = &recorder.changes[9..];
    assert_eq!(after_paint.len(), 12);
    let tail: Vec<(u32, bool)> = after_paint[8..]
        .iter()
        .map(|(cell, tile)| (cell.get(), tile.is_occupied()))
        .collect();
    assert_eq!(tail, vec![(38, false), (39, true), (37, false), (38, true)]);
}
