//! End-to-end session behavior: click resolution, renderer ordering,
//! turn rotation, and the status state machine.

use std::cell::RefCell;
use std::rc::Rc;

use mine_party::{
    Board, BoardConfig, GameRng, Player, PlayerId, Renderer, SessionEngine, Status,
};

#[derive(Clone, Debug, PartialEq, Eq)]
enum RenderEvent {
    Init,
    Reset { unexploded: usize },
    Detonate(Vec<usize>),
    Reveal(usize),
}

/// Renderer that records the exact call sequence.
#[derive(Clone, Default)]
struct RecordingRenderer {
    events: Rc<RefCell<Vec<RenderEvent>>>,
}

impl Renderer for RecordingRenderer {
    fn init(&mut self) {
        self.events.borrow_mut().push(RenderEvent::Init);
    }

    fn reset_cells(&mut self, board: &Board) {
        self.events.borrow_mut().push(RenderEvent::Reset {
            unexploded: board.unexploded_count(),
        });
    }

    fn detonate(&mut self, indices: &[usize]) {
        self.events
            .borrow_mut()
            .push(RenderEvent::Detonate(indices.to_vec()));
    }

    fn reveal_target(&mut self, index: usize) {
        self.events.borrow_mut().push(RenderEvent::Reveal(index));
    }
}

fn participant(id: &str) -> Player {
    let mut p = Player::with_id(format!("name-{id}"), PlayerId::new(id));
    p.participating = true;
    p
}

fn bystander(id: &str) -> Player {
    Player::with_id(format!("name-{id}"), PlayerId::new(id))
}

/// The secret target the engine draws at construction for this seed/size.
fn expected_target(seed: u64, total: usize) -> usize {
    GameRng::seeded(seed).draw_range(total)
}

fn engine_with(
    seed: u64,
    total: usize,
    players: Vec<Player>,
) -> (SessionEngine, Rc<RefCell<Vec<RenderEvent>>>) {
    let renderer = RecordingRenderer::default();
    let events = Rc::clone(&renderer.events);
    let mut engine = SessionEngine::with_rng(
        BoardConfig::new(10, total),
        Box::new(renderer),
        GameRng::seeded(seed),
    );
    engine.replace_players(players);
    (engine, events)
}

#[test]
fn click_three_on_fresh_ten_board_detonates_down_to_zero() {
    // Lower side [0,1,2] is strictly smaller than [4..9]: fixed result,
    // no tie-break draw.
    let (mut engine, events) = engine_with(1, 10, vec![participant("p1")]);
    let target = expected_target(1, 10);

    engine.handle_click(3);

    let step = &engine.step_log().steps()[0];
    assert_eq!(step.detonated, vec![3, 2, 1, 0]);
    assert_eq!(step.player_id, PlayerId::new("p1"));

    let detonations: Vec<_> = events
        .borrow()
        .iter()
        .filter(|e| matches!(e, RenderEvent::Detonate(_)))
        .cloned()
        .collect();
    if target > 3 {
        assert_eq!(detonations, vec![RenderEvent::Detonate(vec![3, 2, 1, 0])]);
    }
}

#[test]
fn renderer_sees_init_then_reset_then_batches() {
    let seed = 5;
    let total = 10;
    let target = expected_target(seed, total);
    let (mut engine, events) =
        engine_with(seed, total, vec![participant("p1"), participant("p2")]);

    engine.handle_click(target);

    let events = events.borrow();
    // Construction: init, then the new-game reset.
    assert_eq!(events[0], RenderEvent::Init);
    assert_eq!(events[1], RenderEvent::Reset { unexploded: total });

    // The click's run comes before the cosmetic sweep, the reveal comes last.
    let batch_positions: Vec<usize> = events
        .iter()
        .enumerate()
        .filter(|(_, e)| matches!(e, RenderEvent::Detonate(_)))
        .map(|(i, _)| i)
        .collect();
    let reveal_position = events
        .iter()
        .position(|e| matches!(e, RenderEvent::Reveal(_)))
        .expect("target must be revealed");

    assert!(!batch_positions.is_empty());
    assert!(batch_positions.iter().all(|&p| p < reveal_position));
    assert_eq!(events[reveal_position], RenderEvent::Reveal(target));

    // Across all batches every cell detonates exactly once.
    let mut all: Vec<usize> = events
        .iter()
        .filter_map(|e| match e {
            RenderEvent::Detonate(batch) => Some(batch.clone()),
            _ => None,
        })
        .flatten()
        .collect();
    all.sort_unstable();
    assert_eq!(all, (0..total).collect::<Vec<_>>());
}

#[test]
fn first_batch_is_the_run_in_detonation_order() {
    let seed = 5;
    let total = 10;
    let target = expected_target(seed, total);
    let (mut engine, events) = engine_with(seed, total, vec![participant("p1")]);

    engine.handle_click(target);

    let run = engine.step_log().steps()[0].detonated.clone();
    let first_batch = events
        .borrow()
        .iter()
        .find_map(|e| match e {
            RenderEvent::Detonate(batch) => Some(batch.clone()),
            _ => None,
        })
        .unwrap();
    assert_eq!(first_batch, run);
    assert_eq!(run[0], target);
}

#[test]
fn rotation_skips_bystanders_and_cycles() {
    let mut roster = mine_party::Roster::new();
    roster.replace_players(vec![participant("p1"), bystander("p2"), participant("p3")]);
    roster.set_current(None);

    // Advancing from a cleared pointer walks p1, p3, p1, ...; p2 never plays.
    let mut seen = Vec::new();
    for _ in 0..4 {
        seen.push(roster.advance_turn().unwrap().id().as_str().to_string());
    }
    assert_eq!(seen, vec!["p1", "p3", "p1", "p3"]);
}

#[test]
fn busy_and_ended_sessions_reject_clicks_silently() {
    let seed = 7;
    let total = 10;
    let target = expected_target(seed, total);
    let (mut engine, _) = engine_with(seed, total, vec![participant("p1")]);

    engine.handle_click(target);
    assert_eq!(engine.status(), Status::Ended);

    let board_before: Vec<bool> = engine.board().cells().iter().map(|c| c.exploded).collect();
    engine.handle_click(if target == 0 { 1 } else { 0 });

    assert_eq!(engine.step_log().len(), 1);
    let board_after: Vec<bool> = engine.board().cells().iter().map(|c| c.exploded).collect();
    assert_eq!(board_before, board_after);
}

#[test]
fn exactly_one_target_is_live_per_round() {
    let seed = 2;
    let total = 10;
    let target = expected_target(seed, total);
    let (mut engine, _) = engine_with(seed, total, vec![participant("p1")]);

    // Hidden while the round runs.
    assert!(engine.revealed_target().is_none());
    engine.handle_click(target);
    assert_eq!(engine.revealed_target(), Some(target));

    // A new round re-draws and hides again.
    engine.new_game();
    assert!(engine.revealed_target().is_none());
    assert_eq!(engine.status(), Status::AwaitingInput);
}

#[test]
fn round_ends_iff_target_is_in_the_run() {
    let seed = 11;
    let total = 10;
    let target = expected_target(seed, total);
    let (mut engine, _) = engine_with(seed, total, vec![participant("p1")]);

    // A singleton run away from the target never ends the round.
    let safe = if target == 9 { 0 } else { 9 };
    engine.handle_click(safe);
    assert_eq!(engine.status(), Status::AwaitingInput);
    assert_eq!(engine.step_log().steps()[0].revealed_target, None);

    // Hitting the target always does.
    engine.handle_click(target);
    assert_eq!(engine.status(), Status::Ended);
    assert_eq!(
        engine.step_log().steps().last().unwrap().revealed_target,
        Some(target)
    );
}

#[test]
fn change_config_must_rebuild_and_restart() {
    let (mut engine, events) = engine_with(1, 10, vec![participant("p1")]);

    engine.change_config(BoardConfig::new(4, 16));

    assert_eq!(engine.board().total(), 16);
    assert_eq!(engine.session_state().columns, 4);
    assert_eq!(engine.status(), Status::AwaitingInput);
    assert!(engine.step_log().is_empty());

    // The renderer was told to redraw the new board.
    assert!(events
        .borrow()
        .iter()
        .any(|e| *e == RenderEvent::Reset { unexploded: 16 }));
}
