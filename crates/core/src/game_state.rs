//! Game controller - owns one session
//!
//! Ties together the board, the bag queue, the active piece, scoring and speed
//! progression. Each `tick` runs render + fall + collision + freeze to
//! completion; input actions are applied between ticks.

use tracing::{debug, info};

use crate::board::Board;
use crate::config::SessionConfig;
use crate::piece::PieceInstance;
use crate::rng::{PieceOrderQueue, RandomSource};
use crate::scoring::{calculate_line_score, speed_level, SpeedRamp};
use crate::services::{Clock, Frontend, GameEvents};
use crate::types::{GameAction, PieceKind, RotateDirection, Vector2};

/// What happened when the last piece froze.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LockEvent {
    pub kind: PieceKind,
    /// Position the piece froze at.
    pub position: Vector2,
    pub lines_cleared: u32,
    /// Points awarded for the cleared rows.
    pub points: u32,
    /// The freeze overflowed the top of the board.
    pub overflowed: bool,
}

/// One game session.
#[derive(Debug)]
pub struct GameController<C: Clock, R: RandomSource> {
    config: SessionConfig,
    clock: C,
    queue: PieceOrderQueue<R>,
    board: Board,
    active: Option<PieceInstance>,
    preview: Option<PieceKind>,
    score: u32,
    lines: u32,
    speed: SpeedRamp,
    dead: bool,
    pieces_spawned: u32,
    /// Collision checks that hit the correction cap.
    unresolved_collisions: u32,
    last_event: Option<LockEvent>,
}

impl<C: Clock, R: RandomSource> GameController<C, R> {
    /// Create a session with default tuning
    pub fn new(clock: C, rng: R) -> Self {
        Self::with_config(SessionConfig::default(), clock, rng)
    }

    pub fn with_config(config: SessionConfig, clock: C, rng: R) -> Self {
        let now = clock.now_ms();
        Self {
            config,
            queue: PieceOrderQueue::new(rng),
            board: Board::new(),
            active: None,
            preview: None,
            score: 0,
            lines: 0,
            speed: SpeedRamp::new(
                config.initial_speed,
                config.speed_increase_interval_ms,
                config.speed_increase_amount,
                now,
            ),
            dead: false,
            pieces_spawned: 0,
            unresolved_collisions: 0,
            last_event: None,
            clock,
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    /// Total rows cleared this session.
    pub fn lines(&self) -> u32 {
        self.lines
    }

    /// Current fall speed in tiles/second.
    pub fn speed(&self) -> f64 {
        self.speed.speed()
    }

    pub fn is_dead(&self) -> bool {
        self.dead
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mutable board access for setting up scenarios.
    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn active(&self) -> Option<&PieceInstance> {
        self.active.as_ref()
    }

    /// Kind shown in the preview since the last spawn.
    pub fn preview(&self) -> Option<PieceKind> {
        self.preview
    }

    pub fn pieces_spawned(&self) -> u32 {
        self.pieces_spawned
    }

    pub fn unresolved_collisions(&self) -> u32 {
        self.unresolved_collisions
    }

    /// Take and clear the last freeze event.
    pub fn take_last_event(&mut self) -> Option<LockEvent> {
        self.last_event.take()
    }

    /// Replace the active piece, e.g. to stage a position in tests.
    pub fn set_active(&mut self, piece: Option<PieceInstance>) {
        self.active = piece;
    }

    /// Run one frame: draw, then advance the simulation unless dead.
    pub fn tick<F: Frontend + ?Sized>(&mut self, frontend: &mut F) {
        frontend.clear();
        self.board.render(frontend);
        if self.dead {
            return;
        }

        let now = self.clock.now_ms();
        if self.speed.update(now) {
            debug!(speed = self.speed.speed(), "speed increased");
            frontend.on_speed(self.speed.speed());
        }

        if self.active.is_none() {
            self.spawn_piece(frontend);
        }

        let speed = self.speed.speed();
        if let Some(piece) = self.active.as_mut() {
            piece.render(frontend);
            piece.advance_if_due(speed, now);
        }

        if let Some(resolved) = self.check_active() {
            self.settle_and_freeze(resolved, frontend);
        }
    }

    /// Draw the next kind from the queue and make it the active piece.
    pub fn spawn_piece<E: GameEvents + ?Sized>(&mut self, events: &mut E) {
        let kind = self.queue.next();
        let piece = PieceInstance::spawn_at(kind, self.config.spawn_x, self.clock.now_ms());
        self.active = Some(piece);
        self.pieces_spawned = self.pieces_spawned.wrapping_add(1);

        let preview = self.queue.peek_upcoming();
        self.preview = Some(preview);
        events.on_preview(preview);

        debug!(?kind, ?preview, "spawned piece");
    }

    /// Apply one input action. Returns true if it changed anything.
    pub fn apply_action<E: GameEvents + ?Sized>(&mut self, action: GameAction, events: &mut E) -> bool {
        match action {
            GameAction::Restart => {
                self.restart(events);
                true
            }
            _ if self.dead => false,
            GameAction::MoveLeft => self.try_move(-1),
            GameAction::MoveRight => self.try_move(1),
            GameAction::RotateCw => self.try_rotate(RotateDirection::Clockwise),
            GameAction::RotateCcw => self.try_rotate(RotateDirection::CounterClockwise),
            GameAction::SoftDrop => self.soft_drop(events),
        }
    }

    /// Shift sideways; reverted if it collides.
    pub fn try_move(&mut self, dx: i32) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.move_by(dx, 0);

        if self.check_active().is_some() {
            if let Some(piece) = self.active.as_mut() {
                piece.move_by(-dx, 0);
            }
            return false;
        }
        true
    }

    /// Rotate one quadrant; a colliding result is pushed to the resolved
    /// position instead of being frozen.
    pub fn try_rotate(&mut self, direction: RotateDirection) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.rotate(direction);

        if let Some(resolved) = self.check_active() {
            if let Some(piece) = self.active.as_mut() {
                piece.set_position(resolved);
            }
        }
        true
    }

    /// Move down one row; on contact freeze immediately.
    pub fn soft_drop<E: GameEvents + ?Sized>(&mut self, events: &mut E) -> bool {
        let Some(piece) = self.active.as_mut() else {
            return false;
        };
        piece.move_by(0, 1);

        if let Some(resolved) = self.check_active() {
            self.settle_and_freeze(resolved, events);
        }
        true
    }

    /// Start a new session on the same random source.
    pub fn restart<E: GameEvents + ?Sized>(&mut self, events: &mut E) {
        let now = self.clock.now_ms();
        self.board.clear();
        self.active = None;
        self.preview = None;
        self.score = 0;
        self.lines = 0;
        self.speed.reset(now);
        self.dead = false;
        self.pieces_spawned = 0;
        self.unresolved_collisions = 0;
        self.last_event = None;

        info!("session restarted");
        events.on_restart();
        events.on_score(self.score);
        events.on_speed(self.speed.speed());
    }

    /// Resolve the active piece against the board, counting capped runs.
    fn check_active(&mut self) -> Option<Vector2> {
        let piece = self.active.as_ref()?;
        let origin = piece.position();
        let resolution = self.board.resolve(origin, piece.tiles());
        if resolution.exhausted {
            self.unresolved_collisions = self.unresolved_collisions.saturating_add(1);
        }
        resolution.moved_from(origin).then_some(resolution.position)
    }

    fn settle_and_freeze<E: GameEvents + ?Sized>(&mut self, resolved: Vector2, events: &mut E) {
        if let Some(piece) = self.active.as_mut() {
            piece.set_position(resolved);
        }
        self.freeze_active(events);
    }

    /// Freeze the active piece, then score and check for overflow.
    fn freeze_active<E: GameEvents + ?Sized>(&mut self, events: &mut E) {
        let Some(piece) = self.active.take() else {
            return;
        };

        let outcome = self.board.add_piece(&piece);
        let lines_cleared = outcome.lines_cleared();
        let points = calculate_line_score(lines_cleared, speed_level(self.speed.speed()));

        if outcome.overflowed() && !self.dead {
            self.dead = true;
            info!(score = self.score, lines = self.lines, "board overflowed");
            events.on_death();
        }

        if lines_cleared > 0 {
            self.lines += lines_cleared as u32;
            events.on_lines_cleared(lines_cleared as u32);
        }
        self.score = self.score.saturating_add(points);
        events.on_score(self.score);

        debug!(
            kind = ?piece.kind(),
            position = %piece.position(),
            lines_cleared,
            points,
            "froze piece"
        );

        self.last_event = Some(LockEvent {
            kind: piece.kind(),
            position: piece.position(),
            lines_cleared: lines_cleared as u32,
            points,
            overflowed: outcome.overflowed(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::SimpleRng;
    use crate::services::{Headless, ManualClock, Renderer};
    use crate::types::{Color, BOARD_HEIGHT, BOARD_WIDTH};

    const GRAY: Color = Color::rgba(90, 90, 90, 255);

    #[derive(Default)]
    struct Recorder {
        deaths: u32,
        scores: Vec<u32>,
        speeds: Vec<f64>,
        previews: Vec<PieceKind>,
        lines: Vec<u32>,
    }

    impl Renderer for Recorder {
        fn clear(&mut self) {}

        fn draw_filled_rect(&mut self, _position: Vector2, _size: Vector2, _color: Color) {}
    }

    impl GameEvents for Recorder {
        fn on_death(&mut self) {
            self.deaths += 1;
        }
        fn on_score(&mut self, score: u32) {
            self.scores.push(score);
        }
        fn on_speed(&mut self, speed: f64) {
            self.speeds.push(speed);
        }
        fn on_preview(&mut self, kind: PieceKind) {
            self.previews.push(kind);
        }
        fn on_lines_cleared(&mut self, rows: u32) {
            self.lines.push(rows);
        }
    }

    fn game(clock: &ManualClock) -> GameController<&ManualClock, SimpleRng> {
        GameController::new(clock, SimpleRng::new(12345))
    }

    #[test]
    fn test_new_session() {
        let clock = ManualClock::new(0);
        let g = game(&clock);
        assert_eq!(g.score(), 0);
        assert_eq!(g.speed(), 1.0);
        assert!(!g.is_dead());
        assert!(g.active().is_none());
    }

    #[test]
    fn test_first_tick_spawns_and_previews() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        let mut events = Recorder::default();

        g.spawn_piece(&mut events);
        assert!(g.active().is_some());
        assert_eq!(g.pieces_spawned(), 1);
        assert_eq!(events.previews.len(), 1);
        assert_eq!(g.preview(), events.previews.first().copied());
    }

    #[test]
    fn test_tick_gravity() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        g.tick(&mut Headless);
        let y0 = g.active().unwrap().position().y;

        clock.advance(500);
        g.tick(&mut Headless);
        assert_eq!(g.active().unwrap().position().y, y0);

        clock.advance(501);
        g.tick(&mut Headless);
        assert_eq!(g.active().unwrap().position().y, y0 + 1);
    }

    #[test]
    fn test_move_into_wall_is_reverted() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        let mut piece = PieceInstance::new(PieceKind::Block, 0);
        piece.set_position(Vector2::new(0, 5));
        g.set_active(Some(piece));

        assert!(!g.try_move(-1));
        assert_eq!(g.active().unwrap().position(), Vector2::new(0, 5));
        assert!(g.try_move(1));
        assert_eq!(g.active().unwrap().position(), Vector2::new(1, 5));
    }

    #[test]
    fn test_rotate_off_wall_is_corrected() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        let mut piece = PieceInstance::new(PieceKind::Line, 0);
        piece.set_position(Vector2::new(0, 5));
        g.set_active(Some(piece));

        // Horizontal line spans x-2..=x+1 when rotated clockwise.
        assert!(g.try_rotate(RotateDirection::Clockwise));
        let active = g.active().unwrap();
        assert_eq!(active.position(), Vector2::new(2, 5));
        assert!(active.absolute_tiles().all(|t| t.x >= 0));
    }

    #[test]
    fn test_soft_drop_freezes_on_floor() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        let mut events = Recorder::default();
        let mut piece = PieceInstance::new(PieceKind::Block, 0);
        piece.set_position(Vector2::new(4, BOARD_HEIGHT - 2));
        g.set_active(Some(piece));

        assert!(g.soft_drop(&mut events));
        assert!(g.active().is_none());
        assert!(g.board().is_occupied(4, BOARD_HEIGHT - 1));
        assert!(g.board().is_occupied(5, BOARD_HEIGHT - 2));

        let event = g.take_last_event().unwrap();
        assert_eq!(event.position, Vector2::new(4, BOARD_HEIGHT - 2));
        assert!(!event.overflowed);
    }

    #[test]
    fn test_line_clear_scores_with_speed_level() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        let mut events = Recorder::default();

        // Two bottom rows full except columns 4 and 5.
        for y in [BOARD_HEIGHT - 2, BOARD_HEIGHT - 1] {
            for x in 0..BOARD_WIDTH {
                if x != 4 && x != 5 {
                    g.board_mut().set(x, y, Some(GRAY));
                }
            }
        }
        let mut piece = PieceInstance::new(PieceKind::Block, 0);
        piece.set_position(Vector2::new(4, BOARD_HEIGHT - 2));
        g.set_active(Some(piece));

        assert!(g.soft_drop(&mut events));
        assert_eq!(g.lines(), 2);
        assert_eq!(g.score(), 200);
        assert_eq!(events.lines, vec![2]);
        assert_eq!(events.scores.last(), Some(&200));
        assert_eq!(g.board().occupied_count(), 0);
    }

    #[test]
    fn test_overflow_kills_once() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        let mut events = Recorder::default();

        // Stack reaching the top in the spawn columns.
        for y in 0..BOARD_HEIGHT {
            for x in 3..=7 {
                g.board_mut().set(x, y, Some(GRAY));
            }
        }

        g.tick(&mut events);
        assert!(g.is_dead());
        assert_eq!(events.deaths, 1);
        assert!(g.active().is_none());

        // Further ticks and input do nothing.
        let spawned = g.pieces_spawned();
        clock.advance(10_000);
        g.tick(&mut events);
        assert!(!g.apply_action(GameAction::SoftDrop, &mut events));
        assert_eq!(g.pieces_spawned(), spawned);
        assert_eq!(events.deaths, 1);
    }

    #[test]
    fn test_speed_ramps_on_ticks() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        let mut events = Recorder::default();

        clock.set(5001);
        g.tick(&mut events);
        assert_eq!(g.speed(), 1.5);
        assert_eq!(events.speeds, vec![1.5]);
    }

    #[test]
    fn test_restart_resets_session() {
        let clock = ManualClock::new(0);
        let mut g = game(&clock);
        let mut events = Recorder::default();
        g.board_mut().set(0, 19, Some(GRAY));
        g.tick(&mut events);

        assert!(g.apply_action(GameAction::Restart, &mut events));
        assert_eq!(g.board().occupied_count(), 0);
        assert!(g.active().is_none());
        assert_eq!(g.score(), 0);
        assert!(!g.is_dead());
    }
}
