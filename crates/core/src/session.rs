//! Game session - the top-level state machine
//!
//! Owns the board, the piece controller, score/level progression and elapsed
//! time, and moves between `Start`, `Playing`, `Paused` and `Over`:
//!
//! ```text
//! Start --start--> Playing --pause--> Paused --resume--> Playing
//! Playing --board overflow--> Over --restart--> Playing
//! any --return to menu--> Start
//! ```
//!
//! Nothing here fails or panics during play. Intents that don't fit the current
//! state are ignored and blocked moves are rejected. An external driver calls
//! [`GameSession::tick`] once per frame; the session never schedules itself.

use crate::board::Board;
use crate::clock::{Clock, Stopwatch, SystemClock};
use crate::config::GameConfig;
use crate::error::LockError;
use crate::events::SessionEvent;
use crate::piece::{Piece, PieceController};
use crate::rng::{PieceGenerator, RandomSource, SimpleRng};
use crate::scoring::LevelProgress;
use crate::snapshot::GameSnapshot;
use crate::types::{Cell, Intent, PieceKind, SessionState};

pub struct GameSession {
    config: GameConfig,
    board: Board,
    pieces: PieceController,
    state: SessionState,
    player: String,
    score: u32,
    /// Total lines cleared this game
    lines: u32,
    progress: LevelProgress,
    drop_counter_ms: u32,
    stopwatch: Stopwatch,
    clock: Box<dyn Clock + Send>,
    events: Vec<SessionEvent>,
}

impl GameSession {
    /// Session on the wall clock with a seeded [`SimpleRng`]
    pub fn new(config: GameConfig, seed: u32) -> Self {
        Self::with_sources(config, SimpleRng::new(seed), SystemClock::new())
    }

    /// Session with caller-provided randomness and time
    pub fn with_sources(
        config: GameConfig,
        rng: impl RandomSource + Send + 'static,
        clock: impl Clock + Send + 'static,
    ) -> Self {
        let generator = PieceGenerator::new(rng, config.randomizer);
        Self {
            board: Board::new(config.rows, config.cols),
            pieces: PieceController::new(generator),
            state: SessionState::Start,
            player: String::new(),
            score: 0,
            lines: 0,
            progress: LevelProgress::new(&config.scoring),
            drop_counter_ms: 0,
            stopwatch: Stopwatch::new(),
            clock: Box::new(clock),
            events: Vec::new(),
            config,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_cells(&self) -> &[Cell] {
        self.board.cells()
    }

    pub fn active_piece(&self) -> Option<&Piece> {
        self.pieces.active()
    }

    /// The upcoming piece; `None` until a game has started
    pub fn next_piece(&self) -> Option<&Piece> {
        match self.state {
            SessionState::Start => None,
            _ => Some(self.pieces.next()),
        }
    }

    pub fn ghost_row(&self) -> Option<i32> {
        self.pieces.ghost_row(&self.board)
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn level(&self) -> u32 {
        self.progress.level
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn lines_in_level(&self) -> u32 {
        self.progress.lines_in_level
    }

    pub fn drop_interval_ms(&self) -> u32 {
        self.progress.drop_interval_ms
    }

    /// Play time excluding pauses, frozen at game over
    pub fn elapsed_ms(&self) -> u64 {
        self.stopwatch.elapsed(self.clock.now_ms())
    }

    pub fn player_name(&self) -> &str {
        &self.player
    }

    /// Name used by the next `Start` intent
    pub fn set_player_name(&mut self, name: impl Into<String>) {
        self.player = name.into();
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.rows = self.board.rows();
        out.cols = self.board.cols();
        out.board.clear();
        out.board.extend_from_slice(self.board.cells());
        out.active = self.pieces.active().copied();
        out.ghost_row = self.ghost_row();
        out.next = self.next_piece().copied();
        out.state = self.state;
        out.player.clone_from(&self.player);
        out.score = self.score;
        out.level = self.progress.level;
        out.lines = self.lines;
        out.elapsed_ms = self.elapsed_ms();
        out.drop_interval_ms = self.progress.drop_interval_ms;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut snap = GameSnapshot::default();
        self.snapshot_into(&mut snap);
        snap
    }

    /// Begin a game from the menu as `name`
    pub fn start(&mut self, name: impl Into<String>) -> bool {
        if self.state != SessionState::Start {
            return false;
        }
        self.player = name.into();
        self.begin_game();
        true
    }

    /// Begin a new game after game over, keeping the player name
    pub fn restart(&mut self) -> bool {
        if self.state != SessionState::Over {
            return false;
        }
        self.begin_game();
        true
    }

    pub fn pause(&mut self) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }
        self.stopwatch.pause(self.clock.now_ms());
        self.set_state(SessionState::Paused);
        true
    }

    pub fn resume(&mut self) -> bool {
        if self.state != SessionState::Paused {
            return false;
        }
        self.stopwatch.resume(self.clock.now_ms());
        self.set_state(SessionState::Playing);
        true
    }

    /// Abandon any game in progress and go back to the menu
    pub fn return_to_menu(&mut self) {
        self.reset_game();
        self.pieces.reset();
        self.stopwatch.reset();
        self.set_state(SessionState::Start);
    }

    /// Advance time by `elapsed_ms`.
    ///
    /// Once the accumulated time exceeds the drop interval the active piece moves
    /// down one row (locking if it can't) and the accumulator restarts. Returns
    /// true if that happened.
    pub fn tick(&mut self, elapsed_ms: u32) -> bool {
        if self.state != SessionState::Playing {
            return false;
        }

        self.drop_counter_ms = self.drop_counter_ms.saturating_add(elapsed_ms);
        if self.drop_counter_ms <= self.progress.drop_interval_ms {
            return false;
        }

        self.step_down();
        self.drop_counter_ms = 0;
        true
    }

    /// Apply a player intent.
    ///
    /// Returns false if the intent isn't valid in the current state (it is then
    /// ignored), or if the move/rotation was blocked.
    pub fn apply_intent(&mut self, intent: Intent) -> bool {
        if !intent.is_valid_in(self.state) {
            return false;
        }

        match intent {
            Intent::MoveLeft => self.pieces.try_move(&self.board, -1, 0),
            Intent::MoveRight => self.pieces.try_move(&self.board, 1, 0),
            Intent::Rotate => self.pieces.try_rotate(&self.board),
            Intent::SoftDrop => {
                self.step_down();
                true
            }
            Intent::HardDrop => {
                let kind = self.pieces.active().map(|p| p.kind);
                let result = self.pieces.hard_drop(&mut self.board);
                self.finish_lock(kind, result);
                true
            }
            Intent::Pause => self.pause(),
            Intent::Resume => self.resume(),
            Intent::Start => {
                self.begin_game();
                true
            }
            Intent::Restart => self.restart(),
            Intent::ReturnToMenu => {
                self.return_to_menu();
                true
            }
        }
    }

    fn begin_game(&mut self) {
        self.reset_game();
        self.pieces.reset();
        self.pieces.spawn_next(&self.board);
        self.stopwatch.start(self.clock.now_ms());
        tracing::debug!(player = %self.player, "game started");
        self.set_state(SessionState::Playing);
    }

    fn reset_game(&mut self) {
        self.board.reset();
        self.score = 0;
        self.lines = 0;
        self.progress = LevelProgress::new(&self.config.scoring);
        self.drop_counter_ms = 0;
    }

    /// One row down, or lock if blocked
    fn step_down(&mut self) {
        if self.pieces.try_move(&self.board, 0, 1) {
            return;
        }
        let kind = self.pieces.active().map(|p| p.kind);
        let result = self.pieces.lock_and_advance(&mut self.board);
        self.finish_lock(kind, result);
    }

    fn finish_lock(&mut self, kind: Option<PieceKind>, result: Result<usize, LockError>) {
        match result {
            Ok(lines) => {
                if let Some(kind) = kind {
                    self.events.push(SessionEvent::PieceLocked {
                        kind,
                        lines_cleared: lines as u32,
                    });
                }
                self.award_lines(lines);
            }
            Err(LockError::SpawnBlocked) => self.overflow(),
            Err(err @ LockError::Obstructed) => {
                tracing::warn!(%err, "lock rejected");
                self.overflow();
            }
        }
    }

    fn award_lines(&mut self, lines: usize) {
        if lines == 0 {
            return;
        }

        let rules = self.config.scoring;
        let points = rules.points_for(lines);
        self.score = self.score.saturating_add(points);
        self.lines = self.lines.saturating_add(lines as u32);
        self.events.push(SessionEvent::LinesCleared {
            count: lines as u32,
            points,
            score: self.score,
        });

        if self.progress.add_lines(lines as u32, &rules) {
            tracing::info!(
                level = self.progress.level,
                drop_interval_ms = self.progress.drop_interval_ms,
                "level up"
            );
            self.events.push(SessionEvent::LevelUp {
                level: self.progress.level,
                drop_interval_ms: self.progress.drop_interval_ms,
            });
        }
    }

    fn overflow(&mut self) {
        self.stopwatch.stop(self.clock.now_ms());
        let elapsed_ms = self.elapsed_ms();
        tracing::info!(
            player = %self.player,
            score = self.score,
            level = self.progress.level,
            elapsed_ms,
            "game over"
        );
        self.set_state(SessionState::Over);
        self.events.push(SessionEvent::GameOver {
            player: self.player.clone(),
            score: self.score,
            level: self.progress.level,
            elapsed_ms,
        });
    }

    fn set_state(&mut self, to: SessionState) {
        let from = self.state;
        if from == to {
            return;
        }
        tracing::debug!(from = from.as_str(), to = to.as_str(), "session state changed");
        self.state = to;
        self.events.push(SessionEvent::StateChanged { from, to });
    }
}

impl std::fmt::Debug for GameSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameSession")
            .field("state", &self.state)
            .field("player", &self.player)
            .field("score", &self.score)
            .field("level", &self.progress.level)
            .field("lines", &self.lines)
            .finish_non_exhaustive()
    }
}
