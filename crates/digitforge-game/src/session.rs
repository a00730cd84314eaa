//! The session state machine: modes, countdown, stats, and overlays.

use digitforge_core::{Difficulty, GameState, Operation};
use digitforge_generator::PuzzleGenerator;
use digitforge_solver::find_shortest_solution;
use log::{debug, info};
use rand::{Rng, SeedableRng as _};
use rand_pcg::Pcg64Mcg;

/// Countdown length, in seconds, for Timer and Challenge sessions.
pub const COUNTDOWN_SECONDS: u32 = 60;

/// How a session treats wins, time, and puzzle advancement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::IsVariant)]
pub enum GameMode {
    /// Untimed play; a win ends the puzzle until the player asks for a new
    /// one.
    Classic,
    /// One puzzle against a 60-second countdown.
    Timer,
    /// Solve as many puzzles as possible before one shared countdown runs
    /// out.
    Challenge,
}

impl GameMode {
    /// All modes, in menu order.
    pub const ALL: [Self; 3] = [Self::Classic, Self::Timer, Self::Challenge];
}

/// Cumulative statistics for one challenge run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ChallengeStats {
    /// Puzzles solved during the run.
    pub puzzles_solved: u32,
    /// Seconds spent on solved puzzles.
    pub total_time: u32,
    /// Consecutive solves without a timeout.
    pub current_streak: u32,
}

/// An external stimulus applied to a [`Session`].
///
/// User actions and timer ticks are the same kind of thing to the session;
/// both go through [`Session::apply`] one at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionIntent {
    /// Toggle selection of the tile at an index.
    SelectNumber(usize),
    /// Choose the operator; executes the move when two tiles are selected.
    SelectOperation(Operation),
    /// Undo the last move.
    Undo,
    /// Reset the current puzzle to its starting tiles.
    Restart,
    /// Generate a new puzzle. In Challenge mode the countdown keeps running.
    NewPuzzle,
    /// Challenge only: replace the puzzle without counting it as solved.
    Skip,
    /// Show the solution overlay, computing a shortest solution if none is
    /// recorded.
    ShowExplanation,
    /// Hide the solution overlay.
    HideExplanation,
    /// Dismiss the win overlay. In Challenge mode this advances to the next
    /// puzzle.
    DismissWin,
    /// Dismiss the timeout overlay.
    DismissTimeout,
    /// Dismiss the challenge results and reset the run's statistics.
    DismissChallengeResults,
    /// Switch difficulty and start a fresh session.
    SetDifficulty(Difficulty),
    /// Switch mode and start a fresh session.
    SetMode(GameMode),
    /// One elapsed second from the countdown source.
    Tick,
}

/// One play session: the current puzzle plus everything around it.
///
/// All mutation goes through [`Session::apply`]; readers get snapshots
/// through the accessor methods. The random source is owned by the session so
/// a seeded session replays identically.
///
/// # Example
///
/// ```
/// use digitforge_core::Difficulty;
/// use digitforge_game::{GameMode, Session, SessionIntent};
///
/// let mut session = Session::seeded(Difficulty::Easy, GameMode::Classic, 1);
/// session.apply(SessionIntent::SelectNumber(0));
/// session.apply(SessionIntent::SelectNumber(1));
/// assert_eq!(session.game().selected_indices().len(), 2);
/// ```
#[derive(Debug)]
pub struct Session<R = Pcg64Mcg> {
    game: GameState,
    difficulty: Difficulty,
    mode: GameMode,
    time_remaining: Option<u32>,
    challenge_stats: ChallengeStats,
    show_explanation: bool,
    show_win_overlay: bool,
    show_timeout_overlay: bool,
    show_challenge_results: bool,
    rng: R,
}

impl Session<Pcg64Mcg> {
    /// Creates a session whose puzzles derive from a fixed seed.
    #[must_use]
    pub fn seeded(difficulty: Difficulty, mode: GameMode, seed: u64) -> Self {
        Self::new(difficulty, mode, Pcg64Mcg::seed_from_u64(seed))
    }
}

impl<R: Rng> Session<R> {
    /// Creates a session with a freshly generated puzzle.
    #[must_use]
    pub fn new(difficulty: Difficulty, mode: GameMode, mut rng: R) -> Self {
        let game = PuzzleGenerator::new(difficulty).generate(&mut rng);
        let mut session = Self {
            game,
            difficulty,
            mode,
            time_remaining: None,
            challenge_stats: ChallengeStats::default(),
            show_explanation: false,
            show_win_overlay: false,
            show_timeout_overlay: false,
            show_challenge_results: false,
            rng,
        };
        session.arm_countdown();
        session
    }

    /// Returns the current puzzle.
    #[must_use]
    pub fn game(&self) -> &GameState {
        &self.game
    }

    /// Returns the session difficulty.
    #[must_use]
    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Returns the session mode.
    #[must_use]
    pub fn mode(&self) -> GameMode {
        self.mode
    }

    /// Returns the seconds left on the countdown; `None` in Classic mode.
    #[must_use]
    pub fn time_remaining(&self) -> Option<u32> {
        self.time_remaining
    }

    /// Returns the current challenge-run statistics.
    #[must_use]
    pub fn challenge_stats(&self) -> ChallengeStats {
        self.challenge_stats
    }

    /// Returns `true` while the solution overlay is shown.
    #[must_use]
    pub fn explanation_visible(&self) -> bool {
        self.show_explanation
    }

    /// Returns `true` while the win overlay is shown.
    #[must_use]
    pub fn win_overlay_visible(&self) -> bool {
        self.show_win_overlay
    }

    /// Returns `true` while the timeout overlay is shown.
    #[must_use]
    pub fn timeout_overlay_visible(&self) -> bool {
        self.show_timeout_overlay
    }

    /// Returns `true` while the challenge results are shown.
    #[must_use]
    pub fn challenge_results_visible(&self) -> bool {
        self.show_challenge_results
    }

    /// Applies one intent, advancing the session state machine.
    pub fn apply(&mut self, intent: SessionIntent) {
        debug!("intent: {intent:?}");
        match intent {
            SessionIntent::SelectNumber(index) => self.game.toggle_select(index),
            SessionIntent::SelectOperation(operation) => self.select_operation(operation),
            SessionIntent::Undo => self.game.undo(),
            SessionIntent::Restart => self.game.restart(),
            SessionIntent::NewPuzzle => self.new_puzzle(),
            SessionIntent::Skip => self.skip(),
            SessionIntent::ShowExplanation => self.show_explanation(),
            SessionIntent::HideExplanation => self.show_explanation = false,
            SessionIntent::DismissWin => self.dismiss_win(),
            SessionIntent::DismissTimeout => self.show_timeout_overlay = false,
            SessionIntent::DismissChallengeResults => self.dismiss_challenge_results(),
            SessionIntent::SetDifficulty(difficulty) => {
                self.difficulty = difficulty;
                self.start_new_game();
            }
            SessionIntent::SetMode(mode) => self.set_mode(mode),
            SessionIntent::Tick => self.tick(),
        }
    }

    fn select_operation(&mut self, operation: Operation) {
        self.game.select_operation(operation);
        if self.game.selected_indices().len() == 2 {
            let was_playing = self.game.status().is_playing();
            self.game.execute_move();
            if was_playing && self.game.status().is_won() {
                self.handle_win();
            }
        }
    }

    fn handle_win(&mut self) {
        info!("puzzle solved in {} moves", self.game.move_count());
        if self.mode.is_challenge() {
            let elapsed = COUNTDOWN_SECONDS - self.time_remaining.unwrap_or(0);
            self.challenge_stats.puzzles_solved += 1;
            self.challenge_stats.total_time += elapsed;
            self.challenge_stats.current_streak += 1;
        }
        self.show_win_overlay = true;
    }

    fn new_puzzle(&mut self) {
        if self.mode.is_challenge() {
            // The shared countdown keeps running across challenge puzzles.
            self.game = self.generate_puzzle();
            self.show_win_overlay = false;
        } else {
            self.start_new_game();
        }
    }

    fn skip(&mut self) {
        if self.mode.is_challenge() {
            self.game = self.generate_puzzle();
        }
    }

    fn show_explanation(&mut self) {
        if self.game.solution().is_none() {
            let solution = find_shortest_solution(
                self.game.target(),
                self.game.initial_numbers(),
                self.difficulty.allowed_operations(),
            );
            self.game.set_solution(solution);
        }
        self.show_explanation = true;
    }

    fn dismiss_win(&mut self) {
        self.show_win_overlay = false;
        if self.mode.is_challenge() {
            self.new_puzzle();
        }
    }

    fn dismiss_challenge_results(&mut self) {
        self.show_challenge_results = false;
        self.challenge_stats = ChallengeStats::default();
    }

    fn set_mode(&mut self, mode: GameMode) {
        self.mode = mode;
        if mode.is_challenge() {
            self.challenge_stats = ChallengeStats::default();
        }
        self.start_new_game();
    }

    fn start_new_game(&mut self) {
        self.game = self.generate_puzzle();
        self.show_explanation = false;
        self.show_win_overlay = false;
        self.show_timeout_overlay = false;
        self.show_challenge_results = false;
        self.arm_countdown();
        info!(
            "new {} puzzle: target {} from {:?}",
            self.difficulty,
            self.game.target(),
            self.game.numbers(),
        );
    }

    fn generate_puzzle(&mut self) -> GameState {
        PuzzleGenerator::new(self.difficulty).generate(&mut self.rng)
    }

    fn arm_countdown(&mut self) {
        self.time_remaining = (!self.mode.is_classic()).then_some(COUNTDOWN_SECONDS);
    }

    fn tick(&mut self) {
        let Some(remaining) = self.time_remaining else {
            return;
        };
        if remaining == 0 || !self.countdown_running() {
            return;
        }
        let remaining = remaining - 1;
        self.time_remaining = Some(remaining);
        if remaining == 0 {
            self.handle_timeout();
        }
    }

    /// Whether ticks should advance the countdown right now.
    ///
    /// In Timer mode a win or timeout freezes the clock. In Challenge mode
    /// the countdown runs across wins and new puzzles until the results
    /// overlay appears, so run time is cumulative.
    fn countdown_running(&self) -> bool {
        match self.mode {
            GameMode::Classic => false,
            GameMode::Timer => self.game.status().is_playing(),
            GameMode::Challenge => !self.show_challenge_results,
        }
    }

    fn handle_timeout(&mut self) {
        debug!("countdown expired");
        self.game.mark_timeout();
        if self.mode.is_challenge() {
            self.show_challenge_results = true;
        } else {
            self.show_timeout_overlay = true;
        }
    }
}
