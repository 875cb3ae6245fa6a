//! Turn and score state machine.
//!
//! `TurnMachine` owns every rule decision: whose turn it is, who owns which
//! suit, the per-shot foul/score outcome and the win condition. It is fed
//! two signals per tick (queued collected balls and the settle predicate)
//! and drives the cue and the table back through `CueController` and
//! [`TableHost`].

use std::collections::VecDeque;

use glam::Vec2;
use pocket_engine::Countdown;

use crate::balls::{Ball, BallKind, Suit};
use crate::config::RulesConfig;
use crate::cue::CueController;
use crate::error::TableError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Player {
    One,
    Two,
}

impl Player {
    pub fn other(self) -> Player {
        match self {
            Player::One => Player::Two,
            Player::Two => Player::One,
        }
    }

    /// "Player One" / "Player Two", as used in announcements.
    pub fn name(self) -> &'static str {
        match self {
            Player::One => "Player One",
            Player::Two => "Player Two",
        }
    }

    pub fn number(self) -> u8 {
        match self {
            Player::One => 1,
            Player::Two => 2,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Scores {
    pub player_one: u32,
    pub player_two: u32,
}

impl Scores {
    pub fn of(&self, player: Player) -> u32 {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_two,
        }
    }

    fn add_point(&mut self, player: Player) {
        match player {
            Player::One => self.player_one += 1,
            Player::Two => self.player_two += 1,
        }
    }

    pub fn total(&self) -> u32 {
        self.player_one + self.player_two
    }
}

/// Which suit player one owns; player two owns the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SuitAssignment {
    pub player_one: Suit,
}

impl SuitAssignment {
    pub fn suit_of(&self, player: Player) -> Suit {
        match player {
            Player::One => self.player_one,
            Player::Two => self.player_one.other(),
        }
    }

    pub fn owner_of(&self, suit: Suit) -> Player {
        if suit == self.player_one {
            Player::One
        } else {
            Player::Two
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Phase {
    /// Grace period before the shooter may be judged. Starts a game and
    /// follows every foul.
    PreGame { grace: Countdown },
    /// Balls are still; the current player may shoot.
    AwaitingShot,
    BallsInMotion,
    /// Terminal until reset.
    GameOver {
        winner: Player,
        menu_delay: Countdown,
        menu_requested: bool,
    },
}

impl Phase {
    /// Between shots: the next motion on the table belongs to a new shot.
    pub fn is_turnover(&self) -> bool {
        matches!(self, Phase::PreGame { .. } | Phase::AwaitingShot)
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self, Phase::GameOver { .. })
    }

    /// Numeric code published to the host UI.
    pub fn code(&self) -> f32 {
        match self {
            Phase::PreGame { .. } => 0.0,
            Phase::AwaitingShot => 1.0,
            Phase::BallsInMotion => 2.0,
            Phase::GameOver { .. } => 3.0,
        }
    }
}

/// What happened during the current shot. Cleared at settle transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ShotOutcome {
    pub foul: bool,
    pub scored: bool,
}

/// Table-side services the rules call into.
pub trait TableHost {
    /// Destroy any cue ball and place a fresh one at the head spot.
    fn respawn_cue_ball(&mut self) -> Ball;
    /// Destroy all objective balls and rack a fresh set.
    fn respawn_objective_balls(&mut self) -> Vec<Ball>;
    /// Position of the cue ball the shot impulse goes to.
    fn primary_cue_position(&self) -> Result<Vec2, TableError>;
    fn is_menu_open(&self) -> bool;
    fn open_menu(&mut self);
    fn close_menu(&mut self);
    fn display_message(&mut self, text: &str, seconds: f32);
}

pub struct TurnMachine {
    config: RulesConfig,
    current: Player,
    assignment: Option<SuitAssignment>,
    scores: Scores,
    phase: Phase,
    outcome: ShotOutcome,
    collected: VecDeque<BallKind>,
}

impl TurnMachine {
    pub fn new(config: RulesConfig) -> Self {
        let capacity = config.event_queue_capacity;
        let mut machine = Self {
            config,
            current: Player::One,
            assignment: None,
            scores: Scores::default(),
            phase: Phase::AwaitingShot,
            outcome: ShotOutcome::default(),
            collected: VecDeque::with_capacity(capacity),
        };
        machine.reinitialize();
        machine
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Swap in new rules. Takes effect for timers armed after the call.
    pub fn set_config(&mut self, config: RulesConfig) {
        self.config = config;
    }

    fn reinitialize(&mut self) {
        self.current = Player::One;
        self.assignment = None;
        self.scores = Scores::default();
        self.phase = Phase::PreGame {
            grace: Countdown::new(self.config.pre_game_seconds),
        };
        self.outcome = ShotOutcome::default();
        self.collected.clear();
    }

    /// Report a ball that left play. Queued until the next `advance`.
    ///
    /// Dropped with a log line when the game is already over or the queue
    /// is full.
    pub fn ball_collected(&mut self, kind: BallKind) {
        if self.phase.is_game_over() {
            log::debug!("Ignoring collected {:?}: game is over", kind);
            return;
        }
        if self.collected.len() >= self.config.event_queue_capacity {
            log::warn!("Collected-ball queue full, dropping {:?}", kind);
            return;
        }
        self.collected.push_back(kind);
    }

    pub fn pending_events(&self) -> usize {
        self.collected.len()
    }

    /// Run one tick of the rules.
    pub fn advance(
        &mut self,
        dt: f32,
        at_rest: bool,
        host: &mut dyn TableHost,
        cue: &mut CueController,
    ) -> Result<(), TableError> {
        while let Some(kind) = self.collected.pop_front() {
            self.handle_collected(kind, host, cue);
        }

        if let Phase::PreGame { grace } = &mut self.phase {
            if grace.tick(dt) {
                return Ok(());
            }
            if self.outcome == ShotOutcome::default() {
                self.phase = Phase::AwaitingShot;
            } else {
                // A shot taken during the grace already has a result; it
                // must still go through a settle transition.
                log::debug!("Grace over with pending {:?}", self.outcome);
                self.phase = Phase::BallsInMotion;
                cue.set_suppress_queue(true, host.is_menu_open());
            }
        }

        if let Phase::GameOver {
            menu_delay,
            menu_requested,
            ..
        } = &mut self.phase
        {
            cue.set_suppress_queue(true, host.is_menu_open());
            menu_delay.tick(dt);
            if !menu_delay.is_running() && !*menu_requested {
                *menu_requested = true;
                log::info!("Opening menu after game over");
                host.open_menu();
            }
            return Ok(());
        }

        if at_rest && self.phase == Phase::BallsInMotion {
            self.settle(host, cue)?;
        } else if !at_rest && self.phase == Phase::AwaitingShot {
            log::debug!("{} took a shot", self.current.name());
            self.phase = Phase::BallsInMotion;
            cue.set_suppress_queue(true, host.is_menu_open());
        }
        Ok(())
    }

    fn settle(&mut self, host: &mut dyn TableHost, cue: &mut CueController) -> Result<(), TableError> {
        if self.outcome.foul {
            let ball = host.respawn_cue_ball();
            log::info!("Foul by {}: cue ball respawned as {:?}", self.current.name(), ball.id);
            self.phase = Phase::PreGame {
                grace: Countdown::new(self.config.pre_game_seconds),
            };
        } else {
            self.phase = Phase::AwaitingShot;
        }

        cue.update_anchor(host.primary_cue_position()?);
        cue.set_suppress_queue(false, host.is_menu_open());

        if self.outcome.scored && !self.outcome.foul {
            self.outcome.scored = false;
            log::info!("{} scored and shoots again", self.current.name());
            return Ok(());
        }

        self.outcome = ShotOutcome::default();
        self.current = self.current.other();
        log::info!("Turn passes to {}", self.current.name());
        let message = format!("{}'s Turn", self.current.name());
        host.display_message(&message, self.config.turn_message_seconds);
        Ok(())
    }

    fn handle_collected(&mut self, kind: BallKind, host: &mut dyn TableHost, cue: &mut CueController) {
        if self.phase.is_game_over() {
            log::debug!("Ignoring collected {:?}: game is over", kind);
            return;
        }

        let suit = match kind {
            BallKind::Eight => {
                self.finish(host, cue);
                return;
            }
            BallKind::Cue => {
                log::info!("Foul: cue ball collected");
                self.outcome.foul = true;
                // Nothing to shoot with until the settle respawn.
                cue.set_suppress_queue(true, host.is_menu_open());
                return;
            }
            BallKind::Half => Suit::Half,
            BallKind::Full => Suit::Full,
        };

        let assignment = match self.assignment {
            Some(assignment) => assignment,
            None => {
                let assignment = SuitAssignment {
                    player_one: match self.current {
                        Player::One => suit,
                        Player::Two => suit.other(),
                    },
                };
                self.assignment = Some(assignment);
                let message = format!(
                    "Player One gets {}. \nPlayer Two gets {}.",
                    assignment.player_one.label(),
                    assignment.player_one.other().label()
                );
                log::info!("Suits assigned: player one has {}", assignment.player_one.label());
                host.display_message(&message, self.config.assignment_message_seconds);
                assignment
            }
        };

        let owner = assignment.owner_of(suit);
        self.scores.add_point(owner);
        log::debug!(
            "{:?} ball collected, point to {} ({}-{})",
            kind,
            owner.name(),
            self.scores.player_one,
            self.scores.player_two
        );
        if owner == self.current {
            self.outcome.scored = true;
        }
    }

    /// The eight ball left play: decide the winner and end the game.
    ///
    /// Player one wins when they pot it after clearing their suit, or when
    /// player two pots it before clearing theirs. The second branch does
    /// not look at player one's progress at all.
    fn finish(&mut self, host: &mut dyn TableHost, cue: &mut CueController) {
        let target = self.config.balls_per_suit;
        let player_one_wins = match self.current {
            Player::One => self.scores.player_one >= target,
            Player::Two => self.scores.player_two < target,
        };
        let winner = if player_one_wins { Player::One } else { Player::Two };

        self.phase = Phase::GameOver {
            winner,
            menu_delay: Countdown::new(self.config.after_game_seconds),
            menu_requested: false,
        };
        self.collected.clear();
        cue.set_suppress_queue(true, host.is_menu_open());

        log::info!(
            "Eight ball down on {}'s shot: {} wins ({}-{})",
            self.current.name(),
            winner.name(),
            self.scores.player_one,
            self.scores.player_two
        );
        let message = format!("{} wins.", winner.name());
        host.display_message(&message, self.config.win_message_seconds);
    }

    /// Start a new game on a freshly racked table.
    pub fn reset(&mut self, host: &mut dyn TableHost, cue: &mut CueController) -> Result<(), TableError> {
        let objectives = host.respawn_objective_balls();
        host.respawn_cue_ball();
        self.reinitialize();
        host.close_menu();
        cue.update_anchor(host.primary_cue_position()?);
        cue.set_suppress_queue(false, host.is_menu_open());
        cue.suppress_for(self.config.reset_suppression_seconds);
        log::info!("New game: {} objective balls racked", objectives.len());
        Ok(())
    }

    pub fn current_player(&self) -> Player {
        self.current
    }

    pub fn player_one_turn(&self) -> bool {
        self.current == Player::One
    }

    /// Reads `true` until suits are assigned.
    pub fn player_one_has_half(&self) -> bool {
        self.assignment.map_or(true, |a| a.player_one == Suit::Half)
    }

    pub fn first_ball_in_game(&self) -> bool {
        self.assignment.is_none()
    }

    pub fn assignment(&self) -> Option<SuitAssignment> {
        self.assignment
    }

    pub fn suit_of(&self, player: Player) -> Option<Suit> {
        self.assignment.map(|a| a.suit_of(player))
    }

    pub fn scores(&self) -> Scores {
        self.scores
    }

    pub fn score_player_one(&self) -> u32 {
        self.scores.player_one
    }

    pub fn score_player_two(&self) -> u32 {
        self.scores.player_two
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn outcome(&self) -> ShotOutcome {
        self.outcome
    }

    pub fn winner(&self) -> Option<Player> {
        match self.phase {
            Phase::GameOver { winner, .. } => Some(winner),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pocket_engine::EntityId;
    use proptest::prelude::*;

    const DT: f32 = 1.0 / 60.0;

    #[derive(Default)]
    struct MockHost {
        messages: Vec<String>,
        cue_respawns: u32,
        objective_respawns: u32,
        menu_open: bool,
        menu_opens: u32,
        menu_closes: u32,
        cue_position: Option<Vec2>,
        next_id: u32,
    }

    impl MockHost {
        fn with_cue() -> Self {
            Self {
                cue_position: Some(Vec2::new(250.0, 250.0)),
                ..Self::default()
            }
        }

        fn count(&self, text: &str) -> usize {
            self.messages.iter().filter(|m| m.as_str() == text).count()
        }
    }

    impl TableHost for MockHost {
        fn respawn_cue_ball(&mut self) -> Ball {
            self.cue_respawns += 1;
            self.cue_position = Some(Vec2::new(250.0, 250.0));
            self.next_id += 1;
            Ball::new(EntityId(self.next_id), 0)
        }

        fn respawn_objective_balls(&mut self) -> Vec<Ball> {
            self.objective_respawns += 1;
            (1..=15)
                .map(|n| {
                    self.next_id += 1;
                    Ball::new(EntityId(self.next_id), n)
                })
                .collect()
        }

        fn primary_cue_position(&self) -> Result<Vec2, TableError> {
            self.cue_position.ok_or(TableError::MissingCueBall)
        }

        fn is_menu_open(&self) -> bool {
            self.menu_open
        }

        fn open_menu(&mut self) {
            self.menu_open = true;
            self.menu_opens += 1;
        }

        fn close_menu(&mut self) {
            self.menu_open = false;
            self.menu_closes += 1;
        }

        fn display_message(&mut self, text: &str, _seconds: f32) {
            self.messages.push(text.to_string());
        }
    }

    struct Table {
        machine: TurnMachine,
        host: MockHost,
        cue: CueController,
    }

    impl Table {
        /// Fresh game, past the pre-game grace, waiting for player one.
        fn ready() -> Self {
            let mut table = Table {
                machine: TurnMachine::new(RulesConfig::default()),
                host: MockHost::with_cue(),
                cue: CueController::new(2.0),
            };
            table.wait_for_shot();
            table
        }

        fn tick(&mut self, at_rest: bool) {
            self.machine
                .advance(DT, at_rest, &mut self.host, &mut self.cue)
                .expect("cue ball is on the table");
        }

        fn wait_for_shot(&mut self) {
            for _ in 0..600 {
                if self.machine.phase() == Phase::AwaitingShot {
                    return;
                }
                self.tick(true);
            }
            panic!("never reached AwaitingShot: {:?}", self.machine.phase());
        }

        fn shoot(&mut self) {
            self.wait_for_shot();
            self.tick(false);
            assert_eq!(self.machine.phase(), Phase::BallsInMotion);
        }

        /// Collect balls while rolling, then let the table settle.
        fn play(&mut self, collected: &[BallKind]) {
            self.shoot();
            for &kind in collected {
                self.machine.ball_collected(kind);
            }
            self.tick(false);
            if !self.machine.phase().is_game_over() {
                self.tick(true);
            }
        }
    }

    #[test]
    fn new_game_starts_in_pre_game_with_player_one() {
        let machine = TurnMachine::new(RulesConfig::default());
        assert!(matches!(machine.phase(), Phase::PreGame { .. }));
        assert!(machine.player_one_turn());
        assert!(machine.player_one_has_half());
        assert!(machine.first_ball_in_game());
        assert_eq!(machine.scores(), Scores::default());
        assert_eq!(machine.winner(), None);
    }

    #[test]
    fn pre_game_grace_ignores_motion() {
        let mut table = Table {
            machine: TurnMachine::new(RulesConfig::default()),
            host: MockHost::with_cue(),
            cue: CueController::new(2.0),
        };
        // Quarter-second steps keep the countdown exact: 0.5 → 0.25 → 0.0.
        for _ in 0..2 {
            table.machine.advance(0.25, false, &mut table.host, &mut table.cue).unwrap();
            assert!(matches!(table.machine.phase(), Phase::PreGame { .. }));
        }
        table.machine.advance(0.25, false, &mut table.host, &mut table.cue).unwrap();
        assert_eq!(table.machine.phase(), Phase::BallsInMotion, "grace over, motion counts");
    }

    #[test]
    fn shot_taken_suppresses_cue_until_settle() {
        let mut table = Table::ready();
        table.shoot();
        assert!(table.cue.is_suppressed());
        table.tick(true);
        assert!(!table.cue.is_suppressed());
        assert_eq!(table.cue.anchor(), Vec2::new(250.0, 250.0));
    }

    #[test]
    fn first_pot_assigns_suits_and_extra_turn() {
        let mut table = Table::ready();
        table.shoot();
        table.machine.ball_collected(BallKind::Full);
        table.tick(false);

        assert_eq!(table.machine.assignment(), Some(SuitAssignment { player_one: Suit::Full }));
        assert!(!table.machine.player_one_has_half());
        assert!(!table.machine.first_ball_in_game());
        assert_eq!(table.machine.score_player_one(), 1);
        assert!(table.machine.outcome().scored);
        assert_eq!(table.host.count("Player One gets Full. \nPlayer Two gets Half."), 1);

        table.tick(true);
        assert!(table.machine.player_one_turn(), "scorer keeps the table");
        assert!(!table.machine.outcome().scored);
        assert_eq!(table.machine.phase(), Phase::AwaitingShot);
        assert_eq!(table.host.count("Player Two's Turn"), 0);
    }

    #[test]
    fn assignment_on_player_two_turn_gives_player_two_the_ball_suit() {
        let mut table = Table::ready();
        table.play(&[]);
        assert_eq!(table.machine.current_player(), Player::Two);
        table.play(&[BallKind::Half]);
        assert_eq!(table.machine.suit_of(Player::Two), Some(Suit::Half));
        assert!(!table.machine.player_one_has_half());
        assert_eq!(table.machine.score_player_two(), 1);
        assert_eq!(table.machine.current_player(), Player::Two);
    }

    #[test]
    fn suits_are_assigned_once() {
        let mut table = Table::ready();
        table.play(&[BallKind::Half, BallKind::Full]);
        table.play(&[BallKind::Full]);
        let announcements = table
            .host
            .messages
            .iter()
            .filter(|m| m.starts_with("Player One gets"))
            .count();
        assert_eq!(announcements, 1);
        assert_eq!(table.machine.suit_of(Player::One), Some(Suit::Half));
    }

    #[test]
    fn empty_shot_passes_the_turn() {
        let mut table = Table::ready();
        table.play(&[]);
        assert_eq!(table.machine.current_player(), Player::Two);
        assert_eq!(table.host.count("Player Two's Turn"), 1);
        table.play(&[]);
        assert_eq!(table.host.count("Player One's Turn"), 1);
    }

    #[test]
    fn extra_turn_then_miss_flips() {
        let mut table = Table::ready();
        table.play(&[BallKind::Full]);
        assert!(table.machine.player_one_turn());
        table.play(&[]);
        assert!(!table.machine.player_one_turn());
    }

    #[test]
    fn potting_opponent_ball_scores_for_them_and_passes_turn() {
        let mut table = Table::ready();
        table.play(&[BallKind::Full]);
        table.play(&[BallKind::Half]);
        assert_eq!(table.machine.score_player_one(), 1);
        assert_eq!(table.machine.score_player_two(), 1);
        assert_eq!(table.machine.current_player(), Player::Two);
    }

    #[test]
    fn scratch_is_a_foul_with_respawn_and_turn_change() {
        let mut table = Table::ready();
        table.shoot();
        table.machine.ball_collected(BallKind::Cue);
        table.host.cue_position = None;
        table.tick(false);
        assert!(table.machine.outcome().foul);

        table.tick(true);
        assert_eq!(table.host.cue_respawns, 1);
        assert!(matches!(table.machine.phase(), Phase::PreGame { .. }));
        assert_eq!(table.machine.current_player(), Player::Two);
        assert_eq!(table.machine.outcome(), ShotOutcome::default());
        assert!(!table.cue.is_suppressed());
    }

    #[test]
    fn scratch_during_post_foul_grace_still_settles() {
        let mut table = Table::ready();
        table.play(&[BallKind::Cue]);
        assert!(matches!(table.machine.phase(), Phase::PreGame { .. }));
        assert_eq!(table.machine.current_player(), Player::Two);

        // Player two shoots inside the grace and scratches again.
        table.machine.ball_collected(BallKind::Cue);
        table.host.cue_position = None;
        table.tick(false);
        assert!(table.cue.is_suppressed(), "no cue ball to shoot");

        table.wait_for_shot();
        assert_eq!(table.host.cue_respawns, 2);
        assert_eq!(table.machine.current_player(), Player::One);
        assert_eq!(table.machine.outcome(), ShotOutcome::default());
        assert!(table.host.cue_position.is_some());
        assert!(!table.cue.is_suppressed());
    }

    #[test]
    fn pot_during_grace_keeps_the_turn_after_settle() {
        let mut table = Table::ready();
        table.play(&[BallKind::Cue]);
        table.machine.ball_collected(BallKind::Half);
        table.wait_for_shot();
        assert_eq!(table.machine.current_player(), Player::Two);
        assert_eq!(table.machine.suit_of(Player::Two), Some(Suit::Half));
        assert!(!table.machine.outcome().scored);
    }

    #[test]
    fn foul_cancels_extra_turn() {
        let mut table = Table::ready();
        table.play(&[BallKind::Full, BallKind::Cue]);
        assert_eq!(table.machine.score_player_one(), 1);
        assert_eq!(table.machine.current_player(), Player::Two);
        assert_eq!(table.host.cue_respawns, 1);
    }

    #[test]
    fn player_one_wins_after_clearing_suit() {
        let mut table = Table::ready();
        table.play(&[BallKind::Full; 7]);
        assert_eq!(table.machine.score_player_one(), 7);
        assert!(table.machine.player_one_turn());

        table.play(&[BallKind::Eight]);
        assert_eq!(table.machine.winner(), Some(Player::One));
        assert_eq!(table.host.count("Player One wins."), 1);
        assert!(table.cue.is_suppressed());
    }

    #[test]
    fn early_eight_on_player_one_turn_loses() {
        let mut table = Table::ready();
        table.play(&[BallKind::Full, BallKind::Full]);
        table.play(&[BallKind::Eight]);
        assert_eq!(table.machine.winner(), Some(Player::Two));
        assert_eq!(table.host.count("Player Two wins."), 1);
    }

    #[test]
    fn early_eight_on_player_two_turn_hands_player_one_the_win() {
        let mut table = Table::ready();
        table.play(&[]);
        table.play(&[BallKind::Eight]);
        assert_eq!(table.machine.winner(), Some(Player::One));
    }

    #[test]
    fn player_two_wins_after_clearing_suit() {
        let mut table = Table::ready();
        table.play(&[]);
        table.play(&[BallKind::Half; 7]);
        assert_eq!(table.machine.score_player_two(), 7);
        table.play(&[BallKind::Eight]);
        assert_eq!(table.machine.winner(), Some(Player::Two));
    }

    #[test]
    fn events_after_game_over_are_ignored() {
        let mut table = Table::ready();
        table.shoot();
        table.machine.ball_collected(BallKind::Eight);
        table.machine.ball_collected(BallKind::Full);
        table.machine.ball_collected(BallKind::Eight);
        table.tick(false);
        table.machine.ball_collected(BallKind::Half);
        assert_eq!(table.machine.pending_events(), 0, "nothing queues after game over");
        table.tick(true);

        assert_eq!(table.machine.scores().total(), 0);
        let wins = table.host.messages.iter().filter(|m| m.ends_with("wins.")).count();
        assert_eq!(wins, 1);
        assert!(table.machine.first_ball_in_game());
    }

    #[test]
    fn menu_opens_once_after_game_over_delay() {
        let mut table = Table::ready();
        table.play(&[BallKind::Eight]);
        // 4 s at 60 Hz, plus slack for float accumulation.
        for _ in 0..235 {
            table.tick(true);
        }
        assert_eq!(table.host.menu_opens, 0);
        for _ in 0..10 {
            table.tick(true);
        }
        assert_eq!(table.host.menu_opens, 1);
        for _ in 0..120 {
            table.tick(true);
        }
        assert_eq!(table.host.menu_opens, 1, "menu is requested exactly once");
        assert!(table.cue.is_suppressed());
    }

    #[test]
    fn eight_during_pre_game_ends_the_game() {
        let mut table = Table {
            machine: TurnMachine::new(RulesConfig::default()),
            host: MockHost::with_cue(),
            cue: CueController::new(2.0),
        };
        table.machine.ball_collected(BallKind::Eight);
        table.tick(false);
        assert!(table.machine.phase().is_game_over());
    }

    #[test]
    fn settle_with_open_menu_keeps_cue_suppressed() {
        let mut table = Table::ready();
        table.shoot();
        table.host.menu_open = true;
        table.tick(true);
        assert!(table.cue.is_suppressed());
        assert_eq!(table.machine.phase(), Phase::AwaitingShot);
    }

    #[test]
    fn missing_cue_ball_at_settle_is_an_error() {
        let mut table = Table::ready();
        table.shoot();
        table.host.cue_position = None;
        let result = table.machine.advance(DT, true, &mut table.host, &mut table.cue);
        assert_eq!(result, Err(TableError::MissingCueBall));
    }

    #[test]
    fn full_queue_drops_events() {
        let config = RulesConfig {
            event_queue_capacity: 2,
            ..RulesConfig::default()
        };
        let mut machine = TurnMachine::new(config);
        machine.ball_collected(BallKind::Half);
        machine.ball_collected(BallKind::Full);
        machine.ball_collected(BallKind::Half);
        assert_eq!(machine.pending_events(), 2);
    }

    #[test]
    fn reset_restores_a_fresh_game() {
        let mut table = Table::ready();
        table.play(&[BallKind::Full, BallKind::Full]);
        table.play(&[BallKind::Eight]);
        table.host.menu_open = true;

        table.machine.reset(&mut table.host, &mut table.cue).unwrap();
        assert_eq!(table.host.objective_respawns, 1);
        assert_eq!(table.host.cue_respawns, 1);
        assert_eq!(table.host.menu_closes, 1);
        assert!(!table.host.menu_open);
        assert!(matches!(table.machine.phase(), Phase::PreGame { .. }));
        assert!(table.machine.player_one_turn());
        assert!(table.machine.first_ball_in_game());
        assert_eq!(table.machine.scores(), Scores::default());
        assert_eq!(table.machine.pending_events(), 0);
        assert!(table.cue.is_suppressed(), "short lockout after reset");
    }

    proptest! {
        #[test]
        fn scores_count_every_suited_pot(shots in prop::collection::vec(
            prop::collection::vec(0u8..3, 0..4),
            0..25,
        )) {
            let mut table = Table::ready();
            let mut suited = 0u32;
            let mut last_total = 0u32;
            for shot in shots {
                let kinds: Vec<BallKind> = shot
                    .iter()
                    .map(|k| match k {
                        0 => BallKind::Half,
                        1 => BallKind::Full,
                        _ => BallKind::Cue,
                    })
                    .collect();
                suited += kinds.iter().filter(|k| k.suit().is_some()).count() as u32;
                table.play(&kinds);

                let total = table.machine.scores().total();
                prop_assert_eq!(total, suited);
                prop_assert!(total >= last_total);
                last_total = total;
                prop_assert_eq!(table.machine.first_ball_in_game(), suited == 0);
            }
            let announcements = table
                .host
                .messages
                .iter()
                .filter(|m| m.starts_with("Player One gets"))
                .count();
            prop_assert_eq!(announcements, usize::from(suited > 0));
        }

        #[test]
        fn every_foul_respawns_at_settle(fouls in prop::collection::vec(any::<bool>(), 1..20)) {
            let mut table = Table::ready();
            let mut expected = 0;
            for foul in fouls {
                let kinds: &[BallKind] = if foul { &[BallKind::Cue] } else { &[] };
                table.play(kinds);
                if foul {
                    expected += 1;
                }
                prop_assert_eq!(table.host.cue_respawns, expected);
            }
        }
    }
}
