//! Eight-ball on Rapier2D: wires the rules, the cue and the table together.

use glam::Vec2;
use pocket_engine::input::queue::{InputEvent, InputQueue};
use pocket_engine::{
    EngineContext, Game, GameConfig, GameEvent, PointerState, ScreenProjection,
};

use crate::balls::Ball;
use crate::config::RulesConfig;
use crate::cue::CueController;
use crate::error::{ConfigError, TableError};
use crate::menu::{self, Menu, MenuChange};
use crate::rack::BallRack;
use crate::rules::{Phase, Player, TableHost, TurnMachine};
use crate::settle;
use crate::table::{self, WORLD_H, WORLD_W};

const FIXED_DT: f32 = 1.0 / 60.0;

/// Custom event kinds sent by the host page.
pub mod custom_events {
    pub const RESET: u32 = 1;
    pub const EXIT: u32 = 2;
}

/// Game event kinds published to the host page every tick.
pub mod game_events {
    /// a = player one score, b = player two score,
    /// c = 0 undecided / 1 player one has Half / 2 player one has Full
    pub const SCORES: f32 = 1.0;
    /// a = player to shoot (1 or 2), b = phase code
    pub const TURN: f32 = 2.0;
    /// a = yaw in degrees, b = pull-back offset, c = 1 when visible
    pub const CUE: f32 = 3.0;
    /// a = 1 when the menu is open
    pub const MENU: f32 = 4.0;
    pub const EXIT: f32 = 5.0;
}

/// The game's side of [`TableHost`], borrowed for one rules tick.
struct Host<'a> {
    ctx: &'a mut EngineContext,
    rack: &'a mut BallRack,
    menu: &'a mut Menu,
}

impl TableHost for Host<'_> {
    fn respawn_cue_ball(&mut self) -> Ball {
        self.rack.respawn_cue_ball(self.ctx)
    }

    fn respawn_objective_balls(&mut self) -> Vec<Ball> {
        self.rack.respawn_objective_balls(self.ctx)
    }

    fn primary_cue_position(&self) -> Result<Vec2, TableError> {
        self.rack.primary_cue_position(self.ctx)
    }

    fn is_menu_open(&self) -> bool {
        self.menu.is_open()
    }

    fn open_menu(&mut self) {
        self.menu.open();
    }

    fn close_menu(&mut self) {
        self.menu.close();
    }

    fn display_message(&mut self, text: &str, seconds: f32) {
        self.ctx.display_message(text, seconds);
    }
}

/// Table state can no longer be trusted; stop the game loudly.
fn fatal(err: TableError) -> ! {
    log::error!("Fatal table error: {}", err);
    panic!("{}", err);
}

pub struct PoolGame {
    rules: RulesConfig,
    machine: TurnMachine,
    cue: CueController,
    rack: BallRack,
    menu: Menu,
    pointer: PointerState,
    projection: ScreenProjection,
    /// Seconds the current shot has been rolling.
    motion_time: f32,
}

impl PoolGame {
    pub fn new() -> Self {
        Self::with_rules(RulesConfig::default())
    }

    pub fn with_rules(rules: RulesConfig) -> Self {
        Self {
            machine: TurnMachine::new(rules.clone()),
            cue: CueController::new(rules.tension_power),
            rules,
            rack: BallRack::new(),
            menu: Menu::new(),
            pointer: PointerState::default(),
            projection: ScreenProjection::new(WORLD_W, WORLD_H),
            motion_time: 0.0,
        }
    }

    /// Replace the rules from a JSON document. Unknown fields are ignored,
    /// missing ones take their defaults. The current game keeps running.
    pub fn load_rules(&mut self, json: &str) -> Result<(), ConfigError> {
        let rules = RulesConfig::from_json(json)?;
        self.cue.set_tension_power(rules.tension_power);
        self.machine.set_config(rules.clone());
        self.rules = rules;
        log::info!("Rules loaded: {:?}", self.rules);
        Ok(())
    }

    /// Rack a new game.
    pub fn reset_game(&mut self, ctx: &mut EngineContext) {
        self.motion_time = 0.0;
        let mut host = Host {
            ctx: &mut *ctx,
            rack: &mut self.rack,
            menu: &mut self.menu,
        };
        if let Err(err) = self.machine.reset(&mut host, &mut self.cue) {
            fatal(err);
        }
    }

    /// Ask the host page to leave the game.
    pub fn exit_game(&mut self, ctx: &mut EngineContext) {
        log::info!("Exit requested");
        ctx.emit_event(GameEvent::new(game_events::EXIT, 0.0, 0.0, 0.0));
    }

    pub fn turn_label(&self) -> String {
        menu::turn_label(self.machine.current_player())
    }

    pub fn scoreboard(&self, player: Player) -> String {
        menu::scoreboard_line(self.machine.scores().of(player), self.machine.suit_of(player))
    }

    pub fn machine(&self) -> &TurnMachine {
        &self.machine
    }

    pub fn cue(&self) -> &CueController {
        &self.cue
    }

    pub fn rack(&self) -> &BallRack {
        &self.rack
    }

    pub fn menu(&self) -> &Menu {
        &self.menu
    }

    fn menu_changed(&mut self, change: MenuChange) {
        match change {
            MenuChange::Opened => self.cue.set_suppress_queue(true, true),
            MenuChange::Closed => {
                if self.machine.phase().is_turnover() {
                    self.cue.set_suppress_queue(false, false);
                }
            }
        }
        log::debug!("Menu {:?}", change);
    }

    /// Force a table that never sleeps to rest.
    fn enforce_settle_timeout(&mut self, ctx: &mut EngineContext) {
        if self.machine.phase() != Phase::BallsInMotion {
            self.motion_time = 0.0;
            return;
        }
        self.motion_time += FIXED_DT;
        if let Some(limit) = self.rules.settle_timeout_seconds {
            if self.motion_time >= limit {
                log::warn!("Balls still moving after {:.1} s, stopping them", self.motion_time);
                self.rack.stop_all(ctx);
                self.motion_time = 0.0;
            }
        }
    }

    fn emit_state(&self, ctx: &mut EngineContext) {
        let assignment = match self.machine.assignment() {
            None => 0.0,
            Some(_) if self.machine.player_one_has_half() => 1.0,
            Some(_) => 2.0,
        };
        ctx.emit_event(GameEvent::new(
            game_events::SCORES,
            self.machine.score_player_one() as f32,
            self.machine.score_player_two() as f32,
            assignment,
        ));
        ctx.emit_event(GameEvent::new(
            game_events::TURN,
            self.machine.current_player().number() as f32,
            self.machine.phase().code(),
            0.0,
        ));
        ctx.emit_event(GameEvent::new(
            game_events::CUE,
            self.cue.pose().yaw_degrees,
            self.cue.offset(),
            if self.cue.is_visible() { 1.0 } else { 0.0 },
        ));
        ctx.emit_event(GameEvent::new(
            game_events::MENU,
            if self.menu.is_open() { 1.0 } else { 0.0 },
            0.0,
            0.0,
        ));
    }
}

impl Default for PoolGame {
    fn default() -> Self {
        Self::new()
    }
}

impl Game for PoolGame {
    fn config(&self) -> GameConfig {
        GameConfig {
            fixed_dt: FIXED_DT,
            world_width: WORLD_W,
            world_height: WORLD_H,
            max_events: 64,
            gravity: Vec2::ZERO, // top-down table
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) {
        table::build_cushions(ctx);
        self.reset_game(ctx);
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        self.pointer.update(input);
        for event in input.iter() {
            match *event {
                InputEvent::Custom { kind, .. } if kind == custom_events::RESET => {
                    self.reset_game(ctx);
                    return;
                }
                InputEvent::Custom { kind, .. } if kind == custom_events::EXIT => {
                    self.exit_game(ctx);
                }
                InputEvent::KeyDown { key_code } => {
                    if let Some(change) = self.menu.key_down(key_code) {
                        self.menu_changed(change);
                    }
                }
                InputEvent::KeyUp { key_code } => self.menu.key_up(key_code),
                _ => {}
            }
        }

        if let Some(shot) = self.cue.tick(FIXED_DT, &self.pointer, &self.projection) {
            let ball = match self.rack.primary_cue_ball() {
                Ok(ball) => ball,
                Err(err) => fatal(err),
            };
            ctx.apply_impulse(ball.id, shot.vector() * self.rules.impulse_scale);
        }

        for (ball, _) in self.rack.collect_exited(ctx) {
            self.machine.ball_collected(ball.kind);
        }

        self.enforce_settle_timeout(ctx);
        let at_rest = settle::table_at_rest(self.rack.all_balls(), ctx, self.rules.settle_epsilon);

        let mut host = Host {
            ctx: &mut *ctx,
            rack: &mut self.rack,
            menu: &mut self.menu,
        };
        if let Err(err) = self.machine.advance(FIXED_DT, at_rest, &mut host, &mut self.cue) {
            fatal(err);
        }

        self.emit_state(ctx);
    }

    fn resize(&mut self, width: f32, height: f32) {
        self.projection.resize(width, height);
    }
}
