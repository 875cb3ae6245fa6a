use wasm_bindgen::prelude::*;
use pocket_engine::*;

pub mod balls;
pub mod config;
pub mod cue;
pub mod error;
pub mod game;
pub mod menu;
pub mod rack;
pub mod rules;
pub mod settle;
pub mod table;

pub use config::RulesConfig;
pub use error::{ConfigError, TableError};
pub use game::PoolGame;
pub use rules::{Phase, Player, ShotOutcome, TableHost, TurnMachine};

pocket_web::export_game!(PoolGame, "eight-ball");

/// Replace the rules from a JSON document; rejects invalid values.
#[wasm_bindgen]
pub fn game_load_rules(json: &str) -> Result<(), JsValue> {
    with_runner(|r| r.game_mut().load_rules(json)).map_err(|err| {
        log::warn!("Rejected rules: {}", err);
        JsValue::from_str(&err.to_string())
    })
}

#[wasm_bindgen]
pub fn game_turn_label() -> String {
    with_runner(|r| r.game().turn_label())
}

/// Scoreboard text for player 1 or 2.
#[wasm_bindgen]
pub fn game_scoreboard(player: u8) -> String {
    let player = if player == 2 { Player::Two } else { Player::One };
    with_runner(|r| r.game().scoreboard(player))
}
