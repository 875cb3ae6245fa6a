//! In-game menu toggle and the HUD text shown beside the table.

use crate::balls::Suit;
use crate::rules::Player;

pub mod keys {
    pub const TAB: u32 = 9;
    pub const ESCAPE: u32 = 27;
}

/// What a key press did to the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChange {
    Opened,
    Closed,
}

#[derive(Debug, Default)]
pub struct Menu {
    open: bool,
    tab_held: bool,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn open(&mut self) {
        self.open = true;
    }

    pub fn close(&mut self) {
        self.open = false;
    }

    /// Escape toggles the menu, except while Tab is held.
    pub fn key_down(&mut self, key_code: u32) -> Option<MenuChange> {
        match key_code {
            keys::TAB => {
                self.tab_held = true;
                None
            }
            keys::ESCAPE if !self.tab_held => {
                self.open = !self.open;
                Some(if self.open { MenuChange::Opened } else { MenuChange::Closed })
            }
            _ => None,
        }
    }

    pub fn key_up(&mut self, key_code: u32) {
        if key_code == keys::TAB {
            self.tab_held = false;
        }
    }
}

/// Scoreboard line for one player, e.g. `"3 [Half]"`.
pub fn scoreboard_line(score: u32, suit: Option<Suit>) -> String {
    let label = suit.map_or("Undecided", Suit::label);
    format!("{} [{}]", score, label)
}

/// Turn indicator, e.g. `"Player 1's Turn"`.
pub fn turn_label(player: Player) -> String {
    format!("Player {}'s Turn", player.number())
}
