use serde::{Deserialize, Serialize};

/// Mutable state carried by a player unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerState {
    pub alive: bool,
    pub score: u32,
}

impl PlayerState {
    pub fn new() -> Self {
        Self {
            alive: true,
            score: 0,
        }
    }

    pub fn kill(&mut self) {
        self.alive = false;
    }

    pub fn add_points(&mut self, points: u32) {
        self.score = self.score.saturating_add(points);
    }
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new()
    }
}
