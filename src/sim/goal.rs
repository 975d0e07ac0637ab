//! Fillable goal slots at the top of a level
//!
//! A goal is passive: filling is its only mutation, and a filled goal stays
//! filled for the rest of the level. Occupying an already-filled goal is
//! treated as lethal by the player dispatch, which is what prevents
//! double-use.

use glam::Vec2;

use crate::consts::TILE_SIZE;

#[derive(Debug, Clone)]
pub struct Goal {
    pub pos: Vec2,
    pub size: Vec2,
    filled: bool,
}

impl Goal {
    pub fn new(x: f32, y: f32) -> Self {
        Goal {
            pos: Vec2::new(x, y),
            size: Vec2::splat(TILE_SIZE),
            filled: false,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.filled
    }

    pub fn fill(&mut self) {
        self.filled = true;
        log::debug!("goal at ({}, {}) filled", self.pos.x, self.pos.y);
    }
}
