//! Player state, input handling and collision reaction dispatch
//!
//! The player moves in grid steps of its own size and keeps a "last legal
//! position" so that moving into a solid object can be undone. Reactions to
//! overlapping entities are keyed purely off capability tags; the checks
//! are independent, so one overlap can fire several reactions.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::entity::{Entity, Motion, Tag, TagSet, fully_on_screen};

/// A single grid-step direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Collapse simultaneously pressed keys to at most one direction per
    /// frame, precedence up > down > left > right.
    pub fn from_pressed(up: bool, down: bool, left: bool, right: bool) -> Option<Direction> {
        if up {
            Some(Direction::Up)
        } else if down {
            Some(Direction::Down)
        } else if left {
            Some(Direction::Left)
        } else if right {
            Some(Direction::Right)
        } else {
            None
        }
    }
}

/// Input signal for a single frame
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct FrameInput {
    /// At most one direction is consumed per frame
    pub direction: Option<Direction>,
    /// Debug trigger: fill the next unfilled goal
    pub fill_goal: bool,
}

impl FrameInput {
    pub fn none() -> Self {
        FrameInput::default()
    }

    pub fn step(direction: Direction) -> Self {
        FrameInput {
            direction: Some(direction),
            fill_goal: false,
        }
    }
}

/// The player-controlled entity
#[derive(Debug, Clone)]
pub struct Player {
    pub pos: Vec2,
    pub size: Vec2,
    tags: TagSet,
    lives: i32,
    /// Previous validated position, used to undo illegal solid contacts
    last_legal: Vec2,
    respawn: Vec2,
    /// Carry velocity captured from the platform in the last collision pass
    ride: Option<Motion>,
}

impl Player {
    pub fn new(x: f32, y: f32, lives: i32) -> Self {
        let pos = Vec2::new(x, y);
        Player {
            pos,
            size: Vec2::splat(PLAYER_SIZE),
            tags: TagSet::EMPTY,
            lives,
            last_legal: pos,
            respawn: Vec2::new(RESPAWN_X, RESPAWN_Y),
            ride: None,
        }
    }

    pub fn lives(&self) -> i32 {
        self.lives
    }

    pub fn add_life(&mut self) {
        self.lives += 1;
        log::info!("extra life collected, lives = {}", self.lives);
    }

    /// Configure where the player returns after dying (per level)
    pub fn set_respawn(&mut self, x: f32, y: f32) {
        self.respawn = Vec2::new(x, y);
    }

    pub fn respawn_pos(&self) -> Vec2 {
        self.respawn
    }

    #[inline]
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(tag)
    }

    /// Lose a life and snap back to the respawn position
    pub fn die(&mut self) {
        self.lives -= 1;
        log::debug!("player died, lives = {}", self.lives);
        self.teleport_to_respawn();
    }

    /// Move to the respawn position without losing a life (goal fill)
    pub fn teleport_to_respawn(&mut self) {
        self.pos = self.respawn;
        self.last_legal = self.respawn;
    }

    /// Frame step 1: ride the platform captured in the previous collision
    /// pass. The displacement is skipped when it would leave the screen;
    /// losing contact with every platform is what kills, not this.
    pub fn ride_step(&mut self, dt: f32) {
        if !self.tags.contains(Tag::Floating) {
            return;
        }
        let Some(ride) = self.ride else { return };
        let sep = if ride.moving_right {
            ride.speed * dt
        } else {
            -ride.speed * dt
        };
        let to = Vec2::new(self.pos.x + sep, self.pos.y);
        if self.can_move_to(to) {
            self.pos = to;
        }
    }

    /// Frame step 2: one grid-step move from input. Illegal destinations
    /// are silently discarded; a legal move first caches the pre-move
    /// position as the last legal position.
    pub fn input_step(&mut self, direction: Option<Direction>) {
        let Some(direction) = direction else { return };
        let to = match direction {
            Direction::Up => self.pos - Vec2::new(0.0, self.size.y),
            Direction::Down => self.pos + Vec2::new(0.0, self.size.y),
            Direction::Left => self.pos - Vec2::new(self.size.x, 0.0),
            Direction::Right => self.pos + Vec2::new(self.size.x, 0.0),
        };
        if self.can_move_to(to) {
            self.last_legal = self.pos;
            self.pos = to;
        }
    }

    /// A move is legal iff the destination keeps the player fully on-screen
    pub fn can_move_to(&self, to: Vec2) -> bool {
        fully_on_screen(to, self.size)
    }

    /// Recomputed once per frame, before collision dispatch: the player is
    /// floating iff it overlaps any Floating entity. Clearing also drops
    /// the stale ride reference.
    pub fn set_floating(&mut self, floating: bool) {
        if floating {
            self.tags.insert(Tag::Floating);
        } else {
            self.tags.remove(Tag::Floating);
            self.ride = None;
        }
    }

    /// Tag-keyed reactions to an overlapping entity. Checks are
    /// independent; Goal and extra-life handling live in the world, which
    /// owns those collections.
    pub fn react_to_entity(&mut self, other: &Entity) {
        if other.has_tag(Tag::Lethal) {
            self.react_lethal();
        }
        if other.has_tag(Tag::Solid) {
            self.react_solid(other);
        }
        if other.has_tag(Tag::Floating) {
            self.react_floating(other);
        }
    }

    /// Lethal contact only kills a player that is not floating above it
    fn react_lethal(&mut self) {
        if !self.tags.contains(Tag::Floating) {
            self.die();
        }
    }

    /// A solid either undoes the player's move, or - when the player stood
    /// still and the solid moved into it - pushes the player along
    fn react_solid(&mut self, other: &Entity) {
        if self.pos != self.last_legal {
            self.pos = self.last_legal;
        } else if let Some(m) = other.motion {
            let sep = other.size.x / 2.0 + self.size.x / 2.0;
            let sep = if m.moving_right { sep } else { -sep };
            self.pos.x = other.pos.x + sep;
            if !fully_on_screen(self.pos, self.size) {
                self.die();
            }
        }
    }

    /// Capture the platform's carry velocity for next frame's ride step
    fn react_floating(&mut self, other: &Entity) {
        if let Some(m) = other.motion {
            self.ride = Some(m);
        }
        self.tags.insert(Tag::Floating);
    }
}
