//! The world owns every entity and runs the fixed per-frame pipeline
//!
//! Pipeline order is the concurrency contract of the whole simulation:
//! later steps depend on the results of earlier ones, so within one
//! `update` the order must hold exactly:
//!
//! 1. extra-life housekeeping and spawn timing
//! 2. debug goal-fill trigger
//! 3. player ride, then one input step
//! 4. recompute the player's floating status
//! 5. advance each entity, dispatching collisions as it lands
//! 6. goal collisions
//! 7. derive level-completed (monotone)
//! 8. derive game-over
//!
//! The player is taken by value at construction and recovered with
//! [`World::into_player`] when the level is torn down; it is the one piece
//! of state that survives across levels.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::sim::entity::{Entity, EntityDescriptor, Tag, aabb_overlap};
use crate::sim::extra_life::ExtraLifeAgent;
use crate::sim::goal::Goal;
use crate::sim::player::{FrameInput, Player};

/// One drawable element of the render snapshot
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    pub pos: Vec2,
    pub size: Vec2,
    /// False for submerged divers and unfilled goals
    pub visible: bool,
    /// Flippable entities are mirrored while moving left
    pub flipped: bool,
}

/// The per-level simulation state
pub struct World {
    entities: Vec<Entity>,
    player: Player,
    goals: Vec<Goal>,
    extra_life: Option<ExtraLifeAgent>,
    /// Seconds of level time accumulated so far
    elapsed: f32,
    rng: Pcg32,
    /// Level time at which the next extra-life agent is due
    extra_life_due: f32,
    level_completed: bool,
    game_over: bool,
}

impl World {
    /// Build a level from an already-configured player, parsed entity
    /// descriptors and the goal slots. The seed drives every random
    /// decision the world makes, so equal seeds replay identically.
    pub fn new(
        player: Player,
        descriptors: &[EntityDescriptor],
        goals: Vec<Goal>,
        seed: u64,
    ) -> Self {
        let entities = descriptors
            .iter()
            .enumerate()
            .map(|(i, desc)| Entity::from_descriptor(i as u32 + 1, desc))
            .collect();
        let mut rng = Pcg32::seed_from_u64(seed);
        let extra_life_due = draw_spawn_deadline(&mut rng, 0.0);
        World {
            entities,
            player,
            goals,
            extra_life: None,
            elapsed: 0.0,
            rng,
            extra_life_due,
            level_completed: false,
            game_over: false,
        }
    }

    /// Advance the whole simulation by one frame
    pub fn update(&mut self, input: &FrameInput, dt: f32) {
        self.elapsed += dt;

        // 1. extra-life housekeeping and spawn timing
        if self.extra_life.as_ref().is_some_and(|a| a.is_destroyed()) {
            self.extra_life = None;
            self.extra_life_due = draw_spawn_deadline(&mut self.rng, self.elapsed);
        }
        if self.extra_life.is_none() && self.elapsed >= self.extra_life_due {
            self.spawn_extra_life();
        }

        // 2. debug trigger: fill the next unfilled goal
        if input.fill_goal {
            if let Some(goal) = self.goals.iter_mut().find(|g| !g.is_filled()) {
                goal.fill();
                self.player.teleport_to_respawn();
            }
        }

        // 3. player: ride the current platform, then one input step
        self.player.ride_step(dt);
        self.player.input_step(input.direction);

        // 4. floating status must be settled before any lethal reaction
        self.recompute_floating();

        // 5. advance entities in order, dispatching as each one lands
        for i in 0..self.entities.len() {
            self.entities[i].update(dt);
            let entity = &self.entities[i];
            if aabb_overlap(self.player.pos, self.player.size, entity.pos, entity.size) {
                self.player.react_to_entity(entity);
            }
        }
        if let Some(agent) = self.extra_life.as_mut() {
            if let Some(platform) = self
                .entities
                .iter()
                .find(|e| e.id == agent.platform_id())
            {
                agent.update(platform, dt);
            }
            if !agent.is_destroyed()
                && aabb_overlap(self.player.pos, self.player.size, agent.pos, agent.size)
            {
                self.player.add_life();
                agent.collect();
            }
        }

        // 6. goal collisions: a filled goal is lethal, an open one fills
        for goal in &mut self.goals {
            if aabb_overlap(self.player.pos, self.player.size, goal.pos, goal.size) {
                if goal.is_filled() {
                    self.player.die();
                } else {
                    goal.fill();
                    self.player.teleport_to_respawn();
                }
            }
        }

        // 7. level completed, monotone for the life of this world
        if !self.level_completed && self.goals.iter().all(Goal::is_filled) {
            self.level_completed = true;
            log::info!("level completed after {:.1}s", self.elapsed);
        }

        // 8. game over is derived every frame, not latched: an extra life
        // collected after the last death brings the game back
        let game_over = self.player.lives() < 0;
        if game_over && !self.game_over {
            log::info!("game over after {:.1}s", self.elapsed);
        }
        self.game_over = game_over;
    }

    pub fn is_level_completed(&self) -> bool {
        self.level_completed
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// Tear down the level, handing the player on to the next one
    pub fn into_player(self) -> Player {
        self.player
    }

    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    pub fn extra_life(&self) -> Option<&ExtraLifeAgent> {
        self.extra_life.as_ref()
    }

    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    /// Ordered drawable snapshot: entities, extra life, goals, player
    pub fn snapshot(&self) -> Vec<SpriteView> {
        let mut views = Vec::with_capacity(self.entities.len() + self.goals.len() + 2);
        for entity in &self.entities {
            views.push(SpriteView {
                pos: entity.pos,
                size: entity.size,
                visible: entity.visible(),
                flipped: entity.has_tag(Tag::Flippable)
                    && entity.motion.is_some_and(|m| !m.moving_right),
            });
        }
        if let Some(agent) = &self.extra_life {
            views.push(SpriteView {
                pos: agent.pos,
                size: agent.size,
                visible: true,
                flipped: false,
            });
        }
        for goal in &self.goals {
            views.push(SpriteView {
                pos: goal.pos,
                size: goal.size,
                visible: goal.is_filled(),
                flipped: false,
            });
        }
        views.push(SpriteView {
            pos: self.player.pos,
            size: self.player.size,
            visible: true,
            flipped: false,
        });
        views
    }

    /// The player is floating iff it overlaps any Floating entity
    fn recompute_floating(&mut self) {
        let floating = self.entities.iter().any(|e| {
            e.has_tag(Tag::Floating)
                && aabb_overlap(self.player.pos, self.player.size, e.pos, e.size)
        });
        self.player.set_floating(floating);
    }

    /// Spawn the agent on a uniformly chosen eligible platform. Diveable
    /// platforms are never eligible, even while surfaced. With no eligible
    /// platform the cycle is skipped and the deadline redrawn.
    fn spawn_extra_life(&mut self) {
        let eligible: Vec<usize> = self
            .entities
            .iter()
            .enumerate()
            .filter(|(_, e)| e.has_tag(Tag::Floating) && !e.has_tag(Tag::Diveable))
            .map(|(i, _)| i)
            .collect();
        if eligible.is_empty() {
            log::debug!("extra-life spawn skipped: no eligible platform");
            self.extra_life_due = draw_spawn_deadline(&mut self.rng, self.elapsed);
            return;
        }
        let idx = eligible[self.rng.random_range(0..eligible.len())];
        let platform = &self.entities[idx];
        log::info!(
            "extra life spawned on platform {} at {:.1}s",
            platform.id,
            self.elapsed
        );
        self.extra_life = Some(ExtraLifeAgent::new(platform));
    }
}

/// Next spawn time: uniform in the configured window, relative to now
fn draw_spawn_deadline(rng: &mut Pcg32, elapsed: f32) -> f32 {
    elapsed + rng.random_range(EXTRA_LIFE_MIN_SECS..=EXTRA_LIFE_MAX_SECS) as f32
}
