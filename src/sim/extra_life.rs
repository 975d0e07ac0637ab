//! The transient extra-life bonus riding a platform
//!
//! The agent is bound to one carrying platform: its x tracks the platform
//! plus a lateral offset, and every couple of seconds it takes a small step
//! of its own along the platform's span, turning around rather than
//! stepping past either end. It self-destructs after a fixed lifetime or
//! when the player collects it.

use glam::Vec2;

use crate::consts::*;
use crate::sim::entity::Entity;

#[derive(Debug, Clone)]
pub struct ExtraLifeAgent {
    pub pos: Vec2,
    pub size: Vec2,
    /// Id of the platform this agent is bound to
    platform_id: u32,
    /// Lateral offset from the platform center, recomputed after any move
    offset: f32,
    /// Total seconds since spawn
    age: f32,
    /// Seconds since the last self-move
    since_step: f32,
    step_right: bool,
    destroyed: bool,
}

impl ExtraLifeAgent {
    /// Spawn on the center of the given platform
    pub fn new(platform: &Entity) -> Self {
        ExtraLifeAgent {
            pos: platform.pos,
            size: Vec2::splat(TILE_SIZE),
            platform_id: platform.id,
            offset: 0.0,
            age: 0.0,
            since_step: 0.0,
            step_right: true,
            destroyed: false,
        }
    }

    pub fn platform_id(&self) -> u32 {
        self.platform_id
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Collected by the player; the life itself is granted by the caller
    pub fn collect(&mut self) {
        self.destroyed = true;
    }

    /// Advance one frame against the platform the agent is bound to
    pub fn update(&mut self, platform: &Entity, dt: f32) {
        self.age += dt;
        self.since_step += dt;

        if self.age >= EXTRA_LIFE_LIFETIME_SECS {
            self.destroyed = true;
        }

        // carried: track the platform, keeping the lateral offset
        self.pos.x = platform.pos.x + self.offset;

        if self.since_step >= EXTRA_LIFE_STEP_SECS {
            self.since_step = 0.0;
            let step = if self.step_right {
                self.size.x
            } else {
                -self.size.x
            };
            let mut to_x = self.pos.x + step;
            if to_x < platform.left() || to_x > platform.right() {
                // reached an end of the platform, walk back instead
                to_x = self.pos.x - step;
                self.step_right = !self.step_right;
            }
            self.pos.x = to_x;
        }

        self.offset = self.pos.x - platform.pos.x;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{EntityDescriptor, EntityKind};

    fn log_at(x: f32, y: f32) -> Entity {
        Entity::from_descriptor(7, &EntityDescriptor::new(EntityKind::Log, x, y, true))
    }

    #[test]
    fn test_tracks_platform() {
        let mut platform = log_at(300.0, 400.0);
        let mut agent = ExtraLifeAgent::new(&platform);
        platform.pos.x = 350.0;
        agent.update(&platform, 0.5);
        assert_eq!(agent.pos.x, 350.0);
        assert_eq!(agent.pos.y, 400.0);
    }

    #[test]
    fn test_oscillates_within_platform_span() {
        // long log spans 4 tiles, so the agent has room to walk
        let platform = Entity::from_descriptor(
            7,
            &EntityDescriptor::new(EntityKind::LongLog, 512.0, 400.0, true),
        );
        let mut agent = ExtraLifeAgent::new(&platform);
        for _ in 0..40 {
            agent.update(&platform, 1.0);
            assert!(agent.pos.x >= platform.left());
            assert!(agent.pos.x <= platform.right());
        }
    }

    #[test]
    fn test_reverses_at_platform_end() {
        let platform = log_at(512.0, 400.0);
        let mut agent = ExtraLifeAgent::new(&platform);
        // first step goes right to the platform edge
        agent.update(&platform, 2.0);
        assert_eq!(agent.pos.x, 560.0);
        // next step would leave the log, so it walks back left instead
        agent.update(&platform, 2.0);
        assert_eq!(agent.pos.x, 512.0);
        assert!(!agent.step_right);
    }

    #[test]
    fn test_destroyed_after_lifetime() {
        let platform = log_at(512.0, 400.0);
        let mut agent = ExtraLifeAgent::new(&platform);
        for _ in 0..13 {
            agent.update(&platform, 1.0);
            assert!(!agent.is_destroyed());
        }
        agent.update(&platform, 1.0);
        assert!(agent.is_destroyed());
    }

    #[test]
    fn test_collect_destroys() {
        let platform = log_at(512.0, 400.0);
        let mut agent = ExtraLifeAgent::new(&platform);
        agent.collect();
        assert!(agent.is_destroyed());
    }
}
