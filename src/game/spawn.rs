//! Probabilistic entity spawning
//!
//! Each obstacle category gets one independent Bernoulli trial per cycle;
//! categories are never mutually exclusive. Wider viewports lower the
//! per-cycle probability through the rate modifier.

use rand::Rng;
use rand_chacha::ChaCha8Rng;

use super::entity::{Entity, EntityKind};
use super::movement::{Skier, SKIER_SPEED};
use super::Viewport;

/// Snowboarder traversal speed in pixels per second
pub const SNOWBOARDER_SPEED: f32 = 220.0;

/// Distance (in distance units) the skier must cover before monsters appear
pub const MONSTER_DISTANCE_GATE: f64 = 2000.0;

/// Drop-rate table and NPC trial probabilities
#[derive(Debug, Clone)]
pub struct SpawnConfig {
    /// Relative drop-rate weight per static obstacle category
    pub drop_weights: Vec<(EntityKind, u32)>,
    /// Per-cycle snowboarder trial probability
    pub snowboarder_rate: f64,
    /// Per-cycle monster trial probability (only past the distance gate)
    pub monster_rate: f64,
    pub monster_distance_gate: f64,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            drop_weights: vec![
                (EntityKind::Tree, 4),
                (EntityKind::Rock, 2),
                (EntityKind::Stump, 2),
                (EntityKind::Sign, 1),
            ],
            snowboarder_rate: 0.1,
            monster_rate: 0.001,
            monster_distance_gate: MONSTER_DISTANCE_GATE,
        }
    }
}

/// Viewport-width-dependent spawn damping: `max(800 - width, 0)`
pub fn rate_modifier(viewport_width: u32) -> u32 {
    800u32.saturating_sub(viewport_width)
}

/// Per-cycle drop probability for a category weight
pub fn drop_probability(weight: u32, modifier: u32) -> f64 {
    weight as f64 / (1000 + modifier) as f64
}

/// Runs the spawn half of the cycle
pub struct SpawnEngine {
    config: SpawnConfig,
    viewport: Viewport,
}

impl SpawnEngine {
    pub fn new(config: SpawnConfig, viewport: Viewport) -> Self {
        Self { config, viewport }
    }

    /// Draw all spawn trials for one cycle and append the successes.
    /// The camera is centered on the skier; obstacles land below the view,
    /// snowboarders and monsters enter from above it.
    pub fn run_cycle(
        &self,
        rng: &mut ChaCha8Rng,
        skier: &Skier,
        distance_units: f64,
        entities: &mut Vec<Entity>,
    ) {
        let view = self.viewport;
        let left = view.left(skier.x);
        let right = view.right(skier.x);
        let top = view.top(skier.y);
        let bottom = view.bottom(skier.y);

        let modifier = rate_modifier(view.width);
        for &(kind, weight) in &self.config.drop_weights {
            if rng.gen_bool(drop_probability(weight, modifier)) {
                let x = rng.gen_range(left..right);
                let y = rng.gen_range(bottom + 16.0..bottom + view.height as f32 * 0.5);
                entities.push(Entity::obstacle(kind, x, y));
            }
        }

        if rng.gen_bool(self.config.snowboarder_rate) {
            let x = rng.gen_range(left..right);
            let target = (rng.gen_range(left..right), bottom + view.height as f32);
            entities.push(Entity::snowboarder(x, top - 48.0, target, SNOWBOARDER_SPEED));
        }

        if distance_units > self.config.monster_distance_gate
            && rng.gen_bool(self.config.monster_rate)
        {
            let x = rng.gen_range(left..right);
            entities.push(Entity::monster(x, top - 64.0, SKIER_SPEED));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn engine(config: SpawnConfig) -> SpawnEngine {
        SpawnEngine::new(
            config,
            Viewport {
                width: 800,
                height: 600,
            },
        )
    }

    #[test]
    fn rate_modifier_only_dampens_narrow_viewports() {
        assert_eq!(rate_modifier(800), 0);
        assert_eq!(rate_modifier(1920), 0);
        assert_eq!(rate_modifier(600), 200);
    }

    #[test]
    fn drop_probability_matches_the_formula() {
        assert_eq!(drop_probability(4, 0), 4.0 / 1000.0);
        assert_eq!(drop_probability(4, 200), 4.0 / 1200.0);
    }

    #[test]
    fn obstacle_spawns_converge_on_the_drop_rate() {
        let config = SpawnConfig {
            drop_weights: vec![(EntityKind::Tree, 4)],
            snowboarder_rate: 0.0,
            monster_rate: 0.0,
            ..SpawnConfig::default()
        };
        let engine = engine(config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let skier = Skier::new(0.0, 0.0);

        let cycles = 50_000;
        let mut entities = Vec::new();
        for _ in 0..cycles {
            engine.run_cycle(&mut rng, &skier, 0.0, &mut entities);
        }

        // Expectation is cycles * 4/1000 = 200; allow a wide statistical band
        let count = entities.len() as f64;
        assert!((140.0..260.0).contains(&count), "observed {count} spawns");
        assert!(entities.iter().all(|e| e.kind == EntityKind::Tree));
        // Obstacles land below the viewport
        assert!(entities.iter().all(|e| e.y >= 300.0 + 16.0));
    }

    #[test]
    fn no_monster_spawns_before_the_distance_gate() {
        let config = SpawnConfig {
            drop_weights: vec![],
            snowboarder_rate: 0.0,
            monster_rate: 1.0,
            ..SpawnConfig::default()
        };
        let engine = engine(config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let skier = Skier::new(0.0, 0.0);

        let mut entities = Vec::new();
        for _ in 0..10_000 {
            engine.run_cycle(&mut rng, &skier, 1999.9, &mut entities);
        }
        assert!(entities.is_empty());

        engine.run_cycle(&mut rng, &skier, 2000.1, &mut entities);
        assert_eq!(entities.len(), 1);
        assert_eq!(entities[0].kind, EntityKind::Monster);
        // Monsters enter from above the viewport and chase immediately
        assert!(entities[0].y < -300.0);
        assert!(entities[0].following);
        assert_eq!(entities[0].speed, SKIER_SPEED);
    }

    #[test]
    fn snowboarders_traverse_from_above_to_below() {
        let config = SpawnConfig {
            drop_weights: vec![],
            snowboarder_rate: 1.0,
            monster_rate: 0.0,
            ..SpawnConfig::default()
        };
        let engine = engine(config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let skier = Skier::new(0.0, 0.0);

        let mut entities = Vec::new();
        engine.run_cycle(&mut rng, &skier, 0.0, &mut entities);
        assert_eq!(entities.len(), 1);
        let boarder = &entities[0];
        assert!(boarder.y < -300.0, "spawns above the viewport");
        let (_, target_y) = boarder.target.unwrap();
        assert!(target_y > 300.0, "targets a point below the viewport");
    }

    #[test]
    fn category_trials_are_independent() {
        // With every weight forced to certainty, all categories spawn in the
        // same cycle; successes are not mutually exclusive.
        let config = SpawnConfig {
            drop_weights: vec![
                (EntityKind::Tree, 1000),
                (EntityKind::Rock, 1000),
                (EntityKind::Sign, 1000),
            ],
            snowboarder_rate: 0.0,
            monster_rate: 0.0,
            ..SpawnConfig::default()
        };
        let engine = engine(config);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let skier = Skier::new(0.0, 0.0);

        let mut entities = Vec::new();
        engine.run_cycle(&mut rng, &skier, 0.0, &mut entities);
        assert_eq!(entities.len(), 3);
    }
}
