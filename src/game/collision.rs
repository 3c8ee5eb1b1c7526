//! Collision resolution between the skier and everything else
//!
//! Hit behavior is keyed by entity category. A monster that catches the
//! skier is recycled, never destroyed: it is marked full, stops chasing,
//! inherits the skier's speed and is relocated above the viewport.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use tracing::debug;
use uuid::Uuid;

use super::entity::{Entity, EntityKind};
use super::movement::Skier;
use super::Viewport;

/// Collision capability per entity category
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HitBehavior {
    MonsterEatsPlayer,
    NpcHitsPlayer,
    ObstacleHitsPlayer,
}

pub fn behavior_for(kind: EntityKind) -> HitBehavior {
    match kind {
        EntityKind::Monster => HitBehavior::MonsterEatsPlayer,
        EntityKind::Snowboarder => HitBehavior::NpcHitsPlayer,
        EntityKind::Tree | EntityKind::Rock | EntityKind::Stump | EntityKind::Sign => {
            HitBehavior::ObstacleHitsPlayer
        }
    }
}

/// Outcome of one resolved overlap, consumed by the lifecycle tracker
#[derive(Debug, Clone)]
pub enum CollisionEvent {
    MonsterAteSkier { monster_id: Uuid },
    SnowboarderHitSkier { boarder_id: Uuid },
    ObstacleHitSkier { kind: EntityKind },
}

/// Check every entity against the skier and apply hit behaviors.
/// Entities spawned earlier in the same cycle are eligible.
pub fn resolve(
    skier: &mut Skier,
    entities: &mut [Entity],
    rng: &mut ChaCha8Rng,
    viewport: Viewport,
) -> Vec<CollisionEvent> {
    let mut events = Vec::new();

    for entity in entities.iter_mut() {
        // The grace window also ends the sweep after the first crash
        if skier.in_grace() {
            break;
        }
        if !entity.overlaps(skier.x, skier.y, skier.hit_radius()) {
            continue;
        }

        match behavior_for(entity.kind) {
            HitBehavior::MonsterEatsPlayer => {
                if entity.full {
                    continue;
                }
                // The monster keeps the pace the skier had when caught
                let caught_speed = skier.speed;
                skier.crash();

                entity.full = true;
                entity.following = false;
                entity.speed = caught_speed;
                entity.target = None;
                entity.x = rng.gen_range(viewport.left(skier.x)..viewport.right(skier.x));
                entity.y =
                    viewport.top(skier.y) - rng.gen_range(32.0..viewport.height as f32 * 0.5);

                debug!(monster_id = %entity.id, "Monster ate the skier, recycling it");
                events.push(CollisionEvent::MonsterAteSkier {
                    monster_id: entity.id,
                });
            }
            HitBehavior::NpcHitsPlayer => {
                skier.crash();
                debug!(boarder_id = %entity.id, "Snowboarder ran into the skier");
                events.push(CollisionEvent::SnowboarderHitSkier {
                    boarder_id: entity.id,
                });
            }
            HitBehavior::ObstacleHitsPlayer => {
                skier.crash();
                debug!(kind = ?entity.kind, "Skier hit an obstacle");
                events.push(CollisionEvent::ObstacleHitSkier { kind: entity.kind });
            }
        }
    }

    events
}
