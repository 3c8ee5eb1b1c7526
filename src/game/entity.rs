//! Non-player entities on the slope

use uuid::Uuid;

/// Entity category tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// Chases the skier once awake, recycled rather than despawned
    Monster,
    /// Traverses the viewport top-to-bottom toward a target position
    Snowboarder,
    Tree,
    Rock,
    Stump,
    Sign,
}

impl EntityKind {
    /// Static obstacles never move and are spawned from the drop-rate table
    pub fn is_static(self) -> bool {
        matches!(self, Self::Tree | Self::Rock | Self::Stump | Self::Sign)
    }

    /// Overlap radius used for collision checks
    pub fn hit_radius(self) -> f32 {
        match self {
            Self::Monster => 12.0,
            Self::Snowboarder => 10.0,
            Self::Tree => 10.0,
            Self::Rock => 8.0,
            Self::Stump => 6.0,
            Self::Sign => 8.0,
        }
    }
}

/// A moving or static object with a map position
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: Uuid,
    pub kind: EntityKind,
    pub x: f32,
    pub y: f32,
    /// Movement speed in pixels per second (0 for static obstacles)
    pub speed: f32,
    /// Traversal target for snowboarders (and a recycled monster's park spot)
    pub target: Option<(f32, f32)>,
    /// Monster chase flag; cleared once it has eaten
    pub following: bool,
    /// Monster satiation flag
    pub full: bool,
    /// Traverser finished its run and can be culled
    pub reached_target: bool,
}

impl Entity {
    pub fn obstacle(kind: EntityKind, x: f32, y: f32) -> Self {
        debug_assert!(kind.is_static());
        Self {
            id: Uuid::new_v4(),
            kind,
            x,
            y,
            speed: 0.0,
            target: None,
            following: false,
            full: false,
            reached_target: false,
        }
    }

    pub fn snowboarder(x: f32, y: f32, target: (f32, f32), speed: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: EntityKind::Snowboarder,
            x,
            y,
            speed,
            target: Some(target),
            following: false,
            full: false,
            reached_target: false,
        }
    }

    pub fn monster(x: f32, y: f32, speed: f32) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind: EntityKind::Monster,
            x,
            y,
            speed,
            target: None,
            following: true,
            full: false,
            reached_target: false,
        }
    }

    /// Advance one cycle. Followers home in on the skier, traversers move
    /// toward their target; static obstacles stay put.
    pub fn advance(&mut self, dt: f32, skier_x: f32, skier_y: f32) {
        if self.following {
            self.step_toward(skier_x, skier_y, dt);
        } else if let Some((tx, ty)) = self.target {
            self.step_toward(tx, ty, dt);
            let dx = tx - self.x;
            let dy = ty - self.y;
            if dx * dx + dy * dy < 4.0 {
                self.reached_target = true;
            }
        }
    }

    /// Check overlap with a circle (the skier's hitbox)
    pub fn overlaps(&self, x: f32, y: f32, radius: f32) -> bool {
        let dx = self.x - x;
        let dy = self.y - y;
        let combined = self.kind.hit_radius() + radius;
        dx * dx + dy * dy <= combined * combined
    }

    fn step_toward(&mut self, tx: f32, ty: f32, dt: f32) {
        let dx = tx - self.x;
        let dy = ty - self.y;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist < 0.001 {
            return;
        }
        let step = (self.speed * dt).min(dist);
        self.x += dx / dist * step;
        self.y += dy / dist * step;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn followers_close_in_on_the_skier() {
        let mut monster = Entity::monster(0.0, 0.0, 100.0);
        let before = (monster.x, monster.y);
        monster.advance(0.1, 100.0, 0.0);
        assert!(monster.x > before.0);
        assert_eq!(monster.y, before.1);
    }

    #[test]
    fn traversers_flag_arrival() {
        let mut boarder = Entity::snowboarder(0.0, 0.0, (0.0, 5.0), 100.0);
        boarder.advance(0.1, 999.0, 999.0);
        assert!(boarder.reached_target);
        // Never overshoots the target
        assert!((boarder.y - 5.0).abs() < 0.01);
    }

    #[test]
    fn static_obstacles_never_move() {
        let mut tree = Entity::obstacle(EntityKind::Tree, 5.0, 5.0);
        tree.advance(1.0, 0.0, 0.0);
        assert_eq!((tree.x, tree.y), (5.0, 5.0));
    }
}
