//! Skier movement model
//!
//! Directional protocol events turn into facing/speed transitions here. The
//! Left/Right rules are deliberately two-way: an already-aligned skier takes
//! a lateral step without re-orienting, everything else turns first.

use crate::egi::protocol::StepDirection;

/// Skier standard speed in pixels per second
pub const SKIER_SPEED: f32 = 180.0;

/// Lateral nudge applied by a side step, in pixels
pub const SIDE_STEP_PX: f32 = 12.0;

/// Speed multiplier applied by the boost hook
pub const BOOST_FACTOR: f32 = 1.5;

/// Cycles of post-hit grace during which collisions are ignored
pub const HIT_GRACE_CYCLES: u32 = 30;

/// Skier facing. The `*Stepping` poses are the transient side-step states;
/// they count as facing the same compass point as their full turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    North,
    South,
    East,
    West,
    EastStepping,
    WestStepping,
}

impl Direction {
    pub fn is_west(self) -> bool {
        matches!(self, Self::West | Self::WestStepping)
    }

    pub fn is_east(self) -> bool {
        matches!(self, Self::East | Self::EastStepping)
    }

    /// Transient stepping poses settle back to the full facing each cycle
    pub fn settled(self) -> Self {
        match self {
            Self::WestStepping => Self::West,
            Self::EastStepping => Self::East,
            other => other,
        }
    }
}

/// The player entity
#[derive(Debug, Clone)]
pub struct Skier {
    pub x: f32,
    pub y: f32,
    pub direction: Direction,
    pub moving: bool,
    pub speed: f32,
    /// Cumulative downhill pixel displacement since the last reset
    travelled_px: f32,
    /// Remaining post-hit grace cycles
    grace: u32,
    /// Tricks performed (hook only, no protocol path feeds it)
    tricks: u32,
}

impl Skier {
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            direction: Direction::South,
            moving: false,
            speed: 0.0,
            travelled_px: 0.0,
            grace: 0,
            tricks: 0,
        }
    }

    /// Hitbox radius for collision checks
    pub fn hit_radius(&self) -> f32 {
        10.0
    }

    pub fn travelled_px(&self) -> f32 {
        self.travelled_px
    }

    pub fn in_grace(&self) -> bool {
        self.grace > 0
    }

    pub fn tricks(&self) -> u32 {
        self.tricks
    }

    /// Apply a directional event from the host
    pub fn apply_step(&mut self, direction: StepDirection) {
        match direction {
            StepDirection::Left => {
                if self.direction.is_west() {
                    // Already aligned: shuffle sideways, keep the facing
                    self.x -= SIDE_STEP_PX;
                    self.direction = Direction::WestStepping;
                } else {
                    self.direction = Direction::West;
                }
            }
            StepDirection::Right => {
                if self.direction.is_east() {
                    self.x += SIDE_STEP_PX;
                    self.direction = Direction::EastStepping;
                } else {
                    self.direction = Direction::East;
                }
            }
            StepDirection::Down => {
                self.direction = Direction::South;
                self.moving = true;
                if self.speed == 0.0 {
                    self.speed = SKIER_SPEED;
                }
            }
            StepDirection::Up => {
                self.moving = false;
                self.speed = 0.0;
            }
        }
    }

    /// Speed boost hook. Bound to a key in the excluded input layer; not
    /// reachable through the protocol.
    pub fn boost(&mut self) {
        if self.moving {
            self.speed = SKIER_SPEED * BOOST_FACTOR;
        }
    }

    /// Trick hook, same status as `boost`
    pub fn trick(&mut self) {
        if self.moving {
            self.tricks += 1;
        }
    }

    /// Stop and enter the post-hit grace period
    pub fn crash(&mut self) {
        self.moving = false;
        self.speed = 0.0;
        self.grace = HIT_GRACE_CYCLES;
    }

    /// Advance one cycle; returns the downhill pixels covered
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.direction = self.direction.settled();
        if self.grace > 0 {
            self.grace -= 1;
        }
        if !self.moving {
            return 0.0;
        }

        // Facing across the slope traverses at half speed without descending
        let (vx, vy) = match self.direction {
            Direction::South => (0.0, self.speed),
            Direction::West | Direction::WestStepping => (-self.speed * 0.5, 0.0),
            Direction::East | Direction::EastStepping => (self.speed * 0.5, 0.0),
            Direction::North => (0.0, 0.0),
        };

        self.x += vx * dt;
        let downhill = vy * dt;
        self.y += downhill;
        self.travelled_px += downhill;
        downhill
    }

    /// Return to the starting state at the reset position
    pub fn reset(&mut self, x: f32, y: f32) {
        *self = Self::new(x, y);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn left_turns_when_not_facing_west() {
        let mut skier = Skier::new(0.0, 0.0);
        let x_before = skier.x;
        skier.apply_step(StepDirection::Left);
        assert!(skier.direction.is_west());
        assert_eq!(skier.x, x_before, "a turn must not move the skier");
    }

    #[test]
    fn left_steps_when_already_facing_west() {
        let mut skier = Skier::new(0.0, 0.0);
        skier.apply_step(StepDirection::Left);
        let x_before = skier.x;
        skier.apply_step(StepDirection::Left);
        assert!(skier.direction.is_west(), "a step keeps the facing");
        assert_eq!(skier.x, x_before - SIDE_STEP_PX);
    }

    #[test]
    fn right_mirrors_the_left_rules() {
        let mut skier = Skier::new(0.0, 0.0);
        skier.apply_step(StepDirection::Right);
        assert!(skier.direction.is_east());
        assert_eq!(skier.x, 0.0);

        skier.apply_step(StepDirection::Right);
        assert_eq!(skier.x, SIDE_STEP_PX);
        assert!(skier.direction.is_east());
    }

    #[test]
    fn down_always_starts_southbound_motion() {
        let mut skier = Skier::new(0.0, 0.0);
        skier.apply_step(StepDirection::Left);
        skier.apply_step(StepDirection::Down);
        assert_eq!(skier.direction, Direction::South);
        assert!(skier.moving);
        assert_eq!(skier.speed, SKIER_SPEED);
    }

    #[test]
    fn up_always_stops() {
        let mut skier = Skier::new(0.0, 0.0);
        skier.apply_step(StepDirection::Down);
        skier.apply_step(StepDirection::Up);
        assert!(!skier.moving);
        assert_eq!(skier.speed, 0.0);
    }

    #[test]
    fn stepping_pose_settles_next_cycle() {
        let mut skier = Skier::new(0.0, 0.0);
        skier.apply_step(StepDirection::Left);
        skier.apply_step(StepDirection::Left);
        assert_eq!(skier.direction, Direction::WestStepping);
        skier.advance(1.0 / 30.0);
        assert_eq!(skier.direction, Direction::West);
    }

    #[test]
    fn only_southbound_motion_accrues_distance() {
        let mut skier = Skier::new(0.0, 0.0);
        skier.apply_step(StepDirection::Down);
        let downhill = skier.advance(1.0);
        assert_eq!(downhill, SKIER_SPEED);
        assert_eq!(skier.travelled_px(), SKIER_SPEED);

        skier.apply_step(StepDirection::Left);
        let traverse = skier.advance(1.0);
        assert_eq!(traverse, 0.0);
        assert_eq!(skier.travelled_px(), SKIER_SPEED);
    }

    #[test]
    fn crash_stops_and_grants_grace() {
        let mut skier = Skier::new(0.0, 0.0);
        skier.apply_step(StepDirection::Down);
        skier.crash();
        assert!(!skier.moving);
        assert!(skier.in_grace());
    }
}
