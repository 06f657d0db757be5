// Collision probing: ground, walls and ceiling corners

use super::config::ProbeConfig;
use crate::engine::physics::ShapeQuery;
use glam::Vec2;

/// Which wall the body is touching
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Left,
    Right,
}

impl WallSide {
    /// Unit x direction pointing away from the wall
    pub fn away(self) -> f32 {
        match self {
            WallSide::Left => 1.0,
            WallSide::Right => -1.0,
        }
    }
}

/// Per-tick collision results. Recomputed every fixed tick, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CollisionFlags {
    pub grounded: bool,
    pub touching_wall_left: bool,
    pub touching_wall_right: bool,
    /// A ceiling corner is clipping one side of the head. Reported only;
    /// nothing moves the body because of it.
    pub corner_correctable: bool,
}

impl CollisionFlags {
    /// Touching a wall on either side
    pub fn on_wall(&self) -> bool {
        self.touching_wall_left || self.touching_wall_right
    }

    /// The wall being touched; right wins when both sides touch
    pub fn wall_side(&self) -> Option<WallSide> {
        if self.touching_wall_right {
            Some(WallSide::Right)
        } else if self.touching_wall_left {
            Some(WallSide::Left)
        } else {
            None
        }
    }

    pub fn airborne(&self) -> bool {
        !self.grounded
    }
}

/// Issues the shape casts that answer the controller's collision questions
#[derive(Debug, Clone)]
pub struct CollisionProbe {
    config: ProbeConfig,
}

impl CollisionProbe {
    pub fn new(config: ProbeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Run every probe from the body center `position`
    pub fn probe(&self, query: &impl ShapeQuery, position: Vec2) -> CollisionFlags {
        CollisionFlags {
            grounded: self.is_grounded(query, position),
            touching_wall_left: self.is_touching_wall(query, position, WallSide::Left),
            touching_wall_right: self.is_touching_wall(query, position, WallSide::Right),
            corner_correctable: self.can_corner_correct(query, position),
        }
    }

    /// Box-cast straight down against the ground layer
    pub fn is_grounded(&self, query: &impl ShapeQuery, position: Vec2) -> bool {
        query.box_cast(
            position,
            self.config.ground_box_size,
            Vec2::NEG_Y,
            self.config.ground_cast_distance,
            self.config.ground_layer,
        )
    }

    /// Box-cast sideways against the wall layer
    pub fn is_touching_wall(&self, query: &impl ShapeQuery, position: Vec2, side: WallSide) -> bool {
        let direction = match side {
            WallSide::Left => Vec2::NEG_X,
            WallSide::Right => Vec2::X,
        };
        query.box_cast(
            position,
            self.config.wall_box_size,
            direction,
            self.config.wall_cast_distance,
            self.config.wall_layer,
        )
    }

    /// A side is correctable when its outer ray hits a corner while the inner
    /// ray on the same side is clear
    pub fn can_corner_correct(&self, query: &impl ShapeQuery, position: Vec2) -> bool {
        let edge = self.config.edge_raycast_offset;
        let inner = self.config.inner_raycast_offset;
        let mirror = Vec2::new(-1.0, 1.0);

        self.corner_side(query, position + edge, position + inner)
            || self.corner_side(query, position + edge * mirror, position + inner * mirror)
    }

    fn corner_side(&self, query: &impl ShapeQuery, outer: Vec2, inner: Vec2) -> bool {
        let length = self.config.top_raycast_length;
        let layer = self.config.corner_correct_layer;
        query.ray_cast(outer, Vec2::Y, length, layer) && !query.ray_cast(inner, Vec2::Y, length, layer)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use crate::engine::physics::{LayerMask, PhysicsWorld};
    use crate::game::movement::config::BASE_PROBE;

    /// Axis-aligned boxes standing in for level geometry
    #[derive(Debug, Default)]
    pub(crate) struct BoxLevel {
        boxes: Vec<(Vec2, Vec2, LayerMask)>,
    }

    impl BoxLevel {
        pub(crate) fn with_box(mut self, min: Vec2, max: Vec2, layer: LayerMask) -> Self {
            self.boxes.push((min, max, layer));
            self
        }

        fn overlaps(&self, min: Vec2, max: Vec2, layers: LayerMask) -> bool {
            self.boxes.iter().any(|(bmin, bmax, layer)| {
                layers.bits() & layer.bits() != 0
                    && min.x < bmax.x
                    && max.x > bmin.x
                    && min.y < bmax.y
                    && max.y > bmin.y
            })
        }
    }

    impl ShapeQuery for BoxLevel {
        fn box_cast(
            &self,
            origin: Vec2,
            size: Vec2,
            direction: Vec2,
            distance: f32,
            layers: LayerMask,
        ) -> bool {
            // Swept AABB of an axis-aligned cast
            let end = origin + direction.normalize_or_zero() * distance;
            let half = size / 2.0;
            self.overlaps(origin.min(end) - half, origin.max(end) + half, layers)
        }

        fn ray_cast(&self, origin: Vec2, direction: Vec2, length: f32, layers: LayerMask) -> bool {
            let end = origin + direction.normalize_or_zero() * length;
            let pad = Vec2::splat(1e-4);
            self.overlaps(origin.min(end) - pad, origin.max(end) + pad, layers)
        }
    }

    fn ground() -> LayerMask {
        BASE_PROBE.ground_layer
    }

    fn wall() -> LayerMask {
        BASE_PROBE.wall_layer
    }

    fn corner() -> LayerMask {
        BASE_PROBE.corner_correct_layer
    }

    #[test]
    fn test_grounded_on_floor() {
        let level = BoxLevel::default().with_box(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0), ground());
        let probe = CollisionProbe::new(BASE_PROBE);

        // Feet resting on the floor (body center one unit up)
        assert!(probe.probe(&level, Vec2::new(0.0, 1.0)).grounded);
        assert!(!probe.probe(&level, Vec2::new(0.0, 3.0)).grounded);
    }

    #[test]
    fn test_ground_check_ignores_walls() {
        let level = BoxLevel::default().with_box(Vec2::new(-10.0, -1.0), Vec2::new(10.0, 0.0), wall());
        let probe = CollisionProbe::new(BASE_PROBE);
        let flags = probe.probe(&level, Vec2::new(0.0, 1.0));
        assert!(!flags.grounded);
    }

    #[test]
    fn test_wall_sides() {
        let level = BoxLevel::default()
            .with_box(Vec2::new(0.52, -5.0), Vec2::new(1.5, 5.0), wall())
            .with_box(Vec2::new(-3.0, -5.0), Vec2::new(-2.0, 5.0), wall());
        let probe = CollisionProbe::new(BASE_PROBE);

        let flags = probe.probe(&level, Vec2::ZERO);
        assert!(flags.touching_wall_right);
        assert!(!flags.touching_wall_left);
        assert!(flags.on_wall());
        assert_eq!(flags.wall_side(), Some(WallSide::Right));

        let flags = probe.probe(&level, Vec2::new(-1.5, 0.0));
        assert!(flags.touching_wall_left);
        assert!(!flags.touching_wall_right);
        assert_eq!(flags.wall_side(), Some(WallSide::Left));
    }

    #[test]
    fn test_both_walls_prefers_right() {
        let flags = CollisionFlags {
            touching_wall_left: true,
            touching_wall_right: true,
            ..CollisionFlags::default()
        };
        assert_eq!(flags.wall_side(), Some(WallSide::Right));
        assert_eq!(WallSide::Right.away(), -1.0);
        assert_eq!(WallSide::Left.away(), 1.0);
    }

    #[test]
    fn test_corner_correctable_only_on_edge() {
        let probe = CollisionProbe::new(BASE_PROBE);

        // Ledge overhangs only the right edge of the head
        let edge_only = BoxLevel::default().with_box(Vec2::new(0.4, 1.2), Vec2::new(2.0, 2.0), corner());
        assert!(probe.probe(&edge_only, Vec2::ZERO).corner_correctable);

        // Mirrored on the left
        let left_edge = BoxLevel::default().with_box(Vec2::new(-2.0, 1.2), Vec2::new(-0.4, 2.0), corner());
        assert!(probe.probe(&left_edge, Vec2::ZERO).corner_correctable);

        // Flat ceiling blocks the inner rays too
        let ceiling = BoxLevel::default().with_box(Vec2::new(-2.0, 1.2), Vec2::new(2.0, 2.0), corner());
        assert!(!probe.probe(&ceiling, Vec2::ZERO).corner_correctable);

        // Open sky
        assert!(!probe.probe(&BoxLevel::default(), Vec2::ZERO).corner_correctable);
    }

    #[test]
    fn test_collision_flags_against_rapier_world() {
        let mut world = PhysicsWorld::new();
        let floor = world.add_rigid_body(presets::level_body(0.0, -0.5));
        world.add_collider(presets::ground_collider(20.0, 1.0), floor);
        let wall_body = world.add_rigid_body(presets::level_body(0.55, 3.0));
        world.add_collider(presets::wall_collider(0.1, 6.0), wall_body);
        world.refresh_queries();

        let probe = CollisionProbe::new(BASE_PROBE);
        let flags = probe.probe(&world, Vec2::new(0.0, 1.0));
        assert!(flags.grounded);
        assert!(flags.touching_wall_right);
        assert!(!flags.touching_wall_left);
        assert!(!flags.corner_correctable);

        let flags = probe.probe(&world, Vec2::new(-5.0, 4.0));
        assert_eq!(flags, CollisionFlags::default());
    }
}
