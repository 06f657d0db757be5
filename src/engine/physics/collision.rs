use rapier2d::prelude::*;

/// Collision layers for filtering what colliders a query or a body sees
///
/// Level geometry is split by role so the movement probes can ask separate
/// questions of the same world: "is there floor below", "is there a wall
/// beside", "is there a ledge corner above".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollisionLayer {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player characters
    Player = 0b0000_0010,

    /// Walkable floors and platforms
    Ground = 0b0000_0100,

    /// Vertical surfaces the player can slide on and jump from
    Wall = 0b0000_1000,

    /// Geometry that ceiling corner checks should report
    CornerAssist = 0b0001_0000,
}

impl CollisionLayer {
    /// Bit for this layer
    pub const fn bits(self) -> u32 {
        self as u32
    }

    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self.bits());

        let filter = match self {
            // Players collide with level geometry but not with each other
            CollisionLayer::Player => Group::from_bits_truncate(LayerMask::LEVEL.bits()),

            // Level geometry collides with players and other geometry
            CollisionLayer::Ground | CollisionLayer::Wall | CollisionLayer::CornerAssist => {
                Group::from_bits_truncate(
                    CollisionLayer::Default.bits()
                        | CollisionLayer::Player.bits()
                        | LayerMask::LEVEL.bits(),
                )
            }

            CollisionLayer::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// A set of collision layers, used as the target of a shape or ray query
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct LayerMask(u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);

    /// Every layer that makes up level geometry
    pub const LEVEL: LayerMask = LayerMask(
        CollisionLayer::Ground.bits() | CollisionLayer::Wall.bits() | CollisionLayer::CornerAssist.bits(),
    );

    /// Mask containing a single layer
    pub const fn from_layer(layer: CollisionLayer) -> Self {
        Self(layer.bits())
    }

    /// Mask from raw bits
    pub const fn from_bits(bits: u32) -> Self {
        Self(bits)
    }

    /// Add another layer to the mask
    pub const fn with(self, layer: CollisionLayer) -> Self {
        Self(self.0 | layer.bits())
    }

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub const fn contains(self, layer: CollisionLayer) -> bool {
        self.0 & layer.bits() != 0
    }

    /// Query filter that only reports colliders belonging to this mask
    pub fn query_filter(self) -> QueryFilter<'static> {
        QueryFilter::new().groups(InteractionGroups::new(
            Group::ALL,
            Group::from_bits_truncate(self.0),
        ))
    }
}

impl From<CollisionLayer> for LayerMask {
    fn from(layer: CollisionLayer) -> Self {
        Self::from_layer(layer)
    }
}
