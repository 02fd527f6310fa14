use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitAnd, BitOr};

/// Bit flags describing what a physics body is, what it bounces off,
/// and which overlaps it wants to be told about.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CollisionCategory(u32);

impl CollisionCategory {
    pub const NONE: Self = Self(0);
    pub const BOARD: Self = Self(1 << 0);
    pub const WALL: Self = Self(1 << 1);
    pub const BALL: Self = Self(1 << 2);
    pub const PADDLE: Self = Self(1 << 3);
    pub const ALL: Self = Self(u32::MAX);

    const NAMED: [(Self, &'static str); 4] = [
        (Self::BOARD, "board"),
        (Self::WALL, "wall"),
        (Self::BALL, "ball"),
        (Self::PADDLE, "paddle"),
    ];

    pub const fn bits(self) -> u32 {
        self.0
    }

    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    pub const fn intersection(self, other: Self) -> Self {
        Self(self.0 & other.0)
    }

    /// True when every flag of `other` is set in `self`.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True when `self` and `other` share at least one flag.
    pub const fn intersects(self, other: Self) -> bool {
        self.0 & other.0 != 0
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for CollisionCategory {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        self.union(rhs)
    }
}

impl BitAnd for CollisionCategory {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        self.intersection(rhs)
    }
}

impl fmt::Debug for CollisionCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::ALL {
            return f.write_str("ALL");
        }
        let names: Vec<&str> = Self::NAMED
            .iter()
            .filter(|(flag, _)| self.contains(*flag))
            .map(|(_, name)| *name)
            .collect();
        if names.is_empty() {
            write!(f, "NONE({:#x})", self.0)
        } else {
            f.write_str(&names.join("|"))
        }
    }
}

/// The three independent masks carried by every physics body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyMasks {
    pub category: CollisionCategory,
    pub collides_with: CollisionCategory,
    pub contact_test: CollisionCategory,
}

impl BodyMasks {
    pub fn paddle() -> Self {
        Self {
            category: CollisionCategory::PADDLE,
            collides_with: CollisionCategory::BALL | CollisionCategory::WALL,
            contact_test: CollisionCategory::NONE,
        }
    }

    pub fn ball() -> Self {
        Self {
            category: CollisionCategory::BALL,
            collides_with: CollisionCategory::WALL | CollisionCategory::PADDLE,
            contact_test: CollisionCategory::BOARD,
        }
    }

    /// Walls keep the engine defaults apart from their category.
    pub fn wall() -> Self {
        Self {
            category: CollisionCategory::WALL,
            collides_with: CollisionCategory::ALL,
            contact_test: CollisionCategory::NONE,
        }
    }

    pub fn board() -> Self {
        Self {
            category: CollisionCategory::BOARD,
            collides_with: CollisionCategory::NONE,
            contact_test: CollisionCategory::NONE,
        }
    }

    /// Whether `self` bounces off a body of `other`'s category.
    pub fn collides(&self, other: &BodyMasks) -> bool {
        self.collides_with.intersects(other.category)
    }

    /// Whether an overlap between the two bodies raises contact events.
    /// Either side asking for the other's category is enough.
    pub fn reports_contact(&self, other: &BodyMasks) -> bool {
        self.contact_test.intersects(other.category) || other.contact_test.intersects(self.category)
    }
}
