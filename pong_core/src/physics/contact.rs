use crate::category::CollisionCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactPhase {
    Begin,
    End,
}

/// One contact notification between two bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContactEvent {
    pub category_a: CollisionCategory,
    pub category_b: CollisionCategory,
    pub contact_x: f32,
    pub phase: ContactPhase,
}

impl ContactEvent {
    pub fn new(
        category_a: CollisionCategory,
        category_b: CollisionCategory,
        contact_x: f32,
        phase: ContactPhase,
    ) -> Self {
        Self {
            category_a,
            category_b,
            contact_x,
            phase,
        }
    }

    /// True when the pair is exactly `first` and `second`, in either order.
    pub fn is_pair(&self, first: CollisionCategory, second: CollisionCategory) -> bool {
        (self.category_a.contains(first) && self.category_b.contains(second))
            || (self.category_a.contains(second) && self.category_b.contains(first))
    }
}

/// Ordered contact notifications for a single frame.
#[derive(Debug, Clone, Default)]
pub struct ContactQueue {
    pub events: Vec<ContactEvent>,
}

impl ContactQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, event: ContactEvent) {
        self.events.push(event);
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    /// Take every queued event, oldest first.
    pub fn drain(&mut self) -> std::vec::Drain<'_, ContactEvent> {
        self.events.drain(..)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_pair_order_independent() {
        let ab = ContactEvent::new(
            CollisionCategory::BALL,
            CollisionCategory::BOARD,
            0.0,
            ContactPhase::End,
        );
        let ba = ContactEvent::new(
            CollisionCategory::BOARD,
            CollisionCategory::BALL,
            0.0,
            ContactPhase::End,
        );
        assert!(ab.is_pair(CollisionCategory::BALL, CollisionCategory::BOARD));
        assert!(ba.is_pair(CollisionCategory::BALL, CollisionCategory::BOARD));
        assert!(!ab.is_pair(CollisionCategory::BALL, CollisionCategory::WALL));
    }

    #[test]
    fn test_drain_preserves_order() {
        let mut queue = ContactQueue::new();
        for x in [1.0, 2.0, 3.0] {
            queue.push(ContactEvent::new(
                CollisionCategory::BALL,
                CollisionCategory::WALL,
                x,
                ContactPhase::Begin,
            ));
        }
        let xs: Vec<f32> = queue.drain().map(|e| e.contact_x).collect();
        assert_eq!(xs, vec![1.0, 2.0, 3.0]);
        assert!(queue.is_empty());
    }
}
