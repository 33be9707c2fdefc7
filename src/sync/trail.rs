use std::collections::VecDeque;

use crate::schema::Vector3;

pub const CAPACITY: usize = 50;

/// Most recent positions of one object, oldest first.
#[derive(Debug, Clone)]
pub struct TrailBuffer {
    positions: VecDeque<Vector3>,
    capacity: usize,
}

impl Default for TrailBuffer {
    fn default() -> Self {
        Self::with_capacity(CAPACITY)
    }
}

impl TrailBuffer {
    /// A zero capacity is raised to one.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            positions: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn append(&mut self, position: Vector3) {
        self.positions.push_back(position);
        while self.positions.len() > self.capacity {
            self.positions.pop_front();
        }
    }

    pub fn snapshot(&self) -> Vec<Vector3> {
        self.positions.iter().copied().collect()
    }

    #[allow(dead_code)]
    pub fn iter(&self) -> impl Iterator<Item = &Vector3> {
        self.positions.iter()
    }

    #[allow(dead_code)]
    pub fn latest(&self) -> Option<&Vector3> {
        self.positions.back()
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    #[allow(dead_code)]
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
