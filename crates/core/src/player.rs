//! Player position and movement.

use crate::types::Position;
use crate::world::World;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Player {
    pub x: i32,
    pub y: i32,
}

impl Player {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn position(&self) -> Position {
        Position::new(self.x, self.y)
    }

    /// Step by (dx, dy) if the destination is walkable.
    ///
    /// Returns false and leaves the position untouched otherwise.
    pub fn try_move(&mut self, dx: i32, dy: i32, world: &World) -> bool {
        let next = self.position().offset(dx, dy);
        if !world.is_walkable(next.x, next.y) {
            return false;
        }
        self.x = next.x;
        self.y = next.y;
        true
    }
}
