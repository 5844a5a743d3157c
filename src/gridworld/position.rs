//! Grid coordinates and movement actions

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// A cell on the grid. `y = 0` is the top row and `y` grows downwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: usize,
    pub y: usize,
}

impl Position {
    pub const fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Neighbouring cell in the direction of `action`.
    ///
    /// Returns `None` when the move would leave the non-negative quadrant; the
    /// upper bounds are checked by the environment, which knows the grid size.
    pub fn moved(self, action: Action) -> Option<Position> {
        let Position { x, y } = self;
        match action {
            Action::Up => y.checked_sub(1).map(|y| Position { x, y }),
            Action::Right => Some(Position { x: x + 1, y }),
            Action::Down => Some(Position { x, y: y + 1 }),
            Action::Left => x.checked_sub(1).map(|x| Position { x, y }),
        }
    }

    /// Manhattan distance between two cells
    pub fn manhattan(self, other: Position) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(usize, usize)> for Position {
    fn from((x, y): (usize, usize)) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// One of the four compass moves. The discriminant is the action index used
/// by value tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up = 0,
    Right = 1,
    Down = 2,
    Left = 3,
}

impl Action {
    /// All actions in index order
    pub const ALL: [Action; 4] = [Action::Up, Action::Right, Action::Down, Action::Left];

    /// Number of distinct actions
    pub const COUNT: usize = 4;

    pub fn index(self) -> usize {
        self as usize
    }

    /// Arrow used by policy maps
    pub fn arrow(self) -> char {
        match self {
            Action::Up => '^',
            Action::Right => '>',
            Action::Down => 'v',
            Action::Left => '<',
        }
    }
}

impl TryFrom<usize> for Action {
    type Error = Error;

    fn try_from(action: usize) -> Result<Self> {
        Action::ALL
            .get(action)
            .copied()
            .ok_or(Error::InvalidAction { action })
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Up => "up",
            Action::Right => "right",
            Action::Down => "down",
            Action::Left => "left",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_index_roundtrip() {
        for action in Action::ALL {
            assert_eq!(Action::try_from(action.index()).unwrap(), action);
        }
    }

    #[test]
    fn test_unknown_action_rejected() {
        assert!(matches!(
            Action::try_from(4),
            Err(Error::InvalidAction { action: 4 })
        ));
    }

    #[test]
    fn test_moved_at_origin() {
        let origin = Position::new(0, 0);
        assert_eq!(origin.moved(Action::Up), None);
        assert_eq!(origin.moved(Action::Left), None);
        assert_eq!(origin.moved(Action::Right), Some(Position::new(1, 0)));
        assert_eq!(origin.moved(Action::Down), Some(Position::new(0, 1)));
    }

    #[test]
    fn test_manhattan() {
        assert_eq!(Position::new(0, 0).manhattan(Position::new(2, 2)), 4);
        assert_eq!(Position::new(3, 1).manhattan(Position::new(1, 4)), 5);
    }
}
