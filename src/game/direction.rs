/// Direction the snake can move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

/// The axis a direction moves along
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Direction {
    /// Returns the delta (dx, dy) for moving in this direction.
    /// y grows downwards, matching screen rows.
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    pub fn axis(&self) -> Axis {
        match self {
            Direction::Left | Direction::Right => Axis::Horizontal,
            Direction::Up | Direction::Down => Axis::Vertical,
        }
    }
}

/// Arbitrates direction changes between ticks.
///
/// Requests may arrive at any time, but only land in `pending`. The engine
/// calls [`DirectionController::commit`] exactly once per tick, which is the
/// only place `current` changes. A turn requested between two ticks therefore
/// applies once, on the next tick.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectionController {
    current: Direction,
    pending: Direction,
}

impl DirectionController {
    pub fn new(initial: Direction) -> Self {
        Self {
            current: initial,
            pending: initial,
        }
    }

    /// Direction used by the most recent tick
    pub fn current(&self) -> Direction {
        self.current
    }

    /// Direction the next tick will use
    pub fn pending(&self) -> Direction {
        self.pending
    }

    /// Request a turn for the next tick.
    ///
    /// Accepted only when the candidate moves along the other axis than
    /// `current`, which rules out both repeats and reversals. Returns whether
    /// the request was accepted; rejected requests are dropped. The latest
    /// accepted request before a tick wins.
    pub fn request(&mut self, candidate: Direction) -> bool {
        if candidate.axis() == self.current.axis() {
            return false;
        }
        self.pending = candidate;
        true
    }

    /// Promote the pending direction and return it
    pub fn commit(&mut self) -> Direction {
        self.current = self.pending;
        self.current
    }

    /// Forget any pending turn and face `direction`
    pub fn reset(&mut self, direction: Direction) {
        self.current = direction;
        self.pending = direction;
    }
}

impl Default for DirectionController {
    fn default() -> Self {
        Self::new(Direction::Right)
    }
}
