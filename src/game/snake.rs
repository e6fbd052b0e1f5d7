use std::collections::VecDeque;

use super::direction::Direction;
use super::grid::Cell;

/// The snake's body, head at the front
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Cell>,
}

impl Snake {
    /// Create a snake of `length` cells with its head at `head`, laid out
    /// behind the head so that it is facing `heading`
    pub fn new(head: Cell, heading: Direction, length: usize) -> Self {
        let (dx, dy) = heading.delta();
        let mut body = VecDeque::with_capacity(length.max(1));
        body.push_back(head);

        for _ in 1..length {
            let last = body[body.len() - 1];
            body.push_back(last.moved_by(-dx, -dy));
        }

        Self { body }
    }

    /// Build a snake from explicit cells, head first. Returns `None` when empty.
    pub fn from_cells<I: IntoIterator<Item = Cell>>(cells: I) -> Option<Self> {
        let body: VecDeque<Cell> = cells.into_iter().collect();
        if body.is_empty() {
            return None;
        }
        Some(Self { body })
    }

    pub fn head(&self) -> Cell {
        self.body[0]
    }

    pub fn tail(&self) -> Cell {
        self.body[self.body.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake has at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Body cells, head first
    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.body.iter()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    /// Would moving the head onto `cell` hit the body?
    ///
    /// When not eating, the tail leaves its cell on the same tick the head
    /// arrives, so the tail does not count. When eating the tail stays put
    /// and does.
    pub fn collides(&self, cell: Cell, will_eat: bool) -> bool {
        let checked = if will_eat {
            self.body.len()
        } else {
            self.body.len() - 1
        };
        self.body.iter().take(checked).any(|segment| *segment == cell)
    }

    /// Push a new head; keep the tail only when growing
    pub fn advance(&mut self, new_head: Cell, grow: bool) {
        self.body.push_front(new_head);

        if !grow {
            self.body.pop_back();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(5, 5));
        assert_eq!(snake.tail(), Cell::new(3, 5));
        assert!(snake.contains(Cell::new(4, 5)));
    }

    #[test]
    fn test_single_cell_snake() {
        let snake = Snake::new(Cell::new(2, 2), Direction::Right, 1);
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), snake.tail());
        assert!(!snake.is_empty());
    }

    #[test]
    fn test_from_cells() {
        assert!(Snake::from_cells(Vec::<Cell>::new()).is_none());

        let snake = Snake::from_cells([Cell::new(0, 0), Cell::new(0, 1)]).unwrap();
        assert_eq!(snake.head(), Cell::new(0, 0));
        assert_eq!(snake.tail(), Cell::new(0, 1));
    }

    #[test]
    fn test_snake_advance() {
        let mut snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);

        snake.advance(Cell::new(6, 5), false);
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), Cell::new(6, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));

        snake.advance(Cell::new(7, 5), true);
        assert_eq!(snake.len(), 4);
        assert_eq!(snake.head(), Cell::new(7, 5));
        assert_eq!(snake.tail(), Cell::new(4, 5));
    }

    #[test]
    fn test_tail_counts_only_when_eating() {
        let snake = Snake::new(Cell::new(5, 5), Direction::Right, 3);
        let tail = snake.tail();

        assert!(!snake.collides(tail, false));
        assert!(snake.collides(tail, true));
        assert!(snake.collides(Cell::new(4, 5), false));
        assert!(!snake.collides(Cell::new(9, 9), true));
    }

    #[test]
    fn test_single_cell_never_collides_when_moving() {
        let snake = Snake::new(Cell::new(2, 2), Direction::Right, 1);
        assert!(!snake.collides(Cell::new(3, 2), false));
        assert!(!snake.collides(Cell::new(3, 2), true));
    }
}
