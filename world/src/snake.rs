use std::collections::{HashSet, VecDeque};

use snake_core::{CellCoord, Direction};

/// Ordered body segments with the head at the front.
///
/// The snake never validates its own moves. Bounds and self-collision checks
/// belong to the world, which only commits a head once both pass.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Snake {
    segments: VecDeque<CellCoord>,
}

impl Snake {
    /// Creates a single-segment snake.
    #[must_use]
    pub fn new(head: CellCoord) -> Self {
        Self {
            segments: VecDeque::from([head]),
        }
    }

    /// Creates a snake from head-first cells, or `None` when no cell is given.
    #[must_use]
    pub fn from_cells<I>(cells: I) -> Option<Self>
    where
        I: IntoIterator<Item = CellCoord>,
    {
        let segments: VecDeque<CellCoord> = cells.into_iter().collect();
        if segments.is_empty() {
            None
        } else {
            Some(Self { segments })
        }
    }

    /// Get the head position.
    #[must_use]
    pub fn head(&self) -> CellCoord {
        self.segments[0]
    }

    /// Cell the head would occupy after one step, before any validation.
    #[must_use]
    pub fn next_head(&self, direction: Direction) -> Option<CellCoord> {
        self.head().step(direction)
    }

    /// Check if the cell collides with the body (excluding head).
    #[must_use]
    pub fn hits_body(&self, cell: CellCoord) -> bool {
        self.segments.iter().skip(1).any(|segment| *segment == cell)
    }

    /// Prepends a head and keeps the tail.
    pub fn grow(&mut self, head: CellCoord) {
        self.segments.push_front(head);
    }

    /// Prepends a head and drops the tail, returning the released cell.
    pub fn advance(&mut self, head: CellCoord) -> Option<CellCoord> {
        self.segments.push_front(head);
        self.segments.pop_back()
    }

    /// Number of segments.
    #[must_use]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Iterator over the segments, head first.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.segments.iter().copied()
    }

    /// Set of occupied cells, used to keep food off the body.
    #[must_use]
    pub fn occupancy(&self) -> HashSet<CellCoord> {
        self.cells().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_keeps_length_and_returns_tail() {
        let mut snake = Snake::from_cells([
            CellCoord::new(5, 5),
            CellCoord::new(4, 5),
            CellCoord::new(3, 5),
        ])
        .expect("non-empty");

        let next = snake.next_head(Direction::Right).expect("in range");
        let vacated = snake.advance(next);

        assert_eq!(vacated, Some(CellCoord::new(3, 5)));
        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), CellCoord::new(6, 5));
    }

    #[test]
    fn grow_keeps_tail() {
        let mut snake = Snake::new(CellCoord::new(2, 2));
        snake.grow(CellCoord::new(2, 1));

        assert_eq!(snake.len(), 2);
        assert_eq!(
            snake.cells().collect::<Vec<_>>(),
            vec![CellCoord::new(2, 1), CellCoord::new(2, 2)]
        );
    }

    #[test]
    fn body_hits_exclude_head() {
        let snake = Snake::from_cells([
            CellCoord::new(5, 5),
            CellCoord::new(4, 5),
            CellCoord::new(3, 5),
        ])
        .expect("non-empty");

        assert!(!snake.hits_body(CellCoord::new(5, 5)));
        assert!(snake.hits_body(CellCoord::new(4, 5)));
        assert!(snake.hits_body(CellCoord::new(3, 5)));
        assert!(!snake.hits_body(CellCoord::new(9, 9)));
    }

    #[test]
    fn next_head_does_not_mutate() {
        let snake = Snake::new(CellCoord::new(0, 3));
        assert_eq!(snake.next_head(Direction::Left), None);
        assert_eq!(snake.next_head(Direction::Up), Some(CellCoord::new(0, 2)));
        assert_eq!(snake.head(), CellCoord::new(0, 3));
    }

    #[test]
    fn empty_layout_is_rejected() {
        assert!(Snake::from_cells(std::iter::empty()).is_none());
    }
}
