//! Canvas coordinates and bounds.

/// A cell on the canvas. Rows grow downward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Coord {
    pub column: i32,
    pub row: i32,
}

impl Coord {
    pub const fn new(column: i32, row: i32) -> Self {
        Self { column, row }
    }
}

/// The simulation rectangle, inclusive on every edge.
///
/// `top` is the spawn row and `bottom` is the floor that background snow
/// piles against, so `top <= bottom` and `left <= right`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bounds {
    pub top: i32,
    pub bottom: i32,
    pub left: i32,
    pub right: i32,
}

impl Bounds {
    /// Create bounds from explicit edges.
    pub fn new(top: i32, bottom: i32, left: i32, right: i32) -> Self {
        assert!(top <= bottom, "bounds top {top} below bottom {bottom}");
        assert!(left <= right, "bounds left {left} right of right {right}");
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// Bounds covering a `width` x `height` area anchored at the origin.
    pub fn from_size(width: u16, height: u16) -> Self {
        Self::new(
            0,
            i32::from(height.max(1)) - 1,
            0,
            i32::from(width.max(1)) - 1,
        )
    }

    pub fn width(&self) -> i32 {
        self.right - self.left + 1
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top + 1
    }

    /// Clamp a column into the horizontal range.
    pub fn clamp_column(&self, column: i32) -> i32 {
        column.clamp(self.left, self.right)
    }

    pub fn contains(&self, coord: Coord) -> bool {
        (self.left..=self.right).contains(&coord.column)
            && (self.top..=self.bottom).contains(&coord.row)
    }

    /// Smallest bounds enclosing every coordinate, or `None` for an empty set.
    pub fn enclosing(coords: impl IntoIterator<Item = Coord>) -> Option<Self> {
        coords.into_iter().fold(None, |acc, c| {
            Some(match acc {
                None => Self::new(c.row, c.row, c.column, c.column),
                Some(b) => Self {
                    top: b.top.min(c.row),
                    bottom: b.bottom.max(c.row),
                    left: b.left.min(c.column),
                    right: b.right.max(c.column),
                },
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_size() {
        let bounds = Bounds::from_size(80, 24);
        assert_eq!(bounds, Bounds::new(0, 23, 0, 79));
        assert_eq!(bounds.width(), 80);
        assert_eq!(bounds.height(), 24);
    }

    #[test]
    fn test_from_size_degenerate() {
        let bounds = Bounds::from_size(0, 0);
        assert_eq!(bounds.width(), 1);
        assert_eq!(bounds.height(), 1);
    }

    #[test]
    fn test_clamp_and_contains() {
        let bounds = Bounds::new(0, 9, 2, 7);
        assert_eq!(bounds.clamp_column(-4), 2);
        assert_eq!(bounds.clamp_column(5), 5);
        assert_eq!(bounds.clamp_column(12), 7);
        assert!(bounds.contains(Coord::new(2, 9)));
        assert!(!bounds.contains(Coord::new(8, 0)));
        assert!(!bounds.contains(Coord::new(3, 10)));
    }

    #[test]
    fn test_enclosing() {
        assert_eq!(Bounds::enclosing(Vec::new()), None);
        let b = Bounds::enclosing([Coord::new(3, 4), Coord::new(1, 6), Coord::new(5, 5)]);
        assert_eq!(b, Some(Bounds::new(4, 6, 1, 5)));
    }
}
