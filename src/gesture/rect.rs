//! Capture rectangle in screen-pixel coordinates.

/// An axis-aligned screen region, normalised so `x0 < x1` and `y0 < y1`.
///
/// Built from the two corner points of a drag with
/// [`CaptureRect::from_points`]; immutable afterwards.  A zero-area rect is
/// never produced by `from_points` consumers — callers gate on
/// [`CaptureRect::area`] against the configured minimum before starting a
/// pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CaptureRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl CaptureRect {
    /// Build a normalised rect from two arbitrary corner points.
    pub fn from_points(a: (i32, i32), b: (i32, i32)) -> Self {
        Self {
            x0: a.0.min(b.0),
            y0: a.1.min(b.1),
            x1: a.0.max(b.0),
            y1: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    /// Area in square pixels.  Zero for degenerate rects.
    pub fn area(&self) -> i64 {
        self.width() as i64 * self.height() as i64
    }
}

impl std::fmt::Display for CaptureRect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "({},{})-({},{}) [{}x{}]",
            self.x0,
            self.y0,
            self.x1,
            self.y1,
            self.width(),
            self.height()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_points_normalises_corners() {
        let rect = CaptureRect::from_points((210, 60), (10, 10));
        assert_eq!(rect.x0, 10);
        assert_eq!(rect.y0, 10);
        assert_eq!(rect.x1, 210);
        assert_eq!(rect.y1, 60);
        assert!(rect.x0 < rect.x1);
        assert!(rect.y0 < rect.y1);
    }

    #[test]
    fn normalisation_holds_for_all_corner_orders() {
        let corners = [((5, 5), (1, 9)), ((1, 9), (5, 5)), ((5, 9), (1, 5))];
        for (a, b) in corners {
            let rect = CaptureRect::from_points(a, b);
            assert_eq!(rect, CaptureRect::from_points(b, a));
            assert!(rect.x0 < rect.x1);
            assert!(rect.y0 < rect.y1);
        }
    }

    #[test]
    fn area_of_degenerate_rect_is_zero() {
        let point = CaptureRect::from_points((7, 7), (7, 7));
        assert_eq!(point.area(), 0);

        let line = CaptureRect::from_points((0, 0), (100, 0));
        assert_eq!(line.area(), 0);
    }

    #[test]
    fn area_and_dimensions() {
        let rect = CaptureRect::from_points((10, 10), (210, 60));
        assert_eq!(rect.width(), 200);
        assert_eq!(rect.height(), 50);
        assert_eq!(rect.area(), 10_000);
    }
}
