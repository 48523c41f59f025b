//! Piecewise-linear interpolation over integer years.
//!
//! Values outside the observed span are flat-filled with the nearest known
//! value. Observed years return the stored value verbatim (no arithmetic), so
//! exactness at observations holds bit-for-bit.

/// Known `(year, value)` points for one field of one country.
///
/// Years are strictly increasing.
#[derive(Debug, Clone, Default)]
pub struct KnownPoints {
    points: Vec<(i32, f64)>,
}

impl KnownPoints {
    /// Build from points sorted by year with no duplicate years.
    pub fn from_sorted(points: Vec<(i32, f64)>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0].0 < w[1].0));
        Self { points }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first_year(&self) -> Option<i32> {
        self.points.first().map(|&(y, _)| y)
    }

    pub fn contains(&self, year: i32) -> bool {
        self.points.binary_search_by_key(&year, |&(y, _)| y).is_ok()
    }

    /// Value at `year`, or `None` when no points are known.
    pub fn value_at(&self, year: i32) -> Option<f64> {
        let n = self.points.len();
        if n == 0 {
            return None;
        }
        match self.points.binary_search_by_key(&year, |&(y, _)| y) {
            Ok(idx) => Some(self.points[idx].1),
            Err(0) => Some(self.points[0].1),
            Err(idx) if idx == n => Some(self.points[n - 1].1),
            Err(idx) => Some(lerp(self.points[idx - 1], self.points[idx], year)),
        }
    }
}

/// `v1 + (v2 - v1) * (year - y1) / (y2 - y1)`.
fn lerp((y1, v1): (i32, f64), (y2, v2): (i32, f64), year: i32) -> f64 {
    // i64 so spans between extreme years cannot overflow.
    let dy = (i64::from(year) - i64::from(y1)) as f64;
    let dx = (i64::from(y2) - i64::from(y1)) as f64;
    v1 + (v2 - v1) * dy / dx
}
