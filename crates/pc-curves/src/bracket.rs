//! Sign-change bracket search over a tabulated difference.

use crate::error::{CurveError, CurveResult};
use pc_core::sign;

/// Grid interval `[x[index], x[index + 1]]` over which the difference
/// `y1 - y2` changes sign class.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bracket {
    pub index: usize,
    pub x_lo: f64,
    pub x_hi: f64,
    /// Difference `y1 - y2` at `x_lo`.
    pub d_lo: f64,
    /// Difference `y1 - y2` at `x_hi`.
    pub d_hi: f64,
}

impl Bracket {
    pub fn midpoint(&self) -> f64 {
        0.5 * (self.x_lo + self.x_hi)
    }

    pub fn width(&self) -> f64 {
        self.x_hi - self.x_lo
    }
}

/// Locate the first index where `sign(y1[i] - y2[i])` differs from
/// `sign(y1[i+1] - y2[i+1])`.
///
/// Zero is its own sign class, so a grid point where the curves touch opens
/// a bracket with its neighbour. Later sign changes are ignored.
pub fn find_first_bracket(x: &[f64], y1: &[f64], y2: &[f64]) -> CurveResult<Bracket> {
    let n = x.len();
    let diff = |i: usize| y1[i] - y2[i];

    let mut d_prev = diff(0);
    for i in 0..n.saturating_sub(1) {
        let d_next = diff(i + 1);
        if sign(d_prev) != sign(d_next) {
            return Ok(Bracket {
                index: i,
                x_lo: x[i],
                x_hi: x[i + 1],
                d_lo: d_prev,
                d_hi: d_next,
            });
        }
        d_prev = d_next;
    }

    Err(CurveError::NoIntersectionFound { points: n })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_simple_crossing() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y1 = [0.0, 1.0, 2.0, 3.0];
        let y2 = [2.5, 2.0, 1.5, 1.0];
        let b = find_first_bracket(&x, &y1, &y2).unwrap();
        assert_eq!(b.index, 1);
        assert_eq!((b.x_lo, b.x_hi), (1.0, 2.0));
        assert!(b.d_lo < 0.0 && b.d_hi > 0.0);
    }

    #[test]
    fn first_of_several_crossings() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y1 = [1.0, -1.0, 1.0, -1.0, 1.0];
        let y2 = [0.0; 5];
        let b = find_first_bracket(&x, &y1, &y2).unwrap();
        assert_eq!(b.index, 0);
    }

    #[test]
    fn touching_point_opens_bracket() {
        let x = [0.0, 1.0, 2.0];
        let y1 = [1.0, 0.0, -1.0];
        let y2 = [0.0; 3];
        let b = find_first_bracket(&x, &y1, &y2).unwrap();
        assert_eq!(b.index, 0);
        assert_eq!(b.d_hi, 0.0);
    }

    #[test]
    fn identical_curves_have_no_crossing() {
        let x = [0.0, 1.0, 2.0];
        let y = [3.0, 4.0, 5.0];
        assert_eq!(
            find_first_bracket(&x, &y, &y),
            Err(CurveError::NoIntersectionFound { points: 3 })
        );
    }

    #[test]
    fn one_sided_difference_fails() {
        let x = [0.0, 1.0, 2.0];
        let y1 = [5.0, 6.0, 7.0];
        let y2 = [1.0, 2.0, 3.0];
        assert!(matches!(
            find_first_bracket(&x, &y1, &y2),
            Err(CurveError::NoIntersectionFound { .. })
        ));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn bracket_contains_line_root(
            n in 3_usize..40,
            slope in 0.1_f64..50.0,
            cell in 0_usize..1000,
            frac in 0.1_f64..0.9,
        ) {
            let k = cell % (n - 1);
            let root = k as f64 + frac;
            let x: Vec<f64> = (0..n).map(|i| i as f64).collect();
            let y1: Vec<f64> = x.iter().map(|xi| slope * (xi - root)).collect();
            let y2 = vec![0.0; n];

            let b = find_first_bracket(&x, &y1, &y2).unwrap();
            prop_assert_eq!(b.index, k);
            prop_assert!(b.x_lo < root && root < b.x_hi);
        }
    }
}
