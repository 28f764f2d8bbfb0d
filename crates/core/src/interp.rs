//! One-dimensional piecewise-linear interpolation and grid helpers.
//!
//! Semantics follow the usual tabulated-data convention: the abscissa is increasing, queries
//! that land exactly on a node return that node's value, and queries outside the table are
//! handled according to [`Bounds`].

/// Behaviour for queries outside the tabulated domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bounds {
    /// Hold the first/last tabulated value.
    Clamp,
    /// Return a fixed value outside the domain.
    Fill(f64),
}

/// Where a query fell relative to the tabulated domain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    Below,
    Inside,
    Above,
}

/// Interpolated value together with the position of the query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub value: f64,
    pub position: Position,
}

impl Sample {
    /// True when the query lay outside the table and the bounds policy was applied.
    pub fn out_of_range(&self) -> bool {
        self.position != Position::Inside
    }
}

/// Linear interpolation of `fp(xp)` at `x`.
///
/// # Panics
/// Panics if `xp` is empty or `xp` and `fp` differ in length.
pub fn interp(x: f64, xp: &[f64], fp: &[f64], bounds: Bounds) -> f64 {
    interp_checked(x, xp, fp, bounds).value
}

/// Like [`interp`], but also reports whether the query fell outside the domain.
pub fn interp_checked(x: f64, xp: &[f64], fp: &[f64], bounds: Bounds) -> Sample {
    assert!(!xp.is_empty(), "interpolation table must not be empty");
    assert_eq!(xp.len(), fp.len(), "abscissa and ordinate lengths differ");

    if x.is_nan() {
        return Sample {
            value: f64::NAN,
            position: Position::Inside,
        };
    }

    let last = xp.len() - 1;
    if x < xp[0] {
        let value = match bounds {
            Bounds::Clamp => fp[0],
            Bounds::Fill(v) => v,
        };
        return Sample {
            value,
            position: Position::Below,
        };
    }
    if x > xp[last] {
        let value = match bounds {
            Bounds::Clamp => fp[last],
            Bounds::Fill(v) => v,
        };
        return Sample {
            value,
            position: Position::Above,
        };
    }
    if x == xp[last] {
        return Sample {
            value: fp[last],
            position: Position::Inside,
        };
    }

    // xp[j] <= x < xp[j + 1]
    let j = xp.partition_point(|&v| v <= x) - 1;
    let dx = xp[j + 1] - xp[j];
    let t = (x - xp[j]) / dx;
    Sample {
        value: fp[j] + t * (fp[j + 1] - fp[j]),
        position: Position::Inside,
    }
}

/// Interpolate `fp(xp)` at every point of `x`.
pub fn interp_many(x: &[f64], xp: &[f64], fp: &[f64], bounds: Bounds) -> Vec<f64> {
    x.iter().map(|&xi| interp(xi, xp, fp, bounds)).collect()
}

/// `n` evenly spaced samples over `[start, stop]`, endpoints included exactly.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut out: Vec<f64> = (0..n).map(|i| start + step * i as f64).collect();
            out[n - 1] = stop;
            out
        }
    }
}

/// Half-open range `[start, stop)` sampled every `step`.
///
/// # Panics
/// Panics if `step` is not strictly positive.
pub fn arange(start: f64, stop: f64, step: f64) -> Vec<f64> {
    assert!(step > 0.0, "arange step must be positive");
    let count = ((stop - start) / step).ceil().max(0.0) as usize;
    (0..count).map(|i| start + step * i as f64).collect()
}

/// True when `values` is strictly increasing.
pub fn is_strictly_increasing(values: &[f64]) -> bool {
    values.windows(2).all(|w| w[0] < w[1])
}
