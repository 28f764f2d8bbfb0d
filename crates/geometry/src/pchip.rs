//! Monotone piecewise cubic Hermite interpolation (Fritsch–Carlson slopes).

use crate::GeometryError;

#[derive(Debug, Clone)]
pub struct Pchip {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl Pchip {
    /// Build an interpolant through `(x, y)`; `x` must be strictly increasing.
    ///
    /// Queries outside `[x0, xn]` extend the first/last cubic segment.
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, GeometryError> {
        if x.is_empty() || x.len() != y.len() {
            return Err(GeometryError::Shape {
                what: "pchip samples",
                expected: x.len(),
                found: y.len(),
            });
        }
        if let Some(index) = x.windows(2).position(|w| w[1] <= w[0]) {
            return Err(GeometryError::NotIncreasing {
                what: "pchip abscissa",
                index: index + 1,
            });
        }
        Ok(Self {
            x: x.to_vec(),
            y: y.to_vec(),
            slopes: slopes(x, y),
        })
    }

    pub fn eval(&self, xq: f64) -> f64 {
        let n = self.x.len();
        if n == 1 {
            return self.y[0];
        }
        let k = self.x.partition_point(|&v| v <= xq).clamp(1, n - 1) - 1;
        let h = self.x[k + 1] - self.x[k];
        let t = (xq - self.x[k]) / h;
        let t2 = t * t;
        let t3 = t2 * t;
        let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
        let h10 = t3 - 2.0 * t2 + t;
        let h01 = -2.0 * t3 + 3.0 * t2;
        let h11 = t3 - t2;
        h00 * self.y[k] + h10 * h * self.slopes[k] + h01 * self.y[k + 1] + h11 * h * self.slopes[k + 1]
    }

    pub fn eval_many(&self, xq: &[f64]) -> Vec<f64> {
        xq.iter().map(|&x| self.eval(x)).collect()
    }
}

fn slopes(x: &[f64], y: &[f64]) -> Vec<f64> {
    let n = x.len();
    if n == 1 {
        return vec![0.0];
    }
    let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|k| (y[k + 1] - y[k]) / h[k]).collect();
    if n == 2 {
        return vec![delta[0], delta[0]];
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        if delta[k - 1] * delta[k] <= 0.0 {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        d[k] = (w1 + w2) / (w1 / delta[k - 1] + w2 / delta[k]);
    }
    d[0] = edge_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = edge_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    d
}

/// One-sided three-point slope, limited to keep the end segment shape-preserving.
fn edge_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if d.signum() != m0.signum() || m0 == 0.0 {
        0.0
    } else if m0.signum() != m1.signum() && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}
