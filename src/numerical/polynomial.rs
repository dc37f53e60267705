//! Polynomial with real coefficients stored highest degree first.
//!
//! ```
//! use RiemannSums::numerical::polynomial::Polynomial;
//! let p = Polynomial::new(vec![3.0, 3.0, -2.0, 1.0]);
//! assert_eq!(p.evaluate(1.0), 5.0);
//! assert_eq!(p.to_string(), "3 x^3 + 3 x^2 - 2 x + 1");
//! ```
use nalgebra::DVector;
use std::fmt;

/// number of points used to sample the curve for plotting
pub const CURVE_POINTS: usize = 50;

#[derive(Debug, Clone, PartialEq)]
pub struct Polynomial {
    coefs: Vec<f64>, // highest degree first
}

impl Polynomial {
    pub fn new(coefficients: Vec<f64>) -> Polynomial {
        Polynomial {
            coefs: coefficients,
        }
    }

    pub fn coefficients(&self) -> &[f64] {
        &self.coefs
    }

    /// degree = number of coefficients - 1 (the empty polynomial has degree 0)
    pub fn degree(&self) -> usize {
        self.coefs.len().saturating_sub(1)
    }

    /// Horner evaluation at a single point
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coefs.iter().fold(0.0, |acc, &c| acc * x + c)
    }

    /// element-wise evaluation, result has the same length as input
    pub fn evaluate_many(&self, x: &[f64]) -> Vec<f64> {
        x.iter().map(|&xi| self.evaluate(xi)).collect()
    }

    pub fn evaluate_DVector(&self, x: &DVector<f64>) -> DVector<f64> {
        x.map(|xi| self.evaluate(xi))
    }

    /// evenly spaced (x, f(x)) pairs over [start, end], both ends included
    pub fn linspace(&self, start: f64, end: f64, num_values: usize) -> Vec<(f64, f64)> {
        match num_values {
            0 => Vec::new(),
            1 => vec![(start, self.evaluate(start))],
            _ => {
                let step = (end - start) / (num_values - 1) as f64;
                (0..num_values)
                    .map(|i| {
                        let x = start + i as f64 * step;
                        (x, self.evaluate(x))
                    })
                    .collect()
            }
        }
    }
}

impl From<Vec<f64>> for Polynomial {
    fn from(coefficients: Vec<f64>) -> Self {
        Polynomial::new(coefficients)
    }
}

impl fmt::Display for Polynomial {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let degree = self.degree();
        let mut first = true;
        for (i, &c) in self.coefs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            let power = degree - i;
            let magnitude = c.abs();
            if first {
                if c < 0.0 {
                    write!(f, "-")?;
                }
            } else if c < 0.0 {
                write!(f, " - ")?;
            } else {
                write!(f, " + ")?;
            }
            first = false;
            match power {
                0 => write!(f, "{}", magnitude)?,
                _ => {
                    if magnitude != 1.0 {
                        write!(f, "{} ", magnitude)?;
                    }
                    if power == 1 {
                        write!(f, "x")?;
                    } else {
                        write!(f, "x^{}", power)?;
                    }
                }
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}
