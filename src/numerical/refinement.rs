//! Refinement sequence: the numeric core of the convergence animation.
//!
//! Starting from the width `start_il` the subinterval width shrinks by `end_il` every step,
//! n = floor(start_il / end_il) steps in total, so the last frame uses (about) `end_il`.
//! Widths are rounded to as many decimals as `end_il` is written with, which keeps the
//! displayed width free of floating point drift.
//!
//! ```
//! use RiemannSums::numerical::polynomial::Polynomial;
//! use RiemannSums::numerical::Riemann_sums::{RiemannRule, RiemannSum};
//! use RiemannSums::numerical::refinement::RefinementSequence;
//! let f = Polynomial::new(vec![1.0, 0.0, 0.0]);
//! let estimator = RiemannSum::new(&f, 0.0, 1.0).unwrap();
//! let frames: Vec<_> = RefinementSequence::new(estimator, RiemannRule::Mid, 1.0, 0.1)
//!     .unwrap()
//!     .collect();
//! assert_eq!(frames.len(), 10);
//! ```
use crate::numerical::Riemann_sums::{
    RiemannRule, RiemannSum, SubintervalShape, accumulate, checked_subinterval_count, shapes,
};
use crate::numerical::integration_errors::IntegrationError;
use log::{debug, info, warn};

/// One animation frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RefinementFrame {
    pub step: usize,
    pub width: f64,
    pub area: f64,
}

/// Number of digits after the decimal point in the shortest textual form of `x`
pub fn decimal_places(x: f64) -> usize {
    let text = x.to_string();
    match text.split_once('.') {
        Some((_, fraction)) => fraction.len(),
        None => 0,
    }
}

/// Round half to even at the given number of decimals
pub fn round_to(x: f64, digits: usize) -> f64 {
    let (pow1, pow2) = if digits > 22 {
        // keeps pow1 * pow2 from overflowing
        (10f64.powi((digits - 22) as i32), 1e22)
    } else {
        (10f64.powi(digits as i32), 1.0)
    };
    let y = (x * pow1) * pow2;
    let mut z = y.round();
    if (y - z).abs() == 0.5 {
        z = 2.0 * (y / 2.0).round();
    }
    (z / pow2) / pow1
}

#[derive(Debug, Clone)]
pub struct RefinementSequence<'a> {
    estimator: RiemannSum<'a>,
    rule: RiemannRule,
    start_il: f64,
    end_il: f64,
    decimals: usize,
    steps: usize,
    next_step: usize,
}

impl<'a> RefinementSequence<'a> {
    pub fn new(
        estimator: RiemannSum<'a>,
        rule: RiemannRule,
        start_il: f64,
        end_il: f64,
    ) -> Result<RefinementSequence<'a>, IntegrationError> {
        if !(start_il.is_finite() && start_il > 0.0) {
            return Err(IntegrationError::InvalidWidth(format!(
                "starting width must be positive, got {}",
                start_il
            )));
        }
        if !(end_il.is_finite() && end_il > 0.0) {
            return Err(IntegrationError::InvalidWidth(format!(
                "terminal width must be positive, got {}",
                end_il
            )));
        }
        if end_il >= start_il {
            return Err(IntegrationError::InvalidWidth(format!(
                "terminal width {} must be smaller than starting width {}",
                end_il, start_il
            )));
        }
        let steps = checked_subinterval_count(start_il, end_il)?;
        let decimals = decimal_places(end_il);
        info!(
            "{} refinement from width {} to {}: {} steps, widths rounded to {} decimals",
            rule, start_il, end_il, steps, decimals
        );
        Ok(RefinementSequence {
            estimator,
            rule,
            start_il,
            end_il,
            decimals,
            steps,
            next_step: 0,
        })
    }

    pub fn rule(&self) -> RiemannRule {
        self.rule
    }

    /// total number of frames
    pub fn steps(&self) -> usize {
        self.steps
    }

    pub fn width_at(&self, step: usize) -> f64 {
        round_to(self.start_il - self.end_il * step as f64, self.decimals)
    }

    fn check_step(&self, step: usize) -> Result<f64, IntegrationError> {
        if step >= self.steps {
            return Err(IntegrationError::InvalidWidth(format!(
                "step {} is past the last of {} refinement steps",
                step, self.steps
            )));
        }
        Ok(self.width_at(step))
    }

    /// Recomputes the sum for a single tick; does not advance the sequence.
    /// Steps outside 0..steps() are rejected.
    pub fn frame(&self, step: usize) -> Result<RefinementFrame, IntegrationError> {
        let width = self.check_step(step)?;
        let (start, end) = self.estimator.bounds();
        let area = accumulate(self.estimator.polynomial(), start, end, width, self.rule)?;
        Ok(RefinementFrame { step, width, area })
    }

    /// Shapes to draw for a single tick
    pub fn frame_geometry(&self, step: usize) -> Result<Vec<SubintervalShape>, IntegrationError> {
        let width = self.check_step(step)?;
        let (start, end) = self.estimator.bounds();
        shapes(self.estimator.polynomial(), start, end, width, self.rule)
    }
}

impl Iterator for RefinementSequence<'_> {
    type Item = RefinementFrame;

    fn next(&mut self) -> Option<RefinementFrame> {
        if self.next_step >= self.steps {
            return None;
        }
        match self.frame(self.next_step) {
            Ok(frame) => {
                debug!("frame {}: width {}, area {}", frame.step, frame.width, frame.area);
                self.next_step += 1;
                Some(frame)
            }
            Err(e) => {
                warn!("refinement stopped at step {}: {}", self.next_step, e);
                self.next_step = self.steps;
                None
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.steps.saturating_sub(self.next_step);
        (left, Some(left))
    }
}

impl ExactSizeIterator for RefinementSequence<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::numerical::polynomial::Polynomial;
    use approx::assert_relative_eq;

    #[test]
    fn test_decimal_places() {
        assert_eq!(decimal_places(0.1), 1);
        assert_eq!(decimal_places(0.01), 2);
        assert_eq!(decimal_places(0.125), 3);
        assert_eq!(decimal_places(1.0), 0);
        assert_eq!(decimal_places(2.0), 0);
    }

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(1.0 - 0.1 * 3.0, 1), 0.7);
        assert_eq!(round_to(0.123456, 3), 0.123);
        assert_eq!(round_to(2.5, 0), 2.0);
        assert_eq!(round_to(3.5, 0), 4.0);
        assert_eq!(round_to(-1.26, 1), -1.3);
    }

    #[test]
    fn test_steps_and_widths() {
        let f = Polynomial::new(vec![1.0, 0.0]);
        let est = RiemannSum::new(&f, 0.0, 1.0).unwrap();
        let seq = RefinementSequence::new(est, RiemannRule::Left, 1.0, 0.1).unwrap();
        assert_eq!(seq.steps(), 10);
        assert_eq!(seq.width_at(0), 1.0);
        assert_eq!(seq.width_at(1), 0.9);
        assert_eq!(seq.width_at(2), 0.8);
        assert_eq!(seq.width_at(3), 0.7);
        assert_eq!(seq.width_at(9), 0.1);
        let frames: Vec<RefinementFrame> = seq.collect();
        assert_eq!(frames.len(), 10);
        for pair in frames.windows(2) {
            assert!(pair[1].width < pair[0].width);
        }
    }

    #[test]
    fn test_iterator_is_finite_and_not_restartable() {
        let f = Polynomial::new(vec![1.0]);
        let est = RiemannSum::new(&f, 0.0, 1.0).unwrap();
        let mut seq = RefinementSequence::new(est, RiemannRule::Right, 0.5, 0.25).unwrap();
        assert_eq!(seq.len(), 2);
        assert!(seq.next().is_some());
        assert!(seq.next().is_some());
        assert!(seq.next().is_none());
        assert!(seq.next().is_none());
    }

    #[test]
    fn test_frame_is_pure() {
        let f = Polynomial::new(vec![1.0, 0.0, 0.0]);
        let est = RiemannSum::new(&f, 0.0, 1.0).unwrap();
        let seq = RefinementSequence::new(est, RiemannRule::Mid, 1.0, 0.01).unwrap();
        assert_eq!(seq.steps(), 100);
        let a = seq.frame(50).unwrap();
        let b = seq.frame(50).unwrap();
        assert_eq!(a, b);
        assert_relative_eq!(a.width, 0.5);
        assert_relative_eq!(a.area, est.estimate(RiemannRule::Mid, 0.5).unwrap());
        let area: f64 = seq.frame_geometry(50).unwrap().iter().map(|s| s.area()).sum();
        assert_relative_eq!(area, a.area, epsilon = 1e-12);
    }

    #[test]
    fn test_frame_outside_sequence_is_rejected() {
        let f = Polynomial::new(vec![1.0, 0.0]);
        let est = RiemannSum::new(&f, 0.0, 1.0).unwrap();
        let seq = RefinementSequence::new(est, RiemannRule::Left, 1.0, 0.1).unwrap();
        assert_eq!(seq.steps(), 10);
        assert!(seq.frame(9).is_ok());
        for step in [seq.steps(), seq.steps() + 1, usize::MAX] {
            assert!(matches!(seq.frame(step), Err(IntegrationError::InvalidWidth(_))));
            assert!(matches!(
                seq.frame_geometry(step),
                Err(IntegrationError::InvalidWidth(_))
            ));
        }
    }

    #[test]
    fn test_tiny_terminal_width_is_rejected() {
        let f = Polynomial::new(vec![1.0]);
        let est = RiemannSum::new(&f, 0.0, 1.0).unwrap();
        assert!(matches!(
            RefinementSequence::new(est, RiemannRule::Left, 1.0, 1e-300),
            Err(IntegrationError::InvalidWidth(_))
        ));
    }

    #[test]
    fn test_invalid_widths() {
        let f = Polynomial::new(vec![1.0]);
        let est = RiemannSum::new(&f, 0.0, 1.0).unwrap();
        for (start_il, end_il) in [(1.0, 0.0), (1.0, -0.1), (0.1, 1.0), (0.5, 0.5), (0.0, 0.1)] {
            assert!(matches!(
                RefinementSequence::new(est, RiemannRule::Left, start_il, end_il),
                Err(IntegrationError::InvalidWidth(_))
            ));
        }
    }
}
