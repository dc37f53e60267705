//! Left, right, midpoint and trapezoidal Riemann sums of a polynomial.
//!
//! The interval [start, end] is cut into subintervals of a fixed width starting at `start`.
//! Every rule is described by a kernel (contribution of one subinterval to the sum and the
//! heights of the shape drawn for it); the kernels live in a table indexed by [`RiemannRule`].
//!
//! Example
//! ```
//! use RiemannSums::numerical::polynomial::Polynomial;
//! use RiemannSums::numerical::Riemann_sums::{RiemannRule, RiemannSum};
//! let f = Polynomial::new(vec![1.0, 0.0]); // f(x) = x
//! let estimator = RiemannSum::new(&f, 0.0, 2.0).unwrap();
//! assert_eq!(estimator.estimate(RiemannRule::Mid, 1.0).unwrap(), 2.0);
//! assert_eq!(estimator.estimate(RiemannRule::Trap, 1.0).unwrap(), 2.0);
//! ```
use crate::numerical::integration_errors::{IntegrationError, check_interval, check_width};
use crate::numerical::polynomial::Polynomial;
use log::debug;
use std::str::FromStr;
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString};

/// absolute tolerance used when deciding whether span/width is a whole number
const RATIO_TOLERANCE: f64 = 1e-9;
/// subinterval indices up to 2^53 are exact in f64
const MAX_SUBINTERVALS: f64 = 9_007_199_254_740_992.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum RiemannRule {
    #[strum(to_string = "left")]
    Left,
    #[strum(to_string = "right")]
    Right,
    #[strum(to_string = "mid", serialize = "midpoint")]
    Mid,
    #[strum(to_string = "trap", serialize = "trapezoidal")]
    Trap,
}

/// Contribution of the subinterval [x, x + h) to the sum
pub type ContributionFn = fn(&Polynomial, f64, f64) -> f64;
/// Heights of the drawn shape over the left and the right edge of [x, x + h)
pub type EdgeHeightsFn = fn(&Polynomial, f64, f64) -> (f64, f64);

pub struct RuleKernel {
    pub contribution: ContributionFn,
    pub edge_heights: EdgeHeightsFn,
}

fn left_contribution(f: &Polynomial, x: f64, h: f64) -> f64 {
    f.evaluate(x) * h
}
fn right_contribution(f: &Polynomial, x: f64, h: f64) -> f64 {
    f.evaluate(x + h) * h
}
fn mid_contribution(f: &Polynomial, x: f64, h: f64) -> f64 {
    f.evaluate(x + h / 2.0) * h
}
fn trap_contribution(f: &Polynomial, x: f64, h: f64) -> f64 {
    0.5 * h * (f.evaluate(x) + f.evaluate(x + h))
}

fn left_heights(f: &Polynomial, x: f64, _h: f64) -> (f64, f64) {
    let y = f.evaluate(x);
    (y, y)
}
fn right_heights(f: &Polynomial, x: f64, h: f64) -> (f64, f64) {
    let y = f.evaluate(x + h);
    (y, y)
}
fn mid_heights(f: &Polynomial, x: f64, h: f64) -> (f64, f64) {
    let y = f.evaluate(x + h / 2.0);
    (y, y)
}
fn trap_heights(f: &Polynomial, x: f64, h: f64) -> (f64, f64) {
    (f.evaluate(x), f.evaluate(x + h))
}

/// kernels in the declaration order of RiemannRule
static RULE_TABLE: [RuleKernel; 4] = [
    RuleKernel {
        contribution: left_contribution,
        edge_heights: left_heights,
    },
    RuleKernel {
        contribution: right_contribution,
        edge_heights: right_heights,
    },
    RuleKernel {
        contribution: mid_contribution,
        edge_heights: mid_heights,
    },
    RuleKernel {
        contribution: trap_contribution,
        edge_heights: trap_heights,
    },
];

impl RiemannRule {
    /// case-insensitive lookup: left, right, mid/midpoint, trap/trapezoidal
    pub fn parse(name: &str) -> Result<RiemannRule, IntegrationError> {
        RiemannRule::from_str(name.trim())
            .map_err(|_| IntegrationError::UnknownRule(name.to_string()))
    }

    pub fn kernel(self) -> &'static RuleKernel {
        &RULE_TABLE[self as usize]
    }

    /// rule name with a capital first letter, e.g. "Mid"
    pub fn capitalized(self) -> String {
        let name = self.to_string();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => format!("{}{}", first.to_ascii_uppercase(), chars.as_str()),
            None => String::new(),
        }
    }

    /// short label used in plot titles, e.g. "Left RS"
    pub fn label(self) -> String {
        format!("{} RS", self.capitalized())
    }

    pub fn all() -> Vec<RiemannRule> {
        RiemannRule::iter().collect()
    }
}

/// Number of subintervals of width `width` that fit into `span`.
/// A ratio within round-off of an integer counts as that integer, the remainder of a
/// non-dividing width is dropped, and at least one subinterval is always produced.
pub fn subinterval_count(span: f64, width: f64) -> usize {
    whole_steps(span / width).max(1)
}

/// Same as [`subinterval_count`], but rejects widths that split `span` into more
/// subintervals than can be enumerated
pub fn checked_subinterval_count(span: f64, width: f64) -> Result<usize, IntegrationError> {
    let ratio = span / width;
    if ratio.is_finite() && ratio < MAX_SUBINTERVALS.min(usize::MAX as f64) {
        Ok(whole_steps(ratio).max(1))
    } else {
        Err(IntegrationError::InvalidWidth(format!(
            "width {} splits a span of {} into too many subintervals",
            width, span
        )))
    }
}

/// floor of a non-negative ratio, snapping values within round-off of an integer
pub(crate) fn whole_steps(ratio: f64) -> usize {
    let nearest = ratio.round();
    let tolerance = RATIO_TOLERANCE.max(4.0 * f64::EPSILON * ratio.abs());
    if (ratio - nearest).abs() <= tolerance {
        nearest as usize
    } else {
        ratio.floor() as usize
    }
}

/// Left edges start, start + h, start + 2h, ... generated lazily
pub fn left_edges(
    start: f64,
    end: f64,
    width: f64,
) -> Result<impl Iterator<Item = f64>, IntegrationError> {
    let n = checked_subinterval_count(end - start, width)?;
    Ok((0..n).map(move |k| start + k as f64 * width))
}

/// Plain running sum of the rule's contributions. Only the subinterval count is checked.
pub(crate) fn accumulate(
    f: &Polynomial,
    start: f64,
    end: f64,
    width: f64,
    rule: RiemannRule,
) -> Result<f64, IntegrationError> {
    let contribution = rule.kernel().contribution;
    let mut sum = 0.0;
    for x in left_edges(start, end, width)? {
        sum += contribution(f, x, width);
    }
    Ok(sum)
}

pub(crate) fn shapes(
    f: &Polynomial,
    start: f64,
    end: f64,
    width: f64,
    rule: RiemannRule,
) -> Result<Vec<SubintervalShape>, IntegrationError> {
    let edge_heights = rule.kernel().edge_heights;
    let shapes = left_edges(start, end, width)?
        .map(|x| {
            let (y_left, y_right) = edge_heights(f, x, width);
            SubintervalShape::new(rule, x, width, y_left, y_right)
        })
        .collect();
    Ok(shapes)
}

fn checked_sum(
    f: &Polynomial,
    start: f64,
    end: f64,
    width: f64,
    rule: RiemannRule,
) -> Result<f64, IntegrationError> {
    check_interval(start, end)?;
    check_width(width)?;
    accumulate(f, start, end, width, rule)
}

pub fn left_sum(f: &Polynomial, start: f64, end: f64, width: f64) -> Result<f64, IntegrationError> {
    checked_sum(f, start, end, width, RiemannRule::Left)
}

/// samples at start + h, start + 2h, ...: the same number of terms as the left rule
pub fn right_sum(f: &Polynomial, start: f64, end: f64, width: f64) -> Result<f64, IntegrationError> {
    checked_sum(f, start, end, width, RiemannRule::Right)
}

pub fn mid_sum(f: &Polynomial, start: f64, end: f64, width: f64) -> Result<f64, IntegrationError> {
    checked_sum(f, start, end, width, RiemannRule::Mid)
}

pub fn trap_sum(f: &Polynomial, start: f64, end: f64, width: f64) -> Result<f64, IntegrationError> {
    checked_sum(f, start, end, width, RiemannRule::Trap)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Rectangle,
    Trapezoid,
}

/// Quadrilateral drawn for one subinterval: corners go
/// (x, 0) -> (x + h, 0) -> (x + h, y_right) -> (x, y_left)
#[derive(Debug, Clone, PartialEq)]
pub struct SubintervalShape {
    pub kind: ShapeKind,
    pub corners: [(f64, f64); 4],
}

impl SubintervalShape {
    pub fn new(rule: RiemannRule, x: f64, width: f64, y_left: f64, y_right: f64) -> Self {
        let kind = match rule {
            RiemannRule::Trap => ShapeKind::Trapezoid,
            _ => ShapeKind::Rectangle,
        };
        SubintervalShape {
            kind,
            corners: [
                (x, 0.0),
                (x + width, 0.0),
                (x + width, y_right),
                (x, y_left),
            ],
        }
    }

    /// signed area (negative below the x axis), shoelace formula
    pub fn area(&self) -> f64 {
        let c = &self.corners;
        let mut twice = 0.0;
        for i in 0..4 {
            let (x0, y0) = c[i];
            let (x1, y1) = c[(i + 1) % 4];
            twice += x0 * y1 - x1 * y0;
        }
        0.5 * twice
    }

    /// corners followed by the first corner again, ready for a closed path
    pub fn closed_path(&self) -> Vec<(f64, f64)> {
        let mut path = self.corners.to_vec();
        path.push(self.corners[0]);
        path
    }
}

/// Estimator over a validated interval
#[derive(Debug, Clone, Copy)]
pub struct RiemannSum<'a> {
    poly: &'a Polynomial,
    start: f64,
    end: f64,
}

impl<'a> RiemannSum<'a> {
    pub fn new(poly: &'a Polynomial, start: f64, end: f64) -> Result<RiemannSum<'a>, IntegrationError> {
        check_interval(start, end)?;
        Ok(RiemannSum { poly, start, end })
    }

    pub fn polynomial(&self) -> &'a Polynomial {
        self.poly
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.start, self.end)
    }

    pub fn estimate(&self, rule: RiemannRule, width: f64) -> Result<f64, IntegrationError> {
        check_width(width)?;
        let sum = accumulate(self.poly, self.start, self.end, width, rule)?;
        debug!("{} sum over [{}, {}] with width {}: {}", rule, self.start, self.end, width, sum);
        Ok(sum)
    }

    pub fn estimate_by_name(&self, rule: &str, width: f64) -> Result<f64, IntegrationError> {
        self.estimate(RiemannRule::parse(rule)?, width)
    }

    /// all four rules with the same width, in declaration order
    pub fn estimate_all(&self, width: f64) -> Result<Vec<(RiemannRule, f64)>, IntegrationError> {
        RiemannRule::iter()
            .map(|rule| Ok((rule, self.estimate(rule, width)?)))
            .collect()
    }

    /// one shape per subinterval, built from the same sample points as the sum
    pub fn sample_geometry(
        &self,
        rule: RiemannRule,
        width: f64,
    ) -> Result<Vec<SubintervalShape>, IntegrationError> {
        check_width(width)?;
        shapes(self.poly, self.start, self.end, width, rule)
    }
}
