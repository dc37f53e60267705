//! Riemann-sum approximations of polynomial integrals
//!
//! Example#1
//! ```
//! use RiemannSums::numerical::polynomial::Polynomial;
//! use RiemannSums::numerical::Riemann_sums::{RiemannRule, RiemannSum};
//! // f(x) = 3x^3 + 3x^2 - 2x + 1 on [-1, 1]
//! let f = Polynomial::new(vec![3.0, 3.0, -2.0, 1.0]);
//! let estimator = RiemannSum::new(&f, -1.0, 1.0).unwrap();
//! for (rule, area) in estimator.estimate_all(0.5).unwrap() {
//!     println!("{}: {}", rule.label(), area);
//! }
//! let shapes = estimator.sample_geometry(RiemannRule::Trap, 0.5).unwrap();
//! assert_eq!(shapes.len(), 4);
//! ```
//! Example#2
//! ```
//! use RiemannSums::numerical::integration_task::IntegrationTask;
//! use RiemannSums::numerical::Riemann_sums::RiemannSum;
//! use RiemannSums::numerical::refinement::RefinementSequence;
//! let task = IntegrationTask::from_document(
//!     "polynomial coefficients: 1, 0, 0
//!      animation rule: mid start_il: 1 end_il: 0.1",
//! )
//! .unwrap();
//! let poly = task.polynomial();
//! let estimator = RiemannSum::new(&poly, task.lower_lim, task.upper_lim).unwrap();
//! for frame in RefinementSequence::new(estimator, task.rule, task.start_il, task.end_il).unwrap() {
//!     println!("width {} -> {}", frame.width, frame.area);
//! }
//! ```
/// errors of the estimator, the refinement sequence and task loading
pub mod integration_errors;
/// run configuration
pub mod integration_task;
/// polynomial evaluation (Horner)
pub mod polynomial;
/// shrinking widths for the convergence animation
pub mod refinement;
/// left, right, midpoint and trapezoidal rules and their geometry
pub mod Riemann_sums;
