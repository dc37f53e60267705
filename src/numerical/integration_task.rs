//! Explicit configuration of a run: polynomial, interval, rule, widths, output files and logging.
//! Every computation takes its parameters from an `IntegrationTask`; nothing is kept in globals.
use crate::Utils::task_parser::{DocumentMap, Value, parse_task_document, parse_task_file, template_from};
use crate::numerical::Riemann_sums::{RiemannRule, RiemannSum};
use crate::numerical::integration_errors::{IntegrationError, check_interval, check_width};
use crate::numerical::polynomial::Polynomial;
use crate::numerical::refinement::RefinementSequence;
use log::info;
use std::path::Path;

#[derive(Debug, Clone, PartialEq)]
pub struct IntegrationTask {
    pub coefficients: Vec<f64>,
    pub lower_lim: f64,
    pub upper_lim: f64,
    /// width used for the static comparison of the four rules
    pub interval_len: f64,
    /// rule animated by the refinement sequence
    pub rule: RiemannRule,
    pub start_il: f64,
    pub end_il: f64,
    pub comparison_plot: String,
    pub animation_gif: String,
    pub loglevel: String,
    pub log_to_file: bool,
}

impl Default for IntegrationTask {
    fn default() -> Self {
        IntegrationTask {
            coefficients: vec![3.0, 3.0, -2.0, 1.0],
            lower_lim: -1.0,
            upper_lim: 1.0,
            interval_len: 1.0,
            rule: RiemannRule::Right,
            start_il: 1.0,
            end_il: 0.01,
            comparison_plot: "riemann_sums.png".to_string(),
            animation_gif: "riemann_animation.gif".to_string(),
            loglevel: "info".to_string(),
            log_to_file: false,
        }
    }
}

fn task_template() -> DocumentMap {
    template_from(&[
        ("polynomial", &["coefficients"][..]),
        ("interval", &["lower_lim", "upper_lim"][..]),
        ("comparison", &["interval_len", "plot"][..]),
        ("animation", &["rule", "start_il", "end_il", "gif"][..]),
        ("logging", &["loglevel", "log_to_file"][..]),
    ])
}

/// values of section.key, None when the document does not set them
fn lookup<'d>(doc: &'d DocumentMap, section: &str, key: &str) -> Option<&'d Vec<Value>> {
    doc.get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_ref())
}

fn single<'d>(doc: &'d DocumentMap, section: &str, key: &str) -> Result<Option<&'d Value>, IntegrationError> {
    match lookup(doc, section, key) {
        None => Ok(None),
        Some(values) if values.len() == 1 => Ok(values.first()),
        Some(values) => Err(IntegrationError::InvalidTask(format!(
            "{}.{} expects a single value, got {}",
            section,
            key,
            values.len()
        ))),
    }
}

fn float_or(doc: &DocumentMap, section: &str, key: &str, default: f64) -> Result<f64, IntegrationError> {
    match single(doc, section, key)? {
        None => Ok(default),
        Some(value) => value.as_float().ok_or_else(|| {
            IntegrationError::InvalidTask(format!("{}.{} must be a number, got '{}'", section, key, value))
        }),
    }
}

fn string_or(doc: &DocumentMap, section: &str, key: &str, default: &str) -> Result<String, IntegrationError> {
    match single(doc, section, key)? {
        None => Ok(default.to_string()),
        Some(value) => Ok(value.to_string()),
    }
}

fn bool_or(doc: &DocumentMap, section: &str, key: &str, default: bool) -> Result<bool, IntegrationError> {
    match single(doc, section, key)? {
        None => Ok(default),
        Some(value) => value.as_boolean().ok_or_else(|| {
            IntegrationError::InvalidTask(format!("{}.{} must be true or false, got '{}'", section, key, value))
        }),
    }
}

impl IntegrationTask {
    /// Reads a task document; unset sections and keys keep their default values
    pub fn from_document(input: &str) -> Result<IntegrationTask, IntegrationError> {
        let template = task_template();
        let doc = parse_task_document(input, Some(&template)).map_err(IntegrationError::InvalidTask)?;
        IntegrationTask::from_map(&doc)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<IntegrationTask, IntegrationError> {
        let template = task_template();
        let doc = parse_task_file(path, Some(&template)).map_err(IntegrationError::InvalidTask)?;
        IntegrationTask::from_map(&doc)
    }

    fn from_map(doc: &DocumentMap) -> Result<IntegrationTask, IntegrationError> {
        let defaults = IntegrationTask::default();
        let coefficients = match lookup(doc, "polynomial", "coefficients") {
            None => defaults.coefficients,
            Some(values) => values
                .iter()
                .map(|v| {
                    v.as_float().ok_or_else(|| {
                        IntegrationError::InvalidTask(format!("coefficient '{}' is not a number", v))
                    })
                })
                .collect::<Result<Vec<f64>, IntegrationError>>()?,
        };
        let rule = match single(doc, "animation", "rule")? {
            None => defaults.rule,
            Some(value) => RiemannRule::parse(&value.to_string())?,
        };
        let task = IntegrationTask {
            coefficients,
            lower_lim: float_or(doc, "interval", "lower_lim", defaults.lower_lim)?,
            upper_lim: float_or(doc, "interval", "upper_lim", defaults.upper_lim)?,
            interval_len: float_or(doc, "comparison", "interval_len", defaults.interval_len)?,
            rule,
            start_il: float_or(doc, "animation", "start_il", defaults.start_il)?,
            end_il: float_or(doc, "animation", "end_il", defaults.end_il)?,
            comparison_plot: string_or(doc, "comparison", "plot", &defaults.comparison_plot)?,
            animation_gif: string_or(doc, "animation", "gif", &defaults.animation_gif)?,
            loglevel: string_or(doc, "logging", "loglevel", &defaults.loglevel)?,
            log_to_file: bool_or(doc, "logging", "log_to_file", defaults.log_to_file)?,
        };
        info!("task loaded: {:?}", task);
        Ok(task)
    }

    /// Checks every numeric parameter before any computation starts
    pub fn validate(&self) -> Result<(), IntegrationError> {
        check_interval(self.lower_lim, self.upper_lim)?;
        check_width(self.interval_len)?;
        let poly = self.polynomial();
        let estimator = RiemannSum::new(&poly, self.lower_lim, self.upper_lim)?;
        RefinementSequence::new(estimator, self.rule, self.start_il, self.end_il)?;
        Ok(())
    }

    pub fn polynomial(&self) -> Polynomial {
        Polynomial::new(self.coefficients.clone())
    }
}
