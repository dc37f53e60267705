use thiserror::Error;

/// Errors returned by the estimator, the refinement sequence and task loading
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IntegrationError {
    #[error("invalid interval [{start}, {end}]: end must be greater than start")]
    InvalidInterval { start: f64, end: f64 },
    #[error("invalid width: {0}")]
    InvalidWidth(String),
    #[error("unknown rule '{0}', expected one of: left, right, mid, trap")]
    UnknownRule(String),
    #[error("invalid task: {0}")]
    InvalidTask(String),
}

impl IntegrationError {
    pub fn width(width: f64) -> Self {
        IntegrationError::InvalidWidth(format!(
            "subinterval width must be a positive finite number, got {}",
            width
        ))
    }
}

/// Checks that [start, end] is a proper finite interval
pub fn check_interval(start: f64, end: f64) -> Result<(), IntegrationError> {
    if start.is_finite() && end.is_finite() && end > start {
        Ok(())
    } else {
        Err(IntegrationError::InvalidInterval { start, end })
    }
}

/// Checks that the subinterval width is positive and finite (NaN is rejected too)
pub fn check_width(width: f64) -> Result<(), IntegrationError> {
    if width.is_finite() && width > 0.0 {
        Ok(())
    } else {
        Err(IntegrationError::width(width))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_interval() {
        assert!(check_interval(-1.0, 1.0).is_ok());
        assert_eq!(
            check_interval(1.0, 1.0),
            Err(IntegrationError::InvalidInterval { start: 1.0, end: 1.0 })
        );
        assert!(check_interval(2.0, 1.0).is_err());
        assert!(check_interval(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_check_width() {
        assert!(check_width(0.1).is_ok());
        assert!(matches!(check_width(0.0), Err(IntegrationError::InvalidWidth(_))));
        assert!(matches!(check_width(-0.5), Err(IntegrationError::InvalidWidth(_))));
        assert!(matches!(check_width(f64::NAN), Err(IntegrationError::InvalidWidth(_))));
    }

    #[test]
    fn test_error_messages() {
        let err = IntegrationError::UnknownRule("simpson".to_string());
        assert_eq!(
            err.to_string(),
            "unknown rule 'simpson', expected one of: left, right, mid, trap"
        );
    }
}
