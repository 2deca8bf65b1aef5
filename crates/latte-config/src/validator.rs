//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(err) => Err(ConfigError::InvalidValue {
                field: err.path,
                message: err.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_analysis(config, &mut result);
        Self::validate_output(config, &mut result);
        Self::validate_logging(config, &mut result);

        result
    }

    fn validate_analysis(config: &Config, result: &mut ValidationResult) {
        let label = config.analysis.text_label_class.as_deref();
        if label.is_some_and(|class| class.trim().is_empty()) {
            result.add_error(ValidationError::new(
                "analysis.text_label_class",
                "text_label_class cannot be empty when set",
            ));
        }

        for class in &config.analysis.extra_container_classes {
            if class.trim().is_empty() {
                result.add_error(ValidationError::new(
                    "analysis.extra_container_classes",
                    "container class names cannot be empty",
                ));
            } else if Some(class.as_str()) == label {
                result.add_warning(ValidationWarning::new(
                    "analysis.extra_container_classes",
                    format!("{} is also the text label class", class),
                ));
            }
        }
    }

    fn validate_output(config: &Config, result: &mut ValidationResult) {
        if config.output.report_file.trim().is_empty() {
            result.add_error(ValidationError::new(
                "output.report_file",
                "report_file cannot be empty",
            ));
        }

        if config.output.counts_file.trim().is_empty() {
            result.add_error(ValidationError::new(
                "output.counts_file",
                "counts_file cannot be empty",
            ));
        }

        if config.output.line_thickness == 0 {
            result.add_error(ValidationError::new(
                "output.line_thickness",
                "line_thickness must be greater than 0",
            ));
        }

        if config.output.line_thickness > 20 {
            result.add_warning(ValidationWarning::new(
                "output.line_thickness",
                "line_thickness is very high (>20), outlines may hide small elements",
            ));
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&config.logging.level.to_lowercase().as_str()) {
            result.add_warning(ValidationWarning::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, valid_levels
                ),
            ));
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
