// SPDX-FileCopyrightText: 2026 AdaptKit Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Post-deserialization validation for configuration values.
//!
//! Validates semantic constraints that cannot be expressed via serde attributes,
//! such as section name shape, folder key form and log file paths.

use std::path::Path;

use adaptkit_core::Uri;

use crate::diagnostic::ConfigError;
use crate::model::{AdaptKitConfig, SectionSettings};

/// Deepest nesting the value renderer may be asked to descend into.
pub const MAX_INSPECT_DEPTH: usize = 64;

/// Validate a deserialized configuration for semantic correctness.
///
/// Returns `Ok(())` if all validations pass, or `Err(Vec<ConfigError>)` with
/// all collected validation errors (does not fail fast).
pub fn validate_config(config: &AdaptKitConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if let Some(message) = section_name_problem(&config.log.section) {
        errors.push(ConfigError::Validation {
            message: format!("log.section {message}"),
        });
    }

    if config.log.output_name.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "log.output_name must not be empty".to_string(),
        });
    }

    if let Some(depth) = config.log.inspect.depth
        && depth > MAX_INSPECT_DEPTH
    {
        errors.push(ConfigError::Validation {
            message: format!("log.inspect.depth must be at most {MAX_INSPECT_DEPTH}, got {depth}"),
        });
    }

    for (name, settings) in &config.sections {
        validate_section(&format!("sections.{name}"), name, settings, &mut errors);
    }

    for (key, folder) in &config.folders {
        match key.parse::<Uri>() {
            Ok(uri) if uri.is_file() && !Path::new(&uri.path).is_absolute() => {
                errors.push(ConfigError::Validation {
                    message: format!("folders.\"{key}\" must be an absolute path"),
                });
            }
            Ok(_) => {}
            Err(e) => {
                errors.push(ConfigError::Validation {
                    message: format!("folders.\"{key}\" is not a valid folder URI: {e}"),
                });
            }
        }

        for (name, settings) in &folder.sections {
            validate_section(
                &format!("folders.\"{key}\".sections.{name}"),
                name,
                settings,
                &mut errors,
            );
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn validate_section(
    prefix: &str,
    name: &str,
    settings: &SectionSettings,
    errors: &mut Vec<ConfigError>,
) {
    if let Some(message) = section_name_problem(name) {
        errors.push(ConfigError::Validation {
            message: format!("{prefix}: section name {message}"),
        });
    }

    if let Some(file) = &settings.logfile
        && !file.is_empty()
        && file.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: format!("{prefix}.logfile must not be whitespace only"),
        });
    }
}

fn section_name_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("must not be empty")
    } else if name.contains('.') {
        Some("must not contain `.`")
    } else if name.chars().any(char::is_whitespace) {
        Some("must not contain whitespace")
    } else {
        None
    }
}
