//! Configuration validation
//!
//! Rules:
//! - exporter filename is non-empty
//! - `template` and `template_path` are mutually exclusive
//! - set ids are non-empty and unique
//!
//! Endpoint syntax is not checked; it is passed through to the output as is.

use std::collections::HashSet;

use contracts::{ContractError, ExportBlueprint};

/// Validate an ExportBlueprint
///
/// Returns the first error encountered, or Ok(()).
pub fn validate(blueprint: &ExportBlueprint) -> Result<(), ContractError> {
    validate_exporter(blueprint)?;
    validate_set_ids(blueprint)?;
    Ok(())
}

/// Validate exporter options
fn validate_exporter(blueprint: &ExportBlueprint) -> Result<(), ContractError> {
    let exporter = &blueprint.exporter;

    if exporter.filename.as_os_str().is_empty() {
        return Err(ContractError::config_validation(
            "exporter.filename",
            "filename cannot be empty",
        ));
    }

    if exporter.template.is_some() && exporter.template_path.is_some() {
        return Err(ContractError::config_validation(
            "exporter.template / exporter.template_path",
            "template and template_path are mutually exclusive",
        ));
    }

    Ok(())
}

/// Validate set id presence and uniqueness
fn validate_set_ids(blueprint: &ExportBlueprint) -> Result<(), ContractError> {
    let mut seen = HashSet::new();
    for (idx, set) in blueprint.sets.iter().enumerate() {
        if set.id.is_empty() {
            return Err(ContractError::config_validation(
                format!("sets[{}].id", idx),
                "set id cannot be empty",
            ));
        }
        if !seen.insert(set.id.as_str()) {
            return Err(ContractError::config_validation(
                format!("sets[id={}]", set.id),
                "duplicate set id",
            ));
        }
    }
    Ok(())
}
