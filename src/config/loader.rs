//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::CncFabConfig;
use crate::domain::errors::CncFabError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into CncFabConfig
/// 4. Applies environment variable overrides (CNCFAB_* prefix)
/// 5. Validates the configuration
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Errors
///
/// Returns an error if:
/// - File cannot be read
/// - TOML parsing fails
/// - Environment variable substitution fails
/// - Configuration validation fails
///
/// # Examples
///
/// ```no_run
/// use cncfab::config::loader::load_config;
///
/// let config = load_config("cncfab.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<CncFabConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(CncFabError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        CncFabError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: CncFabConfig = toml::from_str(&contents)
        .map_err(|e| CncFabError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    config.validate().map_err(|e| {
        CncFabError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error if a referenced environment variable is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| CncFabError::Configuration(format!("Invalid substitution pattern: {e}")))?;
    let mut lines = Vec::new();
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            lines.push(line.to_string());
            continue;
        }

        let processed = re.replace_all(line, |cap: &regex::Captures<'_>| {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => value,
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                    String::new()
                }
            }
        });
        lines.push(processed.into_owned());
    }

    if !missing_vars.is_empty() {
        return Err(CncFabError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(lines.join("\n"))
}

/// Applies environment variable overrides using CNCFAB_* prefix
///
/// Environment variables follow the pattern: CNCFAB_<SECTION>_<KEY>
/// For example: CNCFAB_EXPORT_DEFAULT_FOLDER, CNCFAB_LOGGING_LOCAL_PATH
fn apply_env_overrides(config: &mut CncFabConfig) {
    // Application overrides
    if let Ok(val) = std::env::var("CNCFAB_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    // Export overrides
    if let Ok(val) = std::env::var("CNCFAB_EXPORT_DEFAULT_FOLDER") {
        config.export.default_folder = val;
    }

    // Shared parameter overrides
    if let Ok(val) = std::env::var("CNCFAB_SHARED_PARAMETERS_FILENAME") {
        config.shared_parameters.filename = Some(val);
    }
    if let Ok(val) = std::env::var("CNCFAB_SHARED_PARAMETERS_GROUP_NAME") {
        config.shared_parameters.group_name = val;
    }

    // Logging overrides
    if let Ok(val) = std::env::var("CNCFAB_LOGGING_LOCAL_ENABLED") {
        config.logging.local_enabled = val.parse().unwrap_or(false);
    }
    if let Ok(val) = std::env::var("CNCFAB_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("CNCFAB_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_substitute_env_vars() {
        std::env::set_var("CNCFAB_LOADER_TEST_VAR", "test_value");
        let input = "filename = \"${CNCFAB_LOADER_TEST_VAR}\"";
        let result = substitute_env_vars(input).unwrap();
        assert_eq!(result, "filename = \"test_value\"");
        std::env::remove_var("CNCFAB_LOADER_TEST_VAR");
    }

    #[test]
    fn test_substitute_env_vars_missing() {
        std::env::remove_var("CNCFAB_LOADER_MISSING_VAR");
        let input = "filename = \"${CNCFAB_LOADER_MISSING_VAR}\"";
        let err = substitute_env_vars(input).unwrap_err();
        assert!(err.to_string().contains("CNCFAB_LOADER_MISSING_VAR"));
    }

    #[test]
    fn test_substitute_skips_comments() {
        std::env::remove_var("CNCFAB_LOADER_COMMENTED_VAR");
        let input = "# filename = \"${CNCFAB_LOADER_COMMENTED_VAR}\"\n[export]";
        assert_eq!(substitute_env_vars(input).unwrap(), input);
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("nonexistent.toml");
        assert!(matches!(result, Err(CncFabError::Configuration(_))));
    }

    #[test]
    fn test_load_config_valid() {
        let toml_content = r#"
[application]
log_level = "debug"

[export]
default_folder = "/srv/cnc"

[shared_parameters]
filename = "/srv/cnc/shared.txt"
group_name = "Fabrication"
"#;

        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file.write_all(toml_content.as_bytes()).unwrap();
        temp_file.flush().unwrap();

        let config = load_config(temp_file.path()).unwrap();
        assert_eq!(config.application.log_level, "debug");
        assert_eq!(config.export.default_folder, "/srv/cnc");
        assert_eq!(config.shared_parameters.filename.as_deref(), Some("/srv/cnc/shared.txt"));
        assert_eq!(config.shared_parameters.group_name, "Fabrication");
    }
}
