//! Check command - validate configuration

use std::path::Path;

use color_eyre::eyre::{Result, bail};
use parlor_core::{Config, permission::PERMISSION_REMEDIATION};

/// Validation result.
#[derive(Debug, Default)]
struct ValidationResult {
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl ValidationResult {
    fn add_error(&mut self, msg: impl Into<String>) {
        self.errors.push(msg.into());
    }

    fn add_warning(&mut self, msg: impl Into<String>) {
        self.warnings.push(msg.into());
    }

    fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    fn has_warnings(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// Run the check command.
///
/// Validates the configuration file and reports operational warnings.
pub fn run(config_path: &Path, strict: bool) -> Result<()> {
    tracing::info!(?config_path, strict, "Checking configuration");

    let mut result = ValidationResult::default();

    println!("Checking configuration...");
    let config = match Config::load_with_env(config_path) {
        Ok(c) => {
            println!("  ✓ Configuration valid");
            Some(c)
        }
        Err(e) => {
            result.add_error(format!("Configuration error: {e}"));
            println!("  ✗ Configuration invalid: {e}");
            None
        }
    };

    if let Some(ref cfg) = config {
        println!("\nChecking configuration values...");
        check_config_values(cfg, &mut result);
    }

    // Print summary
    println!();
    println!("Summary:");
    println!("  Errors:   {}", result.errors.len());
    println!("  Warnings: {}", result.warnings.len());

    if result.has_errors() {
        println!();
        println!("Errors:");
        for err in &result.errors {
            println!("  ✗ {err}");
        }
    }

    if result.has_warnings() {
        println!();
        println!("Warnings:");
        for warn in &result.warnings {
            println!("  ⚠ {warn}");
        }
    }

    if result.has_errors() {
        bail!("Validation failed with {} error(s)", result.errors.len());
    }

    if strict && result.has_warnings() {
        bail!(
            "Validation failed with {} warning(s) (strict mode)",
            result.warnings.len()
        );
    }

    println!();
    println!("✓ All checks passed");

    Ok(())
}

/// Operational checks on a valid configuration.
fn check_config_values(config: &Config, result: &mut ValidationResult) {
    if config.content.write_token.is_none() {
        result.add_warning(format!(
            "content.write_token is not set; writes will fail with a permission error.\n{PERMISSION_REMEDIATION}"
        ));
    }

    if config.content.read_token.is_none() && !config.content.use_cdn {
        result.add_warning(
            "content.read_token is not set; private datasets will reject queries".to_string(),
        );
    }

    if !Path::new(&config.server.site_root).exists() {
        result.add_warning(format!(
            "server.site_root '{}' does not exist; build the frontend first",
            config.server.site_root
        ));
    }

    if config.live.webhook_secret.is_none() {
        result.add_warning("live.webhook_secret is not set; anyone can trigger invalidations");
    }

    if config.content.tags.is_empty() {
        result.add_warning("content.tags is empty; live updates will never refresh chats");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_config(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join("parlor.toml");
        std::fs::write(&path, content).expect("write");
        (dir, path)
    }

    #[test]
    fn test_missing_tokens_are_warnings() {
        let (_dir, path) = write_config(
            r#"
[content]
project_id = "abc123"
"#,
        );
        let config = Config::load(&path).expect("load");
        let mut result = ValidationResult::default();
        check_config_values(&config, &mut result);

        assert!(!result.has_errors());
        assert!(result.warnings.iter().any(|w| w.contains("write_token")));
        assert!(result.warnings.iter().any(|w| w.contains("read_token")));
        assert!(result.warnings.iter().any(|w| w.contains("webhook_secret")));
    }

    #[test]
    fn test_complete_config_has_no_warnings() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let site_root = dir.path().join("site");
        std::fs::create_dir(&site_root).expect("mkdir");
        let path = dir.path().join("parlor.toml");
        std::fs::write(
            &path,
            format!(
                r#"
[server]
site_root = "{}"

[content]
project_id = "abc123"
read_token = "sk-read"
write_token = "sk-write"

[live]
webhook_secret = "s3cret"
"#,
                site_root.display().to_string().replace('\\', "/")
            ),
        )
        .expect("write");

        let config = Config::load(&path).expect("load");
        let mut result = ValidationResult::default();
        check_config_values(&config, &mut result);

        assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    }

    #[test]
    fn test_run_fails_on_invalid_config() {
        let (_dir, path) = write_config(
            r#"
[content]
project_id = ""
"#,
        );
        assert!(run(&path, false).is_err());
    }

    #[test]
    fn test_run_strict_fails_on_warnings() {
        let (_dir, path) = write_config(
            r#"
[content]
project_id = "abc123"
"#,
        );
        assert!(run(&path, false).is_ok());
        assert!(run(&path, true).is_err());
    }
}
