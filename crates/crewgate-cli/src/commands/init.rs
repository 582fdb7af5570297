//! Init command handler

use crate::error::CliError;
use crewgate::{CrewgateConfig, FeatureFlags};
use std::fs;
use std::path::Path;

/// Write a starter config with every capability enabled and one fresh token
pub async fn run_init(path: &Path, force: bool) -> Result<String, CliError> {
    println!("🚀 Initializing crewgate configuration...");

    if path.exists() && !force {
        return Err(CliError::InvalidInput(format!(
            "{} already exists (use --force to overwrite)",
            path.display()
        )));
    }

    let token = uuid::Uuid::new_v4().simple().to_string();
    let mut config = CrewgateConfig {
        features: FeatureFlags::all_enabled(),
        ..CrewgateConfig::default()
    };
    config.auth.tokens.insert(token.clone(), "admin".to_string());

    let content = if crewgate::config::is_json(path) {
        serde_json::to_string_pretty(&config)?
    } else {
        config.to_toml_string()?
    };
    fs::write(path, content)?;
    println!("📝 Wrote {}", path.display());

    // Create a sample .env file if it doesn't exist
    let env_path = path.parent().unwrap_or(Path::new(".")).join(".env");
    if !env_path.exists() {
        println!("📝 Creating .env file...");
        let env_content = format!(
            "# Crewgate environment\n{}=\n# CREWGATE_LOG_LEVEL=info\n",
            config.llm.api_key_env
        );
        fs::write(&env_path, env_content)?;
    }

    println!("\n✨ Configuration initialized successfully!");
    println!("\nNext steps:");
    println!("  1. Put your API key in .env ({})", config.llm.api_key_env);
    println!(
        "  2. Run 'crewgate-api --config-file {}'",
        path.display()
    );
    println!("  3. Call the API with 'Authorization: Bearer {}'", token);

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn writes_loadable_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewgate.toml");

        let token = run_init(&path, false).await.unwrap();
        let config = CrewgateConfig::load_from_file(&path).unwrap();

        assert_eq!(config.auth.tokens.get(&token).unwrap(), "admin");
        assert_eq!(config.features, FeatureFlags::all_enabled());
        assert!(dir.path().join(".env").exists());
    }

    #[tokio::test]
    async fn refuses_to_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("crewgate.toml");
        fs::write(&path, "").unwrap();

        assert!(run_init(&path, false).await.is_err());
        assert!(run_init(&path, true).await.is_ok());
    }
}
