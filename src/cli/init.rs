//! Init command implementation
//!
//! Scaffolds a Campaign Desk project: `campaign.toml`, `.env.example`,
//! `.gitignore` and the `data/` directory.

use super::output::Output;
use std::fs;
use std::path::{Path, PathBuf};

/// Result of the init operation
#[derive(Debug)]
pub enum InitResult {
    Success,
    /// campaign.toml exists and `--force` was not given
    AlreadyExists,
    Error(String),
}

/// Configuration for the init command
pub struct InitConfig {
    pub path: PathBuf,
    pub force: bool,
    pub host: String,
    pub port: u16,
}

/// Run the init command
pub fn run(config: InitConfig, output: &Output) -> InitResult {
    output.banner();
    output.header("Initializing Campaign Desk");

    let base_path = &config.path;

    let config_path = base_path.join("campaign.toml");
    if config_path.exists() && !config.force {
        output.warning("campaign.toml already exists!");
        output.hint("Use --force to overwrite existing files");
        return InitResult::AlreadyExists;
    }

    let data_dir = base_path.join("data");
    if data_dir.exists() {
        output.skipped("data", "already exists");
    } else {
        if let Err(e) = fs::create_dir_all(&data_dir) {
            output.error(&format!("Failed to create data/: {}", e));
            return InitResult::Error(e.to_string());
        }
        output.created("directory", "data");
    }

    let files = [
        ("config", "campaign.toml", generate_campaign_toml(&config)),
        ("env", ".env.example", generate_env_example().to_string()),
    ];
    for (kind, name, content) in &files {
        match write_file(&base_path.join(name), content, config.force) {
            Ok(true) => output.created(kind, name),
            Ok(false) => output.skipped(name, "already exists"),
            Err(e) => {
                output.error(&format!("Failed to create {}: {}", name, e));
                return InitResult::Error(e.to_string());
            }
        }
    }

    let gitignore_path = base_path.join(".gitignore");
    if !gitignore_path.exists() {
        match write_file(&gitignore_path, generate_gitignore(), false) {
            Ok(_) => output.created("file", ".gitignore"),
            Err(e) => output.warning(&format!("Failed to create .gitignore: {}", e)),
        }
    }

    output.complete("Campaign Desk project initialized!");

    output.header("Next Steps");
    output.info("1. Set up environment variables:");
    output.command("cp .env.example .env");
    output.command("# Edit .env and set JWT_SECRET (at least 32 characters)");
    output.info("2. Check the configuration:");
    output.command("campaign-server config --validate");
    output.info("3. Start the server:");
    output.command("campaign-server");

    output.hint(&format!(
        "Server will be available at http://{}:{}",
        config.host, config.port
    ));

    InitResult::Success
}

/// Writes `content` unless the file exists and `force` is off. Returns
/// whether the file was written.
fn write_file(path: &Path, content: &str, force: bool) -> std::io::Result<bool> {
    if path.exists() && !force {
        return Ok(false);
    }
    fs::write(path, content)?;
    Ok(true)
}

fn generate_campaign_toml(config: &InitConfig) -> String {
    format!(
        r#"# Campaign Desk configuration
# Secrets live in the environment (see .env.example), never in this file.

[server]
host = "{host}"
port = {port}
log_level = "info"

[auth]
# Environment variable holding the HS256 signing secret (>= 32 bytes)
jwt_secret_env = "JWT_SECRET"
issuer = "campaign-desk"
audience = "campaign-desk-web"
# Token lifetime in seconds
access_expiry = 3600

[database]
# Local SQLite file, or ":memory:" for an ephemeral database
url = "./data/campaign.db"
# Remote Turso database (build with --features turso)
# turso_url_env = "TURSO_URL"
# turso_token_env = "TURSO_AUTH_TOKEN"

[cors]
# Origins allowed to call the API with credentials; "*" is rejected
allowed_origins = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://localhost:8080",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:8080",
]
"#,
        host = config.host,
        port = config.port
    )
}

fn generate_env_example() -> &'static str {
    r#"# Campaign Desk Environment Variables
# Copy this file to .env and fill in the values.

# REQUIRED: JWT signing secret (minimum 32 characters)
# Generate with: openssl rand -base64 32
JWT_SECRET=change-me-in-production-use-at-least-32-characters

# Optional: log filter, overrides server.log_level
RUST_LOG=info,campaign_desk=debug

# Optional: Turso cloud database
# TURSO_URL=libsql://your-db.turso.io
# TURSO_AUTH_TOKEN=your-token
"#
}

fn generate_gitignore() -> &'static str {
    r#"/data/
*.db
*.db-journal
.env
.env.local
/target/
"#
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::toml_config::AppConfig;
    use tempfile::TempDir;

    fn init_config(dir: &TempDir) -> InitConfig {
        InitConfig {
            path: dir.path().to_path_buf(),
            force: false,
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }

    #[test]
    fn test_generated_toml_parses() {
        let dir = TempDir::new().unwrap();
        let content = generate_campaign_toml(&init_config(&dir));

        let config = AppConfig::from_toml(&content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.auth.jwt_secret_env, "JWT_SECRET");
        assert_eq!(config.cors.allowed_origins.len(), 5);
    }

    #[test]
    fn test_init_creates_files() {
        let dir = TempDir::new().unwrap();

        let result = run(init_config(&dir), &Output::no_color());

        assert!(matches!(result, InitResult::Success));
        assert!(dir.path().join("campaign.toml").exists());
        assert!(dir.path().join(".env.example").exists());
        assert!(dir.path().join(".gitignore").exists());
        assert!(dir.path().join("data").is_dir());
    }

    #[test]
    fn test_init_refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("campaign.toml"), "# mine").unwrap();

        let result = run(init_config(&dir), &Output::no_color());
        assert!(matches!(result, InitResult::AlreadyExists));
        assert_eq!(
            fs::read_to_string(dir.path().join("campaign.toml")).unwrap(),
            "# mine"
        );

        let forced = InitConfig {
            force: true,
            ..init_config(&dir)
        };
        assert!(matches!(
            run(forced, &Output::no_color()),
            InitResult::Success
        ));
        assert!(fs::read_to_string(dir.path().join("campaign.toml"))
            .unwrap()
            .contains("[auth]"));
    }
}
