use super::progress::is_interactive;
use super::prompts::prompt_password;
use super::table::details_table;
use super::AppContext;
use crate::output::{Output, OutputFormat};
use crate::ConfigCommands;
use color_eyre::Result;
use serde_json::json;
use watchlist_config::{Config, CredentialStore, OMDB_API_KEY_ENV};

pub fn run_config(context: &AppContext, cmd: ConfigCommands, output: &Output) -> Result<()> {
    match cmd {
        ConfigCommands::Show => show_config(context, output),
        ConfigCommands::ApiKey { clear: true, .. } => clear_api_key(context, output),
        ConfigCommands::ApiKey { key, .. } => configure_api_key(context, key, output),
        ConfigCommands::Init { force } => init_config(context, force, output),
    }
}

/// Keep the first and last two characters of a secret
fn mask_string(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..2].iter().collect();
    let tail: String = chars[chars.len() - 2..].iter().collect();
    format!("{}{}{}", head, "*".repeat(chars.len() - 4), tail)
}

/// Where the effective API key comes from, for display only
fn api_key_source(config: &Config, credentials: &CredentialStore) -> &'static str {
    let present = |value: Option<&String>| value.is_some_and(|v| !v.trim().is_empty());
    if present(std::env::var(OMDB_API_KEY_ENV).ok().as_ref()) {
        "environment"
    } else if present(credentials.get_omdb_api_key()) {
        "credentials file"
    } else if present(config.omdb.api_key.as_ref()) {
        "config file"
    } else {
        "not set"
    }
}

fn show_config(context: &AppContext, output: &Output) -> Result<()> {
    let config = &context.config;
    let api_key = config.resolve_api_key(&context.credentials);
    let masked_key = api_key.as_deref().map(mask_string).unwrap_or_default();
    let key_source = api_key_source(config, &context.credentials);
    let storage_path = config.storage_path(&context.paths);

    match output.format() {
        OutputFormat::Human => {
            if output.is_quiet() {
                return Ok(());
            }
            let files = details_table(
                "Files",
                vec![
                    ("Config", context.paths.config_file().display().to_string()),
                    ("Credentials", context.paths.credentials_file().display().to_string()),
                    ("Watchlist", storage_path.display().to_string()),
                ],
            );
            println!("{}\n", files);

            let omdb = details_table(
                "OMDb",
                vec![
                    ("API Key", format!("{} ({})", masked_key, key_source)),
                    ("Base URL", config.omdb.base_url.clone()),
                    ("Timeout", format!("{} seconds", config.omdb.timeout_secs)),
                    ("Retries", config.omdb.max_retries.to_string()),
                    ("Retry Backoff", format!("{} ms", config.omdb.retry_backoff_ms)),
                ],
            );
            println!("{}\n", omdb);

            let general = details_table(
                "Watchlist",
                vec![
                    ("Seed On First Run", config.storage.seed_on_first_run.to_string()),
                    ("Section Size", config.home.section_size.to_string()),
                    (
                        "Log File",
                        config
                            .logging
                            .file
                            .as_ref()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "stderr".to_string()),
                    ),
                ],
            );
            println!("{}", general);
        }
        OutputFormat::Json | OutputFormat::JsonPretty => {
            output.json(&json!({
                "config_file": context.paths.config_file(),
                "watchlist_file": storage_path,
                "omdb": {
                    "api_key": masked_key,
                    "api_key_source": key_source,
                    "base_url": config.omdb.base_url,
                    "timeout_secs": config.omdb.timeout_secs,
                    "max_retries": config.omdb.max_retries,
                    "retry_backoff_ms": config.omdb.retry_backoff_ms,
                },
                "storage": { "seed_on_first_run": config.storage.seed_on_first_run },
                "home": { "section_size": config.home.section_size },
                "logging": { "file": config.logging.file },
            }));
        }
    }
    Ok(())
}

fn configure_api_key(context: &AppContext, key: Option<String>, output: &Output) -> Result<()> {
    let key = match key {
        Some(key) => key,
        None if is_interactive() => prompt_password("OMDb API key")?,
        None => {
            return Err(color_eyre::eyre::eyre!(
                "No API key given. Pass it as an argument or run interactively."
            ))
        }
    };
    let key = key.trim().to_string();
    if key.is_empty() {
        return Err(color_eyre::eyre::eyre!("API key cannot be empty"));
    }

    let mut credentials = CredentialStore::new(context.paths.credentials_file());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    credentials.set_omdb_api_key(key);
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;

    output.success(format!(
        "OMDb API key saved to {}",
        context.paths.credentials_file().display()
    ));
    if std::env::var(OMDB_API_KEY_ENV).is_ok() {
        output.warn(format!("{} is set and takes precedence over the saved key", OMDB_API_KEY_ENV));
    }
    Ok(())
}

fn clear_api_key(context: &AppContext, output: &Output) -> Result<()> {
    let mut credentials = CredentialStore::new(context.paths.credentials_file());
    credentials
        .load()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to load credentials: {}", e))?;
    if credentials.get_omdb_api_key().is_none() {
        output.info("No OMDb API key stored");
        return Ok(());
    }
    credentials.clear_omdb_api_key();
    credentials
        .save()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to save credentials: {}", e))?;
    output.success(format!(
        "OMDb API key removed from {}",
        context.paths.credentials_file().display()
    ));
    Ok(())
}

fn init_config(context: &AppContext, force: bool, output: &Output) -> Result<()> {
    let config_file = context.paths.config_file();
    if config_file.exists() && !force {
        output.warn(format!(
            "Configuration already exists at {}. Use --force to overwrite it.",
            config_file.display()
        ));
        return Ok(());
    }

    context
        .paths
        .ensure_directories()
        .map_err(|e| color_eyre::eyre::eyre!("Failed to create directories: {}", e))?;
    Config::default()
        .save_to_file(&config_file)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to write {}: {}", config_file.display(), e))?;

    output.success(format!("Wrote default configuration to {}", config_file.display()));
    Ok(())
}
