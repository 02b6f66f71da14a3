use crate::error::{Error, Result};
use crate::models::{ColorFormat, OutputFormat};
use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

pub const CONFIG_FILE: &str = ".sitestyles.yml";
const GLOBAL_CONFIG_DIR: &str = ".config/sitestyles";
pub const DEFAULT_API_URL: &str = "https://get-site-styles-api.onrender.com";
pub const API_URL_ENV: &str = "SITESTYLES_API_URL";
pub const API_KEY_ENV: &str = "SITESTYLES_API_KEY";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub api_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub format: OutputFormat,
    #[serde(default)]
    pub color_format: ColorFormat,
    #[serde(default)]
    pub compact: bool,
    /// Request timeout in seconds; the HTTP client default applies when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            api_key: String::new(),
            format: OutputFormat::default(),
            color_format: ColorFormat::default(),
            compact: false,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Project file first, then the global file, then defaults.
    pub fn load(project_dir: &Path) -> Result<Self> {
        let config_path = project_dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load_file(&config_path)
        } else if let Some(global_config) = Self::load_global()? {
            Ok(global_config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        debug!("loading config from {}", path.display());
        let content = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save(&self, project_dir: &Path) -> Result<()> {
        let config_path = project_dir.join(CONFIG_FILE);
        let content = serde_yaml::to_string(self)?;
        fs::write(&config_path, content)?;
        Ok(())
    }

    pub fn load_global() -> Result<Option<Self>> {
        if let Some(home) = dirs::home_dir() {
            let global_config_path = home.join(GLOBAL_CONFIG_DIR).join(CONFIG_FILE);
            if global_config_path.exists() {
                Ok(Some(Self::load_file(&global_config_path)?))
            } else {
                Ok(None)
            }
        } else {
            Ok(None)
        }
    }

    pub fn save_global(&self) -> Result<()> {
        let home = dirs::home_dir()
            .ok_or_else(|| Error::Config("could not find the home directory".to_string()))?;
        let global_config_dir = home.join(GLOBAL_CONFIG_DIR);
        fs::create_dir_all(&global_config_dir)?;
        let content = serde_yaml::to_string(self)?;
        fs::write(global_config_dir.join(CONFIG_FILE), content)?;
        Ok(())
    }

    /// Overrides `api_url` and `api_key` from `lookup`, skipping empty values.
    pub fn apply_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(API_URL_ENV).filter(|v| !v.is_empty()) {
            debug!("api_url taken from {}", API_URL_ENV);
            self.api_url = url;
        }
        if let Some(key) = lookup(API_KEY_ENV).filter(|v| !v.is_empty()) {
            debug!("api_key taken from {}", API_KEY_ENV);
            self.api_key = key;
        }
        self
    }

    pub fn apply_env(self) -> Self {
        self.apply_overrides(|name| std::env::var(name).ok())
    }

    pub fn validate(&self) -> Result<()> {
        if self.api_url.trim().is_empty() {
            return Err(Error::Config("api_url must not be empty".to_string()));
        }
        url::Url::parse(&self.api_url)
            .map_err(|e| Error::Config(format!("invalid api_url {}: {}", self.api_url, e)))?;
        Ok(())
    }
}

pub async fn configure_interactive(project_dir: &Path, global: bool) -> anyhow::Result<()> {
    let theme = ColorfulTheme::default();
    let current_config = if global {
        Config::load_global()?.unwrap_or_default()
    } else {
        Config::load(project_dir)?
    };
    println!("\n🎨 sitestyles configuration");
    println!("===========================");
    if global {
        println!("Editing the global configuration\n");
    } else {
        println!("Editing the project configuration\n");
    }

    let api_url: String = Input::with_theme(&theme)
        .with_prompt("API URL")
        .with_initial_text(&current_config.api_url)
        .validate_with(|input: &String| -> std::result::Result<(), String> {
            url::Url::parse(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()?;
    let api_key: String = Input::with_theme(&theme)
        .with_prompt("API Key")
        .with_initial_text(&current_config.api_key)
        .allow_empty(true)
        .interact_text()?;

    let format_items: Vec<String> = OutputFormat::ALL
        .iter()
        .map(|f| format!("{} - {}", f.label(), f.description()))
        .collect();
    let format_index = Select::with_theme(&theme)
        .with_prompt("Default output format")
        .default(
            OutputFormat::ALL
                .iter()
                .position(|f| *f == current_config.format)
                .unwrap_or(0),
        )
        .items(&format_items)
        .interact()?;

    let color_items: Vec<String> = ColorFormat::ALL
        .iter()
        .map(|c| c.as_str().to_uppercase())
        .collect();
    let color_index = Select::with_theme(&theme)
        .with_prompt("Default color format")
        .default(
            ColorFormat::ALL
                .iter()
                .position(|c| *c == current_config.color_format)
                .unwrap_or(0),
        )
        .items(&color_items)
        .interact()?;

    let compact = Confirm::with_theme(&theme)
        .with_prompt("Compact output by default?")
        .default(current_config.compact)
        .interact()?;

    let new_config = Config {
        api_url,
        api_key,
        format: OutputFormat::ALL[format_index],
        color_format: ColorFormat::ALL[color_index],
        compact,
        timeout_secs: current_config.timeout_secs,
    };
    if global {
        new_config.save_global()?;
        info!("global configuration updated");
    } else {
        new_config.save(project_dir)?;
        info!("project configuration updated");
    }
    Ok(())
}

pub fn init_project(project_dir: &Path) -> Result<()> {
    let config_path = project_dir.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(Error::Config(format!(
            "config file already exists: {}",
            config_path.display()
        )));
    }
    Config::default().save(project_dir)?;
    info!("created config file {}", config_path.display());

    // The file holds the API key, keep it out of version control.
    let gitignore_path = project_dir.join(".gitignore");
    if gitignore_path.exists() {
        let mut content = fs::read_to_string(&gitignore_path)?;
        if !content.lines().any(|line| line.trim() == CONFIG_FILE) {
            if !content.is_empty() && !content.ends_with('\n') {
                content.push('\n');
            }
            content.push_str(CONFIG_FILE);
            content.push('\n');
            fs::write(&gitignore_path, content)?;
            info!("added {} to .gitignore", CONFIG_FILE);
        }
    } else {
        fs::write(&gitignore_path, format!("{}\n", CONFIG_FILE))?;
        info!("created .gitignore with {}", CONFIG_FILE);
    }
    Ok(())
}

/// Project or global file with environment overrides applied, validated.
pub fn get_effective_config(project_dir: &Path) -> Result<Config> {
    let config = Config::load(project_dir)?.apply_env();
    config.validate()?;
    Ok(config)
}
