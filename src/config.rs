use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_MAX_DIFF_CHARS: usize = 8000;
pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 8192;

const CONFIG_FILE_NAME: &str = "config.json";

/// Settings resolved for one invocation: stored values, environment
/// overrides, and defaults folded together.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub enable_gemini: bool,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub include_scope: bool,
    pub max_diff_chars: usize,
    pub max_output_tokens: u32,
    pub workspace_root: PathBuf,
}

impl AppConfig {
    pub fn load(workspace_hint: &Path) -> AppResult<Self> {
        let stored = StoredConfig::load()?;

        let gemini_api_key = env::var("HADI_GEMINI_API_KEY")
            .ok()
            .filter(|key| !key.is_empty())
            .or(stored.gemini_api_key);

        Ok(Self {
            enable_gemini: stored.enable_gemini.unwrap_or(true),
            gemini_api_key,
            gemini_model: stored
                .gemini_model
                .filter(|model| !model.is_empty())
                .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string()),
            include_scope: stored.include_scope.unwrap_or(true),
            max_diff_chars: stored.max_diff_chars.unwrap_or(DEFAULT_MAX_DIFF_CHARS),
            max_output_tokens: stored
                .max_output_tokens
                .unwrap_or(DEFAULT_MAX_OUTPUT_TOKENS),
            workspace_root: workspace_hint.to_path_buf(),
        })
    }
}

/// On-disk configuration; every field optional so a partial file stays valid.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct StoredConfig {
    pub enable_gemini: Option<bool>,
    pub gemini_api_key: Option<String>,
    pub gemini_model: Option<String>,
    pub include_scope: Option<bool>,
    pub max_diff_chars: Option<usize>,
    pub max_output_tokens: Option<u32>,
}

impl StoredConfig {
    pub fn load() -> AppResult<Self> {
        let path = config_file_path()?;
        match fs::read_to_string(&path) {
            Ok(contents) => serde_json::from_str(&contents).map_err(|err| {
                AppError::Configuration(format!(
                    "invalid config file {}: {err}",
                    path.display()
                ))
            }),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(AppError::Io(err)),
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let path = config_file_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        let data = serde_json::to_string_pretty(self)
            .map_err(|err| AppError::Configuration(format!("failed to encode config: {err}")))?;
        fs::write(&path, data)?;
        Ok(())
    }
}

pub fn config_directory() -> AppResult<PathBuf> {
    if let Some(dir) = env::var_os("HADI_CONFIG_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = env::var_os("HOME").ok_or_else(|| {
        AppError::Configuration("HOME is not set; cannot locate config".to_string())
    })?;
    Ok(PathBuf::from(home).join(".config").join("hadi"))
}

pub fn config_file_path() -> AppResult<PathBuf> {
    Ok(config_directory()?.join(CONFIG_FILE_NAME))
}
