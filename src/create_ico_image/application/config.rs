use super::error::ApplicationError;
use image::imageops::FilterType;

pub const DEFAULT_TARGET_SIZES: [u32; 4] = [16, 24, 32, 48];

const ENV_TARGET_SIZES: &str = "ICO_TARGET_SIZES";
const ENV_RESIZE_FILTER: &str = "ICO_RESIZE_FILTER";
const ENV_PARALLEL_RESIZE: &str = "ICO_PARALLEL_RESIZE";

#[derive(Debug, Clone)]
pub struct IcoConfig {
    pub target_sizes: Vec<u32>,
    pub resize_filter: FilterType,
    pub parallel_resize: bool,
}

impl Default for IcoConfig {
    fn default() -> Self {
        Self {
            target_sizes: DEFAULT_TARGET_SIZES.to_vec(),
            resize_filter: FilterType::Lanczos3,
            parallel_resize: true,
        }
    }
}

// ICO_* 環境変数で既定値を上書きする
impl IcoConfig {
    pub fn from_env() -> Result<Self, ApplicationError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ApplicationError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_TARGET_SIZES) {
            config.target_sizes = parse_target_sizes(&raw)?;
        }
        if let Some(raw) = lookup(ENV_RESIZE_FILTER) {
            config.resize_filter = parse_filter(&raw)?;
        }
        if let Some(raw) = lookup(ENV_PARALLEL_RESIZE) {
            config.parallel_resize = parse_bool(ENV_PARALLEL_RESIZE, &raw)?;
        }

        Ok(config)
    }
}

// 空文字列はバリアントなし (元画像のみ) として扱う
fn parse_target_sizes(raw: &str) -> Result<Vec<u32>, ApplicationError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            let size: u32 = s.parse().map_err(|_| {
                ApplicationError::ConfigurationError(format!("{}: '{}' is not a number", ENV_TARGET_SIZES, s))
            })?;
            if !(1..=256).contains(&size) {
                return Err(ApplicationError::ConfigurationError(format!(
                    "{}: {} is outside 1..=256",
                    ENV_TARGET_SIZES, size
                )));
            }
            Ok(size)
        })
        .collect()
}

fn parse_filter(raw: &str) -> Result<FilterType, ApplicationError> {
    match raw.trim().to_lowercase().as_str() {
        "nearest" => Ok(FilterType::Nearest),
        "triangle" => Ok(FilterType::Triangle),
        "catmullrom" => Ok(FilterType::CatmullRom),
        "gaussian" => Ok(FilterType::Gaussian),
        "lanczos3" => Ok(FilterType::Lanczos3),
        other => Err(ApplicationError::ConfigurationError(format!(
            "{}: unknown filter '{}' (nearest / triangle / catmullrom / gaussian / lanczos3)",
            ENV_RESIZE_FILTER, other
        ))),
    }
}

fn parse_bool(key: &str, raw: &str) -> Result<bool, ApplicationError> {
    match raw.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        other => Err(ApplicationError::ConfigurationError(format!("{}: '{}' is not a boolean", key, other))),
    }
}
