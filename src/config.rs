// config.rs - 配置管理模块
// 优先从 ~/.config/spotlight/config.toml 读取配置，环境变量可以覆盖文件中的值

use rust_i18n::t;
use schemars::JsonSchema; // 引入用于生成 JSON Schema 的 trait
use serde::{Deserialize, Serialize};
use shellexpand::tilde; // 用于展开 ~ 和环境变量
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::{DEFAULT_USER_AGENT, HttpSettings};

/// 展开路径中的 ~ 和环境变量
/// 支持格式: ~/path, $HOME/path, ${HOME}/path
pub fn expand_path(path_str: &str) -> PathBuf {
    let expanded = tilde(path_str).into_owned();
    PathBuf::from(expanded)
}

/// 映射 config.toml 文件内容的嵌套结构体
#[derive(Debug, Deserialize, Serialize, Default, JsonSchema)]
struct ConfigFile {
    #[serde(default)]
    common: CommonConfig,
    #[serde(default)]
    api: ApiConfig,
}

#[derive(Debug, Deserialize, Serialize, JsonSchema)]
struct CommonConfig {
    /// 图片保存目录 (支持 ~、$HOME 等环境变量，相对路径相对于当前工作目录)
    #[serde(default)]
    save_dir: Option<String>,
    /// 每次运行下载的图片数量
    #[serde(default = "default_count")]
    count: usize,
    /// 下载前是否清空保存目录
    #[serde(default = "default_clean")]
    clean: bool,
}

impl Default for CommonConfig {
    fn default() -> Self {
        Self {
            save_dir: None,
            count: default_count(),
            clean: default_clean(),
        }
    }
}

/// 聚焦接口参数，一般无需修改
#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema)]
pub struct ApiConfig {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_placement")]
    pub placement: String,
    #[serde(default = "default_country")]
    pub country: String,
    #[serde(default = "default_locale")]
    pub locale: String,
    /// 单个请求的超时秒数
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            placement: default_placement(),
            country: default_country(),
            locale: default_locale(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_count() -> usize {
    4
}
fn default_clean() -> bool {
    true
}
fn default_save_dir() -> String {
    "images".to_string()
}
fn default_endpoint() -> String {
    HttpSettings::default().endpoint
}
fn default_placement() -> String {
    HttpSettings::default().placement
}
fn default_country() -> String {
    HttpSettings::default().country
}
fn default_locale() -> String {
    HttpSettings::default().locale
}
fn default_timeout_secs() -> u64 {
    HttpSettings::default().timeout.as_secs()
}
fn default_user_agent() -> String {
    DEFAULT_USER_AGENT.to_string()
}

/// 应用全局配置项
#[derive(Debug)]
pub struct AppConfig {
    /// 图片保存目录 (优先级：ENV > TOML)
    pub save_dir: PathBuf,
    /// 下载数量 (优先级：ENV > TOML)
    pub count: usize,
    /// 下载前是否清空目录
    pub clean: bool,
    pub api: ApiConfig,
    /// 配置文件所在路径
    pub config_path: PathBuf,
}

impl AppConfig {
    /// 初始化配置
    pub fn new() -> Self {
        let home = env::var_os("HOME").map(PathBuf::from).unwrap_or_default();
        let config_path = home.join(".config").join("spotlight").join("config.toml");

        let config_file = Self::load_config_from_file(&config_path).unwrap_or_default();
        Self::resolve(config_path, config_file, |key| env::var(key).ok())
    }

    /// 合并配置文件与环境变量
    fn resolve(
        config_path: PathBuf,
        file: ConfigFile,
        env_lookup: impl Fn(&str) -> Option<String>,
    ) -> Self {
        let save_dir = env_lookup("SPOTLIGHT_SAVE_DIR")
            .or(file.common.save_dir)
            .unwrap_or_else(default_save_dir);

        // 环境变量不是合法数字时回退到配置文件
        let count = env_lookup("SPOTLIGHT_COUNT")
            .and_then(|v| v.trim().parse().ok())
            .unwrap_or(file.common.count);

        Self {
            save_dir: expand_path(&save_dir),
            count,
            clean: file.common.clean,
            api: file.api,
            config_path,
        }
    }

    /// 辅助函数：解析 TOML 配置文件
    fn load_config_from_file(path: &Path) -> Option<ConfigFile> {
        fs::read_to_string(path)
            .ok()
            .and_then(|content| toml::from_str(&content).ok())
    }

    /// 由接口配置生成 HTTP 请求参数
    pub fn http_settings(&self) -> HttpSettings {
        HttpSettings {
            endpoint: self.api.endpoint.clone(),
            placement: self.api.placement.clone(),
            country: self.api.country.clone(),
            locale: self.api.locale.clone(),
            timeout: self.request_timeout(),
            user_agent: self.api.user_agent.clone(),
        }
    }

    /// 单个请求的超时时间，0 视为未配置，使用默认值
    fn request_timeout(&self) -> Duration {
        match self.api.timeout_secs {
            0 => Duration::from_secs(default_timeout_secs()),
            secs => Duration::from_secs(secs),
        }
    }

    fn to_file(&self) -> ConfigFile {
        ConfigFile {
            common: CommonConfig {
                save_dir: Some(self.save_dir.to_string_lossy().to_string()),
                count: self.count,
                clean: self.clean,
            },
            api: self.api.clone(),
        }
    }

    /// 修改单个配置项 (支持: count, dir, clean)
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), String> {
        match key {
            "count" | "n" => {
                self.count = value
                    .trim()
                    .parse()
                    .map_err(|_| t!("config_error_value", key => key, value => value).to_string())?;
            }
            "dir" | "save_dir" => self.save_dir = expand_path(value),
            "clean" => {
                self.clean = parse_switch(value)
                    .ok_or_else(|| t!("config_error_value", key => key, value => value).to_string())?;
            }
            _ => return Err(t!("config_error_unknown_key", key => key).to_string()),
        }
        Ok(())
    }

    /// 将配置保存回文件
    pub fn save(&self) -> std::io::Result<()> {
        if let Some(parent) = self.config_path.parent() {
            fs::create_dir_all(parent)?;
        }
        let toml_str = toml::to_string_pretty(&self.to_file()).map_err(std::io::Error::other)?;
        fs::write(&self.config_path, toml_str)
    }

    /// 获取配置文件的 JSON Schema
    pub fn get_schema() -> String {
        let schema = schemars::schema_for!(ConfigFile);
        serde_json::to_string_pretty(&schema).unwrap_or_default()
    }

    /// 将当前配置转换为 TOML 字符串
    pub fn to_toml(&self) -> String {
        toml::to_string_pretty(&self.to_file())
            .unwrap_or_else(|_| "# Error serializing config".to_string())
    }
}

/// 解析 yes/no 形式的开关
pub fn parse_switch(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "yes" | "y" | "true" | "1" | "on" => Some(true),
        "no" | "n" | "false" | "0" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn defaults_without_file() {
        let config = AppConfig::resolve(PathBuf::from("c.toml"), ConfigFile::default(), no_env);
        assert_eq!(config.save_dir, PathBuf::from("images"));
        assert_eq!(config.count, 4);
        assert!(config.clean);

        let http = config.http_settings();
        assert_eq!(http.endpoint, "https://fd.api.iris.microsoft.com/v4/api/selection");
        assert_eq!(http.timeout, Duration::from_secs(10));
        assert_eq!(http.placement, "88000820");
    }

    #[test]
    fn partial_file_keeps_defaults_for_missing_keys() {
        let file: ConfigFile = toml::from_str(
            r#"
            [common]
            count = 9
            [api]
            locale = "en-US"
            "#,
        )
        .unwrap();
        let config = AppConfig::resolve(PathBuf::from("c.toml"), file, no_env);
        assert_eq!(config.count, 9);
        assert!(config.clean);
        assert_eq!(config.api.locale, "en-US");
        assert_eq!(config.api.country, "CN");
    }

    #[test]
    fn zero_timeout_uses_default() {
        let file: ConfigFile = toml::from_str(
            r#"
            [api]
            timeout_secs = 0
            "#,
        )
        .unwrap();
        let config = AppConfig::resolve(PathBuf::from("c.toml"), file, no_env);
        assert_eq!(config.http_settings().timeout, Duration::from_secs(10));

        let file: ConfigFile = toml::from_str("[api]\ntimeout_secs = 30\n").unwrap();
        let config = AppConfig::resolve(PathBuf::from("c.toml"), file, no_env);
        assert_eq!(config.http_settings().timeout, Duration::from_secs(30));
    }

    #[test]
    fn env_overrides_file() {
        let file: ConfigFile = toml::from_str(
            r#"
            [common]
            save_dir = "from-file"
            count = 2
            "#,
        )
        .unwrap();
        let env: HashMap<&str, &str> =
            HashMap::from([("SPOTLIGHT_SAVE_DIR", "from-env"), ("SPOTLIGHT_COUNT", "12")]);
        let config = AppConfig::resolve(PathBuf::from("c.toml"), file, |k| {
            env.get(k).map(|v| v.to_string())
        });
        assert_eq!(config.save_dir, PathBuf::from("from-env"));
        assert_eq!(config.count, 12);
    }

    #[test]
    fn bad_env_count_falls_back_to_file() {
        let config = AppConfig::resolve(PathBuf::from("c.toml"), ConfigFile::default(), |k| {
            (k == "SPOTLIGHT_COUNT").then(|| "many".to_string())
        });
        assert_eq!(config.count, 4);
    }

    #[test]
    fn unparsable_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "this is = = not toml").unwrap();
        assert!(AppConfig::load_config_from_file(&path).is_none());
    }

    #[test]
    fn set_and_save_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        let mut config = AppConfig::resolve(path.clone(), ConfigFile::default(), no_env);

        config.set("count", "8").unwrap();
        config.set("clean", "no").unwrap();
        config.set("dir", "/tmp/walls").unwrap();
        config.save().unwrap();

        let file = AppConfig::load_config_from_file(&path).unwrap();
        let reloaded = AppConfig::resolve(path, file, no_env);
        assert_eq!(reloaded.count, 8);
        assert!(!reloaded.clean);
        assert_eq!(reloaded.save_dir, PathBuf::from("/tmp/walls"));
    }

    #[test]
    fn set_rejects_unknown_key_and_bad_values() {
        let mut config = AppConfig::resolve(PathBuf::from("c.toml"), ConfigFile::default(), no_env);
        assert!(config.set("colour", "blue").is_err());
        assert!(config.set("count", "-1").is_err());
        assert!(config.set("clean", "maybe").is_err());
        assert_eq!(config.count, 4);
    }

    #[test]
    fn schema_mentions_sections() {
        let schema = AppConfig::get_schema();
        assert!(schema.contains("common"));
        assert!(schema.contains("timeout_secs"));
    }

    #[test]
    fn switch_parsing() {
        assert_eq!(parse_switch("yes"), Some(true));
        assert_eq!(parse_switch("NO"), Some(false));
        assert_eq!(parse_switch("perhaps"), None);
    }
}
