use std::path::{Path, PathBuf};

use actix_cors::Cors;
use actix_web::http::header;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("读取配置文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("解析配置文件失败: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("环境变量{name}的值无效: {value}")]
    InvalidValue { name: &'static str, value: String },
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub cors: CorsConfig,
    pub quiz: QuizConfig,
    pub import: ImportConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            host: "0.0.0.0".to_string(),
            port: 8000,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub file: String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        DatabaseConfig {
            file: "quiz.db".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// 允许跨域访问的来源，`*` 表示允许所有来源
    pub allowed_origins: Vec<String>,
}

impl Default for CorsConfig {
    fn default() -> Self {
        CorsConfig {
            allowed_origins: vec!["http://localhost:3000".to_string()],
        }
    }
}

impl CorsConfig {
    pub fn build(&self) -> Cors {
        let cors = Cors::default()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![header::CONTENT_TYPE, header::AUTHORIZATION]);
        if self.allowed_origins.iter().any(|origin| origin == "*") {
            return cors.allow_any_origin();
        }
        self.allowed_origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    /// 抽取阅读理解题时是否附带答案和解析
    pub reveal_comprehension_answers: bool,
}

impl Default for QuizConfig {
    fn default() -> Self {
        QuizConfig {
            reveal_comprehension_answers: true,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    pub comprehension_file: PathBuf,
    pub math_file: PathBuf,
}

impl Default for ImportConfig {
    fn default() -> Self {
        ImportConfig {
            comprehension_file: PathBuf::from("data/2.json"),
            math_file: PathBuf::from("data/M319.json"),
        }
    }
}

impl Config {
    /// 读取配置文件并应用环境变量，文件不存在时使用默认配置
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        let mut config = if path.exists() {
            toml::from_str(&std::fs::read_to_string(path)?)?
        } else {
            log::warn!("配置文件{}不存在，使用默认配置", path.display());
            Config::default()
        };
        config.apply_overrides(|name| std::env::var(name).ok())?;
        Ok(config)
    }

    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<(), ConfigError> {
        if let Some(host) = lookup("HOST") {
            self.server.host = host;
        }
        if let Some(port) = lookup("PORT") {
            self.server.port = port
                .parse()
                .map_err(|_| ConfigError::InvalidValue { name: "PORT", value: port.clone() })?;
        }
        if let Some(file) = lookup("DATABASE_FILE") {
            self.database.file = file;
        }
        if let Some(origins) = lookup("ALLOWED_ORIGINS") {
            self.cors.allowed_origins = origins
                .split(',')
                .map(str::trim)
                .filter(|origin| !origin.is_empty())
                .map(String::from)
                .collect();
        }
        if let Some(reveal) = lookup("REVEAL_COMPREHENSION_ANSWERS") {
            self.quiz.reveal_comprehension_answers = reveal.parse().map_err(|_| ConfigError::InvalidValue {
                name: "REVEAL_COMPREHENSION_ANSWERS",
                value: reveal.clone(),
            })?;
        }
        Ok(())
    }
}
