//! 配置加载器实现
//!
//! 提供TOML配置文件解析、环境变量替换和错误处理功能

use crate::config::types::{validate_config, RelayConfig};
use crate::error::{ConfigError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

/// 配置加载器trait，定义配置加载接口
pub trait ConfigLoader {
    /// 从文件加载配置
    ///
    /// # 参数
    /// * `path` - 配置文件路径
    ///
    /// # 返回
    /// * `Result<RelayConfig>` - 加载的配置或错误
    fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<RelayConfig>;

    /// 从字符串加载配置
    fn load_from_string(&self, content: &str) -> Result<RelayConfig>;

    /// 验证配置
    fn validate(&self, config: &RelayConfig) -> Result<()>;
}

/// TOML配置加载器实现
#[derive(Debug, Clone)]
pub struct TomlConfigLoader {
    /// 是否启用环境变量替换
    enable_env_substitution: bool,
}

impl TomlConfigLoader {
    /// 创建新的TOML配置加载器
    ///
    /// # 参数
    /// * `enable_env_substitution` - 是否启用环境变量替换
    pub fn new(enable_env_substitution: bool) -> Self {
        Self {
            enable_env_substitution,
        }
    }

    /// 替换字符串中的环境变量
    fn substitute_env_vars(&self, content: &str) -> Result<String> {
        if !self.enable_env_substitution {
            return Ok(content.to_string());
        }

        // 匹配 ${VAR_NAME} 格式的环境变量
        let env_var_regex = Regex::new(r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")
            .map_err(|e| ConfigError::ParseError(format!("正则表达式错误: {}", e)))?;

        let mut result = content.to_string();

        for captures in env_var_regex.captures_iter(content) {
            let full_match = &captures[0];
            let var_name = &captures[1];

            match std::env::var(var_name) {
                Ok(value) => {
                    result = result.replace(full_match, &value);
                }
                Err(_) => {
                    return Err(ConfigError::EnvVarError {
                        var: var_name.to_string(),
                    }
                    .into());
                }
            }
        }

        Ok(result)
    }

    /// 解析TOML内容
    fn parse_toml(&self, content: &str) -> Result<RelayConfig> {
        let processed_content = self.substitute_env_vars(content)?;

        let config: RelayConfig = toml::from_str(&processed_content)
            .map_err(|e| ConfigError::ParseError(format!("TOML解析失败: {}", e)))?;

        Ok(config)
    }

    /// 读取并解析配置文件，不做验证
    fn read_file(&self, path: &Path) -> Result<RelayConfig> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound {
                path: path.to_string_lossy().to_string(),
            }
            .into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(format!("读取文件失败: {}", e)))?;

        let config = self.parse_toml(&content)?;
        log::info!("成功加载配置文件: {}", path.display());
        log::debug!("配置内容: {:?}", config);

        Ok(config)
    }

    /// 解析最终使用的配置（未验证）
    ///
    /// 显式指定的配置文件必须存在；未指定时尝试默认路径，
    /// 默认路径下没有配置文件则使用内置默认值。
    /// 调用方应在应用命令行覆盖之后再调用 [`ConfigLoader::validate`]。
    pub fn resolve(&self, explicit_path: Option<&Path>) -> Result<RelayConfig> {
        match explicit_path {
            Some(path) => self.read_file(path),
            None => match get_default_config_path() {
                Some(default_path) if default_path.exists() => self.read_file(&default_path),
                _ => {
                    log::debug!("未找到默认配置文件，使用默认配置");
                    Ok(RelayConfig::default())
                }
            },
        }
    }
}

impl Default for TomlConfigLoader {
    fn default() -> Self {
        Self::new(true)
    }
}

impl ConfigLoader for TomlConfigLoader {
    fn load_from_file<P: AsRef<Path>>(&self, path: P) -> Result<RelayConfig> {
        let config = self.read_file(path.as_ref())?;
        self.validate(&config)?;
        Ok(config)
    }

    fn load_from_string(&self, content: &str) -> Result<RelayConfig> {
        let config = self.parse_toml(content)?;
        self.validate(&config)?;

        log::debug!("成功解析配置字符串");

        Ok(config)
    }

    fn validate(&self, config: &RelayConfig) -> Result<()> {
        validate_config(config).map_err(|e| ConfigError::ValidationError(e).into())
    }
}

/// 获取默认配置文件路径：用户配置目录下的 `arduino-relay/config.toml`
///
/// 不查找当前工作目录。无法确定用户配置目录时返回 `None`。
pub fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|config_dir| config_dir.join("arduino-relay").join("config.toml"))
}
