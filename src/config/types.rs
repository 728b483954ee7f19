//! 配置数据结构定义
//!
//! 定义串口中继的配置结构体和验证逻辑

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// 串口中继配置
///
/// 每个字段都有默认值，因此空配置文件（或没有配置文件）即可直接使用。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RelayConfig {
    /// 串口名称（Windows 下如 `COM6`，Linux 下如 `/dev/ttyACM0`）
    #[serde(default = "default_port")]
    pub port: String,
    /// 波特率
    #[serde(default = "default_baud_rate")]
    pub baud_rate: u32,
    /// 读写超时时间（毫秒）
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// 打开串口后等待设备复位的时间（毫秒）
    #[serde(default = "default_settle_delay_ms")]
    pub settle_delay_ms: u64,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            baud_rate: default_baud_rate(),
            timeout_ms: default_timeout_ms(),
            settle_delay_ms: default_settle_delay_ms(),
        }
    }
}

impl RelayConfig {
    /// 读写超时
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// 复位等待时间
    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

// 默认值函数
fn default_port() -> String {
    "COM6".to_string()
}
fn default_baud_rate() -> u32 {
    9600
}
fn default_timeout_ms() -> u64 {
    1000
}
fn default_settle_delay_ms() -> u64 {
    2000 // Arduino 打开串口时会自动复位
}

/// 配置验证函数
///
/// # 参数
/// * `config` - 要验证的配置
///
/// # 返回
/// * `Result<(), String>` - 验证结果，错误时返回错误信息
pub fn validate_config(config: &RelayConfig) -> Result<(), String> {
    if config.port.trim().is_empty() {
        return Err("串口名称不能为空".to_string());
    }

    if config.baud_rate == 0 {
        return Err("波特率不能为0".to_string());
    }

    if config.timeout_ms == 0 {
        return Err("超时时间不能为0".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RelayConfig::default();
        assert_eq!(config.port, "COM6");
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.timeout(), Duration::from_secs(1));
        assert_eq!(config.settle_delay(), Duration::from_secs(2));
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let config: RelayConfig = toml::from_str(r#"port = "/dev/ttyACM0""#).unwrap();
        assert_eq!(config.port, "/dev/ttyACM0");
        assert_eq!(config.baud_rate, 9600);
        assert_eq!(config.settle_delay_ms, 2000);
    }

    #[test]
    fn test_config_serialization() {
        let config = RelayConfig::default();
        let serialized = toml::to_string(&config).unwrap();
        assert!(serialized.contains("COM6"));
        assert!(serialized.contains("9600"));
    }

    #[test]
    fn test_validation_rejects_empty_port() {
        let config = RelayConfig {
            port: "  ".to_string(),
            ..Default::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(err.contains("串口名称"));
    }

    #[test]
    fn test_validation_rejects_zero_values() {
        let config = RelayConfig {
            baud_rate: 0,
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());

        let config = RelayConfig {
            timeout_ms: 0,
            ..Default::default()
        };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_zero_settle_delay_is_allowed() {
        let config = RelayConfig {
            settle_delay_ms: 0,
            ..Default::default()
        };
        assert!(validate_config(&config).is_ok());
        assert_eq!(config.settle_delay(), Duration::ZERO);
    }
}
