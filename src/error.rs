//! 错误处理模块
//!
//! 定义应用程序的统一错误类型

use thiserror::Error;

/// Arduino Relay 应用程序的主要错误类型
#[derive(Error, Debug)]
pub enum RelayError {
    /// 配置相关错误
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    /// 串口无法打开（设备不存在或已被占用）
    #[error("串口不可用: {port}: {source}")]
    PortUnavailable {
        port: String,
        #[source]
        source: serialport::Error,
    },

    /// 枚举主机串口失败
    #[error("枚举串口失败: {0}")]
    PortEnumeration(#[source] serialport::Error),

    /// 喂食间隔超出允许范围
    #[error("喂食间隔超出范围: {0:?}（允许 1 秒到 7 天）")]
    IntervalOutOfRange(std::time::Duration),

    /// 写入串口失败
    #[error("写入串口失败: {port}: {source}")]
    Write {
        port: String,
        #[source]
        source: std::io::Error,
    },

    /// IO错误
    #[error("IO错误: {0}")]
    Io(#[from] std::io::Error),

    /// 其他错误
    #[error("其他错误: {0}")]
    Other(#[from] anyhow::Error),
}

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件解析错误
    #[error("配置文件解析失败: {0}")]
    ParseError(String),

    /// 配置验证错误
    #[error("配置验证失败: {0}")]
    ValidationError(String),

    /// 配置文件不存在
    #[error("配置文件不存在: {path}")]
    FileNotFound { path: String },

    /// 环境变量替换错误
    #[error("环境变量替换失败: {var}")]
    EnvVarError { var: String },
}

impl RelayError {
    /// 是否为串口不可用错误
    pub fn is_port_unavailable(&self) -> bool {
        matches!(self, RelayError::PortUnavailable { .. })
    }
}

/// 结果类型别名
pub type Result<T> = std::result::Result<T, RelayError>;
