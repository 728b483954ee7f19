//! Arduino Relay - 串口命令中继工具
//!
//! 打开串口，等待 Arduino 复位完成，写入一行以换行符结尾的命令后关闭串口。
//! 支持：
//! - 默认 `COM6` / 9600 波特率，可通过配置文件、环境变量或命令行覆盖
//! - 内置 `FEED_NOW` / `AUTO_FEED` / `SET_INTERVAL:<ms>` 命令
//! - 列出主机上的可用串口
//! - 结构化日志记录

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod relay;

// 重新导出主要类型
pub use config::RelayConfig;
pub use error::{RelayError, Result};
pub use relay::{CommandSender, RelayCommand, SendOutcome};

/// 应用程序版本信息
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// 应用程序描述
pub const APP_DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
