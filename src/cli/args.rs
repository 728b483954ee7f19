//! 命令行参数定义
//!
//! 使用clap定义应用程序的命令行接口

use crate::config::RelayConfig;
use crate::error::Result;
use crate::relay::RelayCommand;
use clap::{ArgGroup, Parser, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

/// Arduino Relay - 通过串口向 Arduino 发送一行命令
///
/// 选项必须写在命令之前；命令之后的参数一律忽略。
/// 与选项同名的命令需要用 `--` 转义，例如 `arduino-relay -- --list-ports`。
#[derive(Parser, Debug, Clone)]
#[command(
    name = "arduino-relay",
    version = crate::VERSION,
    about = crate::APP_DESCRIPTION,
    long_about = None,
    group(
        ArgGroup::new("payload")
            .args(["command", "feed_now", "auto_feed", "set_interval"])
    )
)]
pub struct Args {
    /// 要发送的命令（可选，不提供时不写入任何数据）
    #[arg(
        value_name = "COMMAND",
        allow_hyphen_values = true,
        help = "要发送的命令；以 - 开头且与选项同名的命令请写在 -- 之后"
    )]
    pub command: Option<String>,

    /// 命令之后的多余参数，忽略
    #[arg(hide = true, trailing_var_arg = true, allow_hyphen_values = true)]
    pub extra: Vec<String>,

    /// 发送 FEED_NOW
    #[arg(long, help = "发送 FEED_NOW（立即喂食一次）")]
    pub feed_now: bool,

    /// 发送 AUTO_FEED
    #[arg(long, help = "发送 AUTO_FEED（自动喂食一次）")]
    pub auto_feed: bool,

    /// 发送 SET_INTERVAL:<ms>
    #[arg(
        long,
        value_name = "SECONDS",
        help = "发送 SET_INTERVAL，设置自动喂食间隔（1 秒到 7 天）"
    )]
    pub set_interval: Option<u64>,

    /// 串口名称
    #[arg(
        short,
        long,
        value_name = "PORT",
        help = "串口名称（默认 COM6）",
        env = "ARDUINO_RELAY_PORT"
    )]
    pub port: Option<String>,

    /// 波特率
    #[arg(
        short,
        long,
        value_name = "BAUD",
        help = "波特率（默认 9600）",
        env = "ARDUINO_RELAY_BAUD_RATE"
    )]
    pub baud_rate: Option<u32>,

    /// 读写超时（毫秒）
    #[arg(long, value_name = "MILLIS", help = "读写超时（毫秒）")]
    pub timeout_ms: Option<u64>,

    /// 打开串口后的复位等待时间（毫秒）
    #[arg(long, value_name = "MILLIS", help = "复位等待时间（毫秒）")]
    pub settle_ms: Option<u64>,

    /// 配置文件路径
    #[arg(
        short,
        long,
        value_name = "FILE",
        help = "配置文件路径",
        env = "ARDUINO_RELAY_CONFIG"
    )]
    pub config: Option<PathBuf>,

    /// 日志级别
    #[arg(
        short,
        long,
        value_enum,
        default_value = "warn",
        help = "日志级别",
        env = "ARDUINO_RELAY_LOG_LEVEL"
    )]
    pub log_level: LogLevel,

    /// 日志文件路径
    #[arg(
        long,
        value_name = "FILE",
        help = "日志追加写入该文件，而不是标准错误",
        env = "ARDUINO_RELAY_LOG_FILE"
    )]
    pub log_file: Option<PathBuf>,

    /// 是否使用JSON格式日志
    #[arg(long, help = "使用JSON格式输出日志")]
    pub json_logs: bool,

    /// 列出可用串口后退出
    #[arg(long, help = "列出可用串口后退出")]
    pub list_ports: bool,
}

/// 日志级别枚举
#[derive(ValueEnum, Clone, Debug, PartialEq)]
pub enum LogLevel {
    /// 调试级别
    Debug,
    /// 信息级别
    Info,
    /// 警告级别
    Warn,
    /// 错误级别
    Error,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Error => log::LevelFilter::Error,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

impl Args {
    /// 要发送的命令（如果有）
    ///
    /// 位置参数原样发送，不做校验；`--set-interval` 需在允许范围内。
    pub fn relay_command(&self) -> Result<Option<RelayCommand>> {
        if self.feed_now {
            return Ok(Some(RelayCommand::feed_now()));
        }
        if self.auto_feed {
            return Ok(Some(RelayCommand::auto_feed()));
        }
        if let Some(seconds) = self.set_interval {
            return RelayCommand::set_interval(Duration::from_secs(seconds)).map(Some);
        }
        Ok(self.command.clone().map(RelayCommand::from))
    }

    /// 将命令行参数覆盖到配置上
    pub fn apply_overrides(&self, config: &mut RelayConfig) {
        if let Some(ref port) = self.port {
            config.port = port.clone();
        }
        if let Some(baud_rate) = self.baud_rate {
            config.baud_rate = baud_rate;
        }
        if let Some(timeout_ms) = self.timeout_ms {
            config.timeout_ms = timeout_ms;
        }
        if let Some(settle_ms) = self.settle_ms {
            config.settle_delay_ms = settle_ms;
        }
    }
}
