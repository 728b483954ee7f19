//! 中继命令
//!
//! 一条由调用者提供的文本命令，写入串口前追加换行符

use crate::error::{RelayError, Result};
use std::fmt;
use std::time::Duration;

/// 行结束符，Arduino 端按行读取命令
pub const LINE_TERMINATOR: u8 = b'\n';

/// 立即喂食一次
pub const FEED_NOW: &str = "FEED_NOW";

/// 定时器到期后的自动喂食
pub const AUTO_FEED: &str = "AUTO_FEED";

/// 设置自动喂食间隔，参数为毫秒数
pub const SET_INTERVAL_PREFIX: &str = "SET_INTERVAL:";

/// 最短喂食间隔
pub const MIN_FEED_INTERVAL: Duration = Duration::from_secs(1);

/// 最长喂食间隔（7 天）
pub const MAX_FEED_INTERVAL: Duration = Duration::from_secs(7 * 86_400);

/// 发送给设备的一行命令
///
/// 不对命令内容做任何校验，空字符串也是合法命令（只发送换行符）。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayCommand {
    raw: String,
}

impl RelayCommand {
    /// 创建新的命令
    pub fn new(raw: impl Into<String>) -> Self {
        Self { raw: raw.into() }
    }

    /// `FEED_NOW`：设备立即喂食一次
    pub fn feed_now() -> Self {
        Self::new(FEED_NOW)
    }

    /// `AUTO_FEED`：设备按自动定时喂食一次
    pub fn auto_feed() -> Self {
        Self::new(AUTO_FEED)
    }

    /// `SET_INTERVAL:<ms>`：设置自动喂食间隔
    ///
    /// 间隔必须在 1 秒到 7 天之间（含边界）。
    pub fn set_interval(interval: Duration) -> Result<Self> {
        if !(MIN_FEED_INTERVAL..=MAX_FEED_INTERVAL).contains(&interval) {
            return Err(RelayError::IntervalOutOfRange(interval));
        }

        Ok(Self::new(format!(
            "{}{}",
            SET_INTERVAL_PREFIX,
            interval.as_millis()
        )))
    }

    /// 按天、小时、分钟设置喂食间隔
    pub fn set_interval_dhm(days: u64, hours: u64, minutes: u64) -> Result<Self> {
        let seconds = days
            .saturating_mul(86_400)
            .saturating_add(hours.saturating_mul(3_600))
            .saturating_add(minutes.saturating_mul(60));
        Self::set_interval(Duration::from_secs(seconds))
    }

    /// 原始命令文本
    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// 编码为串口上传输的字节：UTF-8 文本加一个换行符
    pub fn to_wire_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.raw.len() + 1);
        bytes.extend_from_slice(self.raw.as_bytes());
        bytes.push(LINE_TERMINATOR);
        bytes
    }
}

impl From<String> for RelayCommand {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}

impl From<&str> for RelayCommand {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for RelayCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}
