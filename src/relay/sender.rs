//! 命令发送器
//!
//! 打开串口、等待设备复位、写入一行命令并关闭串口

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use crate::relay::command::RelayCommand;
use crate::relay::port::{PortOpener, PortSettings, SerialLink};
use std::io::Write;
use std::time::Duration;
use tracing::{debug, info};

/// 一次发送的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// 命令已写入串口
    Sent {
        /// 写入的字节数（含换行符）
        bytes: usize,
    },
    /// 未提供命令，没有写入任何数据
    NoCommand,
}

/// 命令发送器
pub struct CommandSender<O: PortOpener> {
    /// 串口打开器
    opener: O,
    /// 串口参数
    settings: PortSettings,
    /// 复位等待时间
    settle_delay: Duration,
    /// 等待函数
    sleeper: Box<dyn Fn(Duration)>,
}

impl<O: PortOpener> CommandSender<O> {
    /// 创建新的命令发送器
    pub fn new(opener: O, config: &RelayConfig) -> Self {
        Self {
            opener,
            settings: PortSettings::from(config),
            settle_delay: config.settle_delay(),
            sleeper: Box::new(std::thread::sleep),
        }
    }

    /// 替换复位等待的实现
    pub fn with_sleeper(mut self, sleeper: impl Fn(Duration) + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    /// 串口参数
    pub fn settings(&self) -> &PortSettings {
        &self.settings
    }

    /// 执行一次中继
    ///
    /// 串口先打开，再等待设备复位，然后写入命令（如果有）。
    /// 串口句柄只存在于本函数内，任何返回路径上都会被关闭。
    ///
    /// # 参数
    /// * `command` - 要发送的命令，`None` 表示未提供命令
    /// * `out` - 状态信息输出目标（通常为标准输出）
    ///
    /// # 错误
    /// * 串口无法打开
    /// * 写入串口失败
    pub fn run<W: Write>(
        &self,
        command: Option<&RelayCommand>,
        out: &mut W,
    ) -> Result<SendOutcome> {
        let mut port = self.opener.open(&self.settings)?;
        info!(
            port = %self.settings.port,
            baud_rate = self.settings.baud_rate,
            "串口已打开"
        );

        debug!("等待设备复位 {:?}", self.settle_delay);
        (self.sleeper)(self.settle_delay);

        let outcome = match command {
            Some(command) => self.send(&mut *port, command, out)?,
            None => {
                writeln!(out, "No command provided")?;
                info!("未提供命令，跳过写入");
                SendOutcome::NoCommand
            }
        };

        drop(port);
        debug!(port = %self.settings.port, "串口已关闭");

        Ok(outcome)
    }

    /// 写入命令并输出状态
    fn send<W: Write>(
        &self,
        port: &mut dyn SerialLink,
        command: &RelayCommand,
        out: &mut W,
    ) -> Result<SendOutcome> {
        writeln!(out, "Relay received command: '{}'", command)?;
        writeln!(out, "Sending to Arduino: '{}'", command)?;

        let bytes = command.to_wire_bytes();
        port.write_all(&bytes)
            .and_then(|_| port.flush())
            .map_err(|source| RelayError::Write {
                port: self.settings.port.clone(),
                source,
            })?;
        info!(command = %command, bytes = bytes.len(), "命令已写入串口");

        writeln!(out, "Command sent successfully!")?;
        writeln!(
            out,
            "Relay finished - command '{}' sent to Arduino",
            command
        )?;

        Ok(SendOutcome::Sent { bytes: bytes.len() })
    }
}
