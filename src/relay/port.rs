//! 串口抽象
//!
//! 将串口的打开操作抽象为 trait，便于在测试中替换为内存实现

use crate::config::RelayConfig;
use crate::error::{RelayError, Result};
use serialport::{SerialPortType, UsbPortInfo};
use std::io::Write;
use std::time::Duration;

/// 打开串口所需的参数
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSettings {
    /// 串口名称
    pub port: String,
    /// 波特率
    pub baud_rate: u32,
    /// 读写超时
    pub timeout: Duration,
}

impl From<&RelayConfig> for PortSettings {
    fn from(config: &RelayConfig) -> Self {
        Self {
            port: config.port.clone(),
            baud_rate: config.baud_rate,
            timeout: config.timeout(),
        }
    }
}

/// 已打开的串口连接
///
/// 连接在 drop 时关闭。
pub trait SerialLink: Write + Send {}

impl<T: Write + Send + ?Sized> SerialLink for T {}

/// 串口打开器trait
pub trait PortOpener {
    /// 按给定参数打开串口
    ///
    /// 设备不存在或已被占用时返回 [`RelayError::PortUnavailable`]。
    fn open(&self, settings: &PortSettings) -> Result<Box<dyn SerialLink>>;
}

/// 基于 `serialport` 的串口打开器
#[derive(Debug, Default, Clone, Copy)]
pub struct SerialPortOpener;

impl PortOpener for SerialPortOpener {
    fn open(&self, settings: &PortSettings) -> Result<Box<dyn SerialLink>> {
        let port = serialport::new(settings.port.as_str(), settings.baud_rate)
            .timeout(settings.timeout)
            .open()
            .map_err(|source| RelayError::PortUnavailable {
                port: settings.port.clone(),
                source,
            })?;

        Ok(Box::new(port))
    }
}

/// 可用串口概要信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSummary {
    /// 串口名称
    pub name: String,
    /// 串口类型描述
    pub description: String,
}

/// 列出主机上可用的串口
pub fn list_ports() -> Result<Vec<PortSummary>> {
    let ports = serialport::available_ports().map_err(RelayError::PortEnumeration)?;

    Ok(ports
        .into_iter()
        .map(|info| PortSummary {
            description: describe_port_type(&info.port_type),
            name: info.port_name,
        })
        .collect())
}

/// 生成串口类型的可读描述
pub fn describe_port_type(port_type: &SerialPortType) -> String {
    match port_type {
        SerialPortType::UsbPort(usb) => describe_usb_port(usb),
        SerialPortType::PciPort => "PCI".to_string(),
        SerialPortType::BluetoothPort => "Bluetooth".to_string(),
        SerialPortType::Unknown => "Unknown".to_string(),
    }
}

fn describe_usb_port(usb: &UsbPortInfo) -> String {
    let mut description = format!("USB {:04x}:{:04x}", usb.vid, usb.pid);
    if let Some(ref product) = usb.product {
        description.push(' ');
        description.push_str(product);
    } else if let Some(ref manufacturer) = usb.manufacturer {
        description.push(' ');
        description.push_str(manufacturer);
    }
    description
}
