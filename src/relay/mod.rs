//! 串口中继模块
//!
//! 包含命令模型、串口抽象和命令发送器

pub mod command;
pub mod port;
pub mod sender;

// 重新导出主要类型
pub use command::RelayCommand;
pub use port::{list_ports, PortOpener, PortSettings, PortSummary, SerialLink, SerialPortOpener};
pub use sender::{CommandSender, SendOutcome};
