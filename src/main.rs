//! Arduino Relay 主程序入口
//!
//! 通过串口向 Arduino 发送一行命令

use anyhow::{Context, Result};
use arduino_relay::cli::{Args, Command, ListPortsCommand, SendCommand};
use arduino_relay::logging::{LogConfig, LoggingSystem};
use clap::Parser;
use tracing::{debug, error};

fn main() -> Result<()> {
    let args = Args::parse();

    let log_config = LogConfig {
        level: args.log_level.clone().into(),
        file_path: args.log_file.clone(),
        json_format: args.json_logs,
    };

    let _logging_system = LoggingSystem::setup_logging(log_config).context("初始化日志系统失败")?;

    debug!("Arduino Relay v{} 启动", arduino_relay::VERSION);

    if let Err(e) = execute_command(&args) {
        error!("命令执行失败: {:#}", e);
        if args.log_file.is_some() {
            // 日志写入文件时，诊断信息仍需出现在标准错误
            eprintln!("命令执行失败: {:#}", e);
        }
        std::process::exit(1);
    }

    Ok(())
}

/// 执行CLI命令
fn execute_command(args: &Args) -> Result<()> {
    if args.list_ports {
        ListPortsCommand.execute(args).context("列出串口失败")
    } else {
        SendCommand.execute(args).context("发送命令失败")
    }
}
