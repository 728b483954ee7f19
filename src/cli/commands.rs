//! 命令处理逻辑
//!
//! 实现发送命令和列出串口两种操作

use crate::cli::args::Args;
use crate::config::{ConfigLoader, RelayConfig, TomlConfigLoader};
use crate::error::Result;
use crate::relay::{list_ports, CommandSender, PortOpener, SendOutcome, SerialPortOpener};
use std::io::Write;
use tracing::{debug, info};

/// 命令处理器trait
pub trait Command {
    /// 执行命令
    fn execute(&self, args: &Args) -> Result<()>;
}

/// 加载最终配置：配置文件 < 环境变量 < 命令行参数
///
/// 只在应用覆盖之后验证一次。
pub fn load_config(args: &Args) -> Result<RelayConfig> {
    let loader = TomlConfigLoader::new(true);
    let mut config = loader.resolve(args.config.as_deref())?;

    args.apply_overrides(&mut config);
    loader.validate(&config)?;

    Ok(config)
}

/// 发送命令
pub struct SendCommand;

impl Command for SendCommand {
    fn execute(&self, args: &Args) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        self.execute_with(args, SerialPortOpener, &mut out)?;
        Ok(())
    }
}

impl SendCommand {
    /// 使用指定的串口打开器和输出目标执行
    pub fn execute_with<O: PortOpener, W: Write>(
        &self,
        args: &Args,
        opener: O,
        out: &mut W,
    ) -> Result<SendOutcome> {
        let config = load_config(args)?;
        info!(
            port = %config.port,
            baud_rate = config.baud_rate,
            settle_delay_ms = config.settle_delay_ms,
            "准备发送命令"
        );

        if !args.extra.is_empty() {
            debug!(ignored = ?args.extra, "忽略命令之后的多余参数");
        }

        let command = args.relay_command()?;
        CommandSender::new(opener, &config).run(command.as_ref(), out)
    }
}

/// 列出可用串口
pub struct ListPortsCommand;

impl Command for ListPortsCommand {
    fn execute(&self, _args: &Args) -> Result<()> {
        let ports = list_ports()?;

        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        if ports.is_empty() {
            writeln!(out, "No serial ports found")?;
        }
        for port in ports {
            writeln!(out, "{}\t{}", port.name, port.description)?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{ConfigError, RelayError};
    use crate::relay::{PortSettings, SerialLink};
    use clap::Parser;
    use serial_test::serial;
    use std::io::Write;
    use std::sync::{Arc, Mutex};

    /// 记录写入内容的内存串口
    struct RecordingOpener {
        opened: Arc<Mutex<Vec<PortSettings>>>,
        written: Arc<Mutex<Vec<u8>>>,
    }

    struct RecordingLink(Arc<Mutex<Vec<u8>>>);

    impl Write for RecordingLink {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl PortOpener for RecordingOpener {
        fn open(&self, settings: &PortSettings) -> Result<Box<dyn SerialLink>> {
            self.opened.lock().unwrap().push(settings.clone());
            Ok(Box::new(RecordingLink(self.written.clone())))
        }
    }

    type Recorded<T> = Arc<Mutex<Vec<T>>>;

    fn recording_opener() -> (RecordingOpener, Recorded<PortSettings>, Recorded<u8>) {
        let opened = Arc::new(Mutex::new(Vec::new()));
        let written = Arc::new(Mutex::new(Vec::new()));
        (
            RecordingOpener {
                opened: opened.clone(),
                written: written.clone(),
            },
            opened,
            written,
        )
    }

    #[test]
    #[serial]
    fn test_missing_explicit_config_fails_before_open() {
        let args = Args::try_parse_from([
            "arduino-relay",
            "--config",
            "/nonexistent/arduino-relay.toml",
            "FEED_NOW",
        ])
        .unwrap();
        let (opener, opened, _) = recording_opener();
        let result = SendCommand.execute_with(&args, opener, &mut Vec::new());
        assert!(matches!(
            result,
            Err(RelayError::Config(ConfigError::FileNotFound { .. }))
        ));
        assert!(opened.lock().unwrap().is_empty());
    }

    #[test]
    #[serial]
    fn test_send_command_writes_bytes() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"port = \"/dev/ttyACM0\"\nsettle_delay_ms = 0\n")
            .unwrap();
        let config_path = file.path().to_string_lossy().to_string();

        let args = Args::try_parse_from([
            "arduino-relay",
            "--config",
            config_path.as_str(),
            "--baud-rate",
            "57600",
            "AUTO_FEED",
        ])
        .unwrap();

        let (opener, opened, written) = recording_opener();
        let mut out = Vec::new();
        let outcome = SendCommand.execute_with(&args, opener, &mut out).unwrap();

        assert_eq!(outcome, SendOutcome::Sent { bytes: 10 });
        assert_eq!(written.lock().unwrap().as_slice(), b"AUTO_FEED\n");

        let opened = opened.lock().unwrap();
        assert_eq!(opened.len(), 1);
        assert_eq!(opened[0].port, "/dev/ttyACM0");
        assert_eq!(opened[0].baud_rate, 57600);
    }

    fn config_file(content: &[u8]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    fn run(argv: &[&str]) -> (Result<SendOutcome>, Vec<u8>) {
        let args = Args::try_parse_from(argv).unwrap();
        let (opener, _, written) = recording_opener();
        let result = SendCommand.execute_with(&args, opener, &mut Vec::new());
        let written = written.lock().unwrap().clone();
        (result, written)
    }

    #[test]
    #[serial]
    fn test_extra_arguments_are_not_sent() {
        let file = config_file(b"settle_delay_ms = 0\n");
        let config_path = file.path().to_string_lossy().to_string();

        let (result, written) = run(&[
            "arduino-relay",
            "--config",
            config_path.as_str(),
            "FEED_NOW",
            "extra",
        ]);

        assert_eq!(result.unwrap(), SendOutcome::Sent { bytes: 9 });
        assert_eq!(written, b"FEED_NOW\n".to_vec());
    }

    #[test]
    #[serial]
    fn test_escaped_option_name_is_relayed() {
        let file = config_file(b"settle_delay_ms = 0\n");
        let config_path = file.path().to_string_lossy().to_string();

        let (result, written) = run(&[
            "arduino-relay",
            "--config",
            config_path.as_str(),
            "--",
            "--list-ports",
        ]);

        assert!(result.is_ok());
        assert_eq!(written, b"--list-ports\n".to_vec());
    }

    #[test]
    #[serial]
    fn test_override_fixes_invalid_file_value() {
        let file = config_file(b"baud_rate = 0\nsettle_delay_ms = 0\n");
        let config_path = file.path().to_string_lossy().to_string();

        let (result, written) = run(&[
            "arduino-relay",
            "--config",
            config_path.as_str(),
            "--baud-rate",
            "9600",
            "LED_ON",
        ]);

        assert!(result.is_ok());
        assert_eq!(written, b"LED_ON\n".to_vec());
    }

    #[test]
    #[serial]
    fn test_set_interval_preset_is_sent() {
        let file = config_file(b"settle_delay_ms = 0\n");
        let config_path = file.path().to_string_lossy().to_string();

        let (result, written) = run(&[
            "arduino-relay",
            "--config",
            config_path.as_str(),
            "--set-interval",
            "3600",
        ]);

        assert!(result.is_ok());
        assert_eq!(written, b"SET_INTERVAL:3600000\n".to_vec());
    }

    #[test]
    #[serial]
    fn test_invalid_override_is_rejected_before_open() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"settle_delay_ms = 0\n").unwrap();
        let config_path = file.path().to_string_lossy().to_string();

        let args = Args::try_parse_from([
            "arduino-relay",
            "--config",
            config_path.as_str(),
            "--baud-rate",
            "0",
            "LED_ON",
        ])
        .unwrap();

        let (opener, opened, _) = recording_opener();
        let result = SendCommand.execute_with(&args, opener, &mut Vec::new());

        assert!(matches!(
            result,
            Err(RelayError::Config(ConfigError::ValidationError(_)))
        ));
        assert!(opened.lock().unwrap().is_empty());
    }
}
