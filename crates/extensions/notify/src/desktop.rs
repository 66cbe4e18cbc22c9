//! Native desktop notifications.

use std::process::Command;

use tracing::debug;
use voxnav_config::NotifyConfig;
use voxnav_protocols::{Notification, Notifier, NotifyError};

/// Shows notifications with the platform's notification tool.
///
/// - macOS: `osascript`
/// - Linux: `notify-send`
/// - Windows: a PowerShell balloon tip
#[derive(Debug, Clone)]
pub struct DesktopNotifier {
    app_name: String,
}

impl DesktopNotifier {
    pub fn new(config: &NotifyConfig) -> Self {
        Self {
            app_name: config.app_name.clone(),
        }
    }

    /// Program and arguments that display `notification`.
    #[cfg(target_os = "macos")]
    pub(crate) fn command_for(&self, notification: &Notification) -> Option<NotifyCommand> {
        let script = format!(
            r#"display notification "{}" with title "{}" subtitle "{}""#,
            escape_quotes(&notification.message),
            escape_quotes(&notification.title),
            escape_quotes(&self.app_name)
        );
        Some(NotifyCommand::new("osascript", vec!["-e".to_string(), script]))
    }

    #[cfg(target_os = "linux")]
    pub(crate) fn command_for(&self, notification: &Notification) -> Option<NotifyCommand> {
        Some(notify_send(&self.app_name, notification))
    }

    #[cfg(target_os = "windows")]
    pub(crate) fn command_for(&self, notification: &Notification) -> Option<NotifyCommand> {
        Some(powershell_balloon(&self.app_name, notification))
    }

    #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
    pub(crate) fn command_for(&self, _notification: &Notification) -> Option<NotifyCommand> {
        None
    }
}

impl Notifier for DesktopNotifier {
    fn id(&self) -> &str {
        "desktop"
    }

    fn notify(&self, notification: &Notification) -> Result<(), NotifyError> {
        let command = self.command_for(notification).ok_or(NotifyError::Unsupported)?;

        let output = Command::new(&command.program)
            .args(&command.args)
            .envs(command.envs.iter().map(|(k, v)| (k, v)))
            .output()?;
        if !output.status.success() {
            return Err(NotifyError::Failed(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        debug!(program = %command.program, message = %notification.message, "Desktop notification sent");
        Ok(())
    }
}

/// A notification tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NotifyCommand {
    pub program: String,
    pub args: Vec<String>,
    pub envs: Vec<(String, String)>,
}

impl NotifyCommand {
    fn new(program: &str, args: Vec<String>) -> Self {
        Self {
            program: program.to_string(),
            args,
            envs: Vec::new(),
        }
    }
}

#[cfg(any(target_os = "linux", test))]
fn notify_send(app_name: &str, notification: &Notification) -> NotifyCommand {
    NotifyCommand::new(
        "notify-send",
        vec![
            "-a".to_string(),
            app_name.to_string(),
            "-t".to_string(),
            (notification.timeout_secs * 1000).to_string(),
            "--".to_string(),
            notification.title.clone(),
            notification.message.clone(),
        ],
    )
}

// Text reaches PowerShell through the environment, never through the script.
#[cfg(any(target_os = "windows", test))]
const POWERSHELL_BALLOON: &str = "Add-Type -AssemblyName System.Windows.Forms; \
     $n = New-Object System.Windows.Forms.NotifyIcon; \
     $n.Icon = [System.Drawing.SystemIcons]::Information; \
     $n.Text = $env:VOXNAV_NOTIFY_APP; \
     $n.Visible = $true; \
     $ms = [int]$env:VOXNAV_NOTIFY_TIMEOUT_MS; \
     $n.ShowBalloonTip($ms, $env:VOXNAV_NOTIFY_TITLE, $env:VOXNAV_NOTIFY_MESSAGE, 'Info'); \
     Start-Sleep -Milliseconds $ms; \
     $n.Dispose()";

#[cfg(any(target_os = "windows", test))]
fn powershell_balloon(app_name: &str, notification: &Notification) -> NotifyCommand {
    let mut command = NotifyCommand::new(
        "powershell",
        vec![
            "-NoProfile".to_string(),
            "-Command".to_string(),
            POWERSHELL_BALLOON.to_string(),
        ],
    );
    command.envs = vec![
        ("VOXNAV_NOTIFY_APP".to_string(), app_name.to_string()),
        ("VOXNAV_NOTIFY_TITLE".to_string(), notification.title.clone()),
        ("VOXNAV_NOTIFY_MESSAGE".to_string(), notification.message.clone()),
        (
            "VOXNAV_NOTIFY_TIMEOUT_MS".to_string(),
            (notification.timeout_secs * 1000).to_string(),
        ),
    ];
    command
}

#[cfg(any(target_os = "macos", test))]
fn escape_quotes(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}
