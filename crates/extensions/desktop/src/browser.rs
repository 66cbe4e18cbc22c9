//! Browser launching.

use std::process::Command;

use tracing::info;
use voxnav_config::{ConfigLoader, ExecutorConfig};
use voxnav_protocols::{BrowserLauncher, InputError};

/// Opens URLs with the preferred browser command, or the platform opener.
#[derive(Debug, Clone)]
pub struct SystemBrowser {
    preferred: Option<Vec<String>>,
}

impl SystemBrowser {
    pub fn new(config: &ExecutorConfig) -> Self {
        let preferred = config
            .browser
            .as_deref()
            .map(|cmd| {
                cmd.split_whitespace()
                    .map(ConfigLoader::expand_path)
                    .collect::<Vec<_>>()
            })
            .filter(|parts| !parts.is_empty());
        Self { preferred }
    }

    /// Program and arguments used to open `url`.
    pub(crate) fn command_for(&self, url: &str) -> (String, Vec<String>) {
        if let Some(parts) = &self.preferred {
            let mut args = parts[1..].to_vec();
            args.push(url.to_string());
            return (parts[0].clone(), args);
        }
        platform_opener(url)
    }
}

#[cfg(target_os = "macos")]
fn platform_opener(url: &str) -> (String, Vec<String>) {
    ("open".to_string(), vec![url.to_string()])
}

#[cfg(target_os = "windows")]
fn platform_opener(url: &str) -> (String, Vec<String>) {
    (
        "cmd".to_string(),
        vec![
            "/C".to_string(),
            "start".to_string(),
            String::new(),
            url.to_string(),
        ],
    )
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn platform_opener(url: &str) -> (String, Vec<String>) {
    ("xdg-open".to_string(), vec![url.to_string()])
}

impl BrowserLauncher for SystemBrowser {
    fn open_url(&self, url: &str) -> Result<(), InputError> {
        let (program, args) = self.command_for(url);

        if self.preferred.is_some() {
            // The browser keeps running; do not wait for it.
            Command::new(&program)
                .args(&args)
                .spawn()
                .map_err(|e| InputError::BrowserLaunch(format!("{}: {}", program, e)))?;
        } else {
            let status = Command::new(&program)
                .args(&args)
                .status()
                .map_err(|e| InputError::BrowserLaunch(format!("{}: {}", program, e)))?;
            if !status.success() {
                return Err(InputError::BrowserLaunch(format!(
                    "{} exited with {}",
                    program, status
                )));
            }
        }

        info!(%url, %program, "Opened in the browser");
        Ok(())
    }
}
