//! Launch the system web browser.
//!
//! - macOS: `open`
//! - Linux: `xdg-open`
//! - Windows: `cmd /C start`

use std::process::{Command, Stdio};

use thiserror::Error;

/// Errors that can occur when launching a browser.
#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("failed to spawn {command}: {source}")]
    Spawn {
        command: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("opening a browser is not supported on this platform")]
    Unsupported,
}

/// Open `url` in the default browser without waiting for it to exit.
///
/// # Errors
///
/// Returns `BrowserError::Spawn` if the platform launcher cannot be started.
pub fn open(url: &str) -> Result<(), BrowserError> {
    let (command, args) = launcher(url)?;

    Command::new(command)
        .args(&args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|source| BrowserError::Spawn { command, source })?;

    Ok(())
}

/// Launcher program and arguments for the current platform.
fn launcher(url: &str) -> Result<(&'static str, Vec<String>), BrowserError> {
    #[cfg(target_os = "macos")]
    {
        Ok(("open", vec![url.to_owned()]))
    }

    #[cfg(all(unix, not(target_os = "macos")))]
    {
        Ok(("xdg-open", vec![url.to_owned()]))
    }

    #[cfg(target_os = "windows")]
    {
        // The empty string is the window title consumed by `start`.
        Ok((
            "cmd",
            vec!["/C".into(), "start".into(), String::new(), url.to_owned()],
        ))
    }

    #[cfg(not(any(unix, target_os = "windows")))]
    {
        let _ = url;
        Err(BrowserError::Unsupported)
    }
}
