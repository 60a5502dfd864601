//! The external-launch collaborator.
//!
//! The dispatcher only ever talks to the [`Launcher`] trait; the concrete
//! [`SystemLauncher`] is the one place that touches `std::process`. Launches
//! are fire-and-forget: the child is spawned detached and never awaited.

use std::process::{Command, Stdio};
use thiserror::Error;
use tracing::{error, info};

/// Two-way classification of shell command text. Approximate by design:
/// any of `$`, `[`, `{` marks the text as script-style, everything else is
/// treated as a plain one-shot command. Scripts lacking those characters
/// are misclassified as plain; that is a documented limitation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandClass {
    Plain,
    Script,
}

/// A concrete launch operation, resolved by the dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LaunchRequest {
    /// Run an executable directly (argv split on whitespace).
    Spawn { command: String },
    /// Hand a folder path or URL to the platform opener.
    Open { target: String },
    /// Run shell command text through the interpreter matching its class.
    Shell {
        class: CommandClass,
        command: String,
    },
}

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("No command specified to launch.")]
    EmptyCommand,
    #[error("Failed to launch `{command}`: {source}")]
    LaunchFailed {
        command: String,
        source: std::io::Error,
    },
}

/// Fire-and-forget launch collaborator. Implementations must not wait for
/// the launched action to complete.
pub trait Launcher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError>;
}

impl<L: Launcher + ?Sized> Launcher for &L {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        (**self).launch(request)
    }
}

/// Launches via `std::process::Command`, detached with null stdio.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemLauncher;

#[cfg(unix)]
const OPENER: &str = "xdg-open";
#[cfg(windows)]
const OPENER: &str = "explorer";

#[cfg(not(windows))]
fn shell_argv(class: CommandClass, command: &str) -> (&'static str, Vec<String>) {
    let interpreter = match class {
        CommandClass::Script => "bash",
        CommandClass::Plain => "sh",
    };
    (interpreter, vec!["-c".to_string(), command.to_string()])
}

#[cfg(windows)]
fn shell_argv(class: CommandClass, command: &str) -> (&'static str, Vec<String>) {
    match class {
        // -NoExit keeps the interpreter open after the command finishes.
        CommandClass::Script => (
            "powershell.exe",
            vec![
                "-NoProfile".to_string(),
                "-NoExit".to_string(),
                "-Command".to_string(),
                command.to_string(),
            ],
        ),
        CommandClass::Plain => {
            ("cmd.exe", vec!["/C".to_string(), command.to_string()])
        }
    }
}

impl Launcher for SystemLauncher {
    fn launch(&self, request: &LaunchRequest) -> Result<(), LaunchError> {
        match request {
            LaunchRequest::Spawn { command } => {
                // Split into command and args. Simple whitespace split; the
                // argv boundary means no further quoting is needed.
                let parts: Vec<&str> = command.split_whitespace().collect();
                let Some((program, args)) = parts.split_first() else {
                    return Err(LaunchError::EmptyCommand);
                };
                spawn_detached(program, args)
            }
            LaunchRequest::Open { target } => spawn_detached(OPENER, [target]),
            LaunchRequest::Shell { class, command } => {
                let (interpreter, args) = shell_argv(*class, command);
                spawn_detached(interpreter, args)
            }
        }
    }
}

fn spawn_detached<I, S>(program: &str, args: I) -> Result<(), LaunchError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    info!("Launching: {}", program);

    match Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    {
        Ok(child) => {
            info!("Successfully launched {} (PID: {})", program, child.id());
            Ok(())
        }
        Err(e) => {
            error!("Failed to launch {}: {}", program, e);
            Err(LaunchError::LaunchFailed {
                command: program.to_string(),
                source: e,
            })
        }
    }
}
