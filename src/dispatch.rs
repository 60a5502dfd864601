//! Action dispatch: maps a slot's declared kind to a concrete launch
//! request, resolves the target, and contains any launch failure to the
//! single invocation that caused it.

use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::launcher::{CommandClass, LaunchRequest, Launcher};
use crate::model::{Slot, SlotKind};

/// Outcome of one successful execution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// A launch was requested from the collaborator.
    Launched,
    /// Nothing to do: absent slot, blank target or unrecognized kind.
    /// Empty slots are inert, not errors.
    Inert,
}

/// A contained launch failure, tied to the slot that caused it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Error executing slot {}: {message}", .slot + 1)]
pub struct DispatchError {
    /// Zero-based index of the offending slot.
    pub slot: usize,
    pub message: String,
}

pub type DispatchResult = Result<DispatchOutcome, DispatchError>;

/// Characters that mark shell command text as script-style rather than a
/// plain one-shot command. An approximate sniff, kept deliberately simple.
const SCRIPT_MARKERS: [char; 3] = ['$', '[', '{'];

/// Classify shell command text. See [`CommandClass`] for the caveats.
pub fn classify_command(text: &str) -> CommandClass {
    if text.contains(SCRIPT_MARKERS) {
        CommandClass::Script
    } else {
        CommandClass::Plain
    }
}

/// Resolves slot targets and requests launches, isolating failures per
/// invocation: one slot's failure never reaches the selection machine or
/// other slots.
pub struct Dispatcher<L> {
    launcher: L,
    base_dir: PathBuf,
}

impl<L: Launcher> Dispatcher<L> {
    /// Dispatcher resolving relative targets against the running
    /// executable's directory.
    pub fn new(launcher: L) -> Self {
        Self {
            launcher,
            base_dir: default_base_dir(),
        }
    }

    pub fn with_base_dir(launcher: L, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            launcher,
            base_dir: base_dir.into(),
        }
    }

    /// Execute the slot at `index`. Absent slots, blank targets and
    /// unrecognized kinds are no-op successes; collaborator failures come
    /// back as a [`DispatchError`] carrying the slot index.
    pub fn execute(&self, index: usize, slot: Option<&Slot>) -> DispatchResult {
        let Some(slot) = slot else {
            return Ok(DispatchOutcome::Inert);
        };
        let Some(kind) = slot.kind else {
            return Ok(DispatchOutcome::Inert);
        };
        let Some(target) = slot.target_text() else {
            return Ok(DispatchOutcome::Inert);
        };

        let request = match kind {
            SlotKind::App => LaunchRequest::Spawn {
                command: self.resolve_target(target),
            },
            SlotKind::Folder => LaunchRequest::Open {
                target: self.resolve_target(target),
            },
            // URLs are used verbatim, no path resolution.
            SlotKind::Url => LaunchRequest::Open {
                target: target.to_string(),
            },
            SlotKind::Command => {
                let class = classify_command(target);
                debug!("Classified command as {:?}: {}", class, target);
                LaunchRequest::Shell {
                    class,
                    command: target.to_string(),
                }
            }
        };

        self.launcher
            .launch(&request)
            .map(|()| DispatchOutcome::Launched)
            .map_err(|err| DispatchError {
                slot: index,
                message: err.to_string(),
            })
    }

    /// Best-effort resolution, not a validation gate: a relative target is
    /// anchored to the base directory only when the result actually exists;
    /// otherwise the original string is passed through and the launch
    /// primitive decides.
    fn resolve_target(&self, target: &str) -> String {
        let path = Path::new(target);
        if path.is_absolute() {
            return target.to_string();
        }

        let combined = self.base_dir.join(path);
        if combined.exists() {
            combined.display().to_string()
        } else {
            target.to_string()
        }
    }
}

fn default_base_dir() -> PathBuf {
    std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
        .unwrap_or_else(|| PathBuf::from("."))
}
