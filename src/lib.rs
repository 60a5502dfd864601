//! **ninepad** — the slot-grid controller behind a 3x3 quick-launcher popup.
//!
//! Nine user-configurable slots, each bound to an action: launch an
//! application, open a folder, navigate to a URL, or run a shell command.
//! The user picks a slot by pointer, numeric key or directional/tab
//! navigation and triggers it; the popup then dismisses.
//!
//! # Architecture
//!
//! [`controller::Controller`] composes three pieces:
//!
//! * [`storage::SlotStore`] — loads and saves the nine-entry slot
//!   configuration, falling back to a default set when the file is missing
//!   or broken.
//! * [`selection::Selection`] — the pure selection state machine: absolute
//!   jumps, linear tab-cycling and wrap-around grid moves.
//! * [`dispatch::Dispatcher`] — resolves a slot's target by kind and asks
//!   the launch collaborator to run it, containing failures per slot.
//!
//! The launch side effect sits behind the [`launcher::Launcher`] trait so
//! the core is not coupled to any specific spawning backend;
//! [`launcher::SystemLauncher`] is the `std::process` implementation.
//!
//! Window presentation, hotkey registration and the OS message loop are the
//! embedding application's concern: it feeds [`input::Action`]s into the
//! controller and honors the returned [`controller::Reaction`]s (dismiss the
//! popup, show a launch-failure notice).

pub mod controller;
pub mod dispatch;
pub mod input;
pub mod launcher;
pub mod model;
pub mod selection;
pub mod storage;
