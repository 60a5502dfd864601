//! Top-level composition: the popup lifecycle, input routing and the
//! dismissal signal back to the presentation layer.

use tracing::{debug, info};

use crate::dispatch::Dispatcher;
use crate::input::Action;
use crate::launcher::{Launcher, SystemLauncher};
use crate::model::{Slot, SlotConfig, SLOT_COUNT};
use crate::selection::Selection;
use crate::storage::SlotStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Hidden,
    Active,
}

/// What the presentation layer should do after an input was handled.
///
/// `dismiss` asks it to stop showing the popup; the controller does not own
/// the window lifecycle, it only emits the intent. `notice` carries the one
/// user-visible failure message, a launch that could not be started.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Reaction {
    pub dismiss: bool,
    pub notice: Option<String>,
}

impl Reaction {
    fn none() -> Self {
        Self::default()
    }
}

/// Composes the slot store, the selection state machine and the dispatcher.
///
/// The presentation layer constructs one of these, calls [`activate`] when
/// the popup is summoned, forwards raw input as [`Action`]s and reacts to
/// the returned [`Reaction`]s. It observes state through [`slots`] and
/// [`current_selection`] and never mutates selection directly.
///
/// [`activate`]: Controller::activate
/// [`slots`]: Controller::slots
/// [`current_selection`]: Controller::current_selection
pub struct Controller<L> {
    store: SlotStore,
    dispatcher: Dispatcher<L>,
    config: SlotConfig,
    selection: Selection,
    phase: Phase,
}

impl Controller<SystemLauncher> {
    /// Controller wired to the per-user config location and the real
    /// process launcher.
    pub fn system() -> anyhow::Result<Self> {
        Ok(Self::new(
            SlotStore::from_project_dirs()?,
            Dispatcher::new(SystemLauncher),
        ))
    }
}

impl<L: Launcher> Controller<L> {
    pub fn new(store: SlotStore, dispatcher: Dispatcher<L>) -> Self {
        Self {
            store,
            dispatcher,
            config: SlotConfig::default().normalized(),
            selection: Selection::new(),
            phase: Phase::Hidden,
        }
    }

    /// Bring the popup up: reload the configuration, rebuild the grid view
    /// and reset the selection to the first slot.
    pub fn activate(&mut self) {
        self.reload();
        self.phase = Phase::Active;
        info!("Launcher activated");
    }

    /// Re-read the configuration and reset the selection, without changing
    /// the activation state.
    pub fn reload(&mut self) {
        self.config = self.store.load();
        self.selection.reset();
        debug!(
            "Loaded {} configured slot(s)",
            self.config.slots.iter().filter(|slot| slot.is_some()).count()
        );
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Route one input event. Ignored entirely while hidden.
    pub fn handle_input(&mut self, action: Action) -> Reaction {
        if self.phase == Phase::Hidden {
            return Reaction::none();
        }

        match action {
            Action::Left => self.selection.move_grid(-1, 0),
            Action::Right => self.selection.move_grid(1, 0),
            Action::Up => self.selection.move_grid(0, -1),
            Action::Down => self.selection.move_grid(0, 1),
            Action::NextSlot => self.selection.move_linear(1),
            Action::PrevSlot => self.selection.move_linear(-1),
            Action::Point(index) => self.selection.select_absolute(index),
            Action::Digit(digit) => {
                if !(1..=SLOT_COUNT as u8).contains(&digit) {
                    return Reaction::none();
                }
                self.selection.select_absolute(usize::from(digit) - 1);
                return self.execute_selected();
            }
            Action::Select => return self.execute_selected(),
            Action::Cancel => return self.dismiss(),
        }

        Reaction::none()
    }

    /// Currently highlighted slot index.
    pub fn current_selection(&self) -> usize {
        self.selection.index()
    }

    /// The nine `(index, slot)` pairs in grid order, for rendering.
    pub fn slots(&self) -> impl Iterator<Item = (usize, Option<&Slot>)> {
        (0..SLOT_COUNT).map(move |index| (index, self.config.get(index)))
    }

    /// Execute the selected slot, then request dismissal regardless of the
    /// dispatch outcome.
    fn execute_selected(&mut self) -> Reaction {
        let index = self.selection.index();
        let notice = match self.dispatcher.execute(index, self.config.get(index)) {
            Ok(_) => None,
            Err(err) => Some(err.to_string()),
        };

        let mut reaction = self.dismiss();
        reaction.notice = notice;
        reaction
    }

    fn dismiss(&mut self) -> Reaction {
        self.phase = Phase::Hidden;
        Reaction {
            dismiss: true,
            notice: None,
        }
    }
}
