//! Settings menu: a two-step zone/launcher editor driven by one button.
//!
//! ```text
//!                 click: zone += 1          click: launcher += 1
//!                   ┌────┐                    ┌────┐
//!                   ▼    │       hold         ▼    │       hold
//!   (enter) ──► EditingZone ─────────► EditingLauncher ─────────► Committed
//!                   │                         │
//!                   └──── 15 s idle ──────────┴─────────────────► TimedOut
//! ```
//!
//! Every click or hold restarts the idle timer, so an operator who keeps
//! pressing stays in the menu; an idle one drops out without saving.
//!
//! While a session is open the display blinks at 1 Hz: the first half of
//! each second shows the whole draft identity, the second half shows
//! only the field being edited.
//!
//! The session is a pure function of gestures and timestamps:
//! [`MenuSession::step`] returns the next state and the side effects the
//! caller applies to the display, the gesture source and storage.

use heapless::Vec;

use super::Gestures;
use crate::config::{MENU_BLINK_MS, MENU_TIMEOUT_MS};
use crate::display::presenter::{edit_frame, identity_frame};
use crate::display::{Field, Segments};
use crate::identity::{next_number, Identity};

/// Menu states.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MenuState {
    /// First step: clicks advance the zone number.
    EditingZone,
    /// Second step: clicks advance the launcher number.
    EditingLauncher,
    /// Draft saved; session over.
    Committed,
    /// No gesture within the timeout; draft discarded.
    TimedOut,
}

impl MenuState {
    /// Check if the session is over
    pub fn is_terminal(&self) -> bool {
        matches!(self, MenuState::Committed | MenuState::TimedOut)
    }

    /// Field that clicks currently advance
    pub fn active_field(&self) -> Option<Field> {
        match self {
            MenuState::EditingZone => Some(Field::Zone),
            MenuState::EditingLauncher => Some(Field::Launcher),
            MenuState::Committed | MenuState::TimedOut => None,
        }
    }
}

/// One of the two alternating blink views.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BlinkFrame {
    /// Whole draft as `ZZ.LL`.
    Combined(Identity),
    /// Only the active field, in its own slot.
    Highlight { field: Field, value: u8 },
}

impl BlinkFrame {
    pub fn segments(&self) -> Segments {
        match *self {
            BlinkFrame::Combined(draft) => identity_frame(draft),
            BlinkFrame::Highlight { field, value } => edit_frame(field, value, true),
        }
    }
}

/// Pick the blink view for `now_ms`.
pub fn blink_frame(now_ms: u64, field: Field, draft: Identity) -> BlinkFrame {
    if now_ms % (MENU_BLINK_MS * 2) < MENU_BLINK_MS {
        BlinkFrame::Combined(draft)
    } else {
        let value = match field {
            Field::Zone => draft.zone,
            Field::Launcher => draft.launcher,
        };
        BlinkFrame::Highlight { field, value }
    }
}

/// Side effect requested by a transition, applied in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Effect {
    /// Drop pending gestures so the current press cannot fire again.
    ResetGestures,
    /// Show a blink view.
    Render(BlinkFrame),
    /// Save the identity and make it current.
    Persist(Identity),
    /// Show the "donE" confirmation.
    ShowConfirmation,
    /// Blank the display.
    Clear,
}

/// Longest effect sequence a single step emits.
pub const MAX_EFFECTS: usize = 2;

/// Result of one [`MenuSession::step`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: MenuState,
    pub effects: Vec<Effect, MAX_EFFECTS>,
}

impl Transition {
    fn new(state: MenuState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    fn push(&mut self, effect: Effect) {
        let pushed = self.effects.push(effect);
        debug_assert!(pushed.is_ok(), "effect list full");
    }

    /// Identity to persist, if this step committed.
    pub fn persisted(&self) -> Option<Identity> {
        self.effects.iter().find_map(|effect| match effect {
            Effect::Persist(identity) => Some(*identity),
            _ => None,
        })
    }
}

/// An open settings session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuSession {
    state: MenuState,
    draft: Identity,
    last_action_ms: u64,
}

impl MenuSession {
    /// Open a session on top of the current identity.
    ///
    /// Unconfigured fields start at 1. The caller resets the gesture
    /// source and switches it to the menu-step hold threshold.
    pub fn begin(current: Identity, now_ms: u64) -> Self {
        let draft = current.seeded();
        info!("Menu: open, draft {}", draft);
        Self {
            state: MenuState::EditingZone,
            draft,
            last_action_ms: now_ms,
        }
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// Working copy of the identity being edited.
    pub fn draft(&self) -> Identity {
        self.draft
    }

    pub fn last_action_ms(&self) -> u64 {
        self.last_action_ms
    }

    /// Advance the session by one poll tick.
    ///
    /// The timeout is checked before gestures are looked at; a click and
    /// a hold in the same tick are handled click first.
    pub fn step(&mut self, input: Gestures, now_ms: u64) -> Transition {
        let field = match self.state.active_field() {
            Some(field) => field,
            None => return Transition::new(self.state),
        };

        if now_ms.saturating_sub(self.last_action_ms) >= MENU_TIMEOUT_MS {
            info!("Menu: timed out, draft {} discarded", self.draft);
            self.state = MenuState::TimedOut;
            let mut transition = Transition::new(self.state);
            transition.push(Effect::Clear);
            return transition;
        }

        let mut transition = Transition::new(self.state);

        if input.click {
            match field {
                Field::Zone => self.draft.zone = next_number(self.draft.zone),
                Field::Launcher => self.draft.launcher = next_number(self.draft.launcher),
            }
            debug!("Menu: click, draft {}", self.draft);
            self.last_action_ms = now_ms;
        }

        if input.hold {
            match field {
                Field::Zone => {
                    debug!("Menu: zone {} set, editing launcher", self.draft.zone);
                    self.state = MenuState::EditingLauncher;
                    self.last_action_ms = now_ms;
                    transition.push(Effect::ResetGestures);
                }
                Field::Launcher => {
                    info!("Menu: committing {}", self.draft);
                    self.state = MenuState::Committed;
                    transition.state = self.state;
                    transition.push(Effect::Persist(self.draft));
                    transition.push(Effect::ShowConfirmation);
                    return transition;
                }
            }
        }

        transition.state = self.state;
        if let Some(field) = self.state.active_field() {
            transition.push(Effect::Render(blink_frame(now_ms, field, self.draft)));
        }
        transition
    }
}
