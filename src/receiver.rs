//! Top-level receiver loop.
//!
//! [`Receiver`] owns the identity, its radio address and the four
//! collaborators. [`Receiver::poll`] is called on every tick and never
//! blocks: display holds are deadlines, and the settings menu is a
//! session stepped once per tick.
//!
//! Idle mode:
//!   - click → show identity for 5 s
//!   - hold (5 s) → open the settings menu
//!   - radio payload → short acknowledgement pulse, unless the identity
//!     or confirmation is still being held
//!
//! Menu mode: gestures go to the [`MenuSession`]; radio payloads are
//! drained without touching the display.

use crate::config::{BUTTON_HOLD_MS, BUTTON_MENU_STEP_MS, DISPLAY_BRIGHTNESS, RADIO_PULSE_MS};
use crate::display::presenter::RADIO_ACK;
use crate::display::{Presenter, SegmentDisplay};
use crate::identity::{Identity, ReceiverAddress};
use crate::radio::{self, Radio};
use crate::storage::{ByteStore, IdentityStore};
use crate::ui::menu::{Effect, MenuSession, MenuState};
use crate::ui::{GestureSource, Gestures};

/// What the loop is doing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    Idle,
    Menu(MenuSession),
}

pub struct Receiver<G, D, S, R> {
    gestures: G,
    presenter: Presenter<D>,
    store: IdentityStore<S>,
    radio: R,
    identity: Identity,
    address: ReceiverAddress,
    mode: Mode,
}

impl<G, D, S, R> Receiver<G, D, S, R>
where
    G: GestureSource,
    D: SegmentDisplay,
    S: ByteStore,
    R: Radio,
{
    /// Bring the unit up: load the identity, open the radio pipe on its
    /// address and show it.
    pub fn start(mut gestures: G, display: D, store: S, mut radio: R, now_ms: u64) -> Self {
        let mut presenter = Presenter::new(display);
        presenter.set_brightness(DISPLAY_BRIGHTNESS);
        gestures.set_hold_threshold(BUTTON_HOLD_MS);

        let mut store = IdentityStore::new(store);
        let identity = store.load(Identity::UNCONFIGURED);
        let address = identity.address();
        info!("Receiver: identity {}, address {}", identity, address);
        if !identity.is_configured() {
            info!("Receiver: not configured, hold the button to set zone and launcher");
        }

        radio::listen_on(&mut radio, &address);
        presenter.show_identity(identity, now_ms);

        Self {
            gestures,
            presenter,
            store,
            radio,
            identity,
            address,
            mode: Mode::Idle,
        }
    }

    /// One loop iteration.
    pub fn poll(&mut self, now_ms: u64) {
        self.presenter.tick(now_ms);

        let was_idle = matches!(self.mode, Mode::Idle);
        if was_idle {
            self.poll_idle(now_ms);
        } else {
            self.poll_menu(now_ms);
        }

        let still_idle = was_idle && matches!(self.mode, Mode::Idle);
        if radio::drain(&mut self.radio).is_some()
            && still_idle
            && !self.presenter.pulse(&RADIO_ACK, now_ms, RADIO_PULSE_MS)
        {
            debug!("Radio: pulse skipped, print hold on screen");
        }
    }

    fn poll_idle(&mut self, now_ms: u64) {
        if self.gestures.poll_click() {
            self.presenter.show_identity(self.identity, now_ms);
        }

        if self.gestures.poll_hold() {
            self.gestures.set_hold_threshold(BUTTON_MENU_STEP_MS);
            self.gestures.reset();
            self.mode = Mode::Menu(MenuSession::begin(self.identity, now_ms));
        }
    }

    fn poll_menu(&mut self, now_ms: u64) {
        let input = Gestures::poll(&mut self.gestures);
        let transition = match &mut self.mode {
            Mode::Menu(session) => session.step(input, now_ms),
            Mode::Idle => return,
        };

        for effect in transition.effects.iter().copied() {
            match effect {
                Effect::ResetGestures => self.gestures.reset(),
                Effect::Render(frame) => self.presenter.render(&frame.segments()),
                Effect::Persist(identity) => {
                    self.commit(identity);
                }
                Effect::ShowConfirmation => self.presenter.show_confirmation(now_ms),
                Effect::Clear => self.presenter.clear(),
            }
        }

        if transition.state.is_terminal() {
            self.gestures.set_hold_threshold(BUTTON_HOLD_MS);
            self.mode = Mode::Idle;
            info!("Menu: closed ({})", transition.state);
        }
    }

    /// Make `identity` current: persist it, re-derive the address and
    /// re-open the radio pipe on it.
    pub fn commit(&mut self, identity: Identity) -> ReceiverAddress {
        self.store.save(identity);
        self.identity = identity;
        self.address = identity.address();
        radio::listen_on(&mut self.radio, &self.address);
        self.address
    }

    pub fn identity(&self) -> Identity {
        self.identity
    }

    pub fn address(&self) -> ReceiverAddress {
        self.address
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    /// Menu state while a session is open.
    pub fn menu_state(&self) -> Option<MenuState> {
        match &self.mode {
            Mode::Menu(session) => Some(session.state()),
            Mode::Idle => None,
        }
    }

    pub fn presenter(&self) -> &Presenter<D> {
        &self.presenter
    }

    pub fn gestures_mut(&mut self) -> &mut G {
        &mut self.gestures
    }

    pub fn store(&self) -> &S {
        self.store.bytes()
    }

    pub fn store_mut(&mut self) -> &mut S {
        self.store.bytes_mut()
    }

    pub fn radio(&self) -> &R {
        &self.radio
    }

    pub fn radio_mut(&mut self) -> &mut R {
        &mut self.radio
    }
}
