//! Integration tests for the receiver loop with fake collaborators.

use std::collections::VecDeque;

use zone_receiver::config::{
    BUTTON_HOLD_MS, BUTTON_MENU_STEP_MS, MENU_TIMEOUT_MS, PRINT_HOLD_MS, RADIO_PULSE_MS,
};
use zone_receiver::display::presenter::{identity_frame, RADIO_ACK};
use zone_receiver::display::segments::{encode_digit, Segments, BLANK, DONE, SEG_DP};
use zone_receiver::display::SegmentDisplay;
use zone_receiver::radio::{Payload, Radio};
use zone_receiver::receiver::Mode;
use zone_receiver::storage::RamStore;
use zone_receiver::ui::menu::MenuState;
use zone_receiver::ui::GestureSource;
use zone_receiver::{derive_address, Identity, Receiver, ReceiverAddress};

#[derive(Default)]
struct FakeGestures {
    click: bool,
    hold: bool,
    resets: usize,
    threshold: u64,
}

impl GestureSource for FakeGestures {
    fn poll_click(&mut self) -> bool {
        std::mem::take(&mut self.click)
    }

    fn poll_hold(&mut self) -> bool {
        std::mem::take(&mut self.hold)
    }

    fn reset(&mut self) {
        self.click = false;
        self.hold = false;
        self.resets += 1;
    }

    fn set_hold_threshold(&mut self, hold_ms: u64) {
        self.threshold = hold_ms;
    }
}

#[derive(Default)]
struct FakeDisplay {
    frames: Vec<Segments>,
    brightness: Option<u8>,
}

impl FakeDisplay {
    fn last(&self) -> Segments {
        *self.frames.last().expect("nothing displayed")
    }
}

impl SegmentDisplay for FakeDisplay {
    fn set_segments(&mut self, segments: &Segments) {
        self.frames.push(*segments);
    }

    fn set_brightness(&mut self, level: u8) {
        self.brightness = Some(level);
    }
}

#[derive(Default)]
struct FakeRadio {
    address: Option<ReceiverAddress>,
    listen_calls: usize,
    inbox: VecDeque<Payload>,
}

impl Radio for FakeRadio {
    fn set_listen_address(&mut self, address: &ReceiverAddress) {
        self.address = Some(*address);
    }

    fn start_listening(&mut self) {
        self.listen_calls += 1;
    }

    fn available(&mut self) -> bool {
        !self.inbox.is_empty()
    }

    fn read(&mut self, buf: &mut [u8]) {
        if let Some(payload) = self.inbox.pop_front() {
            buf.copy_from_slice(&payload[..buf.len()]);
        }
    }
}

type TestReceiver = Receiver<FakeGestures, FakeDisplay, RamStore, FakeRadio>;

fn boot(store: RamStore) -> TestReceiver {
    Receiver::start(
        FakeGestures::default(),
        FakeDisplay::default(),
        store,
        FakeRadio::default(),
        0,
    )
}

fn click(rx: &mut TestReceiver, now_ms: u64) {
    rx.gestures_mut().click = true;
    rx.poll(now_ms);
}

fn hold(rx: &mut TestReceiver, now_ms: u64) {
    rx.gestures_mut().hold = true;
    rx.poll(now_ms);
}

fn last_frame(rx: &TestReceiver) -> Segments {
    rx.presenter().display().last()
}

#[test]
fn fresh_unit_end_to_end() {
    let mut rx = boot(RamStore::new());
    assert_eq!(rx.identity(), Identity::UNCONFIGURED);
    assert_eq!(rx.presenter().display().brightness, Some(7));
    assert_eq!(rx.gestures_mut().threshold, BUTTON_HOLD_MS);

    // Zero state: a lone 0 with the separator point.
    assert_eq!(last_frame(&rx), [0, SEG_DP, 0, encode_digit(0)]);
    assert_eq!(rx.radio().address, Some(derive_address(0, 0)));

    hold(&mut rx, 6_000);
    assert_eq!(rx.menu_state(), Some(MenuState::EditingZone));
    assert_eq!(rx.gestures_mut().threshold, BUTTON_MENU_STEP_MS);

    click(&mut rx, 6_100);
    click(&mut rx, 6_200);
    hold(&mut rx, 6_300);
    assert_eq!(rx.menu_state(), Some(MenuState::EditingLauncher));
    assert_eq!(rx.store().as_bytes(), &[0, 0]);

    click(&mut rx, 6_400);
    click(&mut rx, 6_500);
    click(&mut rx, 6_600);
    hold(&mut rx, 6_700);

    assert_eq!(*rx.mode(), Mode::Idle);
    assert_eq!(rx.store().as_bytes(), &[3, 4]);
    assert_eq!(rx.identity(), Identity::new(3, 4));
    assert_eq!(last_frame(&rx), DONE);
    assert_eq!(rx.gestures_mut().threshold, BUTTON_HOLD_MS);

    rx.poll(6_700 + PRINT_HOLD_MS - 1);
    assert_eq!(last_frame(&rx), DONE);
    rx.poll(6_700 + PRINT_HOLD_MS);
    assert_eq!(last_frame(&rx), BLANK);

    let rebooted = boot(rx.store().clone());
    assert_eq!(rebooted.identity(), Identity::new(3, 4));
}

#[test]
fn commit_reopens_radio_on_new_address() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    assert_eq!(rx.radio().listen_calls, 1);

    hold(&mut rx, 100);
    click(&mut rx, 200);
    hold(&mut rx, 300);
    hold(&mut rx, 400);

    assert_eq!(rx.identity(), Identity::new(6, 10));
    assert_eq!(rx.address(), derive_address(6, 10));
    assert_eq!(rx.radio().address, Some(derive_address(6, 10)));
    assert_eq!(rx.radio().listen_calls, 2);
}

#[test]
fn commit_directly_updates_identity_and_store() {
    let mut rx = boot(RamStore::new());
    let address = rx.commit(Identity::new(12, 34));

    assert_eq!(address.as_bytes(), &[1, 2, 0, 3, 4, 0]);
    assert_eq!(rx.store().as_bytes(), &[12, 34]);
    assert_eq!(rx.identity(), Identity::new(12, 34));
}

#[test]
fn click_shows_identity_for_five_seconds() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    rx.poll(PRINT_HOLD_MS);
    assert_eq!(last_frame(&rx), BLANK);

    click(&mut rx, 20_000);
    assert_eq!(last_frame(&rx), identity_frame(Identity::new(5, 10)));

    rx.poll(20_000 + PRINT_HOLD_MS - 1);
    assert_eq!(last_frame(&rx), identity_frame(Identity::new(5, 10)));
    rx.poll(20_000 + PRINT_HOLD_MS);
    assert_eq!(last_frame(&rx), BLANK);
}

#[test]
fn idle_menu_times_out_without_saving() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    hold(&mut rx, 1_000);
    click(&mut rx, 2_000);

    rx.poll(2_000 + MENU_TIMEOUT_MS - 1);
    assert_eq!(rx.menu_state(), Some(MenuState::EditingZone));

    rx.poll(2_000 + MENU_TIMEOUT_MS);
    assert_eq!(*rx.mode(), Mode::Idle);
    assert_eq!(rx.identity(), Identity::new(5, 10));
    assert_eq!(rx.store().as_bytes(), &[5, 10]);
    assert_eq!(last_frame(&rx), BLANK);
    assert_eq!(rx.gestures_mut().threshold, BUTTON_HOLD_MS);
}

#[test]
fn menu_blinks_between_views() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    hold(&mut rx, 1_000);

    rx.poll(1_100);
    assert_eq!(last_frame(&rx), identity_frame(Identity::new(5, 10)));

    rx.poll(1_600);
    assert_eq!(last_frame(&rx), [encode_digit(0), encode_digit(5) | SEG_DP, 0, 0]);
}

#[test]
fn menu_entry_resets_gestures() {
    let mut rx = boot(RamStore::new());
    hold(&mut rx, 100);
    assert_eq!(rx.gestures_mut().resets, 1);

    hold(&mut rx, 200); // to second step
    assert_eq!(rx.gestures_mut().resets, 2);
}

#[test]
fn radio_payload_pulses_acknowledgement() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    rx.radio_mut().inbox.push_back([0xAB; 32]);

    rx.poll(10_000);
    assert!(rx.radio().inbox.is_empty());
    assert_eq!(last_frame(&rx), RADIO_ACK);

    rx.poll(10_000 + RADIO_PULSE_MS);
    assert_eq!(last_frame(&rx), BLANK);
}

#[test]
fn radio_payload_keeps_startup_identity() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    rx.radio_mut().inbox.push_back([0xAB; 32]);

    rx.poll(100);
    assert!(rx.radio().inbox.is_empty());
    rx.poll(100 + RADIO_PULSE_MS);
    assert_eq!(last_frame(&rx), identity_frame(Identity::new(5, 10)));

    rx.poll(PRINT_HOLD_MS);
    assert_eq!(last_frame(&rx), BLANK);
}

#[test]
fn radio_payload_keeps_clicked_identity() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    click(&mut rx, 20_000);
    rx.radio_mut().inbox.push_back([0xAB; 32]);

    rx.poll(20_100);
    rx.poll(20_100 + RADIO_PULSE_MS);
    assert_eq!(last_frame(&rx), identity_frame(Identity::new(5, 10)));
    assert_eq!(rx.presenter().clear_deadline(), Some(20_000 + PRINT_HOLD_MS));
    assert!(!rx.presenter().display().frames.contains(&RADIO_ACK));
}

#[test]
fn radio_payload_keeps_confirmation() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    hold(&mut rx, 100);
    hold(&mut rx, 200);
    hold(&mut rx, 300);
    assert_eq!(last_frame(&rx), DONE);

    rx.radio_mut().inbox.push_back([0x01; 32]);
    rx.poll(400);
    rx.poll(400 + RADIO_PULSE_MS);
    assert_eq!(last_frame(&rx), DONE);

    rx.poll(300 + PRINT_HOLD_MS);
    assert_eq!(last_frame(&rx), BLANK);
}

#[test]
fn radio_payload_after_print_hold_pulses() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    rx.radio_mut().inbox.push_back([0xAB; 32]);

    rx.poll(PRINT_HOLD_MS);
    assert_eq!(last_frame(&rx), RADIO_ACK);
}

#[test]
fn back_to_back_payloads_drain_one_per_tick() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    rx.poll(PRINT_HOLD_MS);
    for n in 0..3u8 {
        rx.radio_mut().inbox.push_back([n; 32]);
    }

    rx.poll(10_000);
    assert_eq!(rx.radio().inbox.len(), 2);
    rx.poll(10_005);
    rx.poll(10_010);
    assert!(rx.radio().inbox.is_empty());
    assert_eq!(last_frame(&rx), RADIO_ACK);
    assert_eq!(rx.presenter().clear_deadline(), Some(10_010 + RADIO_PULSE_MS));

    rx.poll(10_010 + RADIO_PULSE_MS);
    assert_eq!(last_frame(&rx), BLANK);
}

#[test]
fn radio_payload_during_menu_is_drained_silently() {
    let mut rx = boot(RamStore::from_bytes([5, 10]));
    hold(&mut rx, 1_000);
    rx.radio_mut().inbox.push_back([0x01; 32]);

    rx.poll(1_100);
    assert!(rx.radio().inbox.is_empty());
    assert!(!rx.presenter().display().frames.contains(&RADIO_ACK));
    assert_eq!(rx.menu_state(), Some(MenuState::EditingZone));
}
