//! Demo-mode input: a background ticker that plays random moves.

use std::thread::{self, JoinHandle};
use std::time::Duration;

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded, select, tick};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};

use crate::input::{InputEvent, InputSource};

/// What counts as "confirm" while the demo is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AttractConfirmPolicy {
    /// Any pending event counts as confirm.
    #[default]
    AnyEvent,
    /// Only a pending rotate counts as confirm.
    RotateOnly,
}

/// Producer half of a depth-one mailbox. Sending never blocks; a newer event
/// replaces one that has not been picked up yet.
#[derive(Debug, Clone)]
pub struct EventSlot {
    sender: Sender<InputEvent>,
    // Held so the producer can evict a stale event before sending.
    evict: Receiver<InputEvent>,
}

impl EventSlot {
    pub fn offer(&self, event: InputEvent) {
        while let Err(TrySendError::Full(_)) = self.sender.try_send(event) {
            let _ = self.evict.try_recv();
        }
    }
}

fn slot() -> (EventSlot, Receiver<InputEvent>) {
    let (sender, receiver) = bounded(1);
    let slot = EventSlot {
        sender,
        evict: receiver.clone(),
    };
    (slot, receiver)
}

/// Picks a demo move: soft drop half the time, otherwise a uniform choice
/// between left, right and rotate.
pub fn random_event(rng: &mut fastrand::Rng) -> InputEvent {
    const OTHERS: [InputEvent; 3] = [
        InputEvent::MoveLeft,
        InputEvent::MoveRight,
        InputEvent::Rotate,
    ];

    if rng.bool() {
        InputEvent::SoftDrop
    } else {
        OTHERS[rng.usize(..OTHERS.len())]
    }
}

struct Ticker {
    stop: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Ticker {
    fn spawn(interval: Duration, seed: Option<u64>, slot: EventSlot) -> Self {
        let (stop_tx, stop_rx) = bounded::<()>(0);

        let spawned = thread::Builder::new()
            .name("attract-ticker".into())
            .spawn(move || {
                let mut rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
                let ticker = tick(interval);
                loop {
                    select! {
                        recv(ticker) -> _ => slot.offer(random_event(&mut rng)),
                        // Disconnection is the stop signal.
                        recv(stop_rx) -> _ => break,
                    }
                }
                debug!("Attract ticker exiting");
            });

        let handle = match spawned {
            Ok(handle) => Some(handle),
            Err(e) => {
                warn!("Failed to start attract ticker: {e}");
                None
            }
        };

        Self {
            stop: Some(stop_tx),
            handle,
        }
    }

    fn stop(&mut self) {
        drop(self.stop.take());
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Attract ticker panicked");
            }
        }
    }
}

/// Input source for unattended demo play.
pub struct AttractInput {
    receiver: Receiver<InputEvent>,
    pending: Option<InputEvent>,
    policy: AttractConfirmPolicy,
    ticker: Option<Ticker>,
}

impl AttractInput {
    /// Starts a background ticker that offers one random event per `interval`.
    #[must_use]
    pub fn spawn(interval: Duration, policy: AttractConfirmPolicy) -> Self {
        Self::spawn_inner(interval, policy, None)
    }

    /// Like [`AttractInput::spawn`] with a reproducible event stream.
    #[must_use]
    pub fn spawn_seeded(interval: Duration, policy: AttractConfirmPolicy, seed: u64) -> Self {
        Self::spawn_inner(interval, policy, Some(seed))
    }

    fn spawn_inner(interval: Duration, policy: AttractConfirmPolicy, seed: Option<u64>) -> Self {
        let (slot, receiver) = slot();
        info!("Starting attract ticker every {}ms", interval.as_millis());
        Self {
            receiver,
            pending: None,
            policy,
            ticker: Some(Ticker::spawn(interval, seed, slot)),
        }
    }

    /// A source without a ticker; the caller drives it through the returned
    /// slot.
    #[must_use]
    pub fn manual(policy: AttractConfirmPolicy) -> (Self, EventSlot) {
        let (slot, receiver) = slot();
        let input = Self {
            receiver,
            pending: None,
            policy,
            ticker: None,
        };
        (input, slot)
    }

    #[must_use]
    pub fn policy(&self) -> AttractConfirmPolicy {
        self.policy
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.ticker
            .as_ref()
            .is_some_and(|ticker| ticker.handle.as_ref().is_some_and(|h| !h.is_finished()))
    }

    /// Stops the ticker thread and waits for it. Idempotent.
    pub fn stop(&mut self) {
        if let Some(mut ticker) = self.ticker.take() {
            ticker.stop();
            info!("Attract ticker stopped");
        }
    }

    /// Another handle on the mailbox. It disconnects once the ticker thread
    /// has exited.
    #[cfg(test)]
    pub(crate) fn subscribe(&self) -> Receiver<InputEvent> {
        self.receiver.clone()
    }

    fn peek(&mut self) -> Option<InputEvent> {
        // Newest wins, even over an event already peeked.
        if let Ok(event) = self.receiver.try_recv() {
            self.pending = Some(event);
        }
        self.pending
    }
}

impl InputSource for AttractInput {
    fn poll_event(&mut self) -> Option<InputEvent> {
        self.peek();
        self.pending.take()
    }

    fn is_confirm_pressed(&mut self) -> bool {
        match (self.policy, self.peek()) {
            (_, None) => false,
            (AttractConfirmPolicy::AnyEvent, Some(_)) => true,
            (AttractConfirmPolicy::RotateOnly, Some(event)) => event == InputEvent::Rotate,
        }
    }
}

impl Drop for AttractInput {
    fn drop(&mut self) {
        self.stop();
    }
}
