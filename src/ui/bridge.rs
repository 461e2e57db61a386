// EventBridge - feeds UI events from timers and callers into the controller
//
// The controller owns all page state and processes one event at a time, which
// keeps every read-modify-write on the store inside a single turn. Timers
// (carousel rotation, periodic sync, section settle delays) are tokio tasks
// that only ever send events; they never touch state themselves.

use super::page::Section;
use crate::models::LooseId;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};

/// Capacity of the event channel
///
/// Bounded so that a stalled controller cannot make timers grow memory
/// without limit; timer ticks are dropped with a warning when it is full.
pub const EVENT_CHANNEL_CAPACITY: usize = 100;

/// Everything the controller reacts to
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// Navigation button clicked
    ShowSection(Section),
    /// Settle delay after entering a section has elapsed
    SectionSettled(Section),
    /// Category card clicked (`card` is the card's index)
    FilterByCategory {
        category_id: LooseId,
        card: Option<usize>,
    },
    /// Search box or filter select changed
    ApplyFilters,
    SetSearch(String),
    SetCategoryFilter(String),
    SetFeaturedFilter(String),
    /// Download link clicked
    RecordDownload(i64),
    /// Prev/next carousel button
    StepSlide(i32),
    /// Carousel indicator clicked
    GoToSlide(usize),
    /// Carousel rotation timer fired; stale generations are ignored
    RotateTick { generation: u64 },
    /// Periodic sync timer fired
    SyncTick,
    ToggleTheme,
    Shutdown,
}

/// Cloneable sender side of the controller's event channel
#[derive(Clone, Debug)]
pub struct EventBridge {
    tx: mpsc::Sender<UiEvent>,
    tokio_handle: tokio::runtime::Handle,
}

impl EventBridge {
    /// Create a bridge and the receiver the controller reads from
    ///
    /// # Arguments
    /// * `tokio_handle` - Runtime used to spawn timer tasks
    pub fn new(tokio_handle: tokio::runtime::Handle) -> (Self, mpsc::Receiver<UiEvent>) {
        let (tx, rx) = mpsc::channel(EVENT_CHANNEL_CAPACITY);
        (Self { tx, tokio_handle }, rx)
    }

    /// Queue an event without waiting.
    ///
    /// # Returns
    /// `false` if the event was dropped (channel full or controller gone)
    pub fn send(&self, event: UiEvent) -> bool {
        match self.tx.try_send(event) {
            Ok(()) => true,
            Err(mpsc::error::TrySendError::Full(event)) => {
                tracing::warn!("UI event channel full - dropping {:?}", event);
                false
            }
            Err(mpsc::error::TrySendError::Closed(_)) => {
                tracing::debug!("UI event channel closed");
                false
            }
        }
    }

    /// Deliver `event` once after `delay`. The delivery cannot be cancelled.
    pub fn send_after(&self, delay: Duration, event: UiEvent) {
        let tx = self.tx.clone();
        let deadline = Instant::now() + delay;
        self.tokio_handle.spawn(async move {
            tokio::time::sleep_until(deadline).await;
            // One-shot events wait for room instead of being dropped
            let _ = tx.send(event).await;
        });
    }

    /// Deliver an event every `period`, starting one period from now.
    ///
    /// A zero period is raised to 1ms. The timer runs until the returned
    /// [`Ticker`] is dropped or cancelled.
    pub fn every<F>(&self, period: Duration, make_event: F) -> Ticker
    where
        F: Fn() -> UiEvent + Send + 'static,
    {
        let period = period.max(Duration::from_millis(1));
        let bridge = self.clone();
        let start = Instant::now() + period;
        let handle = self.tokio_handle.spawn(async move {
            let mut interval = tokio::time::interval_at(start, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                interval.tick().await;
                if bridge.tx.is_closed() {
                    break;
                }
                bridge.send(make_event());
            }
        });
        Ticker { handle }
    }
}

/// Handle to a running timer task; dropping it stops the timer
#[derive(Debug)]
pub struct Ticker {
    handle: JoinHandle<()>,
}

impl Ticker {
    pub fn cancel(self) {
        // Drop aborts
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Slot holding at most one live repeating timer
///
/// Starting always cancels whatever was running first. Each start bumps the
/// generation so ticks already queued from a cancelled timer can be told apart
/// and ignored. Without a bridge (headless use) the slot only tracks whether
/// it is armed; no task is spawned.
#[derive(Debug, Default)]
pub struct TimerSlot {
    ticker: Option<Ticker>,
    armed: bool,
    generation: u64,
}

impl TimerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancel any running timer and start a new one.
    ///
    /// # Arguments
    /// * `bridge` - Where ticks are delivered; `None` arms the slot without a task
    /// * `period` - Tick period
    /// * `make_event` - Builds the tick event from the new generation
    ///
    /// # Returns
    /// The generation of the new timer
    pub fn start<F>(&mut self, bridge: Option<&EventBridge>, period: Duration, make_event: F) -> u64
    where
        F: Fn(u64) -> UiEvent + Send + 'static,
    {
        self.cancel();
        self.generation += 1;
        let generation = self.generation;

        self.ticker = bridge.map(|b| b.every(period, move || make_event(generation)));
        self.armed = true;
        generation
    }

    /// Stop the running timer, if any.
    pub fn cancel(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.cancel();
        }
        self.armed = false;
    }

    pub fn is_running(&self) -> bool {
        self.armed
    }

    /// Whether `generation` belongs to the timer currently running
    pub fn is_current(&self, generation: u64) -> bool {
        self.armed && generation == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timer_slot_headless() {
        let mut slot = TimerSlot::new();
        assert!(!slot.is_running());

        let first = slot.start(None, Duration::from_secs(4), |g| UiEvent::RotateTick {
            generation: g,
        });
        assert!(slot.is_running());
        assert!(slot.is_current(first));

        let second = slot.start(None, Duration::from_secs(4), |g| UiEvent::RotateTick {
            generation: g,
        });
        assert!(!slot.is_current(first));
        assert!(slot.is_current(second));

        slot.cancel();
        assert!(!slot.is_running());
        assert!(!slot.is_current(second));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_delivers_ticks() {
        let (bridge, mut rx) = EventBridge::new(tokio::runtime::Handle::current());
        let _ticker = bridge.every(Duration::from_millis(4000), || UiEvent::SyncTick);

        tokio::time::advance(Duration::from_millis(3999)).await;
        tokio::task::yield_now().await;
        assert!(rx.try_recv().is_err());

        tokio::time::advance(Duration::from_millis(1)).await;
        assert_eq!(rx.recv().await, Some(UiEvent::SyncTick));
    }

    #[tokio::test(start_paused = true)]
    async fn test_every_with_zero_period_still_ticks() {
        let (bridge, mut rx) = EventBridge::new(tokio::runtime::Handle::current());
        let ticker = bridge.every(Duration::ZERO, || UiEvent::SyncTick);

        assert_eq!(rx.recv().await, Some(UiEvent::SyncTick));
        assert_eq!(rx.recv().await, Some(UiEvent::SyncTick));
        assert!(!ticker.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropped_ticker_stops() {
        let (bridge, mut rx) = EventBridge::new(tokio::runtime::Handle::current());
        let ticker = bridge.every(Duration::from_millis(100), || UiEvent::SyncTick);
        ticker.cancel();

        tokio::time::sleep(Duration::from_millis(500)).await;
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_send_after() {
        let (bridge, mut rx) = EventBridge::new(tokio::runtime::Handle::current());
        bridge.send_after(
            Duration::from_millis(150),
            UiEvent::SectionSettled(Section::Catalog),
        );

        let event = rx.recv().await;
        assert_eq!(event, Some(UiEvent::SectionSettled(Section::Catalog)));
    }

    #[tokio::test(start_paused = true)]
    async fn test_timer_slot_replaces_running_timer() {
        let (bridge, mut rx) = EventBridge::new(tokio::runtime::Handle::current());
        let mut slot = TimerSlot::new();

        slot.start(Some(&bridge), Duration::from_millis(100), |g| {
            UiEvent::RotateTick { generation: g }
        });
        let second = slot.start(Some(&bridge), Duration::from_millis(100), |g| {
            UiEvent::RotateTick { generation: g }
        });

        tokio::time::sleep(Duration::from_millis(350)).await;

        let mut ticks = 0;
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event, UiEvent::RotateTick { generation: second });
            ticks += 1;
        }
        assert_eq!(ticks, 3);
    }
}
