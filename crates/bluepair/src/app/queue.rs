//! Hand-off from asynchronous producers to the dispatcher
//!
//! Producers append [`AppEvent`]s and raise one-shot [`InternalEvents`]
//! flags; both post the consumer's [`WakeSignal`]. The dispatcher is the only
//! consumer.

use super::event::AppEvent;
use crate::error::{PairingError, PairingResult};
use bitflags::bitflags;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU16, Ordering};
use std::sync::{Arc, Condvar, Mutex, PoisonError};

bitflags! {
    /// Deferred actions serviced after each drain
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct InternalEvents: u16 {
        /// The crypto subsystem finished producing the local ECC keys
        const ECC_KEYS_READY = 0x0010;
    }
}

/// Binary semaphore the dispatcher blocks on.
///
/// A post while nobody waits is remembered until the next wait.
#[derive(Debug, Default)]
pub struct WakeSignal {
    raised: Mutex<bool>,
    cond: Condvar,
}

impl WakeSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wake the consumer
    pub fn post(&self) {
        let mut raised = self.raised.lock().unwrap_or_else(PoisonError::into_inner);
        *raised = true;
        self.cond.notify_one();
    }

    /// Block until posted, then consume the post
    pub fn wait(&self) {
        let mut raised = self.raised.lock().unwrap_or_else(PoisonError::into_inner);
        while !*raised {
            raised = self
                .cond
                .wait(raised)
                .unwrap_or_else(PoisonError::into_inner);
        }
        *raised = false;
    }

    /// Consume a pending post without blocking
    pub fn try_take(&self) -> bool {
        let mut raised = self.raised.lock().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *raised, false)
    }
}

/// FIFO of application events plus the deferred-action flags
#[derive(Debug)]
pub struct EventQueue {
    messages: Mutex<VecDeque<AppEvent>>,
    capacity: usize,
    events: AtomicU16,
    wake: WakeSignal,
}

impl EventQueue {
    /// Create a queue holding at most `capacity` events
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: Mutex::new(VecDeque::new()),
            capacity,
            events: AtomicU16::new(0),
            wake: WakeSignal::new(),
        }
    }

    /// Append an event and wake the consumer.
    ///
    /// Fails with [`PairingError::QueueFull`] when the queue is at capacity or
    /// storage for the event cannot be allocated. The event is not kept.
    pub fn enqueue(&self, event: AppEvent) -> PairingResult<()> {
        {
            let mut messages = self.messages.lock().unwrap_or_else(PoisonError::into_inner);
            if messages.len() >= self.capacity {
                return Err(PairingError::QueueFull);
            }
            messages
                .try_reserve(1)
                .map_err(|_| PairingError::QueueFull)?;
            messages.push_back(event);
        }

        self.wake.post();
        Ok(())
    }

    /// Remove the oldest event, never blocking
    pub fn drain_one(&self) -> Option<AppEvent> {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .pop_front()
    }

    /// Set deferred-action flags and wake the consumer
    pub fn raise(&self, events: InternalEvents) {
        self.events.fetch_or(events.bits(), Ordering::AcqRel);
        self.wake.post();
    }

    /// Clear `event` and report whether it was set
    pub fn take(&self, event: InternalEvents) -> bool {
        let previous = self.events.fetch_and(!event.bits(), Ordering::AcqRel);
        InternalEvents::from_bits_truncate(previous).contains(event)
    }

    /// Flags currently raised
    pub fn pending_events(&self) -> InternalEvents {
        InternalEvents::from_bits_truncate(self.events.load(Ordering::Acquire))
    }

    /// Block until a producer posts
    pub fn wait(&self) {
        self.wake.wait();
    }

    /// Consume a pending wake-up without blocking
    pub fn try_wake(&self) -> bool {
        self.wake.try_take()
    }

    pub fn len(&self) -> usize {
        self.messages
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Cloneable producer handle
#[derive(Debug, Clone)]
pub struct EventSender {
    queue: Arc<EventQueue>,
}

impl EventSender {
    pub fn new(queue: Arc<EventQueue>) -> Self {
        Self { queue }
    }

    /// Queue an event for the dispatcher
    pub fn send(&self, event: AppEvent) -> PairingResult<()> {
        self.queue.enqueue(event)
    }

    /// Raise the one-shot key-ready flag
    pub fn signal_keys_ready(&self) {
        self.queue.raise(InternalEvents::ECC_KEYS_READY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::event::Keys;
    use std::thread;
    use std::time::Duration;

    fn key_event(bits: u8) -> AppEvent {
        AppEvent::KeysChanged(Keys::from_bits_retain(bits))
    }

    #[test]
    fn test_fifo_order() {
        let queue = EventQueue::new(8);
        for bits in 1..=4 {
            queue.enqueue(key_event(bits)).unwrap();
        }

        for bits in 1..=4 {
            assert_eq!(queue.drain_one(), Some(key_event(bits)));
        }
        assert_eq!(queue.drain_one(), None);
    }

    #[test]
    fn test_full_queue_drops_message() {
        let queue = EventQueue::new(2);
        queue.enqueue(key_event(1)).unwrap();
        queue.enqueue(key_event(2)).unwrap();

        assert_eq!(queue.enqueue(key_event(3)), Err(PairingError::QueueFull));
        assert_eq!(queue.len(), 2);
        assert_eq!(queue.drain_one(), Some(key_event(1)));
        assert_eq!(queue.drain_one(), Some(key_event(2)));
        assert!(queue.is_empty());
    }

    #[test]
    fn test_flag_taken_once() {
        let queue = EventQueue::new(1);
        assert!(!queue.take(InternalEvents::ECC_KEYS_READY));

        queue.raise(InternalEvents::ECC_KEYS_READY);
        assert_eq!(queue.pending_events(), InternalEvents::ECC_KEYS_READY);
        assert!(queue.take(InternalEvents::ECC_KEYS_READY));
        assert!(!queue.take(InternalEvents::ECC_KEYS_READY));
    }

    #[test]
    fn test_post_before_wait_is_kept() {
        let signal = WakeSignal::new();
        signal.post();
        signal.post();

        // Coalesced into one pending post
        signal.wait();
        assert!(!signal.try_take());
    }

    #[test]
    fn test_wait_wakes_on_enqueue() {
        let queue = Arc::new(EventQueue::new(4));
        let sender = EventSender::new(queue.clone());

        let producer = thread::spawn(move || {
            thread::sleep(Duration::from_millis(20));
            sender.send(key_event(0x02)).unwrap();
        });

        queue.wait();
        assert_eq!(queue.drain_one(), Some(key_event(0x02)));
        producer.join().unwrap();
    }

    #[test]
    fn test_multi_producer_per_producer_order() {
        use crate::app::event::{PasscodeRequest, UiOutputs};
        use crate::gap::BdAddr;

        const PRODUCERS: u16 = 4;
        const PER_PRODUCER: u32 = 200;

        let queue = Arc::new(EventQueue::new(
            usize::from(PRODUCERS) * PER_PRODUCER as usize,
        ));
        let handles: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let sender = EventSender::new(queue.clone());
                thread::spawn(move || {
                    for seq in 0..PER_PRODUCER {
                        sender
                            .send(AppEvent::PasscodeNeeded(PasscodeRequest {
                                peer: BdAddr::default(),
                                handle: producer,
                                ui_outputs: UiOutputs::DISPLAY,
                                numeric_comparison: seq,
                            }))
                            .unwrap();
                    }
                })
            })
            .collect();

        let mut next_seq = vec![0u32; usize::from(PRODUCERS)];
        let mut received = 0usize;
        let expected = usize::from(PRODUCERS) * PER_PRODUCER as usize;

        while received < expected {
            match queue.drain_one() {
                Some(AppEvent::PasscodeNeeded(request)) => {
                    let producer = usize::from(request.handle);
                    assert_eq!(request.numeric_comparison, next_seq[producer]);
                    next_seq[producer] += 1;
                    received += 1;
                }
                Some(other) => panic!("unexpected event {:?}", other),
                None => thread::yield_now(),
            }
        }

        for handle in handles {
            handle.join().unwrap();
        }
        assert!(next_seq.iter().all(|n| *n == PER_PRODUCER));
        assert_eq!(queue.drain_one(), None);
    }
}
