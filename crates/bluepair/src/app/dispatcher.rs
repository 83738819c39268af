//! Single consumer loop
//!
//! Waits for the wake signal, drains the event queue in order, then services
//! the deferred key-ready flag once per cycle.

use super::callbacks::StackCallbacks;
use super::context::PairingContext;
use super::display::{DisplayLine, StatusDisplay};
use super::queue::{EventQueue, EventSender, InternalEvents};
use super::stack::{BondManagerParams, PeripheralStack};
use crate::config::PeripheralConfig;
use crate::error::PairingResult;
use std::sync::Arc;
use tracing::{debug, info, trace};

/// Owns the pairing context and the collaborators it drives
pub struct Dispatcher<S, D> {
    queue: Arc<EventQueue>,
    context: PairingContext,
    config: PeripheralConfig,
    stack: S,
    display: D,
}

impl<S, D> Dispatcher<S, D>
where
    S: PeripheralStack,
    D: StatusDisplay,
{
    pub fn new(config: PeripheralConfig, stack: S, display: D) -> Self {
        Self {
            queue: Arc::new(EventQueue::new(config.queue_capacity)),
            context: PairingContext::new(&config.bond),
            config,
            stack,
            display,
        }
    }

    /// Producer handle for raw events
    pub fn sender(&self) -> EventSender {
        EventSender::new(self.queue.clone())
    }

    /// Callback adapter for the stack and board drivers
    pub fn callbacks(&self) -> StackCallbacks {
        StackCallbacks::new(self.sender())
    }

    /// Configure the stack, start the peripheral and request the local keys
    pub fn start(&mut self) -> PairingResult<()> {
        let config = &self.config;
        let stack = &mut self.stack;

        if let Some(addr) = config.own_address {
            stack.set_own_address(addr)?;
        }

        let advertising = &config.advertising;
        stack.set_advertising_enabled(advertising.initial_enable, advertising.off_time)?;
        stack.set_scan_response_data(advertising.scan_response_data()?.as_bytes())?;
        stack.set_advertising_data(advertising.advert_data()?.as_bytes())?;
        stack.set_device_name(&config.device_name)?;
        stack.set_advertising_interval(advertising.interval)?;
        stack.set_bond_manager_params(&BondManagerParams::from(&config.bond))?;
        stack.start()?;

        self.context.oob.request_local_keys(stack)?;

        self.display.write_line(DisplayLine::Title, &config.title);
        info!("Peripheral '{}' started", config.device_name);
        Ok(())
    }

    /// Run forever
    pub fn run(&mut self) -> ! {
        loop {
            self.run_once();
        }
    }

    /// One blocking cycle: wait for a wake-up, then process
    pub fn run_once(&mut self) -> usize {
        self.queue.wait();
        self.process()
    }

    /// Process whatever is pending without blocking
    pub fn poll(&mut self) -> usize {
        self.queue.try_wake();
        self.process()
    }

    fn process(&mut self) -> usize {
        let mut handled = 0;

        while let Some(event) = self.queue.drain_one() {
            self.context
                .handle_event(&mut self.stack, &mut self.display, event);
            handled += 1;
        }

        if self.queue.take(InternalEvents::ECC_KEYS_READY) {
            debug!("ECC keys ready");
            self.context.on_keys_ready(&mut self.stack);
        }

        trace!("Cycle handled {} events", handled);
        handled
    }

    pub fn context(&self) -> &PairingContext {
        &self.context
    }

    pub fn config(&self) -> &PeripheralConfig {
        &self.config
    }

    pub fn stack(&self) -> &S {
        &self.stack
    }

    pub fn stack_mut(&mut self) -> &mut S {
        &mut self.stack
    }

    pub fn display(&self) -> &D {
        &self.display
    }

    pub fn queue(&self) -> &EventQueue {
        &self.queue
    }
}
