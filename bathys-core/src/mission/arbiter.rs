//! Shared actuator access
//!
//! The orchestrator's self-test, the actuator task and the bobbing task all
//! drive the same solenoid pair. Every pulse takes a ticket and pulses run
//! strictly in ticket order, so they never overlap and a task that releases
//! the actuator and asks again immediately goes to the back of the line.

use core::cell::RefCell;
use core::future::poll_fn;
use core::task::Poll;

use embassy_sync::blocking_mutex::raw::RawMutex;
use embassy_sync::blocking_mutex::Mutex as BlockingMutex;
use embassy_sync::mutex::Mutex;
use embassy_sync::waitqueue::MultiWakerRegistration;

use crate::traits::{Actuator, ActuatorCommand};

/// Tasks that may wait for the actuator at the same time
pub const MAX_WAITERS: usize = 4;

struct Turns {
    /// Next ticket to hand out
    next: u32,
    /// Ticket allowed to pulse
    serving: u32,
    wakers: MultiWakerRegistration<MAX_WAITERS>,
}

/// FIFO access to one actuator from several tasks
///
/// A pulse in progress is not cancelled; dropping a pulse future while it
/// waits for its turn stalls later tickets.
pub struct ActuatorArbiter<M: RawMutex, A> {
    actuator: Mutex<M, A>,
    turns: BlockingMutex<M, RefCell<Turns>>,
}

impl<M: RawMutex, A> ActuatorArbiter<M, A> {
    pub fn new(actuator: A) -> Self {
        Self {
            actuator: Mutex::new(actuator),
            turns: BlockingMutex::new(RefCell::new(Turns {
                next: 0,
                serving: 0,
                wakers: MultiWakerRegistration::new(),
            })),
        }
    }

    /// Pulses completed so far
    pub fn completed(&self) -> u32 {
        self.turns.lock(|turns| turns.borrow().serving)
    }

    fn take_ticket(&self) -> u32 {
        self.turns.lock(|turns| {
            let mut turns = turns.borrow_mut();
            let ticket = turns.next;
            turns.next = turns.next.wrapping_add(1);
            ticket
        })
    }

    async fn wait_turn(&self, ticket: u32) {
        poll_fn(|cx| {
            self.turns.lock(|turns| {
                let mut turns = turns.borrow_mut();
                if turns.serving == ticket {
                    Poll::Ready(())
                } else {
                    turns.wakers.register(cx.waker());
                    Poll::Pending
                }
            })
        })
        .await
    }

    fn advance(&self) {
        self.turns.lock(|turns| {
            let mut turns = turns.borrow_mut();
            turns.serving = turns.serving.wrapping_add(1);
            turns.wakers.wake();
        });
    }
}

impl<M: RawMutex, A: Actuator> ActuatorArbiter<M, A> {
    /// Run one pulse once every earlier request has finished
    pub async fn run(&self, command: ActuatorCommand) {
        let ticket = self.take_ticket();
        self.wait_turn(ticket).await;
        let _turn = Turn { arbiter: self };

        let mut actuator = self.actuator.lock().await;
        command.apply(&mut *actuator).await;
    }

    /// [`Actuator`] view for one task
    pub fn handle(&self) -> ArbitratedActuator<'_, M, A> {
        ArbitratedActuator { arbiter: self }
    }
}

/// Hands the actuator to the next ticket when a pulse ends
struct Turn<'a, M: RawMutex, A> {
    arbiter: &'a ActuatorArbiter<M, A>,
}

impl<M: RawMutex, A> Drop for Turn<'_, M, A> {
    fn drop(&mut self) {
        self.arbiter.advance();
    }
}

/// Actuator that queues each pulse on a shared [`ActuatorArbiter`]
pub struct ArbitratedActuator<'a, M: RawMutex, A> {
    arbiter: &'a ActuatorArbiter<M, A>,
}

impl<M: RawMutex, A> Clone for ArbitratedActuator<'_, M, A> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<M: RawMutex, A> Copy for ArbitratedActuator<'_, M, A> {}

impl<M: RawMutex, A: Actuator> Actuator for ArbitratedActuator<'_, M, A> {
    async fn sink(&mut self, duration_ms: u32) {
        self.arbiter.run(ActuatorCommand::Sink { duration_ms }).await;
    }

    async fn surface(&mut self, duration_ms: u32) {
        self.arbiter
            .run(ActuatorCommand::Surface { duration_ms })
            .await;
    }
}
