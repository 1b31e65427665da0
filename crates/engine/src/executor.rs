//! Imperative shell around [`Dashboard`].
//!
//! [`execute`] runs one dispatched [`Ticket`] against a gateway and turns the
//! result back into a message. [`Driver`] processes effects sequentially until
//! the dashboard settles; front ends without an event loop (the command line,
//! tests) use it instead of spawning tasks.

use std::collections::VecDeque;

use provadmin_api::{ApiCall, ProviderGateway};
use tracing::debug;

use crate::{Completion, Confirmation, Dashboard, Effect, Msg, Response, Ticket};

/// Runs a single gateway call and wraps the outcome as [`Msg::Completed`].
pub async fn execute(gateway: &dyn ProviderGateway, ticket: Ticket) -> Msg {
    let outcome = match &ticket.call {
        ApiCall::ListProviders => gateway.list_providers().await.map(Response::Providers),
        ApiCall::ListPayments { provider_id } => gateway.list_payments(provider_id).await.map(Response::Payments),
        call => gateway.send(call).await.map(|_| Response::Done),
    };
    Completion { ticket, outcome }.into_msg()
}

/// Answers yes/no prompts raised by [`Effect::Confirm`].
pub trait Confirmer {
    fn confirm(&mut self, confirmation: &Confirmation) -> bool;
}

impl<F> Confirmer for F
where
    F: FnMut(&Confirmation) -> bool,
{
    fn confirm(&mut self, confirmation: &Confirmation) -> bool {
        self(confirmation)
    }
}

pub struct Driver<'a, C> {
    gateway: &'a dyn ProviderGateway,
    confirmer: C,
}

impl<'a, C: Confirmer> Driver<'a, C> {
    pub fn new(gateway: &'a dyn ProviderGateway, confirmer: C) -> Self {
        Self { gateway, confirmer }
    }

    /// Feeds `msg` to the dashboard and keeps running the resulting effects
    /// (including follow-up reloads) until none remain.
    pub async fn run(&mut self, dashboard: &mut Dashboard, msg: Msg) {
        let mut queue = VecDeque::from([msg]);
        while let Some(next) = queue.pop_front() {
            for effect in dashboard.update(next) {
                match effect {
                    Effect::Dispatch(ticket) => {
                        debug!(action = ticket.call.label(), generation = ticket.generation, "executing");
                        queue.push_back(execute(self.gateway, ticket).await);
                    }
                    Effect::Confirm(confirmation) => {
                        let accepted = self.confirmer.confirm(&confirmation);
                        queue.push_back(if accepted {
                            Msg::Confirmed(confirmation.action)
                        } else {
                            Msg::Declined(confirmation.action)
                        });
                    }
                }
            }
        }
    }
}
