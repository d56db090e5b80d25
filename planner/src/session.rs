use crate::controller::{Command, Model, Msg, Ticket};
use crate::orchestrator::RoutePlanner;

/// Runs a [`Command`] against the planner and wraps the outcome as the
/// message the controller expects back.
pub async fn perform(planner: &RoutePlanner, command: Command) -> Msg {
    match command {
        Command::Plan { ticket, request } => Msg::RouteFetched {
            ticket,
            result: planner.plan(&request).await,
        },
    }
}

/// A controller paired with the planner that serves its commands.
pub struct Session {
    model: Model,
    planner: RoutePlanner,
}

impl Session {
    pub fn new(planner: RoutePlanner) -> Self {
        Self {
            model: Model::new(),
            planner,
        }
    }

    pub fn model(&self) -> &Model {
        &self.model
    }

    /// Applies `msg` and performs any resulting command until the controller
    /// settles.
    pub async fn dispatch(&mut self, msg: Msg) {
        let mut pending = self.model.update(msg);
        while let Some(command) = pending.take() {
            let ticket = match &command {
                Command::Plan { ticket, .. } => *ticket,
            };
            let mut guard = InFlight {
                model: &mut self.model,
                ticket,
                armed: true,
            };
            let reply = perform(&self.planner, command).await;
            guard.armed = false;
            pending = guard.model.update(reply);
        }
    }
}

/// Clears the loading flag if the request future is dropped before answering.
struct InFlight<'a> {
    model: &'a mut Model,
    ticket: Ticket,
    armed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.armed {
            tracing::debug!(ticket = ?self.ticket, "request abandoned");
            self.model.abandon(self.ticket);
        }
    }
}
