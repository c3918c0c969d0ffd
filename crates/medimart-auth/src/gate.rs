//! Route gating for the role dashboards.
//!
//! A [`RouteGate`] guards one route. Each evaluation looks the signed-in
//! user's role up by email and compares it with the role the route needs.
//! Lookups can overlap (the user signs out, or the route changes, while a
//! lookup is in flight), so every lookup carries a [`LookupTicket`] and only
//! the latest ticket's result is applied.

use crate::directory::RoleDirectory;
use crate::error::AuthError;
use crate::identity::Identity;
use crate::role::Role;
use serde::{Deserialize, Serialize};

/// Where the gate currently stands.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GateState {
    /// A role lookup is in flight.
    Loading,
    /// The user may see the route.
    Authorized,
    /// Signed in, but with the wrong role.
    Unauthorized { required: Role, actual: Role },
    /// Nobody is signed in; `redirect_from` is where to return after login.
    Unauthenticated { redirect_from: String },
    /// The role lookup failed.
    Failed { message: String },
}

/// What the route should render for a gate state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GateOutcome {
    /// Show a spinner.
    Wait,
    /// Show the protected content.
    Render,
    /// Send the user to the login page, remembering where they came from.
    RedirectToLogin { from: String },
    /// Show the access-denied screen.
    Blocked {
        required: Role,
        actual: Role,
        go_back: bool,
    },
    /// Show an error with a retry action.
    Error { message: String },
}

/// Handle for one in-flight role lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupTicket {
    generation: u64,
    email: String,
}

impl LookupTicket {
    /// Email whose role must be looked up.
    pub fn email(&self) -> &str {
        &self.email
    }
}

/// Guards a single route.
#[derive(Debug, Clone)]
pub struct RouteGate {
    required: Option<Role>,
    location: String,
    state: GateState,
    generation: u64,
}

impl RouteGate {
    /// Gate `location` behind `required`; `None` admits any signed-in user.
    pub fn new(required: Option<Role>, location: impl Into<String>) -> Self {
        Self {
            required,
            location: location.into(),
            state: GateState::Loading,
            generation: 0,
        }
    }

    /// Role the route needs.
    pub fn required(&self) -> Option<Role> {
        self.required
    }

    /// The guarded location.
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Current state.
    pub fn state(&self) -> &GateState {
        &self.state
    }

    /// Move the gate to another location. Any lookup in flight is abandoned.
    pub fn navigate(&mut self, required: Option<Role>, location: impl Into<String>) {
        self.required = required;
        self.location = location.into();
        self.generation += 1;
        self.transition(GateState::Loading);
    }

    /// Start an evaluation for `identity`.
    ///
    /// Returns the ticket of the role lookup the caller must run, or `None`
    /// when the gate could decide on its own.
    pub fn begin(&mut self, identity: Option<&Identity>) -> Option<LookupTicket> {
        self.generation += 1;

        let Some(identity) = identity else {
            self.transition(GateState::Unauthenticated {
                redirect_from: self.location.clone(),
            });
            return None;
        };

        if self.required.is_none() {
            self.transition(GateState::Authorized);
            return None;
        }

        self.transition(GateState::Loading);
        Some(LookupTicket {
            generation: self.generation,
            email: identity.email.clone(),
        })
    }

    /// Apply the result of a lookup.
    ///
    /// Returns `false`, leaving the state untouched, if a newer evaluation
    /// has started since the ticket was issued.
    pub fn complete(&mut self, ticket: LookupTicket, result: Result<Role, AuthError>) -> bool {
        if ticket.generation != self.generation {
            tracing::warn!(
                location = %self.location,
                email = %ticket.email,
                "dropping stale role lookup"
            );
            return false;
        }

        let next = match (result, self.required) {
            (Ok(actual), Some(required)) if actual != required => {
                GateState::Unauthorized { required, actual }
            }
            (Ok(_), _) => GateState::Authorized,
            (Err(e), _) => GateState::Failed {
                message: e.to_string(),
            },
        };
        self.transition(next);
        true
    }

    /// Evaluate the gate in one call: begin, look the role up, complete.
    pub async fn resolve(
        &mut self,
        identity: Option<&Identity>,
        directory: &dyn RoleDirectory,
    ) -> GateOutcome {
        if let Some(ticket) = self.begin(identity) {
            let result = directory.role_for(ticket.email()).await;
            self.complete(ticket, result);
        }
        self.outcome()
    }

    /// What to render for the current state.
    pub fn outcome(&self) -> GateOutcome {
        match &self.state {
            GateState::Loading => GateOutcome::Wait,
            GateState::Authorized => GateOutcome::Render,
            GateState::Unauthorized { required, actual } => GateOutcome::Blocked {
                required: *required,
                actual: *actual,
                go_back: true,
            },
            GateState::Unauthenticated { redirect_from } => GateOutcome::RedirectToLogin {
                from: redirect_from.clone(),
            },
            GateState::Failed { message } => GateOutcome::Error {
                message: message.clone(),
            },
        }
    }

    fn transition(&mut self, next: GateState) {
        if self.state != next {
            tracing::debug!(location = %self.location, from = ?self.state, to = ?next, "gate transition");
            self.state = next;
        }
    }
}
