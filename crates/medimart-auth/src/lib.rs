//! Authentication and authorization for MediMart.
//!
//! Sign-in itself belongs to an external identity provider; this crate
//! takes the resulting [`Identity`], resolves its [`Role`] through a
//! [`RoleDirectory`] and decides, per route, whether to render, redirect or
//! block.

mod directory;
mod error;
mod gate;
mod identity;
mod role;

pub use directory::{parse_role_response, RoleDirectory, StaticDirectory};
pub use error::AuthError;
pub use gate::{GateOutcome, GateState, LookupTicket, RouteGate};
pub use identity::Identity;
pub use role::Role;
