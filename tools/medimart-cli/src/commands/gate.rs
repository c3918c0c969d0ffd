//! Route access check.

use anyhow::Result;
use medimart_auth::{GateOutcome, Identity, RouteGate, StaticDirectory};
use serde_json::json;

use super::GateArgs;
use crate::context::Context;
use crate::output::describe_outcome;

/// Run the gate command.
pub async fn run(args: GateArgs, ctx: &Context) -> Result<()> {
    let identity = args.email.as_deref().map(Identity::new);

    let mut directory = StaticDirectory::new();
    if let (Some(email), Some(role)) = (args.email.as_deref(), args.role) {
        directory = directory.with_role(email, role);
    }

    let mut gate = RouteGate::new(args.required, args.path);
    let outcome = gate.resolve(identity.as_ref(), &directory).await;

    if ctx.output.is_json() {
        ctx.output.json(&json!({
            "location": gate.location(),
            "state": gate.state(),
        }));
        return Ok(());
    }

    ctx.output.kv("route", gate.location());
    if let Some(required) = gate.required() {
        ctx.output.kv("requires", required.as_str());
    }
    ctx.output.kv("result", &describe_outcome(&outcome));

    if let GateOutcome::Blocked { actual, go_back: true, .. } = outcome {
        ctx.output
            .info(&format!("Go back, or open your dashboard at {}", actual.dashboard_path()));
    }
    Ok(())
}
