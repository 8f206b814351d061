//! Role switching.

use anyhow::Result;

use super::LoginArgs;
use crate::context::Context;

/// Start a session for a role.
pub fn login(args: LoginArgs, ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let session = store.login(args.role, args.name);
    ctx.warn_if_unsaved(&store);

    if ctx.output.is_json() {
        ctx.output.json(&session);
        return Ok(());
    }

    ctx.output.success(&format!("Logged in as {} ({})", session.name, session.role));
    Ok(())
}

/// End the current session.
pub fn logout(ctx: &Context) -> Result<()> {
    let mut store = ctx.open_storefront()?;
    let had_session = store.logout();
    ctx.warn_if_unsaved(&store);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({ "logged_out": had_session }));
        return Ok(());
    }

    if had_session {
        ctx.output.success("Logged out successfully!");
    } else {
        ctx.output.info("Not logged in");
    }
    Ok(())
}

/// Show the current session.
pub fn whoami(ctx: &Context) -> Result<()> {
    let store = ctx.open_storefront()?;
    let session = store.session();

    if ctx.output.is_json() {
        ctx.output.json(&session);
        return Ok(());
    }

    match session {
        Some(session) => {
            ctx.output.kv("name", &session.name);
            ctx.output.kv("role", session.role.as_str());
            ctx.output.kv(
                "since",
                &session.login_time.format("%Y-%m-%d %H:%M UTC").to_string(),
            );
        }
        None => ctx.output.info("Not logged in. Run `storefront login <user|vendor|admin>`."),
    }
    Ok(())
}
