//! Session check for protected commands.

use crate::{
    bot::BotData,
    core::session::{Gate, gate},
    errors::{Error, Result},
};
use tracing::debug;

/// Lets a command run only when an operator is signed in.
///
/// While the console is still starting up nothing protected is rendered; with
/// nobody signed in the operator is pointed at `/login`.
pub async fn require_session(ctx: poise::Context<'_, BotData, Error>) -> Result<bool> {
    match gate(&ctx.data().session.snapshot()) {
        Gate::Allow(user) => {
            debug!("Command `{}` allowed for {user}", ctx.command().name);
            Ok(true)
        }
        Gate::Wait => {
            ctx.say("⏳ The console is still starting up. Try again in a moment.")
                .await?;
            Ok(false)
        }
        Gate::Login => {
            ctx.say("🔒 Please sign in first with `/login`.").await?;
            Ok(false)
        }
    }
}
