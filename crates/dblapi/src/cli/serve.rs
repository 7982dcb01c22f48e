//! Running the vote webhook from the command line.

use dblapi::{
    ConfigError, DblApiBuilder, DblApiOptions, DblResult, DiscordWebhook, WebhookError,
    WebhookErrorKind,
};
use std::sync::Arc;
use tracing::info;

/// Serve votes until Ctrl-C, printing each vote as a JSON line.
///
/// Flags override the options file. A configured vote embed is sent
/// straight to the Discord webhook url.
pub async fn serve(
    token: String,
    options: DblApiOptions,
    port: Option<u16>,
    auth: Option<String>,
    path: Option<String>,
) -> DblResult<()> {
    let mut options = options;
    if port.is_some() {
        options = options.with_port(port);
    }
    if auth.is_some() {
        options = options.with_auth(auth);
    }
    if let Some(path) = path {
        options = options.with_path(path);
    }
    if options.port().is_none() {
        return Err(ConfigError::new("No port configured, pass --port or set port in the options file").into());
    }

    let mut builder = DblApiBuilder::new(token)
        .options(options.clone())
        .on_vote(|vote| {
            info!(voter = %vote.user, bot = %vote.bot, weekend = vote.is_weekend, "Vote received");
            println!("{}", serde_json::to_string(vote)?);
            Ok(())
        });
    if let Some(embed) = options.vote_embed() {
        builder = builder.webhook(Arc::new(DiscordWebhook::from_url(embed.url())?));
    }

    let api = builder.build().await?;
    info!(
        address = ?api.webhook_addr(),
        path = %options.path(),
        "Serving votes, press Ctrl-C to stop"
    );

    tokio::signal::ctrl_c()
        .await
        .map_err(|e| WebhookError::new(WebhookErrorKind::Serve(e.to_string())))?;
    info!("Received shutdown signal");
    api.shutdown().await
}
