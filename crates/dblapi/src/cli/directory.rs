//! Directory lookups printed as JSON.

use super::{DirectoryCommands, WidgetArgs};
use dblapi::{
    BotsQuery, ConfigError, DblApiOptions, DirectoryClient, DirectoryConfig, WidgetOptions,
    widget_url,
};
use serde::Serialize;
use std::error::Error;

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Run a lookup or stats command against the directory.
pub async fn handle_directory_command(
    command: DirectoryCommands,
    token: String,
    options: DblApiOptions,
) -> Result<(), Box<dyn Error>> {
    let client =
        DirectoryClient::new(DirectoryConfig::new(token)?.with_base_url(options.base_url().clone()))?;

    match command {
        DirectoryCommands::User { id } => print_json(&client.get_user(&id).await?)?,
        DirectoryCommands::Bot { id } => print_json(&client.get_bot(&id).await?)?,
        DirectoryCommands::Votes { id } => print_json(&client.get_votes(&id).await?)?,
        DirectoryCommands::Stats { id } => print_json(&client.get_stats(&id).await?)?,
        DirectoryCommands::CheckVote { bot_id, user_id } => {
            let voted = client.check_vote(&bot_id, &user_id).await?;
            print_json(&serde_json::json!({ "voted": voted }))?;
        }
        DirectoryCommands::Search {
            search,
            limit,
            offset,
            sort,
            fields,
        } => {
            let mut query = BotsQuery::builder();
            if let Some(search) = search {
                query.search(search);
            }
            if let Some(limit) = limit {
                query.limit(limit);
            }
            if let Some(offset) = offset {
                query.offset(offset);
            }
            if let Some(sort) = sort {
                query.sort(sort);
            }
            if !fields.is_empty() {
                query.fields(fields);
            }
            print_json(&client.get_bots(&query.build()?).await?)?;
        }
        DirectoryCommands::PostStats { bot_id, count } => {
            let bot_id = bot_id
                .or_else(|| options.bot_id().clone())
                .ok_or_else(|| ConfigError::new("Missing required parameter: --bot-id"))?;
            print_json(&client.post_stats(&bot_id, count).await?)?;
        }
    }

    Ok(())
}

/// Print the widget url of `id`.
pub fn print_widget(id: &str, colors: WidgetArgs) -> Result<(), Box<dyn Error>> {
    let mut options = WidgetOptions::builder();
    if let Some(c) = colors.topcolor {
        options.topcolor(c);
    }
    if let Some(c) = colors.middlecolor {
        options.middlecolor(c);
    }
    if let Some(c) = colors.usernamecolor {
        options.usernamecolor(c);
    }
    if let Some(c) = colors.certifiedcolor {
        options.certifiedcolor(c);
    }
    if let Some(c) = colors.datacolor {
        options.datacolor(c);
    }
    if let Some(c) = colors.labelcolor {
        options.labelcolor(c);
    }
    if let Some(c) = colors.highlightcolor {
        options.highlightcolor(c);
    }
    println!("{}", widget_url(id, &options.build()?)?);
    Ok(())
}
