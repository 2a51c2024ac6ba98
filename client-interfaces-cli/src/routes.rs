use std::future::Future;

use clap::Subcommand;

use client_application::AppState;
use client_domain::{EventStatus, EventType, UpdateMode};

use crate::error::CliError;
use crate::handlers::{command_handlers, query_handlers, watch_handlers, CreateArgs};

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Route {
    /// Live dashboard with an input prompt
    Watch {
        /// Update strategy: poll or push
        #[arg(long)]
        mode: Option<UpdateMode>,
    },
    /// List events, newest first
    List {
        #[arg(long)]
        status: Option<EventStatus>,
        #[arg(long)]
        json: bool,
    },
    /// Show one event
    Get {
        id: i64,
        #[arg(long)]
        json: bool,
    },
    /// Show aggregate counts
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Create an event
    Create {
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        source: Option<String>,
        #[arg(long = "type")]
        event_type: Option<EventType>,
    },
    /// Delete all events
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

impl Route {
    pub fn update_mode(&self) -> Option<UpdateMode> {
        match self {
            Route::Watch { mode } => *mode,
            _ => None,
        }
    }
}

/// Runs one route. One-shot routes print their result; `watch` runs until
/// the user quits or `shutdown` resolves.
pub async fn dispatch<F>(route: Route, state: AppState, shutdown: F) -> Result<(), CliError>
where
    F: Future<Output = ()>,
{
    let output = match route {
        Route::Watch { .. } => return watch_handlers::run_watch(state, shutdown).await,
        Route::List { status, json } => query_handlers::list_events(&state, status, json).await?,
        Route::Get { id, json } => query_handlers::get_event(&state, id, json).await?,
        Route::Stats { json } => query_handlers::get_stats(&state, json).await?,
        Route::Create {
            title,
            description,
            source,
            event_type,
        } => {
            let args = CreateArgs {
                title,
                description,
                source,
                event_type,
            };
            command_handlers::create_event(&state, args).await?
        }
        Route::Clear { yes } => command_handlers::clear_events(&state, yes).await?,
    };
    println!("{}", output);
    Ok(())
}
