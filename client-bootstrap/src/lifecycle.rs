use anyhow::Result;
use tracing::{info, warn};

use client_interfaces_cli::{dispatch, Route};

use crate::context::{AppContext, Overrides};

pub async fn run(overrides: Overrides, route: Route) -> Result<()> {
    let overrides = Overrides {
        mode: route.update_mode().or(overrides.mode),
        ..overrides
    };
    let context = AppContext::new(&overrides).await?;
    info!(
        api = %context.state.config.api_base_url,
        mode = %context.state.config.update_mode,
        "eventhub client ready"
    );
    dispatch(route, context.state, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "ctrl-c handler unavailable");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "sigterm handler unavailable");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
