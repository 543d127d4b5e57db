use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::router::build_router;
use crate::state::FakeState;

/// A fake backend serving on a background task.
///
/// The task is aborted when this value is dropped.
pub struct RunningServer {
    pub addr: SocketAddr,
    pub state: FakeState,
    handle: JoinHandle<()>,
}

impl RunningServer {
    /// Base URL clients should use, e.g. `http://127.0.0.1:49152`.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }
}

impl Drop for RunningServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Bind to the configured host/port and serve in the background.
pub async fn spawn(state: FakeState) -> std::io::Result<RunningServer> {
    let listener = TcpListener::bind((state.config.host.as_str(), state.config.port)).await?;
    let addr = listener.local_addr()?;
    let app = build_router(state.clone());

    let handle = tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            tracing::error!(error = %e, "Fake backend stopped");
        }
    });

    tracing::debug!(%addr, "Fake backend listening");
    Ok(RunningServer {
        addr,
        state,
        handle,
    })
}
