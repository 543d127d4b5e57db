#![allow(dead_code)]

use grocer_client::HttpGroceryApi;
use grocer_fake_backend::config::{FakeConfig, FaultPlan};
use grocer_fake_backend::server::{spawn, RunningServer};
use grocer_fake_backend::state::FakeState;
use reqwest::Url;

/// Spawn a fake backend on an ephemeral port with the given faults.
pub async fn start_backend(faults: FaultPlan) -> RunningServer {
    let state = FakeState::new(FakeConfig {
        faults,
        ..Default::default()
    });
    spawn(state).await.expect("fake backend should bind")
}

/// HTTP accessors pointed at `server`.
pub fn api_for(server: &RunningServer) -> HttpGroceryApi {
    let base_url = Url::parse(&server.base_url()).unwrap();
    HttpGroceryApi::with_client(reqwest::Client::new(), base_url)
}

/// An origin nothing is listening on.
pub async fn dead_origin() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    Url::parse(&format!("http://{addr}")).unwrap()
}
