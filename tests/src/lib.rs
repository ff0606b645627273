//! Helpers for driving the API server over a real socket in tests.

use std::{net::SocketAddr, time::Duration};

use api::ApiState;
use axum::serve;
use clickhouse::test::Mock;
use server::router;
use tokio::{
    net::{TcpListener, TcpStream},
    task::JoinHandle,
    time::{Instant, sleep},
};
use url::Url;
use warehouse::{ClickhouseReader, ConnectionParams};

/// Reader pointed at a mock warehouse, skipping the connect probe.
pub fn mock_reader(mock: &Mock) -> ClickhouseReader {
    let params = ConnectionParams {
        account: Url::parse(mock.url()).expect("mock url"),
        username: "user".to_owned(),
        password: "pass".to_owned(),
        role: None,
        warehouse: None,
        database: "analytics".to_owned(),
        schema: "fivetran_log".to_owned(),
    };
    ClickhouseReader::new(&params)
}

/// Bind the full router to an ephemeral port.
pub async fn spawn_server(reader: ClickhouseReader) -> (SocketAddr, JoinHandle<()>) {
    let state = ApiState::new(reader);
    let allowed = config::DEFAULT_ALLOWED_ORIGINS.split(',').map(|s| s.to_owned()).collect();
    let app = router(state, allowed);
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        let _ = serve(listener, app.into_make_service_with_connect_info::<SocketAddr>()).await;
    });
    (addr, handle)
}

/// Wait until the server accepts connections.
pub async fn wait_for_server(addr: SocketAddr) {
    let start = Instant::now();
    loop {
        if TcpStream::connect(addr).await.is_ok() {
            break;
        }
        assert!(start.elapsed() < Duration::from_secs(5), "server did not start in time");
        sleep(Duration::from_millis(10)).await;
    }
}
