use bytes::Bytes;
use http_body_util::Full;
use hyper::{Method, Request, header};
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;
use serde::{Deserialize, Serialize};

use crate::movelog::{GameId, MoveRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedMove {
    pub turn: u32,
    pub player: u8,
    pub column: usize,
}

/// The completion payload handed to the reporting collaborator: the game's
/// identity plus its full move list in turn order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameReport {
    pub game_id: GameId,
    pub moves: Vec<ReportedMove>,
}

impl GameReport {
    pub fn from_records(game_id: GameId, records: &[MoveRecord]) -> Self {
        Self {
            game_id,
            moves: records
                .iter()
                .map(|r| ReportedMove {
                    turn: r.turn,
                    player: r.player.index(),
                    column: r.column,
                })
                .collect(),
        }
    }
}

/// Where finished games get announced. The engine's responsibility ends at
/// producing the payload; a sink that goes nowhere is perfectly valid.
pub trait ResultSink {
    fn deliver(&self, report: &GameReport);
}

#[derive(Debug, Default)]
pub struct NullSink;

impl ResultSink for NullSink {
    fn deliver(&self, _report: &GameReport) {}
}

/// Posts the payload as JSON to an HTTP endpoint from a detached thread
/// with its own runtime, so the single-threaded engine never waits on the
/// network. Delivery failures are logged and otherwise dropped.
#[derive(Debug, Clone)]
pub struct HttpSink {
    endpoint: String,
}

impl HttpSink {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
        }
    }
}

impl ResultSink for HttpSink {
    fn deliver(&self, report: &GameReport) {
        let Ok(body) = serde_json::to_string(report) else {
            return;
        };
        let endpoint = self.endpoint.clone();

        std::thread::spawn(move || {
            let rt = match tokio::runtime::Runtime::new() {
                Ok(rt) => rt,
                Err(err) => {
                    eprintln!("result report runtime error: {err}");
                    return;
                }
            };
            if let Err(err) = rt.block_on(post_report(&endpoint, body)) {
                eprintln!("result report delivery error: {err}");
            }
        });
    }
}

async fn post_report(
    endpoint: &str,
    body: String,
) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let client: Client<_, Full<Bytes>> = Client::builder(TokioExecutor::new()).build_http();

    let request = Request::builder()
        .method(Method::POST)
        .uri(endpoint)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Full::new(Bytes::from(body)))?;

    let response = client.request(request).await?;
    if !response.status().is_success() {
        return Err(format!("result endpoint returned {}", response.status()).into());
    }
    Ok(())
}
