use rand::{rngs::StdRng, Rng, SeedableRng};
use serde::Deserialize;
use serde_json::json;
use tracing::{info, warn};

use rnn_graph::{train_network, NetError, RunRequest, TrainConfig};

/// Body of `POST /graph`, as sent by the graph front end:
/// `{"inputData": {"topology": "3 2 1", "in": "0.1 0.2 0.3", "out": "0.5"}}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphBody {
    input_data: InputData,
}

#[derive(Debug, Deserialize)]
struct InputData {
    topology: String,
    #[serde(rename = "in")]
    inputs: String,
    #[serde(rename = "out")]
    target: String,
}

/// Status code and JSON body for one `/graph` request.
#[derive(Debug)]
pub struct Reply {
    pub status: u16,
    pub body: String,
}

pub fn error_body(error: &str, detail: &str) -> String {
    json!({ "error": error, "detail": detail }).to_string()
}

/// `POST /graph`
///
/// Trains a fresh network on the request and answers
/// `{"result": "<snapshot JSON>"}`. The snapshot is embedded as a string
/// because the front end `JSON.parse`s the `result` field itself.
pub fn handle(body: &str, config: &TrainConfig) -> Reply {
    handle_with_rng(body, config, &mut StdRng::from_entropy())
}

fn handle_with_rng<R: Rng + ?Sized>(body: &str, config: &TrainConfig, rng: &mut R) -> Reply {
    let request = match parse_body(body) {
        Ok(request) => request,
        Err(e) => {
            warn!(error = %e, "rejected /graph request");
            return Reply { status: 400, body: error_body("Invalid input data", &e.to_string()) };
        }
    };

    let outcome = train_network(&request.inputs, &request.target, &request.topology, config, rng)
        .and_then(|outcome| outcome.snapshot.to_json().map(|json| (json, outcome.final_loss())));

    match outcome {
        Ok((snapshot, final_loss)) => {
            info!(topology = %request.topology, final_loss, "served /graph");
            Reply { status: 200, body: json!({ "result": snapshot }).to_string() }
        }
        Err(e) if e.is_invalid_input() => {
            warn!(error = %e, "rejected /graph request");
            Reply { status: 400, body: error_body("Invalid input data", &e.to_string()) }
        }
        Err(e) => {
            warn!(error = %e, "training failed");
            Reply { status: 500, body: error_body("Internal server error", &e.to_string()) }
        }
    }
}

fn parse_body(body: &str) -> Result<RunRequest, NetError> {
    let GraphBody { input_data } = serde_json::from_str(body)?;
    let tokens = [
        format!("topology: {}", input_data.topology),
        format!("in: {}", input_data.inputs),
        format!("out: {}", input_data.target),
    ];
    RunRequest::parse_tokens(&tokens)
}
