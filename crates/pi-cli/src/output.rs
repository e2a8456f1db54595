use crate::CliResult;

use pi_sync::PlayerSnapshot;

use serde_json::{Value, json};

/// JSON view of a snapshot, errors flattened to their message.
pub fn snapshot_json(snapshot: &PlayerSnapshot) -> Value {
    json!({
        "state": snapshot.state.as_str(),
        "identity": snapshot.identity,
        "profile": snapshot.profile,
        "loading": snapshot.loading,
        "has_account": snapshot.has_account,
        "error": snapshot.error.as_ref().map(|e| e.to_string()),
    })
}

pub fn render(value: &Value, pretty: bool) -> CliResult<String> {
    let rendered = if pretty {
        serde_json::to_string_pretty(value)?
    } else {
        serde_json::to_string(value)?
    };
    Ok(rendered)
}
