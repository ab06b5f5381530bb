//! WASM bindings for schedulo-core.
//!
//! Exposes conflict resolution, the overlap predicate and the next-free-day
//! search to JavaScript via `wasm-bindgen`, so an edge function can call the
//! core directly. All complex types are passed as JSON strings.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p schedulo-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target deno --out-dir functions/resolve-conflicts/wasm/ \
//!   target/wasm32-unknown-unknown/release/schedulo_wasm.wasm
//! ```

use schedulo_core::request::{parse_timestamp, EventInput};
use schedulo_core::{EngineConfig, WallClock};
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// `{status, body}` pair returned by [`respond`].
#[derive(Serialize)]
struct ReplyDto {
    status: u16,
    body: String,
}

fn config_for(timezone: Option<String>) -> EngineConfig {
    EngineConfig {
        timezone: timezone.unwrap_or_else(|| "UTC".to_string()),
        ..EngineConfig::default()
    }
}

fn clock_for(timezone: Option<String>) -> Result<WallClock, String> {
    config_for(timezone).clock().map_err(|e| e.to_string())
}

// ---------------------------------------------------------------------------
// String-level implementations, callable and testable off-wasm
// ---------------------------------------------------------------------------

fn resolve_json(request_json: &str, timezone: Option<String>) -> Result<String, String> {
    let report = schedulo_core::handle(request_json, &config_for(timezone)).map_err(|e| e.to_string())?;
    serde_json::to_string(&report).map_err(|e| format!("Serialization error: {}", e))
}

fn respond_json(request_json: &str, timezone: Option<String>) -> String {
    let reply = schedulo_core::respond(request_json, &config_for(timezone));
    let dto = ReplyDto {
        status: reply.status,
        body: reply.body,
    };
    serde_json::to_string(&dto).unwrap_or_else(|_| r#"{"status":500,"body":"{}"}"#.to_string())
}

fn overlap_check(task: &str, start: &str, end: &str, timezone: Option<String>) -> Result<bool, String> {
    let clock = clock_for(timezone)?;
    let parse = |raw: &str, field| parse_timestamp(raw, field, &clock).map_err(|e| e.to_string());
    let (task, start, end) = (parse(task, "task")?, parse(start, "start")?, parse(end, "end")?);
    Ok(schedulo_core::overlaps(task, start, end, &clock))
}

fn next_day_json(date: &str, events_json: &str, timezone: Option<String>) -> Result<String, String> {
    let config = config_for(timezone);
    let clock = config.clock().map_err(|e| e.to_string())?;
    let conflict = parse_timestamp(date, "date", &clock).map_err(|e| e.to_string())?;

    let inputs: Vec<EventInput> = serde_json::from_str(events_json)
        .map_err(|e| format!("Invalid events JSON: {}", e))?;
    let request = schedulo_core::request::ResolveRequest {
        user_id: Some("wasm".to_string()),
        tasks: Some(Vec::new()),
        calendar_events: Some(inputs),
    }
    .validate(&clock)
    .map_err(|e| e.to_string())?;

    let found = schedulo_core::next_free_day(
        conflict,
        &request.calendar_events,
        &clock,
        config.dst_policy,
        config.max_search_days,
    )
    .map_err(|e| e.to_string())?;
    Ok(found.to_rfc3339())
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Detect conflicts for a `{user_id, tasks, calendar_events}` request.
///
/// Returns the `{conflicts, suggestions}` response as a JSON string, or throws
/// with the error message.
#[wasm_bindgen(js_name = "resolveConflicts")]
pub fn resolve_conflicts(request_json: &str, timezone: Option<String>) -> Result<String, JsValue> {
    resolve_json(request_json, timezone).map_err(|e| JsValue::from_str(&e))
}

/// Like `resolveConflicts`, but never throws: returns `{status, body}` as JSON
/// with status 200, 400 or 500 and the response or `{error}` body.
#[wasm_bindgen]
pub fn respond(request_json: &str, timezone: Option<String>) -> String {
    respond_json(request_json, timezone)
}

/// Whether a task due at `task` collides with the event `[start, end]`.
#[wasm_bindgen(js_name = "hasOverlap")]
pub fn has_overlap(
    task: &str,
    start: &str,
    end: &str,
    timezone: Option<String>,
) -> Result<bool, JsValue> {
    overlap_check(task, start, end, timezone).map_err(|e| JsValue::from_str(&e))
}

/// First day after `date` free of every event in `events_json`
/// (an array of `{id, title, start_time, end_time}`), as an RFC 3339 string.
#[wasm_bindgen(js_name = "findNextAvailableDay")]
pub fn find_next_available_day(
    date: &str,
    events_json: &str,
    timezone: Option<String>,
) -> Result<String, JsValue> {
    next_day_json(date, events_json, timezone).map_err(|e| JsValue::from_str(&e))
}
