// In-memory habit service used by the pipeline tests.
//
// Accepts every write, hands out incrementing integer ids per resource
// starting at 1, records each call, and can be told to fail a specific
// call with a given status.

#![allow(dead_code)]

use std::cell::RefCell;

use devhabit_seed::api::{ApiClient, Method, RawResponse, Transport};
use devhabit_seed::config::SeedConfig;
use devhabit_seed::error::SeedResult;
use serde_json::{json, Value};

#[derive(Debug, Clone, PartialEq)]
pub struct Call {
    pub method: Method,
    pub path: String,
    pub body: Option<Value>,
}

#[derive(Debug, Clone)]
struct Failure {
    method: Method,
    path_prefix: String,
    /// 1-based index among calls matching method and prefix.
    nth: usize,
    status: u16,
}

#[derive(Default)]
struct State {
    calls: Vec<Call>,
    tags: Vec<Value>,
    habits: Vec<Value>,
    habit_tags: Vec<(i64, Vec<i64>)>,
    failures: Vec<Failure>,
    omit_id_for: Vec<String>,
    tags_no_content: bool,
    put_status: u16,
}

#[derive(Default)]
pub struct MockApi {
    state: RefCell<State>,
}

impl MockApi {
    pub fn new() -> Self {
        let mock = MockApi::default();
        mock.state.borrow_mut().put_status = 204;
        mock
    }

    /// Fail the `nth` call (1-based) matching `method` and `path_prefix`.
    pub fn fail(self, method: Method, path_prefix: &str, nth: usize, status: u16) -> Self {
        self.state.borrow_mut().failures.push(Failure {
            method,
            path_prefix: path_prefix.to_string(),
            nth,
            status,
        });
        self
    }

    /// Create the record but leave `id` out of the response.
    pub fn omit_id_for(self, name: &str) -> Self {
        self.state.borrow_mut().omit_id_for.push(name.to_string());
        self
    }

    /// Answer the very first `GET tags` with 204.
    pub fn tags_no_content(self) -> Self {
        self.state.borrow_mut().tags_no_content = true;
        self
    }

    pub fn put_status(self, status: u16) -> Self {
        self.state.borrow_mut().put_status = status;
        self
    }

    pub fn with_existing_tag(self, name: &str) -> Self {
        self.state.borrow_mut().tags.push(json!({ "id": 0, "name": name }));
        self
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.borrow().calls.clone()
    }

    pub fn calls_to(&self, method: Method, path_prefix: &str) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| c.method == method && c.path.starts_with(path_prefix))
            .collect()
    }

    fn respond(&self, method: Method, path: &str, body: Option<&Value>) -> RawResponse {
        let mut state = self.state.borrow_mut();

        let matching = state
            .calls
            .iter()
            .filter(|c| c.method == method)
            .map(|c| c.path.clone())
            .collect::<Vec<_>>();
        for failure in &state.failures {
            if failure.method != method || !path.starts_with(&failure.path_prefix) {
                continue;
            }
            let seen = matching.iter().filter(|p| p.starts_with(&failure.path_prefix)).count();
            if seen == failure.nth {
                return raw(failure.status, format!("simulated failure for {path}"));
            }
        }

        match (method, path) {
            (Method::Get, "tags") => {
                let first_get = matching.iter().filter(|p| p.as_str() == "tags").count() == 1;
                if state.tags_no_content && first_get {
                    return raw(204, String::new());
                }
                raw(200, json!({ "data": state.tags }).to_string())
            }
            (Method::Get, p) if p.starts_with("habits") => {
                let habits: Vec<Value> = state
                    .habits
                    .iter()
                    .map(|h| {
                        let id = h["id"].as_i64().unwrap_or_default();
                        let tags: Vec<Value> = state
                            .habit_tags
                            .iter()
                            .filter(|(habit, _)| *habit == id)
                            .flat_map(|(_, tags)| tags.iter())
                            .filter_map(|tag_id| state.tags.iter().find(|t| t["id"].as_i64() == Some(*tag_id)))
                            .map(|t| t["name"].clone())
                            .collect();
                        json!({ "id": id, "name": h["name"], "tags": tags })
                    })
                    .collect();
                raw(200, json!({ "data": habits }).to_string())
            }
            (Method::Post, "tags") | (Method::Post, "habits") => {
                let body = body.cloned().unwrap_or(Value::Null);
                let name = body["name"].as_str().unwrap_or_default().to_string();
                let store = if path == "tags" { &mut state.tags } else { &mut state.habits };
                let id = store.iter().filter(|r| r["id"].as_i64().unwrap_or(0) > 0).count() as i64 + 1;
                let mut record = body;
                record["id"] = json!(id);
                store.push(record.clone());
                if state.omit_id_for.contains(&name) {
                    if let Some(fields) = record.as_object_mut() {
                        fields.remove("id");
                    }
                }
                raw(201, record.to_string())
            }
            (Method::Put, p) if p.starts_with("habits/") && p.ends_with("/tags") => {
                let habit_id = p
                    .trim_start_matches("habits/")
                    .trim_end_matches("/tags")
                    .parse::<i64>()
                    .unwrap_or_default();
                let tag_ids: Vec<i64> = body
                    .and_then(|b| b["TagIds"].as_array())
                    .map(|ids| ids.iter().filter_map(Value::as_i64).collect())
                    .unwrap_or_default();
                state.habit_tags.retain(|(h, _)| *h != habit_id);
                state.habit_tags.push((habit_id, tag_ids));
                let status = state.put_status;
                let body = if status == 204 { String::new() } else { "{}".to_string() };
                raw(status, body)
            }
            _ => raw(404, format!("no route for {path}")),
        }
    }
}

impl Transport for MockApi {
    fn send(&self, method: Method, url: &str, body: Option<&Value>) -> SeedResult<RawResponse> {
        let path = url
            .split_once("://")
            .and_then(|(_, rest)| rest.split_once('/'))
            .map(|(_, path)| path.to_string())
            .unwrap_or_default();
        self.state.borrow_mut().calls.push(Call {
            method,
            path: path.clone(),
            body: body.cloned(),
        });
        Ok(self.respond(method, &path, body))
    }
}

fn raw(status: u16, body: String) -> RawResponse {
    RawResponse { status, body }
}

/// Client with retries disabled so failure tests see exactly one call.
pub fn client(mock: MockApi) -> ApiClient<MockApi> {
    let config = SeedConfig {
        max_retries: 0,
        ..SeedConfig::default()
    };
    ApiClient::with_transport(config, mock)
}
