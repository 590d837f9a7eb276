use std::collections::HashMap;

use axum::http::{Method, StatusCode};
use axum_test::TestServer;
use chrono::Duration;
use masterclass::{
    Config,
    auth::{UserClaims, generate_token},
    build_server_with_catalog,
    model::StaticCatalog,
    web::middlewares::AUTH_TOKEN,
};
use serde_json::{Value, json};
use tower_cookies::Cookie;
use uuid::Uuid;

pub const TEST_JWT: &str = "test-secret";

/// Configuration with every simulated delay switched off.
pub fn test_config() -> &'static Config {
    config_with_load_delay(0)
}

pub fn config_with_load_delay(load_delay_ms: u64) -> &'static Config {
    config_with_delays(load_delay_ms, 60_000)
}

pub fn config_with_session_idle(session_idle_ms: u64) -> &'static Config {
    config_with_delays(0, session_idle_ms)
}

fn config_with_delays(load_delay_ms: u64, session_idle_ms: u64) -> &'static Config {
    let toml = format!(
        r#"
        [host]
        bindto = "127.0.0.1:0"

        [app]
        jwt = "{TEST_JWT}"
        docs = false
        load_delay_ms = {load_delay_ms}
        toast_dismiss_ms = 5000
        mentorship_delay_ms = 0
        session_idle_ms = {session_idle_ms}
        "#
    );
    let config = Config::from_slice(toml.as_bytes()).expect("invalid test config");
    Box::leak(Box::new(config))
}

pub fn setup_server() -> TestServer {
    setup_server_with(test_config())
}

pub fn setup_server_with(config: &'static Config) -> TestServer {
    let catalog = StaticCatalog::seed().expect("seed catalog must load");
    let (_, app) = build_server_with_catalog(catalog, config).unwrap();
    TestServer::new(app).unwrap()
}

/// A signed `SID` value for a fresh user.
pub fn user_token(loyalty_points: u32) -> String {
    let claims = UserClaims::new(Uuid::new_v4(), loyalty_points, Duration::hours(1));
    generate_token(&claims, TEST_JWT).unwrap()
}

/// Responses saved by earlier steps of a [`Flow`], keyed by name.
#[derive(Debug, Default)]
pub struct FlowContext {
    saved: HashMap<&'static str, Value>,
}

impl FlowContext {
    pub fn get(&self, key: &str) -> &Value {
        self.saved
            .get(key)
            .unwrap_or_else(|| panic!("no response saved as `{key}`"))
    }
}

type PathFn = Box<dyn Fn(&FlowContext) -> String + Send + Sync>;

enum Target {
    Fixed(String),
    Derived(PathFn),
}

enum Check {
    Json(Box<dyn Fn(&Value) + Send + Sync>),
    Text(Box<dyn Fn(&str) + Send + Sync>),
}

/// One request of a [`Flow`] and what its response must look like.
pub struct Action {
    name: &'static str,
    method: Method,
    target: Target,
    body: Option<Value>,
    params: Vec<(String, String)>,
    token: Option<String>,
    wait: std::time::Duration,
    expect: StatusCode,
    checks: Vec<Check>,
    save_as: Option<&'static str>,
}

impl Action {
    pub fn new(name: &'static str, method: &'static str, path: &str) -> Self {
        let method = Method::from_bytes(method.as_bytes())
            .unwrap_or_else(|_| panic!("unsupported method {method}"));
        Self {
            name,
            method,
            target: Target::Fixed(path.to_string()),
            body: None,
            params: vec![],
            token: None,
            wait: std::time::Duration::ZERO,
            expect: StatusCode::OK,
            checks: vec![],
            save_as: None,
        }
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_expect(mut self, expect: StatusCode) -> Self {
        self.expect = expect;
        self
    }

    pub fn with_param(mut self, key: &str, val: &str) -> Self {
        self.params.push((key.to_string(), val.to_string()));
        self
    }

    /// Sends `token` as the `SID` cookie.
    pub fn with_token<S: Into<String>>(mut self, token: S) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Sleeps for `wait` before sending the request.
    pub fn with_wait(mut self, wait: std::time::Duration) -> Self {
        self.wait = wait;
        self
    }

    /// Builds the path from responses saved earlier in the flow.
    pub fn with_dyn_path<F>(mut self, f: F) -> Self
    where
        F: Fn(&FlowContext) -> String + Send + Sync + 'static,
    {
        self.target = Target::Derived(Box::new(f));
        self
    }

    pub fn with_save_as(mut self, key: &'static str) -> Self {
        self.save_as = Some(key);
        self
    }

    pub fn assert_body<F>(mut self, check: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.checks.push(Check::Text(Box::new(check)));
        self
    }

    pub fn assert_json<F>(mut self, check: F) -> Self
    where
        F: Fn(&Value) + Send + Sync + 'static,
    {
        self.checks.push(Check::Json(Box::new(check)));
        self
    }
}

/// Requests run in order against one server, sharing a [`FlowContext`].
#[derive(Default)]
pub struct Flow {
    actions: Vec<Action>,
}

impl Flow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn step(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }

    pub async fn run(self, server: &mut TestServer) {
        let mut ctx = FlowContext::default();
        for action in self.actions {
            println!("==> {} `{}`", action.method, action.name);

            if !action.wait.is_zero() {
                tokio::time::sleep(action.wait).await;
            }

            let path = match &action.target {
                Target::Fixed(path) => path.clone(),
                Target::Derived(f) => f(&ctx),
            };

            let mut req = server.method(action.method.clone(), &path);
            if let Some(body) = &action.body {
                req = req.json(body);
            }
            if let Some(token) = action.token {
                req = req.add_cookie(Cookie::new(AUTH_TOKEN, token));
            }
            for (key, val) in action.params {
                req = req.add_query_param(&key, val);
            }

            let resp = req.await;
            resp.assert_status(action.expect);

            let text = resp.text();
            for check in &action.checks {
                match check {
                    Check::Text(f) => f(&text),
                    Check::Json(f) => f(&parse(action.name, &text)),
                }
            }

            if let Some(key) = action.save_as {
                ctx.saved.insert(key, parse(action.name, &text));
            }
        }
    }
}

fn parse(name: &str, text: &str) -> Value {
    serde_json::from_str(text).unwrap_or_else(|e| panic!("`{name}` returned invalid JSON: {e}"))
}

// Common actions builders

pub fn open_session_action(token: &str, course_id: u32) -> Action {
    Action::new("open_session", "POST", "/api/v1/sessions")
        .with_token(token)
        .with_body(json!({ "course_id": course_id }))
        .with_expect(StatusCode::CREATED)
        .with_save_as("session")
}

/// `/api/v1/sessions/{id}{suffix}` for the session saved by [`open_session_action`].
pub fn session_path(suffix: &'static str) -> impl Fn(&FlowContext) -> String + Send + Sync {
    move |ctx| {
        let id = ctx.get("session")["id"]
            .as_str()
            .expect("session id missing")
            .to_string();
        format!("/api/v1/sessions/{id}{suffix}")
    }
}
