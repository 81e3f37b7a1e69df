use std::path::Path;
use std::sync::Arc;

use crate::catalog::registry::CatalogRegistry;
use crate::server::api::{self, RequestError};
use crate::store::builds::DEFAULT_BUILDS_DIR;
use crate::store::leaderboard::DEFAULT_LEADERBOARD_PATH;
use crate::store::StoreError;

pub struct HttpResponse {
    pub status_code: u16,
    pub status_text: &'static str,
    pub content_type: &'static str,
    pub body: String,
}

impl HttpResponse {
    pub fn to_http_string(&self) -> String {
        format!(
            "HTTP/1.1 {} {}\r\nContent-Type: {}\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            self.status_code,
            self.status_text,
            self.content_type,
            self.body.len(),
            self.body
        )
    }
}

fn ok_json(body: String) -> HttpResponse {
    HttpResponse {
        status_code: 200,
        status_text: "OK",
        content_type: "application/json",
        body,
    }
}

fn json_result(result: Result<String, serde_json::Error>) -> HttpResponse {
    match result {
        Ok(payload) => ok_json(payload),
        Err(err) => error_response(500, "Internal Server Error", &err.to_string()),
    }
}

fn request_result(result: Result<String, RequestError>) -> HttpResponse {
    match result {
        Ok(payload) => ok_json(payload),
        Err(RequestError::Parse(err)) => {
            error_response(400, "Bad Request", &format!("Invalid request body: {err}"))
        }
        Err(RequestError::Validation(validation)) => {
            validation_error_response(400, "Bad Request", validation)
        }
        Err(RequestError::Store(StoreError::NotFound)) => {
            error_response(404, "Not Found", "Record not found")
        }
        Err(RequestError::Store(err)) => {
            error_response(500, "Internal Server Error", &err.to_string())
        }
        Err(RequestError::Engine(err)) => {
            error_response(500, "Internal Server Error", &err.to_string())
        }
    }
}

pub fn route_request(
    registry: &Arc<CatalogRegistry>,
    method: &str,
    path: &str,
    body: &str,
) -> HttpResponse {
    let builds_dir = Path::new(DEFAULT_BUILDS_DIR);
    let leaderboard_path = Path::new(DEFAULT_LEADERBOARD_PATH);

    match (method, path) {
        ("GET", "/") => HttpResponse {
            status_code: 200,
            status_text: "OK",
            content_type: "text/html; charset=utf-8",
            body: index_html(),
        },
        ("GET", "/api/health") => json_result(api::health_payload()),
        ("GET", "/api/catalog/summary") => json_result(api::catalog_summary_payload(registry)),
        ("GET", "/api/characters") => json_result(api::characters_payload(registry)),
        ("GET", "/api/weapons") => json_result(api::weapons_payload(registry)),
        ("GET", "/api/mods") => json_result(api::mods_payload(registry)),
        ("POST", "/api/evaluate") => request_result(api::evaluate_payload(registry, body)),
        ("GET", "/api/optimize/estimate") => {
            json_result(api::optimize_estimate_payload(registry))
        }
        ("POST", "/api/optimize") => request_result(api::optimize_payload(registry, body)),
        ("GET", "/api/builds") => json_result(api::builds_list_payload(builds_dir)),
        ("POST", "/api/builds") => {
            request_result(api::build_post_payload(registry, builds_dir, body))
        }
        (method, path) if method == "GET" && path.starts_with("/api/builds/") => {
            let id = path
                .trim_start_matches("/api/builds/")
                .split('/')
                .next()
                .unwrap_or("");
            request_result(api::build_get_payload(builds_dir, id))
        }
        ("GET", "/api/leaderboard") => json_result(api::leaderboard_get_payload(leaderboard_path)),
        ("POST", "/api/leaderboard") => {
            request_result(api::leaderboard_post_payload(registry, leaderboard_path, body))
        }
        _ => error_response(404, "Not Found", "Route not found"),
    }
}

fn validation_error_response(
    status_code: u16,
    status_text: &'static str,
    payload: api::ValidationErrorResponse,
) -> HttpResponse {
    let fallback =
        "{\n  \"status\": \"error\",\n  \"message\": \"Validation failed\"\n}".to_string();

    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: serde_json::to_string_pretty(&payload).unwrap_or(fallback),
    }
}

fn error_response(status_code: u16, status_text: &'static str, message: &str) -> HttpResponse {
    HttpResponse {
        status_code,
        status_text,
        content_type: "application/json",
        body: format!(
            "{{\n  \"status\": \"error\",\n  \"message\": {}\n}}",
            serde_json::to_string(message).unwrap_or_else(|_| "\"Unknown error\"".to_string())
        ),
    }
}

fn index_html() -> String {
    r#"<!doctype html>
<html lang="en">
<head>
  <meta charset="utf-8" />
  <meta name="viewport" content="width=device-width,initial-scale=1" />
  <title>Arsenal API Console</title>
  <style>
    body { font-family: Arial, sans-serif; max-width: 900px; margin: 24px auto; padding: 0 12px; }
    h1 { margin-bottom: 8px; }
    .card { border: 1px solid #ddd; border-radius: 8px; padding: 14px; margin: 14px 0; }
    label { display:block; margin: 8px 0 4px; font-weight: 600; }
    input, select { width: 100%; padding: 8px; box-sizing: border-box; }
    button { margin-top: 12px; padding: 8px 14px; }
    pre { background: #111; color: #aef2ae; padding: 12px; overflow: auto; border-radius: 6px; min-height: 180px; }
  </style>
</head>
<body>
  <h1>Arsenal Local API</h1>
  <p>Loadout scoring and evolutionary search endpoints.</p>

  <div class="card">
    <strong>Health</strong>
    <div><button id="health-btn">GET /api/health</button></div>
  </div>

  <div class="card">
    <strong>Optimize</strong>
    <label for="content">Content type</label>
    <select id="content">
      <option value="general">general</option>
      <option value="steel-path">steel-path</option>
      <option value="eso">eso</option>
      <option value="arbitration">arbitration</option>
      <option value="archon-hunt">archon-hunt</option>
    </select>
    <label for="level">Enemy level</label>
    <input id="level" type="number" min="1" max="9999" value="150" />
    <label for="faction">Target faction</label>
    <select id="faction">
      <option>grineer</option><option>corpus</option><option>infested</option>
      <option>sentient</option><option>corrupted</option>
    </select>
    <label for="seed">Seed (blank = random)</label>
    <input id="seed" />
    <div><button id="optimize-btn">POST /api/optimize</button></div>
  </div>

  <pre id="output">Ready.</pre>

  <script>
    const output = document.getElementById('output');

    async function request(path, options) {
      output.textContent = 'Loading…';
      const response = await fetch(path, options);
      const text = await response.text();
      let display = 'HTTP ' + response.status + '\n' + text;
      try {
        const parsed = JSON.parse(text);
        if (parsed.duration_ms != null) {
          display = 'Completed in ' + (parsed.duration_ms / 1000).toFixed(1) + ' s\n\n' + display;
        }
      } catch (e) {}
      output.textContent = display;
    }

    document.getElementById('health-btn').addEventListener('click', () => {
      request('/api/health', { method: 'GET' });
    });

    document.getElementById('optimize-btn').addEventListener('click', () => {
      const payload = {
        content_type: document.getElementById('content').value,
        enemy_level: Math.max(1, Number(document.getElementById('level').value) || 150),
        target_faction: document.getElementById('faction').value,
      };
      const seed = document.getElementById('seed').value.trim();
      if (seed) payload.seed = Number(seed);
      request('/api/optimize', {
        method: 'POST',
        headers: { 'Content-Type': 'application/json' },
        body: JSON.stringify(payload),
      });
    });
  </script>
</body>
</html>
"#
    .to_string()
}
