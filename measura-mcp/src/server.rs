//! MCP request handling

use measura_core::{MeasuraError, Value};
use measura_plugin::{EvalContext, PluginRegistry};
use measura_units::{UnitCategory, CATALOG};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, error, info, warn};

use crate::config::ServerConfig;

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    #[allow(dead_code)]
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    /// Always written; `null` when the request id could not be read
    pub id: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<JsonValue>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<McpError>,
}

#[derive(Debug, Serialize)]
pub struct McpError {
    pub code: i32,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
}

impl McpError {
    fn invalid_params(message: impl Into<String>) -> Self {
        McpError { code: -32602, message: message.into(), data: None }
    }
}

const CONVERT_ERROR_PREFIX: &str = "An error occurred during conversion";

const USAGE_GUIDE: &str = "\
How to use:
1. Select the category of units you want to convert (list_categories)
2. Use a search term to filter units (optional, list_units)
3. Choose the unit to convert from
4. Choose the unit to convert to
5. Enter the value you want to convert
6. Call 'convert' to see the result";

fn parse_error_response(err: &serde_json::Error) -> McpResponse {
    McpResponse {
        jsonrpc: "2.0".to_string(),
        id: None,
        result: None,
        error: Some(McpError {
            code: -32700,
            message: format!("Parse error: {}", err),
            data: None,
        }),
    }
}

/// Handle one input line. Returns the encoded response, or `None` for blank
/// lines and notifications.
pub fn handle_line(registry: &PluginRegistry, config: &ServerConfig, line: &str) -> Option<String> {
    let line = line.trim();
    if line.is_empty() {
        return None;
    }

    debug!(bytes = line.len(), "Received request");

    let response = match serde_json::from_str::<McpRequest>(line) {
        Ok(request) => {
            debug!(method = %request.method, "Processing");
            let response = handle_request(registry, config, &request);
            // Notifications (no id) get no response
            if request.id.is_none() {
                debug!(method = %request.method, "Notification processed");
                return None;
            }
            response
        }
        Err(e) => {
            warn!(error = %e, "Malformed request");
            parse_error_response(&e)
        }
    };

    match serde_json::to_string(&response) {
        Ok(json) => Some(json),
        Err(e) => {
            error!(error = %e, "Error encoding response");
            None
        }
    }
}

pub fn handle_request(registry: &PluginRegistry, config: &ServerConfig, request: &McpRequest) -> McpResponse {
    let result = match request.method.as_str() {
        // Lifecycle
        "initialize" => handle_initialize(config, &request.params),
        "initialized" | "notifications/initialized" => Ok(json!({})),
        "ping" => Ok(json!({})),

        // Tools
        "tools/list" => handle_tools_list(),
        "tools/call" => handle_tool_call(registry, &request.params),

        _ => Err(McpError {
            code: -32601,
            message: format!("Method not found: {}", request.method),
            data: None,
        }),
    };

    match result {
        Ok(r) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: Some(r),
            error: None,
        },
        Err(e) => McpResponse {
            jsonrpc: "2.0".to_string(),
            id: request.id.clone(),
            result: None,
            error: Some(e),
        },
    }
}

fn handle_initialize(config: &ServerConfig, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(config.protocol_version);

    info!(client = client_info, protocol = client_protocol, "Client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": config.name,
            "version": config.version,
            "description": "Unit converter for length, weight and temperature"
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        },
        "instructions": "Measura converts values between units of Length, Weight and Temperature. Use 'list_categories' and 'list_units' to discover unit names, then 'convert'. Results are shown with 4 significant digits."
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let categories: Vec<&str> = CATALOG.categories().iter().map(|c| c.name()).collect();

    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value from one unit to another within a category. Returns a result line like '1 Meters = 3.281 Feet'.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Unit category",
                            "enum": categories
                        },
                        "from": {
                            "type": "string",
                            "description": "Unit to convert from (e.g., \"Meters\")"
                        },
                        "to": {
                            "type": "string",
                            "description": "Unit to convert to (e.g., \"Feet\")"
                        },
                        "value": {
                            "type": ["number", "string"],
                            "description": "Value to convert (default: 0)",
                            "default": 0
                        },
                        "search": {
                            "type": "string",
                            "description": "Optional filter; both units must contain it (case-insensitive)"
                        }
                    },
                    "required": ["category", "from", "to"]
                }
            },
            {
                "name": "list_categories",
                "description": "List the supported unit categories.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category, optionally filtered by a case-insensitive search term.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "description": "Unit category",
                            "enum": categories
                        },
                        "search": {
                            "type": "string",
                            "description": "Keep only units containing this text"
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "help",
                "description": "Get documentation for a conversion function, or a usage guide.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "name": {
                            "type": "string",
                            "description": "Function name. Omit for the usage guide."
                        }
                    }
                }
            }
        ]
    }))
}

fn handle_tool_call(registry: &PluginRegistry, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let params = params.as_ref()
        .ok_or_else(|| McpError::invalid_params("Missing params"))?;

    let name = params.get("name")
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

    let args = params.get("arguments").cloned().unwrap_or(json!({}));

    match name {
        "convert" => tool_convert(registry, &args),
        "list_categories" => tool_list_categories(registry),
        "list_units" => tool_list_units(registry, &args),
        "help" => tool_help(registry, &args),
        _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
    }
}

fn required_str<'a>(args: &'a JsonValue, key: &str) -> Result<&'a str, McpError> {
    args.get(key)
        .and_then(|v| v.as_str())
        .ok_or_else(|| McpError::invalid_params(format!("Missing {} argument", key)))
}

fn tool_error(prefix: &str, err: &MeasuraError) -> JsonValue {
    let text = match &err.suggestion {
        Some(s) => format!("{}: {}\n{}", prefix, err.message, s),
        None => format!("{}: {}", prefix, err.message),
    };
    json!({
        "content": [{ "type": "text", "text": text }],
        "error": { "code": err.code, "message": err.message },
        "isError": true
    })
}

fn tool_convert(registry: &PluginRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = required_str(args, "category")?;
    let from = required_str(args, "from")?;
    let to = required_str(args, "to")?;
    let value = args.get("value").map(json_to_value).unwrap_or(Value::Number(0.0));

    // With a search term the form only offers matching units
    if let Some(term) = args.get("search").and_then(|v| v.as_str()) {
        if let Some(cat) = UnitCategory::from_name(category) {
            let available = CATALOG.search(cat, term);
            if available.is_empty() {
                return Ok(tool_error(CONVERT_ERROR_PREFIX, &MeasuraError::no_match(term)));
            }
            for unit in [from, to] {
                if !available.contains(&unit) {
                    let err = MeasuraError::unknown_unit(unit, cat.name())
                        .with_suggestion(format!("Units matching '{}': {}", term, available.join(", ")));
                    return Ok(tool_error(CONVERT_ERROR_PREFIX, &err));
                }
            }
        }
    }

    let call_args = [
        Value::Text(category.to_string()),
        value,
        Value::Text(from.to_string()),
        Value::Text(to.to_string()),
    ];
    let outcome = registry.call_function("convert", &call_args, &EvalContext::new());

    if let Value::Error(e) = &outcome {
        return Ok(tool_error(CONVERT_ERROR_PREFIX, e));
    }

    let text = match outcome.get("text") {
        Value::Text(t) => t,
        _ => return Ok(tool_error(CONVERT_ERROR_PREFIX, &MeasuraError::internal("convert returned no text"))),
    };

    Ok(json!({
        "content": [{ "type": "text", "text": format!("Result: {}", text) }],
        "value": value_to_json(&outcome.get("value")),
        "result": value_to_json(&outcome.get("result")),
        "from": from,
        "to": to,
        "category": value_to_json(&outcome.get("category")),
        "isError": false
    }))
}

fn tool_list_categories(registry: &PluginRegistry) -> Result<JsonValue, McpError> {
    let categories = registry.call_function("list_categories", &[], &EvalContext::new());
    Ok(json!({
        "content": [{ "type": "text", "text": list_text(&categories) }],
        "data": value_to_json(&categories)
    }))
}

fn tool_list_units(registry: &PluginRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = required_str(args, "category")?;
    let mut call_args = vec![Value::Text(category.to_string())];
    if let Some(term) = args.get("search").and_then(|v| v.as_str()) {
        call_args.push(Value::Text(term.to_string()));
    }

    let units = registry.call_function("list_units", &call_args, &EvalContext::new());
    if let Value::Error(e) = &units {
        return Ok(tool_error("Error", e));
    }

    let text = match (UnitCategory::from_name(category), units.as_list()) {
        (Some(cat), Some(items)) => items.iter()
            .map(|u| CATALOG.label(cat, &u.to_string()))
            .collect::<Vec<_>>()
            .join("\n"),
        _ => list_text(&units),
    };

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "data": value_to_json(&units)
    }))
}

fn tool_help(registry: &PluginRegistry, args: &JsonValue) -> Result<JsonValue, McpError> {
    let name = args.get("name").and_then(|v| v.as_str());
    let help = registry.help(name);

    let text = match name {
        Some(_) => format_help(&help),
        None => USAGE_GUIDE.to_string(),
    };

    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "data": value_to_json(&help)
    }))
}

fn format_help(help: &Value) -> String {
    match help {
        Value::Object(map) => {
            let mut out = String::new();
            if let Some(Value::Text(n)) = map.get("name") { out.push_str(&format!("# {}\n\n", n)); }
            if let Some(Value::Text(d)) = map.get("description") { out.push_str(&format!("{}\n\n", d)); }
            if let Some(Value::Text(u)) = map.get("usage") { out.push_str(&format!("**Usage:** `{}`\n\n", u)); }
            if let Some(Value::List(examples)) = map.get("examples") {
                for e in examples {
                    out.push_str(&format!("- `{}`\n", e));
                }
            }
            out
        }
        Value::Error(e) => match &e.suggestion {
            Some(s) => format!("Error: {}\n{}", e.message, s),
            None => format!("Error: {}", e.message),
        },
        _ => help.to_string(),
    }
}

fn list_text(list: &Value) -> String {
    match list.as_list() {
        Some(items) => items.iter().map(|v| v.to_string()).collect::<Vec<_>>().join("\n"),
        None => list.to_string(),
    }
}

fn json_to_value(json: &JsonValue) -> Value {
    match json {
        JsonValue::Null => Value::Null,
        JsonValue::Bool(b) => Value::Bool(*b),
        JsonValue::Number(n) => match n.as_f64() {
            Some(f) => Value::Number(f),
            None => Value::Text(n.to_string()),
        },
        JsonValue::String(s) => Value::Text(s.clone()),
        JsonValue::Array(arr) => Value::List(arr.iter().map(json_to_value).collect()),
        JsonValue::Object(obj) => Value::Object(obj.iter().map(|(k, v)| (k.clone(), json_to_value(v))).collect()),
    }
}

fn value_to_json(value: &Value) -> JsonValue {
    match value {
        Value::Null => JsonValue::Null,
        Value::Bool(b) => JsonValue::Bool(*b),
        Value::Number(n) => serde_json::Number::from_f64(*n)
            .map(JsonValue::Number)
            .unwrap_or_else(|| JsonValue::String(n.to_string())),
        Value::Text(s) => JsonValue::String(s.clone()),
        Value::List(l) => JsonValue::Array(l.iter().map(value_to_json).collect()),
        Value::Object(o) => JsonValue::Object(o.iter().map(|(k, v)| (k.clone(), value_to_json(v))).collect()),
        Value::Error(e) => json!({"_error": {"code": e.code, "message": e.message}}),
    }
}
