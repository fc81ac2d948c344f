//! MCP request handling
//!
//! Tools:
//! - convert: Convert a value between two units of a category
//! - form: Fill the conversion form and read back everything it shows
//! - list_categories: List categories and their default units
//! - list_units: List the units of a category
//! - list_rules: List supported conversion rules
//! - list_converters: List the registered converters with examples

use serde::{Deserialize, Serialize};
use serde_json::{json, Value as JsonValue};
use tracing::{debug, info, warn};
use unitform_core::{Category, ConversionError, Unit, UnitSlot};
use unitform_engine::{ConversionRequest, ConverterRegistry};
use unitform_form::{parse_input_value, FormState, TITLE};

pub const PROTOCOL_VERSION: &str = "2025-11-25";
pub const SERVER_NAME: &str = "unitform";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod error_codes {
    pub const PARSE_ERROR: i32 = -32700;
    pub const INVALID_REQUEST: i32 = -32600;
    pub const METHOD_NOT_FOUND: i32 = -32601;
    pub const INVALID_PARAMS: i32 = -32602;
}

// MCP Protocol types
#[derive(Debug, Deserialize)]
pub struct McpRequest {
    pub jsonrpc: String,
    pub id: Option<JsonValue>,
    pub method: String,
    #[serde(default)]
    pub params: Option<JsonValue>,
}

#[derive(Debug, Serialize)]
pub struct McpResponse {
    pub jsonrpc: String,
    #[serde(skip_serializing_if = "Option::is_none")]
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
        Self {
            code: error_codes::INVALID_PARAMS,
            message: message.into(),
            data: None,
        }
    }

    fn with_data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }
}

impl From<ConversionError> for McpError {
    fn from(e: ConversionError) -> Self {
        let data = json!({ "code": e.code(), "suggestion": e.suggestion() });
        McpError::invalid_params(e.to_string()).with_data(data)
    }
}

impl McpResponse {
    fn new(id: Option<JsonValue>, result: Result<JsonValue, McpError>) -> Self {
        match result {
            Ok(r) => Self {
                jsonrpc: "2.0".to_string(),
                id,
                result: Some(r),
                error: None,
            },
            Err(e) => Self {
                jsonrpc: "2.0".to_string(),
                id,
                result: None,
                error: Some(e),
            },
        }
    }
}

pub struct Server {
    registry: ConverterRegistry,
}

impl Server {
    pub fn new(registry: ConverterRegistry) -> Self {
        Self { registry }
    }

    /// Handle one line of input. `None` means nothing is sent back.
    pub fn handle_line(&self, line: &str) -> Option<McpResponse> {
        let message: JsonValue = match serde_json::from_str(line) {
            Ok(v) => v,
            Err(e) => {
                warn!(error = %e, "error parsing request");
                return Some(McpResponse::new(None, Err(McpError {
                    code: error_codes::PARSE_ERROR,
                    message: format!("Parse error: {}", e),
                    data: None,
                })));
            }
        };

        // A present id, null included, asks for a response
        let id = message.get("id").cloned();

        let mut request: McpRequest = match serde_json::from_value(message) {
            Ok(r) => r,
            Err(e) => {
                warn!(error = %e, "invalid request");
                return Some(McpResponse::new(Some(id.unwrap_or(JsonValue::Null)), Err(McpError {
                    code: error_codes::INVALID_REQUEST,
                    message: format!("Invalid request: {}", e),
                    data: None,
                })));
            }
        };
        request.id = id;

        debug!(method = %request.method, "processing");
        let response = self.handle_request(&request);

        // Notifications (no id) should NOT receive a response
        if request.id.is_none() {
            debug!(method = %request.method, "notification processed");
            return None;
        }
        Some(response)
    }

    pub fn handle_request(&self, request: &McpRequest) -> McpResponse {
        if request.jsonrpc != "2.0" {
            return McpResponse::new(request.id.clone(), Err(McpError {
                code: error_codes::INVALID_REQUEST,
                message: format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                data: None,
            }));
        }

        let result = match request.method.as_str() {
            // Lifecycle
            "initialize" => handle_initialize(&request.params),
            "initialized" | "notifications/initialized" => Ok(json!({})),
            "ping" => Ok(json!({})),

            // Tools
            "tools/list" => handle_tools_list(),
            "tools/call" => self.handle_tool_call(&request.params),

            _ => Err(McpError {
                code: error_codes::METHOD_NOT_FOUND,
                message: format!("Method not found: {}", request.method),
                data: None,
            }),
        };

        McpResponse::new(request.id.clone(), result)
    }

    fn handle_tool_call(&self, params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
        let params = params.as_ref()
            .ok_or_else(|| McpError::invalid_params("Missing params"))?;

        let name = params.get("name")
            .and_then(|v| v.as_str())
            .ok_or_else(|| McpError::invalid_params("Missing tool name"))?;

        let args = params.get("arguments").cloned().unwrap_or(json!({}));

        match name {
            "convert" => self.tool_convert(&args),
            "form" => self.tool_form(&args),
            "list_categories" => tool_list_categories(),
            "list_units" => tool_list_units(&args),
            "list_rules" => self.tool_list_rules(&args),
            "list_converters" => self.tool_list_converters(),
            _ => Err(McpError::invalid_params(format!("Unknown tool: {}", name))),
        }
    }

    fn tool_convert(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = required_category(args)?;
        let input = optional_unit(args, "input", category)?;
        let output = optional_unit(args, "output", category)?;
        let value = value_arg(args);

        let request = ConversionRequest { category, input, output, value };
        let result = request.execute(&self.registry);
        Ok(conversion_result(result))
    }

    fn tool_form(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = required_category(args)?;
        let mut form = FormState::new().with_category(category);

        for (key, slot) in [("input", UnitSlot::Input), ("output", UnitSlot::Output)] {
            if let Some(tag) = optional_str(args, key)? {
                form.select_unit_tag(slot, tag)?;
            }
        }
        if let Some(text) = value_text_arg(args) {
            form.set_value_text(text);
        }

        let snapshot = form.snapshot(&self.registry);
        Ok(json!({
            "content": [{ "type": "text", "text": snapshot.label }],
            "data": snapshot,
            "isError": snapshot.error.is_some()
        }))
    }

    fn tool_list_rules(&self, args: &JsonValue) -> Result<JsonValue, McpError> {
        let category = optional_category(args)?;
        let rules = self.registry.rules(category);

        let text = rules.iter()
            .map(|r| format!("{}: {} -> {} = {}", r.category, r.input, r.output, r.formula))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(json!({
            "content": [{ "type": "text", "text": text }],
            "data": rules
        }))
    }

    fn tool_list_converters(&self) -> Result<JsonValue, McpError> {
        let converters = self.registry.list_converters();

        let mut text = String::new();
        for meta in &converters {
            text.push_str(&format!("{} ({}): {}\n", meta.name, meta.category, meta.description));
            for example in meta.examples {
                text.push_str(&format!("  {}\n", example));
            }
        }

        Ok(json!({
            "content": [{ "type": "text", "text": text.trim_end() }],
            "data": converters
        }))
    }
}

fn handle_initialize(params: &Option<JsonValue>) -> Result<JsonValue, McpError> {
    let client_info = params.as_ref()
        .and_then(|p| p.get("clientInfo"))
        .and_then(|c| c.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or("unknown");

    // Use client's protocol version for compatibility
    let client_protocol = params.as_ref()
        .and_then(|p| p.get("protocolVersion"))
        .and_then(|v| v.as_str())
        .unwrap_or(PROTOCOL_VERSION);

    info!(client = client_info, protocol = client_protocol, "client connected");

    Ok(json!({
        "protocolVersion": client_protocol,
        "serverInfo": {
            "name": SERVER_NAME,
            "version": SERVER_VERSION,
            "description": TITLE
        },
        "capabilities": {
            "tools": {
                "listChanged": false
            }
        }
    }))
}

fn handle_tools_list() -> Result<JsonValue, McpError> {
    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.title()).collect();

    Ok(json!({
        "tools": [
            {
                "name": "convert",
                "description": "Convert a value between two units of the same category. Units are picker tags (C, F, K / M, K / m, h / L, G) or names. Same-unit and unlisted pairs have no result.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": categories
                        },
                        "input": {
                            "type": "string",
                            "description": "Input unit tag or name"
                        },
                        "output": {
                            "type": "string",
                            "description": "Output unit tag or name"
                        },
                        "value": {
                            "type": ["number", "string"],
                            "description": "Value to convert; text that is not a number counts as 0"
                        }
                    },
                    "required": ["category", "input", "output", "value"]
                }
            },
            {
                "name": "form",
                "description": "Fill the conversion form. Selecting the category resets both units to its first unit; input and output then override them.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": categories
                        },
                        "input": { "type": "string" },
                        "output": { "type": "string" },
                        "value": { "type": ["number", "string"] }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "list_categories",
                "description": "List conversion categories with their default unit.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            },
            {
                "name": "list_units",
                "description": "List the units of a category in picker order.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": categories
                        }
                    },
                    "required": ["category"]
                }
            },
            {
                "name": "list_rules",
                "description": "List supported conversion rules, optionally for one category.",
                "inputSchema": {
                    "type": "object",
                    "properties": {
                        "category": {
                            "type": "string",
                            "enum": categories
                        }
                    }
                }
            },
            {
                "name": "list_converters",
                "description": "List the converter of each category with a description and worked examples.",
                "inputSchema": {
                    "type": "object",
                    "properties": {}
                }
            }
        ]
    }))
}

fn tool_list_categories() -> Result<JsonValue, McpError> {
    let categories: Vec<JsonValue> = Category::ALL.iter().map(|c| {
        let default = c.default_unit();
        json!({
            "name": c.title(),
            "default_unit": { "tag": default.tag(), "name": default.name() }
        })
    }).collect();

    let text = Category::ALL.iter().map(|c| c.title()).collect::<Vec<_>>().join(", ");
    Ok(json!({ "content": [{ "type": "text", "text": text }], "data": categories }))
}

fn tool_list_units(args: &JsonValue) -> Result<JsonValue, McpError> {
    let category = required_category(args)?;
    let units: Vec<JsonValue> = category.units().iter()
        .map(|u| json!({ "tag": u.tag(), "name": u.name() }))
        .collect();

    let text = category.units().iter()
        .map(|u| format!("{} ({})", u.tag(), u.name()))
        .collect::<Vec<_>>()
        .join(", ");
    Ok(json!({ "content": [{ "type": "text", "text": text }], "data": units }))
}

/// Tool result for a conversion; errors render as empty output
fn conversion_result(result: Result<String, ConversionError>) -> JsonValue {
    match result {
        Ok(text) => json!({
            "content": [{ "type": "text", "text": text }],
            "result": text,
            "isError": false
        }),
        Err(e) => json!({
            "content": [{ "type": "text", "text": "" }],
            "result": "",
            "error": {
                "code": e.code(),
                "message": e.to_string(),
                "suggestion": e.suggestion(),
                "detail": e
            },
            "isError": true
        }),
    }
}

fn required_category(args: &JsonValue) -> Result<Category, McpError> {
    optional_category(args)?.ok_or_else(|| {
        McpError::invalid_params("Missing category argument")
            .with_data(json!({ "available": Category::ALL.iter().map(|c| c.title()).collect::<Vec<_>>() }))
    })
}

fn optional_category(args: &JsonValue) -> Result<Option<Category>, McpError> {
    match optional_str(args, "category")? {
        Some(name) => Ok(Some(name.parse::<Category>()?)),
        None => Ok(None),
    }
}

fn optional_unit(args: &JsonValue, key: &str, category: Category) -> Result<Option<Unit>, McpError> {
    match optional_str(args, key)? {
        Some(tag) => Ok(Some(Unit::parse(category, tag)?)),
        None => Ok(None),
    }
}

/// String argument; absent or null is `None`, any other type is rejected
fn optional_str<'a>(args: &'a JsonValue, key: &str) -> Result<Option<&'a str>, McpError> {
    match args.get(key) {
        None | Some(JsonValue::Null) => Ok(None),
        Some(JsonValue::String(s)) => Ok(Some(s.as_str())),
        Some(other) => Err(McpError::invalid_params(format!("Argument '{}' must be a string", key))
            .with_data(json!({ "received": other }))),
    }
}

fn value_text_arg(args: &JsonValue) -> Option<String> {
    match args.get("value")? {
        JsonValue::String(s) => Some(s.clone()),
        JsonValue::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_arg(args: &JsonValue) -> f64 {
    match args.get("value") {
        Some(JsonValue::Number(n)) => n.as_f64().unwrap_or(0.0),
        _ => value_text_arg(args).map(|s| parse_input_value(&s)).unwrap_or(0.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server() -> Server {
        Server::new(ConverterRegistry::standard())
    }

    fn call(server: &Server, tool: &str, arguments: JsonValue) -> McpResponse {
        let line = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "tools/call",
            "params": { "name": tool, "arguments": arguments }
        }).to_string();
        server.handle_line(&line).expect("response for request with id")
    }

    fn result(response: McpResponse) -> JsonValue {
        assert!(response.error.is_none(), "unexpected error: {:?}", response.error);
        response.result.expect("result")
    }

    #[test]
    fn test_initialize() {
        let line = r#"{"jsonrpc":"2.0","id":0,"method":"initialize","params":{"protocolVersion":"2024-11-05","clientInfo":{"name":"test"}}}"#;
        let response = result(server().handle_line(line).unwrap());
        assert_eq!(response["protocolVersion"], "2024-11-05");
        assert_eq!(response["serverInfo"]["name"], "unitform");
        assert_eq!(response["serverInfo"]["description"], "Units Converter");
    }

    #[test]
    fn test_notification_gets_no_response() {
        let line = r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#;
        assert!(server().handle_line(line).is_none());
    }

    #[test]
    fn test_parse_error() {
        let response = server().handle_line("{not json").unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::PARSE_ERROR);
        assert!(response.id.is_none());
    }

    #[test]
    fn test_method_not_found() {
        let line = r#"{"jsonrpc":"2.0","id":"a","method":"resources/list"}"#;
        let response = server().handle_line(line).unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::METHOD_NOT_FOUND);
        assert_eq!(response.id, Some(json!("a")));
    }

    #[test]
    fn test_wrong_jsonrpc_version() {
        let line = r#"{"jsonrpc":"1.0","id":3,"method":"ping"}"#;
        let response = server().handle_line(line).unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_REQUEST);
    }

    #[test]
    fn test_tools_list() {
        let line = r#"{"jsonrpc":"2.0","id":1,"method":"tools/list"}"#;
        let response = result(server().handle_line(line).unwrap());
        let names: Vec<&str> = response["tools"].as_array().unwrap().iter()
            .map(|t| t["name"].as_str().unwrap())
            .collect();
        assert_eq!(names, ["convert", "form", "list_categories", "list_units", "list_rules", "list_converters"]);
    }

    #[test]
    fn test_missing_method_is_invalid_request() {
        let response = server().handle_line(r#"{"jsonrpc":"2.0","id":7}"#).unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_REQUEST);
        assert_eq!(response.id, Some(json!(7)));

        let response = server().handle_line("[1, 2]").unwrap();
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_REQUEST);
        assert_eq!(response.id, Some(JsonValue::Null));
    }

    #[test]
    fn test_null_id_is_answered() {
        let response = server().handle_line(r#"{"jsonrpc":"2.0","id":null,"method":"ping"}"#).unwrap();
        assert!(response.error.is_none());
        assert_eq!(response.id, Some(JsonValue::Null));
        let wire = serde_json::to_value(&response).unwrap();
        assert_eq!(wire["id"], JsonValue::Null);
        assert!(wire.as_object().unwrap().contains_key("id"));
    }

    #[test]
    fn test_convert() {
        let s = server();
        let r = result(call(&s, "convert", json!({"category": "Temperature", "input": "C", "output": "F", "value": 0})));
        assert_eq!(r["result"], "32.0");
        assert_eq!(r["isError"], false);

        let r = result(call(&s, "convert", json!({"category": "length", "input": "K", "output": "M", "value": "1"})));
        assert_eq!(r["result"], "1000.0");
    }

    #[test]
    fn test_convert_same_unit_is_empty() {
        let r = result(call(&server(), "convert", json!({"category": "Temperature", "input": "C", "output": "C", "value": 20})));
        assert_eq!(r["result"], "");
        assert_eq!(r["isError"], true);
        assert_eq!(r["error"]["code"], "UNSUPPORTED_PAIR");
    }

    #[test]
    fn test_convert_missing_unit() {
        let r = result(call(&server(), "convert", json!({"category": "Time", "input": "h", "value": 2})));
        assert_eq!(r["result"], "");
        assert_eq!(r["error"]["code"], "MISSING_UNIT");
    }

    #[test]
    fn test_convert_unparseable_value() {
        let r = result(call(&server(), "convert", json!({"category": "Time", "input": "h", "output": "m", "value": "two"})));
        assert_eq!(r["result"], "0.0");
    }

    #[test]
    fn test_convert_unknown_unit_is_invalid_params() {
        let response = call(&server(), "convert", json!({"category": "Volume", "input": "ml", "output": "L", "value": 1}));
        let error = response.error.unwrap();
        assert_eq!(error.code, error_codes::INVALID_PARAMS);
        assert_eq!(error.data.unwrap()["code"], "UNKNOWN_UNIT");
    }

    #[test]
    fn test_convert_unknown_category() {
        let response = call(&server(), "convert", json!({"category": "Mass", "input": "kg", "output": "g", "value": 1}));
        assert_eq!(response.error.unwrap().data.unwrap()["code"], "UNKNOWN_CATEGORY");
    }

    #[test]
    fn test_non_string_unit_is_invalid_params() {
        let s = server();
        let response = call(&s, "convert", json!({"category": "Time", "input": 5, "output": "m", "value": 2}));
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);

        let response = call(&s, "form", json!({"category": "Time", "output": ["h"], "value": 2}));
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);

        let response = call(&s, "list_rules", json!({"category": 1}));
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }

    #[test]
    fn test_null_unit_counts_as_unset() {
        let r = result(call(&server(), "convert", json!({"category": "Time", "input": "h", "output": null, "value": 2})));
        assert_eq!(r["error"]["code"], "MISSING_UNIT");
    }

    #[test]
    fn test_form_resets_units_to_default() {
        let r = result(call(&server(), "form", json!({"category": "Volume", "value": "10"})));
        assert_eq!(r["data"]["input"]["tag"], "L");
        assert_eq!(r["data"]["output"]["tag"], "L");
        assert_eq!(r["data"]["result"], "");
        assert_eq!(r["content"][0]["text"], "Output: ");
        assert_eq!(r["isError"], true);
    }

    #[test]
    fn test_form_converts() {
        let r = result(call(&server(), "form", json!({"category": "Time", "input": "h", "value": 2})));
        assert_eq!(r["data"]["result"], "120.0");
        assert_eq!(r["content"][0]["text"], "Output: 120.0");
        assert_eq!(r["isError"], false);
    }

    #[test]
    fn test_list_units() {
        let r = result(call(&server(), "list_units", json!({"category": "Temperature"})));
        let tags: Vec<&str> = r["data"].as_array().unwrap().iter()
            .map(|u| u["tag"].as_str().unwrap())
            .collect();
        assert_eq!(tags, ["C", "F", "K"]);
    }

    #[test]
    fn test_list_categories() {
        let r = result(call(&server(), "list_categories", json!({})));
        assert_eq!(r["content"][0]["text"], "Temperature, Length, Time, Volume");
        assert_eq!(r["data"][2]["default_unit"]["name"], "Minutes");
    }

    #[test]
    fn test_list_rules() {
        let s = server();
        let all = result(call(&s, "list_rules", json!({})));
        assert_eq!(all["data"].as_array().unwrap().len(), 12);

        let time = result(call(&s, "list_rules", json!({"category": "Time"})));
        assert_eq!(time["content"][0]["text"], "Time: Minutes -> Hours = value / 60\nTime: Hours -> Minutes = value * 60");
    }

    #[test]
    fn test_list_converters() {
        let r = result(call(&server(), "list_converters", json!({})));
        let data = r["data"].as_array().unwrap();
        let names: Vec<&str> = data.iter().map(|c| c["name"].as_str().unwrap()).collect();
        assert_eq!(names, ["temperature", "length", "time", "volume"]);
        assert!(!data[0]["description"].as_str().unwrap().is_empty());
        assert!(!data[2]["examples"].as_array().unwrap().is_empty());

        let text = r["content"][0]["text"].as_str().unwrap();
        assert!(text.contains("Hours -> Minutes: 2 -> 120.0"));
    }

    #[test]
    fn test_unknown_tool() {
        let response = call(&server(), "eval", json!({}));
        assert_eq!(response.error.unwrap().code, error_codes::INVALID_PARAMS);
    }
}
