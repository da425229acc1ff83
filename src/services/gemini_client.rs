//! Model endpoint client implementation using reqwest.
//!
//! Targets the Gemini `generateContent` API: structured completions are
//! schema-constrained JSON, images travel as inline base64 data, and a bound
//! tool is exposed as a function declaration the model may call once.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::{CONTENT_TYPE, RETRY_AFTER};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use url::Url;

use crate::domain::{AppError, ImagePayload, ModelApiConfig};
use crate::ports::{ModelClient, ModelRequest, ToolHandler};

const X_GOOG_API_KEY: &str = "X-Goog-Api-Key";

/// HTTP client for the generative model endpoint.
#[derive(Clone)]
pub struct HttpModelClient {
    api_key: String,
    base_url: Url,
    text_model: String,
    image_model: String,
    client: Client,
}

impl std::fmt::Debug for HttpModelClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpModelClient")
            .field("base_url", &self.base_url)
            .field("text_model", &self.text_model)
            .field("image_model", &self.image_model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpModelClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &ModelApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::InvalidConfig(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            api_key,
            base_url: config.api_base_url.clone(),
            text_model: config.text_model.clone(),
            image_model: config.image_model.clone(),
            client,
        })
    }

    /// Create from the `GEMINI_API_KEY` environment variable.
    pub fn from_env(config: &ModelApiConfig) -> Result<Self, AppError> {
        let api_key = std::env::var("GEMINI_API_KEY").map_err(|_| AppError::MissingApiKey)?;
        Self::new(api_key, config)
    }

    fn endpoint(&self, model: &str) -> Result<Url, AppError> {
        let base = self.base_url.as_str().trim_end_matches('/');
        Url::parse(&format!("{}/models/{}:generateContent", base, model))
            .map_err(|e| AppError::InvalidConfig(format!("Invalid endpoint URL: {}", e)))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<ToolDeclarations>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Content {
    role: String,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_call: Option<FunctionCall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    function_response: Option<FunctionResponse>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionCall {
    name: String,
    #[serde(default)]
    args: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FunctionResponse {
    name: String,
    response: Value,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    response_mime_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_schema: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_modalities: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ToolDeclarations {
    function_declarations: Vec<FunctionDeclaration>,
}

#[derive(Debug, Serialize)]
struct FunctionDeclaration {
    name: String,
    description: String,
    parameters: Value,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl ModelClient for HttpModelClient {
    fn generate(&self, request: ModelRequest<'_>) -> Result<Value, AppError> {
        let mut user_parts = vec![Part { text: Some(request.prompt.clone()), ..Part::default() }];
        if let Some(image) = &request.image {
            user_parts.push(Part {
                inline_data: Some(InlineData {
                    mime_type: image.mime().to_string(),
                    data: image.base64_data(),
                }),
                ..Part::default()
            });
        }

        let mut contents = vec![Content { role: "user".to_string(), parts: user_parts }];
        let mut tool_used = false;

        // First send, plus at most one follow-up carrying a tool result.
        loop {
            let body = GenerateRequest {
                contents: contents.clone(),
                generation_config: Some(GenerationConfig {
                    response_mime_type: Some("application/json".to_string()),
                    response_schema: request.response_schema.clone(),
                    response_modalities: None,
                }),
                tools: request.tool.map(|tool| {
                    vec![ToolDeclarations {
                        function_declarations: vec![FunctionDeclaration {
                            name: tool.name().to_string(),
                            description: tool.description().to_string(),
                            parameters: tool.parameters(),
                        }],
                    }]
                }),
            };

            let reply = self.send(&self.endpoint(&self.text_model)?, &body)?;
            let content = first_content(reply)?;

            if let Some(call) = content.parts.iter().find_map(|p| p.function_call.clone()) {
                let tool = match request.tool {
                    Some(tool) if tool.name() == call.name => tool,
                    _ => {
                        return Err(AppError::ToolFailed {
                            tool: call.name.clone(),
                            reason: "model requested an undeclared tool".to_string(),
                        });
                    }
                };
                if tool_used {
                    return Err(AppError::ToolLoop { tool: call.name });
                }
                tool_used = true;

                let result = dispatch_tool(tool, call.args.clone())?;
                contents.push(content);
                contents.push(Content {
                    role: "user".to_string(),
                    parts: vec![Part {
                        function_response: Some(FunctionResponse {
                            name: call.name,
                            response: result,
                        }),
                        ..Part::default()
                    }],
                });
                continue;
            }

            let text = content
                .parts
                .iter()
                .find_map(|p| p.text.as_deref())
                .ok_or_else(|| {
                    AppError::malformed_reply("completion", "reply contained no text part")
                })?;
            return serde_json::from_str(text).map_err(|e| {
                AppError::malformed_reply("completion", format!("reply is not valid JSON: {}", e))
            });
        }
    }

    fn generate_image(&self, prompt: &str) -> Result<ImagePayload, AppError> {
        let body = GenerateRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part { text: Some(prompt.to_string()), ..Part::default() }],
            }],
            generation_config: Some(GenerationConfig {
                response_mime_type: None,
                response_schema: None,
                response_modalities: Some(vec!["TEXT".to_string(), "IMAGE".to_string()]),
            }),
            tools: None,
        };

        let reply = self.send(&self.endpoint(&self.image_model)?, &body)?;
        let content = first_content(reply)?;
        let inline = content
            .parts
            .into_iter()
            .find_map(|p| p.inline_data)
            .ok_or_else(|| {
                AppError::malformed_reply("image generation", "reply contained no image data")
            })?;
        let uri = format!("data:{};base64,{}", inline.mime_type, inline.data);
        ImagePayload::from_data_uri(&uri)
            .map_err(|e| AppError::malformed_reply("image generation", e.to_string()))
    }
}

impl HttpModelClient {
    fn send(&self, endpoint: &Url, body: &GenerateRequest) -> Result<GenerateResponse, AppError> {
        let response = self
            .client
            .post(endpoint.clone())
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(body)
            .send()
            .map_err(|e| AppError::HttpTransport(e.to_string()))?;

        let status = response.status();

        if status.is_success() {
            response
                .json()
                .map_err(|e| AppError::malformed_reply("completion", e.to_string()))
        } else if status.as_u16() == 429 {
            let retry_after_ms = response
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .map(|secs| secs * 1000);
            Err(AppError::RateLimited { retry_after_ms })
        } else if status.is_server_error() {
            Err(AppError::ServerError { status: status.as_u16() })
        } else {
            let message = response.text().unwrap_or_else(|_| "Unknown error".to_string());
            Err(AppError::ApiError { status: status.as_u16(), message })
        }
    }
}

fn first_content(reply: GenerateResponse) -> Result<Content, AppError> {
    reply
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .ok_or_else(|| AppError::malformed_reply("completion", "reply contained no candidates"))
}

fn dispatch_tool(tool: &dyn ToolHandler, args: Value) -> Result<Value, AppError> {
    tool.invoke(args).map_err(|e| AppError::ToolFailed {
        tool: tool.name().to_string(),
        reason: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StubProductSearch;
    use serde_json::json;

    fn config_for(server: &mockito::Server) -> ModelApiConfig {
        ModelApiConfig {
            api_base_url: Url::parse(&server.url()).unwrap(),
            text_model: "test-model".into(),
            image_model: "test-image-model".into(),
            timeout_secs: 1,
            max_retries: 3,
            retry_delay_ms: 1,
        }
    }

    fn structured_request() -> ModelRequest<'static> {
        ModelRequest::structured(
            "prompt".into(),
            json!({ "type": "OBJECT", "properties": {} }),
        )
    }

    fn text_reply_body(text: &str) -> String {
        json!({
            "candidates": [
                { "content": { "role": "model", "parts": [ { "text": text } ] } }
            ]
        })
        .to_string()
    }

    #[test]
    fn generate_parses_structured_reply() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(text_reply_body(r#"{"answer": "ok"}"#))
            .create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let value = client.generate(structured_request()).unwrap();
        assert_eq!(value["answer"], "ok");
    }

    #[test]
    fn generate_maps_429_to_rate_limited() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(429)
            .with_header("retry-after", "2")
            .create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let err = client.generate(structured_request()).unwrap_err();
        assert!(matches!(err, AppError::RateLimited { retry_after_ms: Some(2000) }));
        assert!(err.is_retryable());
    }

    #[test]
    fn generate_maps_5xx_to_server_error() {
        let mut server = mockito::Server::new();
        let _m =
            server.mock("POST", "/models/test-model:generateContent").with_status(503).create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let err = client.generate(structured_request()).unwrap_err();
        assert!(matches!(err, AppError::ServerError { status: 503 }));
    }

    #[test]
    fn generate_fails_fast_on_400() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(400)
            .with_body("Bad Request")
            .expect(1)
            .create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let err = client.generate(structured_request()).unwrap_err();
        assert!(matches!(err, AppError::ApiError { status: 400, .. }));
        assert!(!err.is_retryable());
        mock.assert();
    }

    #[test]
    fn non_json_text_reply_is_malformed() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(200)
            .with_body(text_reply_body("plain prose, not JSON"))
            .create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let err = client.generate(structured_request()).unwrap_err();
        assert!(matches!(err, AppError::MalformedReply { .. }));
    }

    #[test]
    fn tool_call_triggers_one_follow_up_request() {
        let mut server = mockito::Server::new();
        let first = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [ { "content": { "role": "model", "parts": [
                        { "functionCall": { "name": "searchShopping",
                                            "args": { "query": "moisturizer" } } }
                    ] } } ]
                })
                .to_string(),
            )
            .expect(1)
            .create();
        let second = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(200)
            .with_body(text_reply_body(r#"{"recommendations": []}"#))
            .match_body(mockito::Matcher::PartialJsonString(
                r#"{"contents": [{}, {}, {"parts": [{"functionResponse":
                    {"name": "searchShopping"}}]}]}"#
                    .to_string(),
            ))
            .expect(1)
            .create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let tool = StubProductSearch::new();
        let request = ModelRequest::structured(
            "prompt".into(),
            json!({ "type": "OBJECT", "properties": {} }),
        )
        .with_tool(&tool);
        let value = client.generate(request).unwrap();
        assert!(value["recommendations"].as_array().unwrap().is_empty());
        first.assert();
        second.assert();
    }

    #[test]
    fn second_tool_call_is_a_tool_loop() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/models/test-model:generateContent")
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [ { "content": { "role": "model", "parts": [
                        { "functionCall": { "name": "searchShopping", "args": {} } }
                    ] } } ]
                })
                .to_string(),
            )
            .expect(2)
            .create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let tool = StubProductSearch::new();
        let request = ModelRequest::structured(
            "prompt".into(),
            json!({ "type": "OBJECT", "properties": {} }),
        )
        .with_tool(&tool);
        let err = client.generate(request).unwrap_err();
        assert!(matches!(err, AppError::ToolLoop { .. }));
    }

    #[test]
    fn generate_image_decodes_inline_data() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/models/test-image-model:generateContent")
            .with_status(200)
            .with_body(
                json!({
                    "candidates": [ { "content": { "role": "model", "parts": [
                        { "inlineData": { "mimeType": "image/png", "data": "aGVsbG8=" } }
                    ] } } ]
                })
                .to_string(),
            )
            .create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let image = client.generate_image("a yoga pose").unwrap();
        assert_eq!(image.mime(), "image/png");
        assert_eq!(image.bytes(), b"hello");
    }

    #[test]
    fn missing_image_data_is_malformed() {
        let mut server = mockito::Server::new();
        let _m = server
            .mock("POST", "/models/test-image-model:generateContent")
            .with_status(200)
            .with_body(text_reply_body("no image here"))
            .create();

        let client = HttpModelClient::new("fake-key".into(), &config_for(&server)).unwrap();
        let err = client.generate_image("a yoga pose").unwrap_err();
        assert!(matches!(err, AppError::MalformedReply { .. }));
    }
}
