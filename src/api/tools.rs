// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Operation catalogue served at `/v1/tools`

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config::FetchConfig;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub endpoint: String,
    pub description: String,
    /// JSON schema of the request body
    pub parameters: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolDescriptor>,
}

pub fn describe_tools(config: &FetchConfig) -> ToolsResponse {
    let fetch = ToolDescriptor {
        name: "fetch".to_string(),
        endpoint: "/v1/fetch".to_string(),
        description: format!(
            "Fetches a URL from the internet and extracts its contents as markdown. Default max_length is {}.",
            config.default_max_length
        ),
        parameters: json!({
            "type": "object",
            "properties": {
                "url": {"type": "string", "description": "URL to fetch"},
                "max_length": {"type": "number", "description": "Maximum number of characters to return"},
                "start_index": {"type": "number", "description": "Start content from this character index"},
                "raw": {"type": "boolean", "description": "Get raw content without markdown conversion"}
            },
            "required": ["url"]
        }),
    };

    let fetch_multiple = ToolDescriptor {
        name: "fetch_multiple".to_string(),
        endpoint: "/v1/fetch_multiple".to_string(),
        description: format!(
            "Fetch content from multiple URLs (max {}). Default max_length is {}.",
            config.max_urls, config.default_max_length
        ),
        parameters: json!({
            "type": "object",
            "properties": {
                "urls": {
                    "type": "array",
                    "items": {"type": "string"},
                    "maxItems": config.max_urls,
                    "description": format!("URLs to fetch (maximum {})", config.max_urls)
                },
                "max_length": {"type": "number", "description": "Maximum total number of characters to return across all URLs combined"},
                "raw": {"type": "boolean", "description": "Get raw content without markdown conversion"}
            },
            "required": ["urls"]
        }),
    };

    ToolsResponse {
        tools: vec![fetch, fetch_multiple],
    }
}
