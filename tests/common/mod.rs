#![allow(dead_code)]

use holoen_cms::config::CmsSettings;
use holoen_cms::http::CmsClient;
use serde_json::{Value, json};
use wiremock::MockServer;

pub fn client_for(server: &MockServer) -> CmsClient {
    CmsClient::new(&settings_for(server)).unwrap()
}

pub fn settings_for(server: &MockServer) -> CmsSettings {
    CmsSettings::new(server.uri()).with_timeout_secs(5)
}

pub fn page_body(docs: Value, has_next_page: bool) -> Value {
    let total = docs.as_array().map(Vec::len).unwrap_or_default();
    json!({
        "docs": docs,
        "totalDocs": total,
        "hasNextPage": has_next_page
    })
}
