// Reads the OpenCanary configuration and lists the enabled services.

use serde_json::{Map, Value};
use std::fs;
use std::path::Path;

const ENABLED_SUFFIX: &str = ".enabled";

/// Returns one "SERVICE on Port N" line per enabled service in `path`.
///
/// Problems with the file are returned as a single "Error: ..." line instead
/// of an `Err`, so they end up on the panel like any other content. The result
/// is never empty.
pub fn read_services(path: &Path) -> Vec<String> {
    if !path.exists() {
        return vec!["Error: Config file not found".to_string()];
    }

    match fs::read_to_string(path) {
        Ok(text) => parse_services(&text),
        Err(e) => vec![format!("Error: {e}")],
    }
}

/// Parses a configuration document and applies the `<name>.enabled` /
/// `<name>.port` convention.
///
/// A key matches when it ends in `.enabled` (case-sensitive) and holds the
/// boolean `true`. The service name is everything before the first `.`,
/// upper-cased; its port is looked up under `<lowercased name>.port`.
/// Output follows key order in the document.
pub fn parse_services(text: &str) -> Vec<String> {
    let config: Map<String, Value> = match serde_json::from_str(text) {
        Ok(config) => config,
        Err(e) if e.is_syntax() || e.is_eof() => {
            return vec![format!("Error: Invalid JSON ({e})")];
        }
        Err(e) => return vec![format!("Error: {e}")],
    };

    let services: Vec<String> = config
        .iter()
        .filter(|(key, value)| key.ends_with(ENABLED_SUFFIX) && **value == Value::Bool(true))
        .map(|(key, _)| {
            let name = key.split('.').next().unwrap_or_default().to_uppercase();
            let port = config
                .get(&format!("{}.port", name.to_lowercase()))
                .map(port_text)
                .unwrap_or_else(|| "N/A".to_string());
            format!("{name} on Port {port}")
        })
        .collect();

    if services.is_empty() {
        vec!["No active services found".to_string()]
    } else {
        services
    }
}

fn port_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
