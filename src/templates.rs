//! Template engine setup
//!
//! Templates live under `<static_root>/templ/` and are compiled once
//! at startup. A missing or broken template set is a configuration
//! error and fails startup.

use crate::logger;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera, Value};

/// Compile all templates under the static root
pub fn load(static_root: &str) -> tera::Result<Tera> {
    let pattern = format!("{static_root}/templ/**/*");
    let mut tera = Tera::new(&pattern)?;
    tera.register_filter("ensure_scheme", ensure_scheme);
    Ok(tera)
}

/// Render a template, logging and returning `None` on failure
pub fn render<T: Serialize>(tera: &Tera, name: &str, data: &T) -> Option<String> {
    let context = match Context::from_serialize(data) {
        Ok(c) => c,
        Err(e) => {
            logger::log_error(&format!("Template context for '{name}': {e}"));
            return None;
        }
    };

    match tera.render(name, &context) {
        Ok(html) => Some(html),
        Err(e) => {
            logger::log_error(&format!("Template render '{name}': {e}"));
            None
        }
    }
}

/// Prefix `https://` onto URLs that carry no scheme, so templates can
/// link externally supplied addresses safely.
fn ensure_scheme(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let Some(url) = value.as_str() else {
        return Err(tera::Error::msg("ensure_scheme expects a string"));
    };

    if url.contains("://") {
        Ok(Value::String(url.to_string()))
    } else {
        Ok(Value::String(format!("https://{url}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_scheme_adds_https() {
        let out = ensure_scheme(&Value::String("example.com/page".into()), &HashMap::new());
        assert_eq!(out.unwrap(), Value::String("https://example.com/page".into()));
    }

    #[test]
    fn test_ensure_scheme_keeps_existing() {
        let out = ensure_scheme(&Value::String("http://example.com".into()), &HashMap::new());
        assert_eq!(out.unwrap(), Value::String("http://example.com".into()));
    }

    #[test]
    fn test_ensure_scheme_rejects_non_string() {
        assert!(ensure_scheme(&Value::Bool(true), &HashMap::new()).is_err());
    }
}
