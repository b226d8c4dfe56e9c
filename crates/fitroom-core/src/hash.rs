//! Config fingerprinting.
//!
//! A fingerprint identifies the avatar state stored in a config, independent
//! of when it was exported:
//!
//! ```text
//! fingerprint = hex(BLAKE3(JCS(config_json without "timestamp")))
//! ```

use serde_json::Value;

use crate::config::PlaygroundConfig;
use crate::error::FitroomError;

/// Computes the fingerprint of a config.
///
/// Two exports of the same shape-key values and visibility produce the same
/// fingerprint even if their timestamps differ.
///
/// # Example
/// ```
/// use std::collections::BTreeMap;
/// use fitroom_core::config::PlaygroundConfig;
/// use fitroom_core::hash::config_fingerprint;
///
/// let mut keys = BTreeMap::new();
/// keys.insert("waist".to_string(), 0.42);
/// let config = PlaygroundConfig::with_shape_keys(keys);
///
/// let hash = config_fingerprint(&config).unwrap();
/// assert_eq!(hash.len(), 64);
/// ```
pub fn config_fingerprint(config: &PlaygroundConfig) -> Result<String, FitroomError> {
    let mut value = config.to_value()?;
    if let Value::Object(ref mut map) = value {
        map.remove("timestamp");
    }
    canonical_value_hash(&value)
}

/// Computes the canonical BLAKE3 hash of a JSON value.
pub fn canonical_value_hash(value: &Value) -> Result<String, FitroomError> {
    let canonical = canonicalize_json(value)?;
    Ok(blake3::hash(canonical.as_bytes()).to_hex().to_string())
}

/// Canonicalizes a JSON value in the style of RFC 8785 (JCS).
///
/// Object keys are sorted, no whitespace is emitted and numbers use their
/// shortest form.
pub fn canonicalize_json(value: &Value) -> Result<String, FitroomError> {
    let mut out = String::new();
    write_canonical(value, &mut out)?;
    Ok(out)
}

fn write_canonical(value: &Value, out: &mut String) -> Result<(), FitroomError> {
    match value {
        Value::Null => out.push_str("null"),
        Value::Bool(b) => out.push_str(if *b { "true" } else { "false" }),
        Value::Number(n) => out.push_str(&format_jcs_number(n)?),
        Value::String(s) => write_jcs_string(s, out),
        Value::Array(items) => {
            out.push('[');
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_canonical(item, out)?;
            }
            out.push(']');
        }
        Value::Object(map) => {
            let mut pairs: Vec<(&String, &Value)> = map.iter().collect();
            pairs.sort_by(|a, b| a.0.cmp(b.0));

            out.push('{');
            for (i, (key, item)) in pairs.into_iter().enumerate() {
                if i > 0 {
                    out.push(',');
                }
                write_jcs_string(key, out);
                out.push(':');
                write_canonical(item, out)?;
            }
            out.push('}');
        }
    }
    Ok(())
}

fn format_jcs_number(n: &serde_json::Number) -> Result<String, FitroomError> {
    if let Some(i) = n.as_i64() {
        return Ok(i.to_string());
    }
    if let Some(u) = n.as_u64() {
        return Ok(u.to_string());
    }
    let f = n
        .as_f64()
        .ok_or_else(|| FitroomError::Canonicalization(format!("unrepresentable number {}", n)))?;
    if !f.is_finite() {
        return Err(FitroomError::Canonicalization(format!(
            "non-finite number {}",
            f
        )));
    }
    if f == 0.0 {
        return Ok("0".to_string());
    }
    if f.fract() == 0.0 && f.abs() < 1e15 {
        return Ok(format!("{}", f as i64));
    }
    Ok(format!("{}", f))
}

fn write_jcs_string(s: &str, out: &mut String) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c < '\x20' => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
}
