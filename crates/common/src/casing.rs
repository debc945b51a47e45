//! Key-case conversion between wire and in-memory object graphs
//!
//! The backend speaks snake_case on several endpoints while in-memory
//! domain objects use camelCase; these transforms bridge the two at the
//! endpoint boundary. They are never applied inside the request pipeline
//! itself.
//!
//! The conversion is deliberately simple and matches the shape consuming
//! code already depends on: `snake_key` prefixes *every* ASCII uppercase
//! letter with an underscore, so a capitalized first letter yields a
//! leading underscore (`"UserId"` -> `"_user_id"`) and runs of uppercase
//! letters each get their own (`"userID"` -> `"user_i_d"`). Do not "fix"
//! this; round-tripping is only guaranteed for lowercase ASCII keys with
//! single-underscore word separators.

use serde_json::{Map, Value};

/// Convert one key from snake_case to camelCase.
///
/// Each underscore immediately followed by a lowercase ASCII letter is
/// removed and that letter upper-cased; every other character passes
/// through unchanged. Keys without underscores come back as-is.
pub fn camel_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len());
    let mut chars = key.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '_' {
            if let Some(&next) = chars.peek() {
                if next.is_ascii_lowercase() {
                    out.push(next.to_ascii_uppercase());
                    chars.next();
                    continue;
                }
            }
        }
        out.push(ch);
    }
    out
}

/// Convert one key from camelCase to snake_case.
///
/// Each ASCII uppercase letter is replaced by an underscore plus its
/// lowercase form; all remaining characters are lower-cased. Keys without
/// uppercase letters come back as-is.
pub fn snake_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 2);
    for ch in key.chars() {
        if ch.is_ascii_uppercase() {
            out.push('_');
            out.push(ch.to_ascii_lowercase());
        } else {
            out.extend(ch.to_lowercase());
        }
    }
    out
}

/// Recursively rename every object key in `value` to camelCase.
pub fn keys_to_camel(value: Value) -> Value {
    transform_keys(value, &camel_key)
}

/// Recursively rename every object key in `value` to snake_case.
pub fn keys_to_snake(value: Value) -> Value {
    transform_keys(value, &snake_key)
}

/// Arrays map element-wise (order and length preserved), objects map
/// key-wise with recursively transformed values, and every other value is
/// returned unchanged — leaves are never recursed into, so opaque payloads
/// (strings, numbers, nulls) cannot be corrupted.
fn transform_keys(value: Value, transform: &dyn Fn(&str) -> String) -> Value {
    match value {
        Value::Array(items) => {
            Value::Array(items.into_iter().map(|item| transform_keys(item, transform)).collect())
        }
        Value::Object(entries) => {
            let mut out = Map::with_capacity(entries.len());
            for (key, item) in entries {
                out.insert(transform(&key), transform_keys(item, transform));
            }
            Value::Object(out)
        }
        leaf => leaf,
    }
}
