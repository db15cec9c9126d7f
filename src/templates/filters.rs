//! Tera filters registered on every template set.

use std::collections::HashMap;

use tera::Value;

/// Name the shell quoting filter is registered under.
pub const SHELL_QUOTE: &str = "shell_quote";

/// Quote `value` as a single POSIX shell word.
///
/// The value is wrapped in single quotes; embedded single quotes become
/// `'\''`. Nothing inside single quotes is expanded by the shell.
pub fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

/// `{{ value | shell_quote }}`
pub fn shell_quote_filter(value: &Value, _args: &HashMap<String, Value>) -> tera::Result<Value> {
    let quoted = match value {
        Value::String(s) => shell_quote(s),
        Value::Null => shell_quote(""),
        other => shell_quote(&other.to_string()),
    };
    Ok(Value::String(quoted))
}
