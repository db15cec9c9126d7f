//! Form decoding into a [`ParameterSet`].
//!
//! # Responsibilities
//! - Parse raw `application/x-www-form-urlencoded` text (query and body)
//! - Reject malformed escapes before decoding
//! - Map recognized keys onto the parameter set, ignoring the rest
//!
//! # Design Decisions
//! - Body fields precede query fields in the combined list
//! - A recognized key supplied more than once is a decode failure
//! - No value validation; ports and addresses are passed through as given
//! - Bytes that are not UTF-8 after unescaping become U+FFFD

use url::form_urlencoded;

use crate::error::{ServiceError, ServiceResult};
use crate::params::types::{ParameterSet, FIELDS};

/// Parse raw form text into ordered key/value pairs.
pub fn parse_form(raw: &[u8]) -> ServiceResult<Vec<(String, String)>> {
    check_form_syntax(raw)?;
    Ok(form_urlencoded::parse(raw)
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect())
}

fn check_form_syntax(raw: &[u8]) -> ServiceResult<()> {
    if raw.contains(&b';') {
        return Err(ServiceError::FormParse(
            "invalid semicolon separator".to_string(),
        ));
    }

    let mut i = 0;
    while i < raw.len() {
        if raw[i] == b'%' {
            let escape = raw.get(i + 1..i + 3);
            match escape {
                Some(hex) if hex.iter().all(u8::is_ascii_hexdigit) => i += 3,
                _ => {
                    let end = raw.len().min(i + 3);
                    return Err(ServiceError::FormParse(format!(
                        "invalid URL escape {:?}",
                        String::from_utf8_lossy(&raw[i..end])
                    )));
                }
            }
        } else {
            i += 1;
        }
    }
    Ok(())
}

/// Map form pairs onto a fresh parameter set.
pub fn decode(pairs: &[(String, String)]) -> ServiceResult<ParameterSet> {
    let mut params = ParameterSet::default();
    let mut errors = Vec::new();

    for (key, slot) in FIELDS {
        let mut values = pairs.iter().filter(|(k, _)| k == key).map(|(_, v)| v);
        let Some(first) = values.next() else {
            continue;
        };
        let extra = values.count();
        if extra > 0 {
            errors.push(format!(
                "{}: expected a single value, got {}",
                key,
                extra + 1
            ));
            continue;
        }
        *slot(&mut params) = first.clone();
    }

    if errors.is_empty() {
        Ok(params)
    } else {
        Err(ServiceError::FieldDecode(errors.join(", ")))
    }
}

/// Parse the body (when it carries form fields) and the query, then decode.
pub fn decode_request(body: Option<&[u8]>, query: Option<&str>) -> ServiceResult<ParameterSet> {
    let mut pairs = Vec::new();
    if let Some(body) = body {
        pairs.extend(parse_form(body)?);
    }
    if let Some(query) = query {
        pairs.extend(parse_form(query.as_bytes())?);
    }
    decode(&pairs)
}
