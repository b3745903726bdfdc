use serde_json::Value as Json;

/// Truthiness as the host auction framework sees it.
///
/// `null`, `false`, `0`, `NaN` and the empty string are falsy. Objects and
/// arrays are truthy even when empty.
#[must_use]
pub fn is_truthy(value: &Json) -> bool {
    match value {
        Json::Null => false,
        Json::Bool(b) => *b,
        Json::Number(n) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Json::String(s) => !s.is_empty(),
        Json::Array(_) | Json::Object(_) => true,
    }
}

/// Same as [`is_truthy`] but treats an absent value as falsy.
#[must_use]
pub fn is_truthy_opt(value: Option<&Json>) -> bool {
    value.is_some_and(is_truthy)
}
