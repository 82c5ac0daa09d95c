use serde_json::Value;

/// Walks a JSON document along a dot-separated key path.
///
/// Registry metadata is probed with fixed, ordered lists of key paths
/// (e.g. `info.project_urls.Source`); a missing segment yields `None`
/// rather than an error so callers can fall through to the next path.
pub fn get_keypath<'a>(data: &'a Value, path: &str) -> Option<&'a Value> {
    let mut inner = data;
    for segment in path.split('.') {
        inner = inner.get(segment)?;
    }
    Some(inner)
}

/// Convenience variant returning the string value at a key path.
pub fn get_keypath_str<'a>(data: &'a Value, path: &str) -> Option<&'a str> {
    get_keypath(data, path).and_then(Value::as_str)
}
