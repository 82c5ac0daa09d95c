/// Known-broken repository URLs published in registry metadata, with
/// their working replacements.
const URL_FIXES: &[(&str, &str)] = &[(
    "https://github.com/ruby/ruby/tree/trunk",
    "https://github.com/ruby/ruby",
)];

/// Repairs a repository URL suggested by registry metadata.
///
/// Registry metadata is full of slightly-off repository URLs: plain
/// http, trailing `.git`, or outright wrong paths for a handful of
/// well-known packages. Returns `Some(fixed)` only when something
/// changed.
pub fn fix_repository_url(url: &str) -> Option<String> {
    let mut fixed = url.trim().trim_end_matches('/').to_string();

    if let Some((_, replacement)) = URL_FIXES.iter().find(|(broken, _)| *broken == fixed) {
        return Some(replacement.to_string());
    }

    if let Some(rest) = fixed.strip_prefix("http://") {
        fixed = format!("https://{}", rest);
    }
    if let Some(stripped) = fixed.strip_suffix(".git") {
        fixed = stripped.to_string();
    }

    if fixed == url {
        None
    } else {
        Some(fixed)
    }
}
