use crate::ports::outbound::ContentFetcher;
use serde_json::Value;
use tracing::debug;

/// True when a string looks like a full SHA1 commit hash.
pub fn is_sha1(candidate: &str) -> bool {
    candidate.len() == 40 && candidate.chars().all(|c| c.is_ascii_hexdigit())
}

/// Resolves a GitHub tag to the commit SHA it points to, via the GitHub
/// REST API.
///
/// Some license-metadata providers index git revisions by commit, not by
/// tag, so tag-based coordinates need this translation. A `GITHUB_TOKEN`
/// environment variable, when set, is sent as a bearer token for
/// rate-limit relief; requests work unauthenticated otherwise. Any
/// failure returns `None` so the caller can fall back to the tag string.
pub fn resolve_tag_commit(
    fetcher: &dyn ContentFetcher,
    owner: &str,
    repo: &str,
    tag: &str,
) -> Option<String> {
    let mut headers = vec![(
        "Accept".to_string(),
        "application/vnd.github.v3+json".to_string(),
    )];
    match std::env::var("GITHUB_TOKEN") {
        Ok(token) if !token.is_empty() => {
            debug!("github token found in environment");
            headers.push(("Authorization".to_string(), format!("Bearer {}", token)));
        }
        _ => debug!("no github token, proceeding unauthenticated"),
    }

    let url = format!(
        "https://api.github.com/repos/{}/{}/git/ref/tags/{}",
        owner, repo, tag
    );
    let outcome = fetcher.fetch_with_headers(&url, &headers);
    if !outcome.succeeded {
        return None;
    }
    let data: Value = serde_json::from_str(outcome.content.as_deref()?).ok()?;
    let object = data.get("object")?;
    let sha = object.get("sha")?.as_str()?;

    // Annotated tags point at a tag object which in turn points at the
    // commit; lightweight tags point at the commit directly.
    if object.get("type")?.as_str()? == "tag" {
        let tag_url = object.get("url")?.as_str()?;
        if !tag_url.starts_with("https://api.github.com") || !is_sha1(tag_url.rsplit('/').next()?)
        {
            return None;
        }
        let tag_outcome = fetcher.fetch_with_headers(tag_url, &headers);
        if !tag_outcome.succeeded {
            return None;
        }
        let tag_data: Value = serde_json::from_str(tag_outcome.content.as_deref()?).ok()?;
        return tag_data
            .get("object")?
            .get("sha")?
            .as_str()
            .map(String::from);
    }

    Some(sha.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::domain::RetrievalOutcome;
    use serde_json::json;
    use std::collections::HashMap;

    struct CannedFetcher {
        responses: HashMap<String, String>,
    }

    impl ContentFetcher for CannedFetcher {
        fn fetch(&self, url: &str) -> RetrievalOutcome {
            match self.responses.get(url) {
                Some(body) => RetrievalOutcome::success(url, 200, body.clone()),
                None => RetrievalOutcome::failure(url, Some(404)),
            }
        }
    }

    #[test]
    fn test_is_sha1() {
        assert!(is_sha1("0123456789abcdef0123456789abcdef01234567"));
        assert!(!is_sha1("v1.2.3"));
        assert!(!is_sha1("0123456789abcdef"));
    }

    #[test]
    fn test_lightweight_tag_resolves_directly() {
        let sha = "0123456789abcdef0123456789abcdef01234567";
        let body = json!({"object": {"type": "commit", "sha": sha}}).to_string();
        let fetcher = CannedFetcher {
            responses: HashMap::from([(
                "https://api.github.com/repos/x/y/git/ref/tags/1.0".to_string(),
                body,
            )]),
        };
        assert_eq!(
            resolve_tag_commit(&fetcher, "x", "y", "1.0").as_deref(),
            Some(sha)
        );
    }

    #[test]
    fn test_annotated_tag_follows_tag_object() {
        let tag_sha = "aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
        let commit_sha = "bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";
        let tag_url = format!("https://api.github.com/repos/x/y/git/tags/{}", tag_sha);
        let first = json!({"object": {"type": "tag", "sha": tag_sha, "url": tag_url}}).to_string();
        let second = json!({"object": {"type": "commit", "sha": commit_sha}}).to_string();
        let fetcher = CannedFetcher {
            responses: HashMap::from([
                (
                    "https://api.github.com/repos/x/y/git/ref/tags/v2.0".to_string(),
                    first,
                ),
                (tag_url, second),
            ]),
        };
        assert_eq!(
            resolve_tag_commit(&fetcher, "x", "y", "v2.0").as_deref(),
            Some(commit_sha)
        );
    }

    #[test]
    fn test_missing_tag_returns_none() {
        let fetcher = CannedFetcher {
            responses: HashMap::new(),
        };
        assert!(resolve_tag_commit(&fetcher, "x", "y", "9.9").is_none());
    }
}
