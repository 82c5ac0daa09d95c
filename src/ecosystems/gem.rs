use crate::ecosystems::{fix_repository_url, scan_repo_suggestions, EcosystemAdapter, LookupContext};
use crate::resolution::domain::{
    Ecosystem, LicenseSignal, PackageCoordinate, PackageMetadata, RepoLookupResult,
    RepoSuggestion, SignalOrigin,
};
use crate::shared::{get_keypath_str, Result};
use serde_json::Value;
use tracing::{debug, info};

/// Metadata key paths probed, in priority order, for a repository URL.
const REPO_KEY_PATHS: &[&str] = &[
    "metadata.source_code_url",
    "metadata.source_code_uri",
    "source_code_uri",
    "homepage_uri",
];

/// Adapter for the RubyGems registry.
///
/// Versioned metadata lives under the v2 API; when a purl or token has
/// no version, the latest one is discovered through the v1 gem endpoint
/// first. Repository suggestions are pinned to the release version
/// (`.../tree/<version>`) so the scanned license matches the release,
/// with a repaired variant added when the published URL is known-broken.
pub struct GemAdapter;

impl GemAdapter {
    pub fn new() -> Self {
        Self
    }

    fn version_url(name: &str, version: &str) -> String {
        format!(
            "https://rubygems.org/api/v2/rubygems/{}/versions/{}.json",
            name, version
        )
    }

    /// Discovers the latest published version via the v1 endpoint.
    fn find_latest_version(ctx: &LookupContext, name: &str) -> Option<String> {
        let url = format!("https://rubygems.org/api/v1/gems/{}.json", name);
        let outcome = ctx.fetcher.fetch(&url);
        if !outcome.succeeded {
            return None;
        }
        let data: Value = serde_json::from_str(outcome.content.as_deref()?).ok()?;
        data.get("version")
            .and_then(Value::as_str)
            .map(String::from)
    }

    fn metadata_urls(ctx: &LookupContext, identifier: &str) -> Vec<String> {
        let identifier = identifier.trim().trim_end_matches('/');

        if identifier.starts_with("pkg:") {
            let Ok(coordinate) = PackageCoordinate::parse(identifier) else {
                return Vec::new();
            };
            let version = coordinate
                .version()
                .map(String::from)
                .or_else(|| Self::find_latest_version(ctx, coordinate.name()));
            let Some(version) = version else {
                return Vec::new();
            };
            return vec![Self::version_url(coordinate.name(), &version)];
        }

        if identifier.starts_with("http") {
            let mut urls = vec![identifier.to_string()];
            if let Some(rest) = identifier.split("/gems/").nth(1) {
                let name = rest.split('/').next().unwrap_or(rest);
                urls.push(format!("https://rubygems.org/api/v1/gems/{}.json", name));
            }
            return urls;
        }

        // name@version or name==version token.
        let (name, version) = match identifier.split_once("==") {
            Some((name, version)) => (name.to_string(), Some(version.to_string())),
            None => match identifier.split_once('@') {
                Some((name, version)) => (name.to_string(), Some(version.to_string())),
                None => (identifier.to_string(), None),
            },
        };
        let version = version.or_else(|| Self::find_latest_version(ctx, &name));
        match version {
            Some(version) => vec![Self::version_url(&name, &version)],
            None => Vec::new(),
        }
    }

    /// Trims a code-host URL down to its repository root
    /// (scheme + host + owner + name).
    fn repository_root(url: &str) -> String {
        url.split('/').take(5).collect::<Vec<_>>().join("/")
    }

    /// Version-pinned repository reference, github only.
    fn repository_with_version(url: &str, version: &str) -> Option<String> {
        if !url.contains("github.com") || version.is_empty() {
            return None;
        }
        Some(format!("{}/tree/{}", Self::repository_root(url), version))
    }

    fn parse_metadata(metadata_url: &str, body: &str) -> Option<PackageMetadata> {
        let data: Value = serde_json::from_str(body).ok()?;
        let name = data.get("name")?.as_str().map(String::from);
        let version = data
            .get("version")
            .and_then(Value::as_str)
            .map(String::from);

        let mut declared = Vec::new();
        if let Some(licenses) = data.get("licenses").and_then(Value::as_array) {
            let joined: Vec<&str> = licenses.iter().filter_map(Value::as_str).collect();
            if !joined.is_empty() {
                info!(licenses = ?joined, url = metadata_url, "found declared gem licenses");
                declared.push(LicenseSignal::new(
                    SignalOrigin::PackageMetadata,
                    joined.join(" AND "),
                    metadata_url,
                ));
            }
        }

        let mut repo_suggestions = Vec::new();
        for key_path in REPO_KEY_PATHS {
            let Some(repository) = get_keypath_str(&data, key_path) else {
                continue;
            };
            let Some(pinned) = version
                .as_deref()
                .and_then(|v| Self::repository_with_version(repository, v))
            else {
                continue;
            };
            repo_suggestions.push(RepoSuggestion::new(&pinned, metadata_url, *key_path));
            if let Some(repaired) = fix_repository_url(&pinned) {
                repo_suggestions.push(RepoSuggestion::new(repaired, metadata_url, *key_path));
            }
        }

        Some(PackageMetadata {
            name,
            version,
            homepage: get_keypath_str(&data, "homepage_uri").map(String::from),
            metadata_url: metadata_url.to_string(),
            declared,
            repo_suggestions,
        })
    }
}

impl Default for GemAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EcosystemAdapter for GemAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Gem
    }

    fn coordinate_for(
        &self,
        identifier: &str,
        version: Option<&str>,
    ) -> Option<PackageCoordinate> {
        if identifier.starts_with("pkg:") {
            return PackageCoordinate::parse(identifier).ok();
        }
        if identifier.starts_with("http") {
            let path = identifier.split("rubygems.org/").nth(1)?;
            let segments: Vec<&str> = path
                .split('/')
                .filter(|s| !s.is_empty() && *s != "gems" && *s != "api")
                .collect();
            let name = segments.first()?.trim_end_matches(".json").to_string();
            return Some(PackageCoordinate::new(
                "gem",
                None,
                name,
                version.map(String::from),
            ));
        }
        let (name, token_version) = identifier
            .split_once("==")
            .or_else(|| identifier.split_once('@'))
            .map(|(n, v)| (n, Some(v.to_string())))
            .unwrap_or((identifier, None));
        if name.is_empty() || name.contains('/') || name.contains(char::is_whitespace) {
            return None;
        }
        Some(PackageCoordinate::new(
            "gem",
            None,
            name,
            token_version.or_else(|| version.map(String::from)),
        ))
    }

    fn lookup_package(
        &self,
        ctx: &LookupContext,
        identifier: &str,
    ) -> Result<Option<PackageMetadata>> {
        for metadata_url in Self::metadata_urls(ctx, identifier) {
            let outcome = ctx.fetcher.fetch(&metadata_url);
            if !outcome.succeeded {
                continue;
            }
            let Some(body) = outcome.content.as_deref() else {
                continue;
            };
            if let Some(metadata) = Self::parse_metadata(&metadata_url, body) {
                debug!(url = %metadata_url, "gem metadata found");
                return Ok(Some(metadata));
            }
        }
        Ok(None)
    }

    fn lookup_url_impl(
        &self,
        ctx: &LookupContext,
        identifier: &str,
        package: Option<&PackageMetadata>,
    ) -> Result<Option<RepoLookupResult>> {
        let Some(package) = package else {
            return Ok(None);
        };
        Ok(scan_repo_suggestions(
            ctx,
            identifier,
            &package.unique_repositories(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_version_url_shape() {
        assert_eq!(
            GemAdapter::version_url("rails", "7.1.0"),
            "https://rubygems.org/api/v2/rubygems/rails/versions/7.1.0.json"
        );
    }

    #[test]
    fn test_repository_with_version() {
        assert_eq!(
            GemAdapter::repository_with_version("https://github.com/rails/rails/tree/main", "7.1.0")
                .as_deref(),
            Some("https://github.com/rails/rails/tree/7.1.0")
        );
        assert!(GemAdapter::repository_with_version("https://example.org/x", "7.1.0").is_none());
    }

    #[test]
    fn test_parse_metadata_joins_licenses() {
        let body = json!({
            "name": "rails",
            "version": "7.1.0",
            "licenses": ["MIT", "Ruby"],
            "homepage_uri": "https://rubyonrails.org",
            "source_code_uri": "https://github.com/rails/rails"
        })
        .to_string();

        let metadata = GemAdapter::parse_metadata("m", &body).unwrap();
        assert_eq!(metadata.declared.len(), 1);
        assert_eq!(metadata.declared[0].raw_license, "MIT AND Ruby");
        // suggestion pinned to the release version
        assert_eq!(
            metadata.repo_suggestions[0].repository,
            "https://github.com/rails/rails/tree/7.1.0"
        );
    }

    #[test]
    fn test_parse_metadata_nested_source_path() {
        let body = json!({
            "name": "nokogiri",
            "version": "1.16.0",
            "licenses": ["MIT"],
            "metadata": {"source_code_uri": "https://github.com/sparklemotion/nokogiri"}
        })
        .to_string();

        let metadata = GemAdapter::parse_metadata("m", &body).unwrap();
        assert_eq!(
            metadata.repo_suggestions[0].metadata_path,
            "metadata.source_code_uri"
        );
        assert_eq!(
            metadata.repo_suggestions[0].repository,
            "https://github.com/sparklemotion/nokogiri/tree/1.16.0"
        );
    }

    #[test]
    fn test_coordinate_for_purl() {
        let adapter = GemAdapter::new();
        let coordinate = adapter.coordinate_for("pkg:gem/rails@7.1.0", None).unwrap();
        assert_eq!(coordinate.purl_type(), "gem");
        assert_eq!(coordinate.version(), Some("7.1.0"));
    }

    #[test]
    fn test_coordinate_for_web_url() {
        let adapter = GemAdapter::new();
        let coordinate = adapter
            .coordinate_for("https://rubygems.org/gems/rails", Some("7.1.0"))
            .unwrap();
        assert_eq!(coordinate.name(), "rails");
        assert_eq!(coordinate.version(), Some("7.1.0"));
    }
}
