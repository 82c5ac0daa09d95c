use crate::ecosystems::{scan_repo_suggestions, EcosystemAdapter, LookupContext};
use crate::resolution::domain::{
    Ecosystem, PackageCoordinate, PackageMetadata, RepoLookupResult, RepoSuggestion,
};
use crate::resolution::policies::LicensePriority;
use crate::shared::{get_keypath_str, Result};
use serde_json::Value;
use tracing::debug;

/// Metadata key paths probed, in priority order, for a repository URL.
const REPO_KEY_PATHS: &[&str] = &[
    "info.project_urls.Source",
    "info.project_urls.Source Code",
    "info.project_urls.Code",
    "info.project_url",
    "info.homepage",
    "info.project_urls.Homepage",
];

/// Adapter for the Python package index.
///
/// Accepts purls (`pkg:pypi/requests@2.31.0`), registry web URLs
/// (`https://pypi.org/project/requests/`) and bare `name@version` /
/// `name==version` tokens; each shape is normalized into one or more
/// JSON metadata endpoints tried in order.
pub struct PypiAdapter;

impl PypiAdapter {
    pub fn new() -> Self {
        Self
    }

    /// Candidate metadata endpoints for an identifier, tried in order.
    fn metadata_urls(identifier: &str) -> Vec<String> {
        let identifier = identifier.trim().trim_end_matches('/');

        if identifier.starts_with("pkg:") {
            let Ok(coordinate) = PackageCoordinate::parse(identifier) else {
                return Vec::new();
            };
            return match coordinate.version() {
                Some(version) => vec![format!(
                    "https://pypi.org/pypi/{}/{}/json",
                    coordinate.name(),
                    version
                )],
                None => vec![format!("https://pypi.org/pypi/{}/json", coordinate.name())],
            };
        }

        if identifier.starts_with("http") {
            return vec![
                identifier.to_string(),
                format!("{}/json", identifier),
                format!("{}/json", identifier).replace("/project/", "/pypi/"),
            ];
        }

        // Bare token: name@version or pip-style name==version.
        let path = identifier.replace("==", "/").replace('@', "/");
        vec![format!("https://pypi.org/pypi/{}/json", path)]
    }

    fn parse_metadata(metadata_url: &str, body: &str) -> Option<PackageMetadata> {
        let data: Value = serde_json::from_str(body).ok()?;
        let info = data.get("info")?;

        let classifiers: Vec<String> = info
            .get("classifiers")
            .and_then(Value::as_array)
            .map(|list| {
                list.iter()
                    .filter_map(Value::as_str)
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        let declared = LicensePriority::declared_signals(
            info.get("license").and_then(Value::as_str),
            info.get("license_expression").and_then(Value::as_str),
            &classifiers,
            metadata_url,
        );

        let mut repo_suggestions = Vec::new();
        for key_path in REPO_KEY_PATHS {
            if let Some(repository) = get_keypath_str(&data, key_path) {
                repo_suggestions.push(RepoSuggestion::new(repository, metadata_url, *key_path));
            }
        }

        Some(PackageMetadata {
            name: get_keypath_str(&data, "info.name").map(String::from),
            version: get_keypath_str(&data, "info.version").map(String::from),
            homepage: get_keypath_str(&data, "info.home_page")
                .or_else(|| get_keypath_str(&data, "info.homepage"))
                .map(String::from),
            metadata_url: metadata_url.to_string(),
            declared,
            repo_suggestions,
        })
    }
}

impl Default for PypiAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EcosystemAdapter for PypiAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Pypi
    }

    fn coordinate_for(
        &self,
        identifier: &str,
        version: Option<&str>,
    ) -> Option<PackageCoordinate> {
        if identifier.starts_with("pkg:") {
            let coordinate = PackageCoordinate::parse(identifier).ok()?;
            return Some(coordinate);
        }
        if identifier.starts_with("http") {
            // https://pypi.org/project/<name>[/<version>] and the JSON
            // endpoint shape both carry name then optional version.
            let path = identifier.split("pypi.org/").nth(1)?;
            let segments: Vec<&str> = path
                .split('/')
                .filter(|s| !s.is_empty() && *s != "project" && *s != "pypi" && *s != "json")
                .collect();
            let name = segments.first()?.to_string();
            let parsed_version = segments.get(1).map(|v| v.to_string());
            return Some(PackageCoordinate::new(
                "pypi",
                None,
                name,
                parsed_version.or_else(|| version.map(String::from)),
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
            "pypi",
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
        for metadata_url in Self::metadata_urls(identifier) {
            let outcome = ctx.fetcher.fetch(&metadata_url);
            if !outcome.succeeded {
                continue;
            }
            let Some(body) = outcome.content.as_deref() else {
                continue;
            };
            if let Some(metadata) = Self::parse_metadata(&metadata_url, body) {
                debug!(url = %metadata_url, "pypi metadata found");
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
