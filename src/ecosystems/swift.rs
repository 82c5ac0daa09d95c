use crate::ecosystems::{scan_repo_suggestions, EcosystemAdapter, LookupContext};
use crate::resolution::domain::{
    Ecosystem, PackageCoordinate, PackageMetadata, RepoLookupResult, RepoSuggestion,
};
use crate::shared::Result;
use serde_json::Value;
use std::sync::OnceLock;
use tracing::{debug, warn};

/// Repository list of every package indexed on swiftpackageindex.com.
/// Only github repositories are listed there.
const PACKAGE_INDEX_URL: &str =
    "https://github.com/SwiftPackageIndex/PackageList/raw/refs/heads/main/packages.json";

/// Versions that mean "no version" in swift purls.
const PLACEHOLDER_VERSIONS: &[&str] = &["latest", "unspecified"];

/// Adapter for Swift packages.
///
/// Swift has no central metadata registry; the Swift Package Index
/// repository list maps a package name to its github repository, and
/// the license is then read from the repository itself. The index is
/// downloaded once per process and memoized.
pub struct SwiftAdapter {
    index: OnceLock<Vec<String>>,
}

impl SwiftAdapter {
    pub fn new() -> Self {
        Self {
            index: OnceLock::new(),
        }
    }

    fn package_index(&self, ctx: &LookupContext) -> Option<&[String]> {
        if let Some(index) = self.index.get() {
            return Some(index);
        }
        let outcome = ctx.fetcher.fetch(PACKAGE_INDEX_URL);
        if !outcome.succeeded {
            return None;
        }
        let data: Value = serde_json::from_str(outcome.content.as_deref()?).ok()?;
        let repositories: Vec<String> = data
            .as_array()?
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect();
        let _ = self.index.set(repositories);
        self.index.get().map(Vec::as_slice)
    }

    /// The (search pattern, version) pair an identifier boils down to.
    fn search_terms(identifier: &str) -> Option<(String, Option<String>)> {
        if identifier.starts_with("pkg:") {
            let coordinate = PackageCoordinate::parse(identifier).ok()?;
            let pattern = match coordinate.namespace() {
                Some(namespace) => {
                    format!("https://github.com/{}/{}", namespace, coordinate.name())
                }
                None => format!("https://github.com/{}", coordinate.name()),
            };
            let version = coordinate
                .version()
                .filter(|v| !PLACEHOLDER_VERSIONS.contains(v))
                .map(String::from);
            return Some((pattern, version));
        }
        // A package name, optionally with @version.
        match identifier.split_once('@') {
            Some((name, version)) => Some((format!("/{}", name), Some(version.to_string()))),
            None => Some((identifier.to_string(), None)),
        }
    }

    /// Finds the indexed repository matching the identifier, pinned to
    /// the requested version when one is given.
    fn indexed_repository(&self, ctx: &LookupContext, identifier: &str) -> Option<String> {
        let (pattern, version) = Self::search_terms(identifier)?;
        let index = self.package_index(ctx)?;

        let matches: Vec<&String> = index.iter().filter(|repo| repo.contains(&pattern)).collect();
        match matches.len() {
            0 => {
                warn!(identifier, "no indexed repository matches");
                return None;
            }
            1 => {}
            n => warn!(identifier, matches = n, "more than one indexed repository matches"),
        }

        let repository = matches[0].trim_end_matches(".git").to_string();
        Some(match version {
            Some(version) => format!("{}/tree/{}", repository, version),
            None => repository,
        })
    }

    /// Composes the repository URL straight from purl parts when the
    /// index has no answer.
    fn guessed_repository(identifier: &str) -> Option<String> {
        if !identifier.starts_with("pkg:") {
            return Some(identifier.trim_end_matches('/').to_string());
        }
        let coordinate = PackageCoordinate::parse(identifier).ok()?;
        let namespace = coordinate.namespace()?;
        if !namespace.contains("github.com") {
            return None;
        }
        let base = format!("https://{}/{}", namespace, coordinate.name());
        Some(match coordinate.version() {
            Some(version) if !PLACEHOLDER_VERSIONS.contains(&version) => {
                format!("{}/tree/{}", base, version)
            }
            _ => base,
        })
    }
}

impl Default for SwiftAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EcosystemAdapter for SwiftAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Swift
    }

    fn coordinate_for(
        &self,
        identifier: &str,
        version: Option<&str>,
    ) -> Option<PackageCoordinate> {
        if identifier.starts_with("pkg:") {
            return PackageCoordinate::parse(identifier).ok();
        }
        let (name, token_version) = match identifier.split_once('@') {
            Some((name, version)) => (name, Some(version.to_string())),
            None => (identifier, None),
        };
        if name.is_empty() || name.starts_with("http") {
            return None;
        }
        Some(PackageCoordinate::new(
            "swift",
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
        let Some(repository) = self.indexed_repository(ctx, identifier) else {
            return Ok(None);
        };
        debug!(identifier, %repository, "swift package index match");
        Ok(Some(PackageMetadata {
            metadata_url: PACKAGE_INDEX_URL.to_string(),
            repo_suggestions: vec![RepoSuggestion::new(
                repository,
                PACKAGE_INDEX_URL,
                "packages[]",
            )],
            ..Default::default()
        }))
    }

    fn lookup_url_impl(
        &self,
        ctx: &LookupContext,
        identifier: &str,
        package: Option<&PackageMetadata>,
    ) -> Result<Option<RepoLookupResult>> {
        let repositories: Vec<String> = match package {
            Some(package) => package
                .unique_repositories()
                .into_iter()
                .map(String::from)
                .collect(),
            None => Self::guessed_repository(identifier).into_iter().collect(),
        };
        let borrowed: Vec<&str> = repositories.iter().map(String::as_str).collect();
        Ok(scan_repo_suggestions(ctx, identifier, &borrowed))
    }
}
