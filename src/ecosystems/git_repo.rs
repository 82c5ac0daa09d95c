use crate::ecosystems::{EcosystemAdapter, LookupContext};
use crate::resolution::domain::{
    Ecosystem, PackageCoordinate, PackageMetadata, RepoLookupResult,
};
use crate::shared::Result;
use tracing::debug;

/// Adapter for bare source repositories.
///
/// There is no registry to consult: the repository reference itself is
/// the whole input. Purls of type github compose the repository URL
/// from namespace and name, pinned to the version when one is given.
pub struct GitRepoAdapter;

impl GitRepoAdapter {
    pub fn new() -> Self {
        Self
    }

    /// The repository URL behind an identifier.
    fn repository_url(identifier: &str) -> String {
        if identifier.starts_with("pkg:") {
            if let Ok(coordinate) = PackageCoordinate::parse(identifier) {
                let base = format!(
                    "https://github.com/{}/{}",
                    coordinate.namespace().unwrap_or_default(),
                    coordinate.name()
                );
                return match coordinate.version() {
                    Some(version) => {
                        let prefix = coordinate.qualifier("version_prefix").unwrap_or_default();
                        format!("{}/tree/{}{}", base, prefix, version)
                    }
                    None => base,
                };
            }
        }
        identifier.to_string()
    }
}

impl Default for GitRepoAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EcosystemAdapter for GitRepoAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::GitRepo
    }

    fn coordinate_for(
        &self,
        identifier: &str,
        version: Option<&str>,
    ) -> Option<PackageCoordinate> {
        if identifier.starts_with("pkg:") {
            return PackageCoordinate::parse(identifier).ok();
        }
        // https://github.com/<owner>/<name>[/tree/<ref>]
        let rest = identifier
            .strip_prefix("https://")
            .or_else(|| identifier.strip_prefix("http://"))?;
        let mut segments = rest.split('/');
        let host = segments.next()?;
        if !host.ends_with("github.com") {
            return None;
        }
        let owner = segments.next()?.to_string();
        let name = segments.next()?.to_string();
        let parsed_version = match (segments.next(), segments.next()) {
            (Some("tree"), Some(reference)) => Some(reference.to_string()),
            _ => None,
        };
        Some(PackageCoordinate::new(
            "github",
            Some(owner),
            name,
            parsed_version.or_else(|| version.map(String::from)),
        ))
    }

    fn lookup_package(
        &self,
        _ctx: &LookupContext,
        identifier: &str,
    ) -> Result<Option<PackageMetadata>> {
        debug!(identifier, "git repositories have no registry metadata");
        Ok(None)
    }

    fn lookup_url_impl(
        &self,
        ctx: &LookupContext,
        identifier: &str,
        _package: Option<&PackageMetadata>,
    ) -> Result<Option<RepoLookupResult>> {
        let repository = Self::repository_url(identifier);
        // The reference is caller-supplied here, so an unsupported host
        // is a real input error and propagates.
        let result = ctx.scanner().lookup_url(&repository)?;
        Ok(Some(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repository_url_from_purl() {
        assert_eq!(
            GitRepoAdapter::repository_url("pkg:github/hesa/lookup-license"),
            "https://github.com/hesa/lookup-license"
        );
        assert_eq!(
            GitRepoAdapter::repository_url("pkg:github/hesa/lookup-license@0.1.13"),
            "https://github.com/hesa/lookup-license/tree/0.1.13"
        );
    }

    #[test]
    fn test_repository_url_honors_version_prefix_qualifier() {
        assert_eq!(
            GitRepoAdapter::repository_url("pkg:github/hesa/lookup-license@0.1.13?version_prefix=v"),
            "https://github.com/hesa/lookup-license/tree/v0.1.13"
        );
    }

    #[test]
    fn test_repository_url_passthrough() {
        assert_eq!(
            GitRepoAdapter::repository_url("https://gitlab.com/x/y"),
            "https://gitlab.com/x/y"
        );
    }

    #[test]
    fn test_coordinate_for_web_url() {
        let adapter = GitRepoAdapter::new();
        let coordinate = adapter
            .coordinate_for("https://github.com/hesa/lookup-license/tree/0.1.13", None)
            .unwrap();
        assert_eq!(coordinate.purl_type(), "github");
        assert_eq!(coordinate.namespace(), Some("hesa"));
        assert_eq!(coordinate.name(), "lookup-license");
        assert_eq!(coordinate.version(), Some("0.1.13"));
    }

    #[test]
    fn test_coordinate_for_non_github_host_is_none() {
        let adapter = GitRepoAdapter::new();
        assert!(adapter.coordinate_for("https://gitlab.com/x/y", None).is_none());
    }
}
