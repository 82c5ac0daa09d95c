use crate::adapters::outbound::network::{is_sha1, resolve_tag_commit};
use crate::ports::outbound::ContentFetcher;
use crate::resolution::domain::PackageCoordinate;
use tracing::debug;

/// Builds the ClearlyDefined coordinate string
/// `type/provider/namespace/name/revision` for a package coordinate.
///
/// Each package type maps to a (type, provider) pair in ClearlyDefined's
/// taxonomy; a type with no mapping returns `None` (the provider has no
/// answer for that ecosystem). Namespace defaults to `-`.
pub fn clearly_defined_coordinate(
    fetcher: &dyn ContentFetcher,
    coordinate: &PackageCoordinate,
) -> Option<String> {
    let mut namespace = coordinate
        .namespace()
        .map(String::from)
        .unwrap_or_else(|| "-".to_string());
    let name = coordinate.name().to_string();
    let mut revision = coordinate.version().map(String::from).unwrap_or_default();

    let (cd_type, cd_provider): (&str, String) = match coordinate.purl_type() {
        "pypi" => ("pypi", "pypi".into()),
        "gem" => ("gem", "rubygems".into()),
        "cargo" => ("crate", "cratesio".into()),
        "npm" => ("npm", "npmjs".into()),
        "nuget" => ("nuget", "nuget".into()),
        "cocoapods" => ("pod", "cocoapods".into()),
        "composer" => ("composer", "packagist".into()),
        "golang" => {
            // ClearlyDefined URL-encodes go namespaces and expects the
            // v-prefixed module version.
            namespace = namespace.replace('/', "%2f");
            if !revision.is_empty() && !revision.starts_with('v') {
                revision = format!("v{}", revision);
            }
            ("go", "golang".into())
        }
        "maven" => {
            let ns = coordinate.namespace().unwrap_or_default();
            if ns.contains("android") {
                ("maven", "mavengoogle".into())
            } else if coordinate.name().to_lowercase().contains("gradle") {
                ("maven", "gradleplugin".into())
            } else {
                ("maven", "mavencentral".into())
            }
        }
        host @ ("github" | "gitlab" | "bitbucket") => {
            // Git revisions are indexed by commit; translate a tag to
            // the commit it points at when possible.
            if host == "github" && !revision.is_empty() && !is_sha1(&revision) {
                if let Some(sha) = resolve_tag_commit(
                    fetcher,
                    coordinate.namespace().unwrap_or_default(),
                    coordinate.name(),
                    &revision,
                ) {
                    revision = sha;
                } else {
                    debug!(tag = %revision, "tag-to-commit resolution failed, keeping tag");
                }
            }
            ("git", host.to_string())
        }
        other => {
            debug!(purl_type = other, "no clearlydefined mapping");
            return None;
        }
    };

    Some(format!(
        "{}/{}/{}/{}/{}",
        cd_type, cd_provider, namespace, name, revision
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolution::domain::RetrievalOutcome;

    struct OfflineFetcher;

    impl ContentFetcher for OfflineFetcher {
        fn fetch(&self, url: &str) -> RetrievalOutcome {
            RetrievalOutcome::failure(url, None)
        }
    }

    fn coordinate(purl: &str) -> PackageCoordinate {
        PackageCoordinate::parse(purl).unwrap()
    }

    #[test]
    fn test_pypi_coordinate() {
        let cd = clearly_defined_coordinate(&OfflineFetcher, &coordinate("pkg:pypi/requests@2.31.0"));
        assert_eq!(cd.as_deref(), Some("pypi/pypi/-/requests/2.31.0"));
    }

    #[test]
    fn test_gem_coordinate() {
        let cd = clearly_defined_coordinate(&OfflineFetcher, &coordinate("pkg:gem/rails@7.1.0"));
        assert_eq!(cd.as_deref(), Some("gem/rubygems/-/rails/7.1.0"));
    }

    #[test]
    fn test_cargo_coordinate() {
        let cd = clearly_defined_coordinate(&OfflineFetcher, &coordinate("pkg:cargo/serde@1.0.0"));
        assert_eq!(cd.as_deref(), Some("crate/cratesio/-/serde/1.0.0"));
    }

    #[test]
    fn test_golang_coordinate_encodes_namespace_and_version() {
        let cd = clearly_defined_coordinate(
            &OfflineFetcher,
            &coordinate("pkg:golang/github.com/stretchr/testify@1.9.0"),
        );
        assert_eq!(
            cd.as_deref(),
            Some("go/golang/github.com%2fstretchr/testify/v1.9.0")
        );
    }

    #[test]
    fn test_maven_provider_selection() {
        let central = clearly_defined_coordinate(
            &OfflineFetcher,
            &coordinate("pkg:maven/org.slf4j/slf4j-api@2.0.9"),
        )
        .unwrap();
        assert!(central.starts_with("maven/mavencentral/"));

        let google = clearly_defined_coordinate(
            &OfflineFetcher,
            &coordinate("pkg:maven/androidx.core/core@1.12.0"),
        )
        .unwrap();
        assert!(google.starts_with("maven/mavengoogle/"));

        let gradle = clearly_defined_coordinate(
            &OfflineFetcher,
            &coordinate("pkg:maven/org.example/my-gradle-plugin@1.0"),
        )
        .unwrap();
        assert!(gradle.starts_with("maven/gradleplugin/"));
    }

    #[test]
    fn test_github_sha_revision_kept() {
        let sha = "0123456789abcdef0123456789abcdef01234567";
        let cd = clearly_defined_coordinate(
            &OfflineFetcher,
            &coordinate(&format!("pkg:github/hesa/lookup-license@{}", sha)),
        );
        assert_eq!(
            cd.unwrap(),
            format!("git/github/hesa/lookup-license/{}", sha)
        );
    }

    #[test]
    fn test_github_tag_kept_when_resolution_fails() {
        // Offline fetcher cannot resolve the tag; the tag itself is kept.
        let cd = clearly_defined_coordinate(
            &OfflineFetcher,
            &coordinate("pkg:github/hesa/lookup-license@1.2.0"),
        );
        assert_eq!(cd.as_deref(), Some("git/github/hesa/lookup-license/1.2.0"));
    }

    #[test]
    fn test_unmapped_type_yields_none() {
        let cd = clearly_defined_coordinate(&OfflineFetcher, &coordinate("pkg:cran/ggplot2@3.4.0"));
        assert!(cd.is_none());
    }
}
