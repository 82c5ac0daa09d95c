use crate::ecosystems::{scan_repo_suggestions, EcosystemAdapter, LookupContext};
use crate::resolution::domain::{
    Ecosystem, LicenseSignal, PackageCoordinate, PackageMetadata, RepoLookupResult,
    RepoSuggestion, SignalOrigin,
};
use crate::shared::Result;
use serde::Deserialize;
use tracing::{debug, warn};

const VALID_NAMESPACES: &[&str] = &["mavencentral", "mavengoogle", "gradleplugin"];
const GOOGLE_TERMS: &[&str] = &["androidx", "com.android", "mavengoogle"];

/// The POM slice this adapter cares about.
#[derive(Debug, Deserialize)]
struct PomProject {
    name: Option<String>,
    version: Option<String>,
    url: Option<String>,
    licenses: Option<PomLicenses>,
    scm: Option<PomScm>,
}

#[derive(Debug, Deserialize)]
struct PomLicenses {
    #[serde(rename = "license", default)]
    entries: Vec<PomLicense>,
}

#[derive(Debug, Deserialize)]
struct PomLicense {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PomScm {
    url: Option<String>,
}

/// Adapter for Maven repositories (Maven Central and Google's Android
/// repository).
///
/// The purl namespace carries the hosting repository
/// (`mavencentral/org.slf4j`); Android artifacts resolve against
/// `maven.google.com` instead. Metadata comes from the release POM,
/// parsed with quick-xml; the declared `<licenses>` block and the
/// `<scm><url>` repository suggestion are extracted.
pub struct MavenAdapter;

impl MavenAdapter {
    pub fn new() -> Self {
        Self
    }

    fn is_google(identifier: &str) -> bool {
        GOOGLE_TERMS.iter().any(|t| identifier.contains(t))
    }

    /// The POM URL for a maven purl, or `None` when the purl cannot be
    /// mapped (missing version, unknown repository namespace).
    fn purl_to_pom_url(purl: &str) -> Option<String> {
        let coordinate = PackageCoordinate::parse(purl).ok()?;
        let namespace = coordinate.namespace().unwrap_or_default();
        let name = coordinate.name();
        let version = coordinate.version()?;

        if !VALID_NAMESPACES.iter().any(|ns| namespace.contains(ns))
            && !Self::is_google(purl)
        {
            warn!(
                purl,
                namespace, "maven namespace carries no known repository, assuming central"
            );
        }

        if Self::is_google(purl) {
            let path = namespace.replace('.', "/");
            return Some(format!(
                "https://maven.google.com/{}/{}/{}/{}-{}.pom",
                path, name, version, name, version
            ));
        }
        let path = namespace.replace('.', "/").replace("mavencentral/", "");
        Some(format!(
            "https://repo1.maven.org/maven2/{}/{}/{}/{}-{}.pom",
            path, name, version, name, version
        ))
    }

    /// Converts an mvnrepository.com artifact URL into a maven purl.
    fn web_url_to_purl(url: &str) -> Option<String> {
        let rest = url
            .trim_end_matches('/')
            .split("mvnrepository.com/artifact/")
            .nth(1)?;
        let segments: Vec<&str> = rest.split('/').collect();
        if segments.len() < 2 {
            return None;
        }
        let (version, names) = match segments.len() {
            2 => (None, segments.join("/")),
            _ => (
                Some(*segments.last().expect("length checked above")),
                segments[..segments.len() - 1].join("/"),
            ),
        };
        Some(match version {
            Some(version) => format!("pkg:maven/mavencentral/{}@{}", names, version),
            None => format!("pkg:maven/mavencentral/{}", names),
        })
    }

    fn identifier_to_pom_url(identifier: &str) -> Option<String> {
        if identifier.starts_with("pkg:") {
            return Self::purl_to_pom_url(identifier);
        }
        if identifier.starts_with("http") {
            return Self::web_url_to_purl(identifier)
                .and_then(|purl| Self::purl_to_pom_url(&purl));
        }
        None
    }

    fn parse_pom(pom_url: &str, body: &str) -> Option<PackageMetadata> {
        let project: PomProject = match quick_xml::de::from_str(body) {
            Ok(project) => project,
            Err(e) => {
                debug!(url = pom_url, error = %e, "unparseable POM");
                return None;
            }
        };

        let declared: Vec<LicenseSignal> = project
            .licenses
            .iter()
            .flat_map(|l| &l.entries)
            .filter_map(|entry| entry.name.as_deref())
            .map(|name| LicenseSignal::new(SignalOrigin::PackageMetadata, name, pom_url))
            .collect();

        let mut repo_suggestions = Vec::new();
        if let Some(scm_url) = project.scm.as_ref().and_then(|scm| scm.url.as_deref()) {
            repo_suggestions.push(RepoSuggestion::new(scm_url, pom_url, "scm.url"));
        }

        Some(PackageMetadata {
            name: project.name,
            version: project.version,
            homepage: project.url,
            metadata_url: pom_url.to_string(),
            declared,
            repo_suggestions,
        })
    }
}

impl Default for MavenAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EcosystemAdapter for MavenAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Maven
    }

    fn coordinate_for(
        &self,
        identifier: &str,
        version: Option<&str>,
    ) -> Option<PackageCoordinate> {
        let purl = if identifier.starts_with("pkg:") {
            identifier.to_string()
        } else {
            Self::web_url_to_purl(identifier)?
        };
        let coordinate = PackageCoordinate::parse(&purl).ok()?;
        if coordinate.version().is_none() {
            if let Some(version) = version {
                return Some(PackageCoordinate::new(
                    coordinate.purl_type(),
                    coordinate.namespace().map(String::from),
                    coordinate.name(),
                    Some(version.to_string()),
                ));
            }
        }
        Some(coordinate)
    }

    fn lookup_package(
        &self,
        ctx: &LookupContext,
        identifier: &str,
    ) -> Result<Option<PackageMetadata>> {
        let Some(pom_url) = Self::identifier_to_pom_url(identifier) else {
            return Ok(None);
        };
        let outcome = ctx.fetcher.fetch(&pom_url);
        if !outcome.succeeded {
            return Ok(None);
        }
        let Some(body) = outcome.content.as_deref() else {
            return Ok(None);
        };
        Ok(Self::parse_pom(&pom_url, body))
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
