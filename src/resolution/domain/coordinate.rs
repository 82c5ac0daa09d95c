use crate::shared::{LookupError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Package ecosystems this tool can resolve.
///
/// The set is closed on purpose: dispatch to an adapter is an exhaustive
/// `match`, so adding an ecosystem is a compile-time checked change rather
/// than a runtime lookup that can fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ecosystem {
    Pypi,
    Gem,
    Maven,
    Swift,
    GitRepo,
    Url,
}

impl Ecosystem {
    /// Maps a purl package type to an ecosystem.
    pub fn from_purl_type(purl_type: &str) -> Result<Self> {
        match purl_type {
            "pypi" => Ok(Ecosystem::Pypi),
            "gem" => Ok(Ecosystem::Gem),
            "maven" => Ok(Ecosystem::Maven),
            "swift" => Ok(Ecosystem::Swift),
            "github" | "gitlab" | "bitbucket" => Ok(Ecosystem::GitRepo),
            other => Err(LookupError::UnsupportedEcosystem {
                ecosystem: other.to_string(),
            }
            .into()),
        }
    }

    /// Maps a registry or code-host web URL to an ecosystem.
    ///
    /// A URL that carries an explicit file reference (a `/blob/` path or a
    /// raw-content host) is treated as a direct license-file URL rather
    /// than a repository to scan.
    pub fn detect_from_url(url: &str) -> Result<Self> {
        let host = url
            .strip_prefix("https://")
            .or_else(|| url.strip_prefix("http://"))
            .unwrap_or(url)
            .split('/')
            .next()
            .unwrap_or("");

        if host.ends_with("pypi.org") {
            return Ok(Ecosystem::Pypi);
        }
        if host.ends_with("rubygems.org") {
            return Ok(Ecosystem::Gem);
        }
        if host.ends_with("mvnrepository.com") || host.ends_with("maven.google.com") {
            return Ok(Ecosystem::Maven);
        }
        if host.ends_with("swiftpackageindex.com") {
            return Ok(Ecosystem::Swift);
        }
        if host.contains("github") || host.contains("gitlab") || host.contains("freedesktop") {
            if url.contains("/blob/") || host.starts_with("raw.") {
                return Ok(Ecosystem::Url);
            }
            return Ok(Ecosystem::GitRepo);
        }
        Err(LookupError::UnsupportedEcosystem {
            ecosystem: host.to_string(),
        }
        .into())
    }
}

impl fmt::Display for Ecosystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Ecosystem::Pypi => "pypi",
            Ecosystem::Gem => "gem",
            Ecosystem::Maven => "maven",
            Ecosystem::Swift => "swift",
            Ecosystem::GitRepo => "gitrepo",
            Ecosystem::Url => "url",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Ecosystem {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "pypi" => Ok(Ecosystem::Pypi),
            "gem" | "rubygems" => Ok(Ecosystem::Gem),
            "maven" => Ok(Ecosystem::Maven),
            "swift" => Ok(Ecosystem::Swift),
            "gitrepo" | "git" | "github" => Ok(Ecosystem::GitRepo),
            "url" => Ok(Ecosystem::Url),
            other => Err(LookupError::UnsupportedEcosystem {
                ecosystem: other.to_string(),
            }
            .into()),
        }
    }
}

/// PackageCoordinate value object: the normalized identity of one package
/// release, parsed from a purl-style string. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageCoordinate {
    purl_type: String,
    namespace: Option<String>,
    name: String,
    version: Option<String>,
    qualifiers: BTreeMap<String, String>,
}

impl PackageCoordinate {
    pub fn new(
        purl_type: impl Into<String>,
        namespace: Option<String>,
        name: impl Into<String>,
        version: Option<String>,
    ) -> Self {
        Self {
            purl_type: purl_type.into(),
            namespace,
            name: name.into(),
            version,
            qualifiers: BTreeMap::new(),
        }
    }

    /// Parses a `pkg:type/namespace/name@version?qualifiers` string.
    ///
    /// Subpaths (`#...`) are accepted and dropped; qualifiers are kept in
    /// sorted order. A missing type or name is an invalid coordinate.
    pub fn parse(purl: &str) -> Result<Self> {
        let invalid = |reason: &str| LookupError::InvalidCoordinate {
            coordinate: purl.to_string(),
            reason: reason.to_string(),
        };

        let rest = purl
            .strip_prefix("pkg:")
            .ok_or_else(|| invalid("missing pkg: scheme"))?;
        let rest = rest.trim_start_matches('/');

        let rest = rest.split('#').next().unwrap_or(rest);
        let (rest, qualifiers_part) = match rest.split_once('?') {
            Some((head, tail)) => (head, Some(tail)),
            None => (rest, None),
        };
        let (path, version) = match rest.rsplit_once('@') {
            Some((head, tail)) if !tail.is_empty() => (head, Some(tail.to_string())),
            Some((head, _)) => (head, None),
            None => (rest, None),
        };

        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        if segments.len() < 2 {
            return Err(invalid("expected at least a package type and a name").into());
        }
        let purl_type = segments.remove(0).to_lowercase();
        let name = urlencoding::decode(segments.pop().expect("segments checked above"))
            .map_err(|_| invalid("name is not valid percent-encoding"))?
            .into_owned();
        if name.is_empty() {
            return Err(invalid("empty package name").into());
        }
        let namespace = if segments.is_empty() {
            None
        } else {
            Some(
                segments
                    .iter()
                    .map(|s| {
                        urlencoding::decode(s)
                            .map(|c| c.into_owned())
                            .map_err(|_| invalid("namespace is not valid percent-encoding"))
                    })
                    .collect::<std::result::Result<Vec<_>, _>>()?
                    .join("/"),
            )
        };

        let mut qualifiers = BTreeMap::new();
        if let Some(part) = qualifiers_part {
            for pair in part.split('&').filter(|p| !p.is_empty()) {
                if let Some((key, value)) = pair.split_once('=') {
                    qualifiers.insert(key.to_lowercase(), value.to_string());
                }
            }
        }

        Ok(Self {
            purl_type,
            namespace,
            name,
            version,
            qualifiers,
        })
    }

    pub fn purl_type(&self) -> &str {
        &self.purl_type
    }

    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn qualifier(&self, key: &str) -> Option<&str> {
        self.qualifiers.get(key).map(String::as_str)
    }

    pub fn ecosystem(&self) -> Result<Ecosystem> {
        Ecosystem::from_purl_type(&self.purl_type)
    }

    /// Rebuilds the canonical purl string for this coordinate.
    pub fn to_purl(&self) -> String {
        let mut purl = format!("pkg:{}", self.purl_type);
        if let Some(ns) = &self.namespace {
            purl.push('/');
            purl.push_str(ns);
        }
        purl.push('/');
        purl.push_str(&self.name);
        if let Some(version) = &self.version {
            purl.push('@');
            purl.push_str(version);
        }
        purl
    }
}

impl fmt::Display for PackageCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_purl())
    }
}
