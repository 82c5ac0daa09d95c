use crate::resolution::domain::{CandidateSource, CandidateUrl};
use crate::shared::{LookupError, Result};
use tracing::debug;

/// Branch names tried, in priority order, when a repository reference
/// carries no branch of its own.
pub const CONVENTIONAL_BRANCHES: &[&str] = &["main", "master", "develop"];

/// License filenames probed within each branch, in priority order.
pub const LICENSE_FILENAMES: &[&str] = &[
    "LICENSE",
    "LICENSE.txt",
    "LICENSE.md",
    "license.md",
    "COPYING",
    "COPYING.txt",
    "README.md",
    "LICENSE-MIT",
    "MIT-LICENSE",
];

/// Code hosts with a known raw-content rewrite rule.
///
/// Each host is one explicit rewrite rule from a human-facing blob/tree
/// URL to a raw-content URL. A host not in this table yields
/// `LookupError::UnsupportedHost`, never a guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CodeHost {
    GitHub,
    GitLab,
    /// cgit instances under freedesktop.org.
    Freedesktop,
}

impl CodeHost {
    /// Identifies the host of a repository or file URL.
    pub fn detect(url: &str) -> Result<Self> {
        if url.contains("github") {
            Ok(CodeHost::GitHub)
        } else if url.contains("gitlab") {
            Ok(CodeHost::GitLab)
        } else if url.contains("freedesktop") {
            Ok(CodeHost::Freedesktop)
        } else {
            Err(LookupError::UnsupportedHost {
                url: url.to_string(),
            }
            .into())
        }
    }

    /// True when the URL already pins a branch, tag or other ref.
    pub fn has_ref(self, url: &str) -> bool {
        match self {
            CodeHost::GitHub => url.contains("/blob/") || url.contains("/tree/"),
            CodeHost::GitLab => url.contains("/tree/") || url.contains("/blob/"),
            CodeHost::Freedesktop => url.contains("/tree/") && url.contains('?'),
        }
    }

    /// Rewrites a human-facing file URL to its raw-content form.
    ///
    /// Applying the rewrite to an already-raw URL is a no-op.
    pub fn raw_content_url(self, url: &str) -> String {
        match self {
            CodeHost::GitHub => {
                let mut raw = url.replace("github.com", "raw.githubusercontent.com");
                for branch in CONVENTIONAL_BRANCHES {
                    let tree = format!("/tree/{}/", branch);
                    if raw.contains(&tree) {
                        raw = raw.replace(&tree, &format!("/refs/heads/{}/", branch));
                    }
                }
                raw = raw.replace("/tree/", "/refs/tags/");
                raw.replace("/blob/", "/")
            }
            CodeHost::GitLab => url.replace("/blob/", "/raw/"),
            CodeHost::Freedesktop => url.replace("/tree/", "/plain/"),
        }
    }

    /// Builds the human-facing URL of `filename` under `repo_url`.
    ///
    /// With a branch, the host's blob/tree convention is used; without
    /// one the repository reference is assumed to already carry its ref
    /// (e.g. `.../tree/v1.2.0`) and the filename is appended.
    fn file_url(self, repo_url: &str, branch: Option<&str>, filename: &str) -> String {
        match (self, branch) {
            (CodeHost::GitHub, Some(branch)) | (CodeHost::GitLab, Some(branch)) => {
                format!("{}/blob/{}/{}", repo_url, branch, filename)
            }
            (CodeHost::Freedesktop, Some(branch)) => {
                format!("{}/{}?{}", repo_url, filename, branch)
            }
            (CodeHost::GitHub, None) => format!("{}/{}", repo_url, filename),
            // A ref-pinned gitlab reference uses /tree/<ref>; files under
            // it live at /blob/<ref>/<file>.
            (CodeHost::GitLab, None) => {
                format!("{}/{}", repo_url.replace("/tree/", "/blob/"), filename)
            }
            (CodeHost::Freedesktop, None) => {
                // <repo>/tree/?h=<ref> becomes <repo>/tree/<file>?h=<ref>
                match repo_url.split_once('?') {
                    Some((base, query)) => {
                        format!("{}/{}?{}", base.trim_end_matches('/'), filename, query)
                    }
                    None => format!("{}/{}", repo_url, filename),
                }
            }
        }
    }
}

/// Generates ranked candidate license-file URLs for a repository
/// reference.
///
/// Candidates come back in tiers, one tier per branch tried; the scanner
/// exhausts a tier before moving to the next, and never moves past a
/// tier that produced a signal.
#[derive(Debug, Default)]
pub struct CandidateGenerator;

impl CandidateGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Normalizes user input: strips trailing slashes and defaults the
    /// scheme to https.
    fn fix_url(url: &str) -> String {
        let url = url.trim().trim_end_matches('/');
        if url.starts_with("http://") || url.starts_with("https://") {
            url.to_string()
        } else {
            format!("https://{}", url)
        }
    }

    /// The raw-content form of a single already-known file URL.
    pub fn raw_content_url(&self, url: &str) -> Result<String> {
        let fixed = Self::fix_url(url);
        let host = CodeHost::detect(&fixed)?;
        Ok(host.raw_content_url(&fixed))
    }

    /// A single-candidate tier for a caller-supplied license-file URL.
    pub fn suggest_for_file_url(&self, url: &str) -> Result<Vec<Vec<CandidateUrl>>> {
        let raw = self.raw_content_url(url)?;
        let mut tier = vec![CandidateUrl::new(&raw, url, 0, CandidateSource::UserUrl)];
        Self::push_tag_retry(&mut tier, &raw, url, 0);
        Ok(vec![tier])
    }

    /// Ranked candidate tiers for a repository reference.
    ///
    /// A reference that already pins a ref yields exactly one tier for
    /// that ref; otherwise one tier per conventional branch (or per
    /// caller-supplied branch list) is produced.
    pub fn suggest_license_files(
        &self,
        repo_url: &str,
        branches: Option<&[String]>,
    ) -> Result<Vec<Vec<CandidateUrl>>> {
        let repo_url = Self::fix_url(repo_url);
        let host = CodeHost::detect(&repo_url)?;

        let mut tiers = Vec::new();
        if host.has_ref(&repo_url) {
            debug!(url = %repo_url, "reference already pins a ref, single candidate tier");
            tiers.push(self.tier_for_branch(host, &repo_url, None, 0));
        } else {
            let owned: Vec<String>;
            let branches: &[String] = match branches {
                Some(list) => list,
                None => {
                    owned = CONVENTIONAL_BRANCHES.iter().map(|b| b.to_string()).collect();
                    &owned
                }
            };
            for (rank, branch) in branches.iter().enumerate() {
                tiers.push(self.tier_for_branch(host, &repo_url, Some(branch), rank));
            }
        }
        Ok(tiers)
    }

    fn tier_for_branch(
        &self,
        host: CodeHost,
        repo_url: &str,
        branch: Option<&str>,
        rank: usize,
    ) -> Vec<CandidateUrl> {
        let mut tier = Vec::new();
        for filename in LICENSE_FILENAMES {
            let file_url = host.file_url(repo_url, branch, filename);
            let raw = host.raw_content_url(&file_url);
            tier.push(CandidateUrl::new(
                &raw,
                repo_url,
                rank,
                CandidateSource::BranchGuess,
            ));
            Self::push_tag_retry(&mut tier, &raw, repo_url, rank);
        }
        debug!(
            url = %repo_url,
            branch = branch.unwrap_or("<pinned>"),
            candidates = tier.len(),
            "generated candidate tier"
        );
        tier
    }

    /// Release tags are prefixed with `v` inconsistently across
    /// repositories; for every tag-based URL a second candidate with the
    /// prefix inserted is generated right after the base one.
    fn push_tag_retry(tier: &mut Vec<CandidateUrl>, raw_url: &str, original: &str, rank: usize) {
        const TAG_MARK: &str = "/refs/tags/";
        if let Some(pos) = raw_url.find(TAG_MARK) {
            let tag = &raw_url[pos + TAG_MARK.len()..];
            if tag.starts_with('v') {
                return;
            }
            let retry = raw_url.replacen(TAG_MARK, "/refs/tags/v", 1);
            tier.push(CandidateUrl::new(
                retry,
                original,
                rank,
                CandidateSource::TagRetry,
            ));
        }
    }
}
