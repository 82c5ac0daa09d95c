use crate::ecosystems::{EcosystemAdapter, LookupContext};
use crate::resolution::domain::{
    Ecosystem, PackageCoordinate, PackageMetadata, RepoLookupResult,
};
use crate::shared::Result;

/// Adapter for a direct license-file URL.
///
/// The identifier is already the location of the license text; the only
/// work is the raw-content rewrite and a single download-and-match
/// pass. No registry, no providers.
pub struct UrlAdapter;

impl UrlAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for UrlAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl EcosystemAdapter for UrlAdapter {
    fn ecosystem(&self) -> Ecosystem {
        Ecosystem::Url
    }

    fn coordinate_for(
        &self,
        _identifier: &str,
        _version: Option<&str>,
    ) -> Option<PackageCoordinate> {
        None
    }

    fn lookup_package(
        &self,
        _ctx: &LookupContext,
        _identifier: &str,
    ) -> Result<Option<PackageMetadata>> {
        Ok(None)
    }

    fn lookup_url_impl(
        &self,
        ctx: &LookupContext,
        identifier: &str,
        _package: Option<&PackageMetadata>,
    ) -> Result<Option<RepoLookupResult>> {
        // Caller-supplied URL: an unsupported host propagates as an
        // input error.
        let result = ctx.scanner().lookup_file_url(identifier)?;
        Ok(Some(result))
    }
}
