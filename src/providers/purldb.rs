use crate::ports::outbound::ContentFetcher;
use crate::providers::{default_namespace, LicenseProvider};
use crate::resolution::domain::{PackageCoordinate, ProviderAnswer};
use serde_json::Value;
use tracing::debug;

const LICENSE_DETECTION_PATH: &str = "[0].license_detections[].license_expression_spdx";

/// PurlDB license-metadata provider.
///
/// Queries `public.purldb.io` by purl and reads the SPDX expressions of
/// all license detections, sorted and joined with ` AND `.
pub struct PurlDb;

impl PurlDb {
    fn collect_url(coordinate: &PackageCoordinate) -> String {
        let namespace = coordinate
            .namespace()
            .or_else(|| default_namespace(coordinate.purl_type()))
            .unwrap_or("-");
        let purl = match coordinate.version() {
            Some(version) => format!(
                "pkg:{}/{}/{}@{}",
                coordinate.purl_type(),
                namespace,
                coordinate.name(),
                version
            ),
            None => format!(
                "pkg:{}/{}/{}",
                coordinate.purl_type(),
                namespace,
                coordinate.name()
            ),
        };
        format!("https://public.purldb.io/api/collect/?purl={}", purl)
    }

    fn extract_license(body: &str) -> Option<String> {
        let data: Value = serde_json::from_str(body).ok()?;
        let detections = data.get(0)?.get("license_detections")?.as_array()?;
        let mut licenses: Vec<String> = detections
            .iter()
            .filter_map(|d| d.get("license_expression_spdx"))
            .filter_map(Value::as_str)
            .map(String::from)
            .collect();
        if licenses.is_empty() {
            return None;
        }
        licenses.sort();
        licenses.dedup();
        Some(licenses.join(" AND "))
    }
}

impl LicenseProvider for PurlDb {
    fn name(&self) -> &'static str {
        "https://public.purldb.io"
    }

    fn lookup(
        &self,
        fetcher: &dyn ContentFetcher,
        coordinate: &PackageCoordinate,
    ) -> ProviderAnswer {
        let url = Self::collect_url(coordinate);
        debug!(%url, "purldb lookup");

        let outcome = fetcher.fetch(&url);
        if !outcome.succeeded {
            return ProviderAnswer {
                provider: self.name().to_string(),
                license: None,
                data_url: Some(url),
                data_path: Some(LICENSE_DETECTION_PATH.to_string()),
                error: Some(format!(
                    "Could not download collection (status {:?})",
                    outcome.status
                )),
            };
        }

        let license = outcome.content.as_deref().and_then(Self::extract_license);
        let error = license
            .is_none()
            .then(|| "No license detections in PurlDB response".to_string());
        ProviderAnswer {
            provider: self.name().to_string(),
            license,
            data_url: Some(url),
            data_path: Some(LICENSE_DETECTION_PATH.to_string()),
            error,
        }
    }
}
