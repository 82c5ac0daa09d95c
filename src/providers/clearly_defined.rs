use crate::ports::outbound::ContentFetcher;
use crate::providers::{clearly_defined_coordinate, LicenseProvider};
use crate::resolution::domain::{PackageCoordinate, ProviderAnswer};
use crate::shared::get_keypath;
use serde_json::Value;
use tracing::debug;

const LICENSE_EXPRESSION_PATH: &str = "licensed.facets.core.discovered.expressions";

/// ClearlyDefined license-metadata provider.
///
/// Queries `api.clearlydefined.io` by coordinate and reads the
/// discovered license expressions, sorted and joined with ` AND `.
pub struct ClearlyDefined;

impl ClearlyDefined {
    fn definition_url(coordinate_path: &str) -> String {
        format!("https://api.clearlydefined.io/definitions/{}", coordinate_path)
    }

    fn extract_license(body: &str) -> Option<String> {
        let data: Value = serde_json::from_str(body).ok()?;
        let expressions = get_keypath(&data, LICENSE_EXPRESSION_PATH)?.as_array()?;
        let mut licenses: Vec<String> = expressions
            .iter()
            .filter_map(Value::as_str)
            .map(String::from)
            .collect();
        if licenses.is_empty() {
            return None;
        }
        licenses.sort();
        Some(licenses.join(" AND "))
    }
}

impl LicenseProvider for ClearlyDefined {
    fn name(&self) -> &'static str {
        "https://clearlydefined.io/"
    }

    fn lookup(
        &self,
        fetcher: &dyn ContentFetcher,
        coordinate: &PackageCoordinate,
    ) -> ProviderAnswer {
        let Some(coordinate_path) = clearly_defined_coordinate(fetcher, coordinate) else {
            return ProviderAnswer::no_answer(
                self.name(),
                Some(format!(
                    "No ClearlyDefined mapping for package type \"{}\"",
                    coordinate.purl_type()
                )),
            );
        };
        let url = Self::definition_url(&coordinate_path);
        debug!(%url, "clearlydefined lookup");

        let outcome = fetcher.fetch(&url);
        if !outcome.succeeded {
            return ProviderAnswer {
                provider: self.name().to_string(),
                license: None,
                data_url: Some(url),
                data_path: Some(LICENSE_EXPRESSION_PATH.to_string()),
                error: Some(format!(
                    "Could not download definition (status {:?})",
                    outcome.status
                )),
            };
        }

        let license = outcome.content.as_deref().and_then(Self::extract_license);
        let error = if license.is_none() {
            Some(format!(
                "No data at \"{}\" in ClearlyDefined response",
                LICENSE_EXPRESSION_PATH
            ))
        } else {
            None
        };
        ProviderAnswer {
            provider: self.name().to_string(),
            license,
            data_url: Some(url),
            data_path: Some(LICENSE_EXPRESSION_PATH.to_string()),
            error,
        }
    }
}
