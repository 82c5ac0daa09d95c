use crate::resolution::domain::{LicenseSignal, SignalOrigin};

/// LicensePriority policy for ordering declared-license metadata.
///
/// Registry metadata can carry a license in several places (a license
/// field, an SPDX expression field, classifier-style tags). This policy
/// encodes their precedence: an explicit license field is authoritative,
/// the expression field comes next, classifiers last. Declared fields as
/// a whole always outrank repository-scan results, which is why the
/// ordering is fixed here rather than left to map iteration order.
pub struct LicensePriority;

impl LicensePriority {
    /// Builds declared-license signals from registry metadata fields, in
    /// priority order. Empty and "UNKNOWN" fields are skipped.
    pub fn declared_signals(
        license: Option<&str>,
        license_expression: Option<&str>,
        classifiers: &[String],
        source_url: &str,
    ) -> Vec<LicenseSignal> {
        let mut signals = Vec::new();

        if let Some(license) = license.filter(|l| !l.is_empty() && *l != "UNKNOWN") {
            signals.push(LicenseSignal::new(
                SignalOrigin::PackageMetadata,
                license,
                source_url,
            ));
        }
        if let Some(expression) = license_expression.filter(|l| !l.is_empty()) {
            signals.push(LicenseSignal::new(
                SignalOrigin::PackageMetadata,
                expression,
                source_url,
            ));
        }
        for classifier in classifiers {
            if let Some(license) = Self::license_from_classifier(classifier) {
                signals.push(LicenseSignal::new(
                    SignalOrigin::PackageMetadata,
                    license,
                    source_url,
                ));
            }
        }

        signals
    }

    /// Selects the single most authoritative declared license.
    pub fn select_license(
        license: Option<&str>,
        license_expression: Option<&str>,
        classifiers: &[String],
    ) -> Option<String> {
        Self::declared_signals(license, license_expression, classifiers, "")
            .into_iter()
            .next()
            .map(|s| s.raw_license)
    }

    /// Extracts a license name from one classifier-style tag.
    ///
    /// Tags of the form `License :: OSI Approved :: MIT License` yield
    /// the trailing license name; other license-tagged classifiers are
    /// kept whole, matching how registries expose free-form tags.
    fn license_from_classifier(classifier: &str) -> Option<String> {
        if let Some(license) = classifier.strip_prefix("License :: OSI Approved :: ") {
            return Some(license.to_string());
        }
        if classifier.to_lowercase().contains("license") && classifier.contains("::") {
            return Some(classifier.to_string());
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_declared_signals_priority_order() {
        let classifiers = vec!["License :: OSI Approved :: BSD License".to_string()];
        let signals = LicensePriority::declared_signals(
            Some("MIT"),
            Some("MIT OR Apache-2.0"),
            &classifiers,
            "https://pypi.org/pypi/x/json",
        );
        let raw: Vec<&str> = signals.iter().map(|s| s.raw_license.as_str()).collect();
        assert_eq!(raw, vec!["MIT", "MIT OR Apache-2.0", "BSD License"]);
    }

    #[test]
    fn test_select_license_prefers_license_field() {
        let classifiers = vec!["License :: OSI Approved :: BSD License".to_string()];
        let selected =
            LicensePriority::select_license(Some("MIT"), Some("Apache-2.0"), &classifiers);
        assert_eq!(selected.as_deref(), Some("MIT"));
    }

    #[test]
    fn test_select_license_falls_back_to_expression() {
        let selected = LicensePriority::select_license(None, Some("Apache-2.0"), &[]);
        assert_eq!(selected.as_deref(), Some("Apache-2.0"));
    }

    #[test]
    fn test_select_license_falls_back_to_classifiers() {
        let classifiers = vec![
            "Programming Language :: Python :: 3".to_string(),
            "License :: OSI Approved :: MIT License".to_string(),
        ];
        let selected = LicensePriority::select_license(None, None, &classifiers);
        assert_eq!(selected.as_deref(), Some("MIT License"));
    }

    #[test]
    fn test_select_license_ignores_unknown_and_empty() {
        let selected = LicensePriority::select_license(Some("UNKNOWN"), Some("MIT"), &[]);
        assert_eq!(selected.as_deref(), Some("MIT"));
        let selected = LicensePriority::select_license(Some(""), Some("GPL-3.0-only"), &[]);
        assert_eq!(selected.as_deref(), Some("GPL-3.0-only"));
    }

    #[test]
    fn test_non_license_classifiers_ignored() {
        let classifiers = vec!["Development Status :: 5 - Production/Stable".to_string()];
        assert!(LicensePriority::select_license(None, None, &classifiers).is_none());
    }

    #[test]
    fn test_free_form_license_classifier_kept_whole() {
        let classifiers = vec!["License :: Free For Home Use".to_string()];
        let signals = LicensePriority::declared_signals(None, None, &classifiers, "u");
        assert_eq!(signals.len(), 1);
        assert_eq!(signals[0].raw_license, "License :: Free For Home Use");
    }
}
