use crate::ports::outbound::{LicenseMatch, TextMatcher};
use crate::shared::Result;

/// Distinctive phrases per license. Every phrase must be lowercase; the
/// score of a match is the fraction of phrases found.
const FINGERPRINTS: &[(&str, &[&str])] = &[
    (
        "MIT",
        &[
            "permission is hereby granted, free of charge",
            "the software is provided \"as is\", without warranty of any kind",
        ],
    ),
    (
        "Apache-2.0",
        &[
            "apache license",
            "version 2.0, january 2004",
            "www.apache.org/licenses/",
        ],
    ),
    (
        "GPL-3.0-only",
        &[
            "gnu general public license",
            "version 3, 29 june 2007",
        ],
    ),
    (
        "GPL-2.0-only",
        &[
            "gnu general public license",
            "version 2, june 1991",
        ],
    ),
    (
        "LGPL-2.1-only",
        &[
            "gnu lesser general public license",
            "version 2.1, february 1999",
        ],
    ),
    (
        "BSD-3-Clause",
        &[
            "redistribution and use in source and binary forms",
            "neither the name of",
        ],
    ),
    (
        "BSD-2-Clause",
        &["redistribution and use in source and binary forms"],
    ),
    (
        "MPL-2.0",
        &["mozilla public license version 2.0"],
    ),
    (
        "ISC",
        &["permission to use, copy, modify, and/or distribute this software"],
    ),
    (
        "Unlicense",
        &["this is free and unencumbered software released into the public domain"],
    ),
    (
        "CC0-1.0",
        &["cc0 1.0 universal"],
    ),
];

/// KeywordTextMatcher adapter: a small phrase-fingerprint matcher.
///
/// Implements the TextMatcher port so the binary works end-to-end
/// without an external matching service. This is deliberately a
/// reference implementation at the adapter boundary; swap in a real
/// matcher (scancode-class) for production-grade identification.
pub struct KeywordTextMatcher;

impl KeywordTextMatcher {
    pub fn new() -> Self {
        Self
    }
}

impl Default for KeywordTextMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMatcher for KeywordTextMatcher {
    fn match_text(&self, text: &str) -> Result<Vec<LicenseMatch>> {
        let haystack = text.to_lowercase();
        let mut matches = Vec::new();

        for (identifier, phrases) in FINGERPRINTS {
            let found = phrases.iter().filter(|p| haystack.contains(**p)).count();
            if found == 0 {
                continue;
            }
            let score = found as f64 / phrases.len() as f64;
            // Single-phrase fingerprints are weaker evidence; only a
            // full match counts for them.
            if phrases.len() == 1 && found == 1 {
                matches.push(LicenseMatch {
                    expression: identifier.to_string(),
                    score: 0.9,
                });
            } else if found == phrases.len() {
                matches.push(LicenseMatch {
                    expression: identifier.to_string(),
                    score: 1.0,
                });
            } else {
                matches.push(LicenseMatch {
                    expression: identifier.to_string(),
                    score: score * 0.8,
                });
            }
        }

        // BSD-2-Clause is a strict subset of BSD-3-Clause's fingerprint;
        // prefer the more specific match when both fire fully.
        if matches
            .iter()
            .any(|m| m.expression == "BSD-3-Clause" && m.score >= 1.0)
        {
            matches.retain(|m| m.expression != "BSD-2-Clause");
        }

        matches.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(std::cmp::Ordering::Equal));
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_mit_text() {
        let matcher = KeywordTextMatcher::new();
        let text = "MIT License\n\nPermission is hereby granted, free of charge, to any \
                    person obtaining a copy...\nTHE SOFTWARE IS PROVIDED \"AS IS\", WITHOUT \
                    WARRANTY OF ANY KIND";
        let matches = matcher.match_text(text).unwrap();
        assert_eq!(matches[0].expression, "MIT");
        assert!(matches[0].score >= 0.9);
    }

    #[test]
    fn test_no_match_for_plain_prose() {
        let matcher = KeywordTextMatcher::new();
        let matches = matcher.match_text("A short project readme with no legal text.").unwrap();
        assert!(matches.is_empty());
    }

    #[test]
    fn test_bsd3_suppresses_bsd2() {
        let matcher = KeywordTextMatcher::new();
        let text = "Redistribution and use in source and binary forms, with or without \
                    modification, are permitted... Neither the name of the copyright holder...";
        let matches = matcher.match_text(text).unwrap();
        assert!(matches.iter().any(|m| m.expression == "BSD-3-Clause"));
        assert!(!matches.iter().any(|m| m.expression == "BSD-2-Clause"));
    }

    #[test]
    fn test_deterministic_for_identical_input() {
        let matcher = KeywordTextMatcher::new();
        let text = "Apache License\nVersion 2.0, January 2004\nhttp://www.apache.org/licenses/";
        let first = matcher.match_text(text).unwrap();
        let second = matcher.match_text(text).unwrap();
        assert_eq!(first, second);
    }
}
