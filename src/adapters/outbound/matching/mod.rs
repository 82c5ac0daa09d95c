mod alias_normalizer;
mod keyword_matcher;

pub use alias_normalizer::AliasNormalizer;
pub use keyword_matcher::KeywordTextMatcher;
