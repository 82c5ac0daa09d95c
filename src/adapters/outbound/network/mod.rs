mod github_tags;
mod http_fetcher;

pub use github_tags::{is_sha1, resolve_tag_commit};
pub use http_fetcher::HttpContentFetcher;
