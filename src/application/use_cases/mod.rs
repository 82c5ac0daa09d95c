mod resolve_license;

pub use resolve_license::ResolveLicenseUseCase;
