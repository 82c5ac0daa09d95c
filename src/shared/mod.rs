pub mod error;
pub mod keypath;
pub mod result;

pub use error::{ExitCode, LookupError};
pub use keypath::{get_keypath, get_keypath_str};
pub use result::Result;
