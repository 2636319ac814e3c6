pub mod errors;
pub mod remote;
pub mod types;

pub use errors::{ConfigError, RemoteError, SbxError};
pub use remote::{OutputSink, RemotePty};
pub use types::{PtyHandle, SandboxId, TermSize};

pub type Result<T> = std::result::Result<T, SbxError>;
