pub mod dispatcher;
pub mod fallback;
pub mod prompt;
pub mod remote;

pub use dispatcher::{Dispatcher, Reply};
pub use fallback::FallbackResponder;
pub use remote::{CompletionBackend, RemoteCompletion, RemoteConfig, RemoteError};
