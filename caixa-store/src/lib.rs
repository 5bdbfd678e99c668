//! caixa-store: remote store client and the dashboard session built on it

pub mod error;
pub mod http;
pub mod session;
pub mod store;

pub use error::{SessionError, StoreError};
pub use http::HttpStore;
pub use session::{today_in, Session};
pub use store::RemoteStore;
