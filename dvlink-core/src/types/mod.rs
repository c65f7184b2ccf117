mod credentials;
mod operation;
mod request;
mod secret;
mod target;

pub use credentials::Credentials;
pub use operation::Operation;
pub use request::{ConnectorRequest, OperationRequest};
pub use secret::{AccessToken, SecretString};
pub use target::collection_for_target;
