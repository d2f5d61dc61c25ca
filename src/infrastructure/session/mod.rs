pub mod middleware;
pub mod request_id;

pub use middleware::{session_middleware, SessionId, X_SESSION_ID};
pub use request_id::{request_id_middleware, X_REQUEST_ID};
