pub mod admin;
pub mod error_handling;
pub mod request_id;

pub use admin::admin_middleware;
pub use error_handling::*;
pub use request_id::{request_id_middleware, RequestId};
