pub mod extract;
pub mod request_id;
pub mod requester;

pub use extract::{AppJson, AppPath};
pub use request_id::{make_span_with_request_id, request_id_middleware, RequestId};
pub use requester::Requester;
