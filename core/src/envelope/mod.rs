mod request;
mod response;

pub use request::TaskRequest;
pub use response::{is_success_status, LooseBool, TaskResponse};
