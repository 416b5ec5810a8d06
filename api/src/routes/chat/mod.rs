pub mod chat_no_history_route;
pub mod chat_request;
pub mod chat_response;
pub mod chat_with_history_route;
