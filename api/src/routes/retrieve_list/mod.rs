pub mod retrieve_list_request;
pub mod retrieve_list_response;
pub mod retrieve_list_route;
