pub mod context_request;
pub mod context_route;
