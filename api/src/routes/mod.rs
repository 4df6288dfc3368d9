pub mod ask;
pub mod context;
pub mod history;
pub mod root_route;
