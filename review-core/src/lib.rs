pub mod dashboard;
pub mod fetch;
pub mod model;
pub mod render;
pub mod source;
pub mod summary;
pub mod table;
pub mod time;
pub mod viewer;
