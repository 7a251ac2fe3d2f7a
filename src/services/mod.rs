pub mod console;
pub mod dashboard;
pub mod feed;
pub mod matches;
pub mod server;
