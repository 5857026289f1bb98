pub mod auth;
pub mod client;
pub mod dashboard;
pub mod document;
pub mod post;
pub mod property;
pub mod sale;
pub mod social;
pub mod user;
