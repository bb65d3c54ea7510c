pub mod auth_client;
pub mod response;

pub use auth_client::LmsAuthClient;
