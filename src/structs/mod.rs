pub mod question;
pub mod request;
pub mod respond;
pub mod types;
