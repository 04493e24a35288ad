pub mod auth;
pub mod checkout;
pub mod notify;
pub mod session;
pub mod store;
