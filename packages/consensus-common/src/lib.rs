pub mod msg;
pub mod query;
pub mod types;
pub mod validator;
