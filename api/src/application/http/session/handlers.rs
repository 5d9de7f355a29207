pub mod create_session;
pub mod end_session;
pub mod get_session;
