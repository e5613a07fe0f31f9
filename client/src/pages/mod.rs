//! One type per screen. Each holds its own transient copy of remote data and
//! turns remote failures into an `on_error` flag instead of returning them.

pub mod detail;
pub mod form;
pub mod list;
pub mod login;
pub mod me;
pub mod register;

pub const ERROR_MESSAGE: &str = "An error occurred";
