pub mod api;
pub mod consts;
pub mod password;
