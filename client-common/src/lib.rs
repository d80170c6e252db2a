pub mod config;
pub mod controller;
pub mod form;
pub mod rpc_client;
pub mod service;

pub use config::ModalConfig;
pub use controller::Controller;
pub use form::{Effect, Event, FormState};
pub use rpc_client::RpcClient;
pub use service::{PasswordService, perform};

pub use common::password::{PasswordRequirements, meets_requirements};
