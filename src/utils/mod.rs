pub mod config;
pub mod helper_functions;
pub mod keypair;
