pub mod digitpad_env;
pub mod stub_server;
