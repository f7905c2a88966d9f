// ABOUTME: Environment variable names, defaults and lookup helpers
// ABOUTME: Shared by the server and the terminal client

pub mod constants;
pub mod env;
