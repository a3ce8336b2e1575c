pub mod client;
pub mod error;
pub mod server;

pub use client::*;
pub use error::*;
pub use server::*;
