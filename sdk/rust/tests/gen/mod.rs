// Code generated by chainql. DO NOT EDIT.

mod build_arg;
mod client;
mod container;
mod container_id;
mod directory;
mod directory_id;
mod network_protocol;
mod platform;
mod port;
mod port_id;
mod return_type;

pub use build_arg::*;
pub use client::*;
pub use container::*;
pub use container_id::*;
pub use directory::*;
pub use directory_id::*;
pub use network_protocol::*;
pub use platform::*;
pub use port::*;
pub use port_id::*;
pub use return_type::*;
