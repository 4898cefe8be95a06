//! Raw SocketCAN bus (Linux only)

mod adapter;

pub use adapter::SocketCanBus;
