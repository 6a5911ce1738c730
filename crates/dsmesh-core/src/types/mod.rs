mod config;
mod external;
mod network;

pub use config::*;
pub use external::*;
pub use network::*;
