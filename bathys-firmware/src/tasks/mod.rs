//! Embassy async tasks
//!
//! Each task runs independently and communicates via channels.

pub mod actuator;
pub mod bobbing;
pub mod indicator;
pub mod mission;
pub mod network;
pub mod status_server;

pub use actuator::actuator_task;
pub use bobbing::bobbing_task;
pub use indicator::indicator_task;
pub use mission::mission_task;
pub use network::{cyw43_task, net_task, start_access_point};
pub use status_server::status_server_task;
