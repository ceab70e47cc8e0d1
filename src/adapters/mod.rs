//! Adapters — concrete implementations of the hexagonal port traits.
//!
//! | Adapter         | Implements     | Connects to                |
//! |-----------------|----------------|----------------------------|
//! | `static_config` | ConfigSource   | In-memory / JSON document  |
//! | `board_pins`    | PinResolver    | Built-in board pin map     |
//! | `sim_bus`       | BusProvisioner | Simulated bus driver       |
//! | `sim_timer`     | PollTimer      | Host-loop driven timer     |
//! | `log_sink`      | EventSink      | Serial log output          |

pub mod board_pins;
pub mod log_sink;
pub mod sim_bus;
pub mod sim_timer;
pub mod static_config;
