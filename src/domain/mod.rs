// Domain layer: debate messages, records and the ports the core talks through.

pub mod model;
pub mod ports;
