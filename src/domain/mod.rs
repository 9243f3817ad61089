// Domain layer: records of the course service and the ports the dashboard depends on.

pub mod model;
pub mod ports;
