// Domain layer: catalog model and ports. No I/O here.

pub mod model;
pub mod ports;
pub mod reference;
