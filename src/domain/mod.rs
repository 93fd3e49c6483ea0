// Domain layer: puzzle models and ports (interfaces). No I/O here.

pub mod document;
pub mod model;
pub mod ports;
