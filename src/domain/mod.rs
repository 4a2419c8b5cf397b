// Domain layer: plot models and ports (interfaces). Rendering and IO live elsewhere.

pub mod model;
pub mod ports;
