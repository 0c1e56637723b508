// Domain layer: core models, string normalization rules, and ports (interfaces).

pub mod model;
pub mod normalize;
pub mod ports;
