// Domain layer: wire models and ports (interfaces) consumed by the profile form.

pub mod model;
pub mod ports;
