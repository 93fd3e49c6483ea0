// Application layer: pipelines wiring storage, config and the grid builders together.

pub mod pipelines;
