// Application layer: concrete pipelines wiring the core renderer to config and storage.

pub mod pipelines;
