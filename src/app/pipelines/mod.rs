pub mod scatter_pipeline;
