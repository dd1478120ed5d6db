pub mod pipeline;
pub mod provider;
pub mod server;

pub use pipeline::PipelineConfig;
pub use provider::ProviderConfig;
pub use server::ServerConfig;
