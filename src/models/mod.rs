pub mod config;
pub mod request;
pub mod response;

pub use config::{AppConfig, DefaultsConfig, PaletteConfig, PipelineConfig, Strategy};
pub use request::{ConversionSettings, ProcessingRequest};
pub use response::{ProcessingResult, ProcessingStats, ProgressEvent};
