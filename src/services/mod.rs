pub mod image_loader;
pub mod orchestrator;
pub mod processor;

pub use image_loader::{decode_png, load_png};
pub use orchestrator::PipelineOrchestrator;
pub use processor::{InlineProcessor, PatternProcessor, ProgressSender, WorkerProcessor};
