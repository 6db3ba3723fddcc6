pub mod context;
pub mod orchestrator;
pub mod report;
pub mod stage;
pub mod stages;

pub use context::PipelineContext;
pub use orchestrator::PipelineOrchestrator;
pub use report::{RunReport, StageReport};
pub use stage::Stage;
