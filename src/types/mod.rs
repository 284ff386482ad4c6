// src/types/mod.rs
pub mod response;
pub mod results;
pub mod slot;

pub use results::{AnalysisResult, GenAiResult, SkillMatch};
pub use slot::{
    DocumentSlot, DocumentUpload, JobInput, JobInputState, JobSource, UploadSlot,
    UploadedDocument,
};
