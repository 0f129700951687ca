pub mod document_builder;
pub mod extractor;
pub mod openai;
pub mod pipeline;
pub mod sanitize;
pub mod storage;
pub mod translator;

pub use extractor::{extract_text, extractor_for, ExtractionResult, TextExtractor};
pub use openai::OpenAiBackend;
pub use pipeline::{validate_upload, PipelineStage, TranslationPipeline};
pub use storage::{StagedFile, WorkDirs};
pub use translator::{
    ChatMessage, ChatRequest, TranslationBackend, TranslationClient, TranslationSettings,
};
