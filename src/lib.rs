//! Tafsiri Document Translator
//!
//! Upload a PDF or DOCX, get back a DOCX translated into Kinyarwanda,
//! French, Swahili or Arabic by an OpenAI-compatible chat model.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;
pub mod state;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::create_router;
pub use state::AppState;
