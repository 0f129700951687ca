pub mod document;
pub mod language;
pub mod request;
pub mod response;

pub use document::*;
pub use language::*;
pub use request::*;
pub use response::*;
