pub mod error;
pub mod traits;

pub use error::ParleyError;
pub use traits::{
    CompletionProvider, CompletionRequest, CompletionResponse, GrammarChecker, GrammarIssue,
    Translator,
};
