pub mod responder;
pub mod retriever;


pub use responder::{AnswerService, Responder};
pub use retriever::Retriever;
