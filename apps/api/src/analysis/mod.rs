// Screening core: resume parsing, requirement analysis, matching and interview planning.
// Pure and synchronous. Persistence and concurrency live in store/ and rescoring/.

pub mod interview;
pub mod matching;
pub mod pipeline;
pub mod questions;
pub mod requirements;
pub mod resume_parser;
pub mod tier;
