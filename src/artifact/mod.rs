pub mod manifest;
pub mod path;
pub mod scanner;
pub mod writer;
