pub mod cmd;
pub mod conf;
pub mod db;
pub mod errors;
pub mod generate;
pub mod naming;
pub mod render;
pub mod scaffold;

pub use errors::{ExtractionKind, GenError, GenResult};
