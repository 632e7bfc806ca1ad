pub mod codegen;
pub mod config;
pub mod converter;
pub mod errors;
pub mod ident;
pub mod models;
pub mod params;
pub mod parser;
pub mod resolver;

// Re-export key types at crate root for convenience.
pub use codegen::{generate, GeneratedCode, ToolWrapper};
pub use config::{CommandShape, CommandShapes, ConverterConfig, DedupPolicy};
pub use converter::{analyze, convert, convert_text, identify_pattern, Conversion};
pub use errors::{ConvertError, Result};
pub use models::{Metadata, Parameter, SkillPattern, ToolSpec};
pub use params::{extract_parameters, tokenize, Segment};
pub use parser::{
    extract_commands, extract_commands_tagged, find_skill_md, parse_metadata, scan, SkillDocument,
    Span,
};
pub use resolver::{resolve_tools, PatternKey};
