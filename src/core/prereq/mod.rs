//! Requisite expressions: parsing, sequence enumeration and path selection

pub mod node;
pub mod parser;
pub mod path;
pub mod sequences;

pub use node::PrereqNode;
pub use parser::{
    parse_requisites, tokenize, PrereqParser, PrereqSyntaxError, Token, DEFAULT_MAX_DEPTH,
};
pub use path::{select_path, PathCost, PathSelector, PrereqPath};
pub use sequences::{count_sequences, generate_sequences};
