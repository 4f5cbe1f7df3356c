//! Decoded JSON documents: the node type and the decoder front-end.

pub mod node;
pub mod parser;
