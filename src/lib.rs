pub mod decode;
pub mod encode;
pub mod error;
pub mod options;
pub mod tree;

use std::io::Read;
use std::path::Path;

use serde_json::Value;

pub use crate::error::{Error, ErrorKind, Location};
pub use crate::options::{ConvertOptions, EncodeOptions, LineSeparator, MalformedIndex};
pub use crate::tree::{List, Map, Node, NodeKind, Tree};

pub type Result<T> = std::result::Result<T, Error>;

pub fn convert_str(input: &str) -> Result<Tree> {
    convert_str_with_options(input, &ConvertOptions::default())
}

pub fn convert_str_with_options(input: &str, options: &ConvertOptions) -> Result<Tree> {
    decode::from_str(input, options)
}

pub fn convert_slice(input: &[u8]) -> Result<Tree> {
    convert_slice_with_options(input, &ConvertOptions::default())
}

pub fn convert_slice_with_options(input: &[u8], options: &ConvertOptions) -> Result<Tree> {
    decode::from_slice(input, options)
}

pub fn convert_reader<R: Read>(reader: R) -> Result<Tree> {
    convert_reader_with_options(reader, &ConvertOptions::default())
}

pub fn convert_reader_with_options<R: Read>(reader: R, options: &ConvertOptions) -> Result<Tree> {
    decode::from_reader(reader, options)
}

pub fn convert_file(path: impl AsRef<Path>) -> Result<Tree> {
    convert_file_with_options(path, &ConvertOptions::default())
}

pub fn convert_file_with_options(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<Tree> {
    decode::from_file(path, options)
}

pub fn convert_str_to_value(input: &str) -> Result<Value> {
    convert_str_to_value_with_options(input, &ConvertOptions::default())
}

pub fn convert_str_to_value_with_options(input: &str, options: &ConvertOptions) -> Result<Value> {
    decode::from_str(input, options).map(|tree| tree.to_value())
}

pub fn validate_str(input: &str) -> Result<()> {
    validate_str_with_options(input, &ConvertOptions::default())
}

pub fn validate_str_with_options(input: &str, options: &ConvertOptions) -> Result<()> {
    decode::validate_str(input, options)
}

pub fn to_string(tree: &Tree) -> Result<String> {
    to_string_with_options(tree, &EncodeOptions::default())
}

pub fn to_string_with_options(tree: &Tree, options: &EncodeOptions) -> Result<String> {
    encode::to_string(tree, options)
}
