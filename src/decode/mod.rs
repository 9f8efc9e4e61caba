pub mod insert;
pub mod path;
pub mod validation;

use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::tree::Tree;
use crate::{ConvertOptions, Error, MalformedIndex, Result};

use self::insert::insert_path;
use self::path::tokenize;

pub fn from_str(input: &str, options: &ConvertOptions) -> Result<Tree> {
    check_delimiter(&options.delimiter)?;
    validation::validate_lines(input, options)?;

    tracing::debug!(
        bytes = input.len(),
        delimiter = %options.delimiter,
        "converting key-value text"
    );

    let mut tree = Tree::new();
    for (idx, line) in input.split(options.line_separator.as_str()).enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // validation guarantees exactly one '='
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };

        let path = match tokenize(key, &options.delimiter, options.malformed_index) {
            Ok(path) => path,
            Err(malformed) if options.malformed_index == MalformedIndex::Skip => {
                tracing::debug!(line = idx + 1, segment = malformed.raw, "skipping entry");
                continue;
            }
            Err(malformed) => {
                return Err(Error::invalid_format(format!(
                    "malformed list index in segment `{}`",
                    malformed.raw
                ))
                .at_line(idx + 1));
            }
        };

        tracing::trace!(line = idx + 1, key, "inserting entry");
        insert_path(tree.root_mut(), &path, value.to_string(), options.max_index)
            .map_err(|err| err.at_line(idx + 1))?;
    }

    Ok(tree)
}

/// Convert raw bytes. Invalid UTF-8 is an invalid-format error, whichever
/// entry point the bytes came through.
pub fn from_slice(input: &[u8], options: &ConvertOptions) -> Result<Tree> {
    let text = std::str::from_utf8(input)
        .map_err(|err| Error::invalid_format(format!("invalid utf-8: {err}")))?;
    from_str(text, options)
}

pub fn from_reader<R: Read>(mut reader: R, options: &ConvertOptions) -> Result<Tree> {
    let mut buf = Vec::new();
    reader.read_to_end(&mut buf).map_err(Error::read)?;
    from_slice(&buf, options)
}

/// Read `path` (relative paths resolve against the working directory) and
/// convert its contents. The file is closed before parsing starts.
pub fn from_file(path: impl AsRef<Path>, options: &ConvertOptions) -> Result<Tree> {
    let resolved = resolve(path.as_ref())?;
    tracing::debug!(path = %resolved.display(), "reading key-value file");
    let bytes = fs::read(&resolved).map_err(|err| Error::from_io(&resolved, err))?;
    from_slice(&bytes, options)
}

pub fn validate_str(input: &str, options: &ConvertOptions) -> Result<()> {
    check_delimiter(&options.delimiter)?;
    validation::validate_lines(input, options)
}

fn resolve(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir().map_err(|err| Error::from_io(path, err))?;
    Ok(cwd.join(path))
}

pub(crate) fn check_delimiter(delimiter: &str) -> Result<()> {
    if delimiter.is_empty() {
        return Err(Error::invalid_delimiter("path delimiter must not be empty"));
    }
    Ok(())
}
