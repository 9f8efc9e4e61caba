mod writer;

use crate::decode::check_delimiter;
use crate::tree::{List, Map, Node, Tree};
use crate::{EncodeOptions, Error, Result};

use self::writer::Writer;

/// Flatten a tree back into `key=value` lines.
///
/// Holes and empty containers produce no line. Fails when a key or value
/// cannot be written so that it reads back as the same path.
pub fn to_string(tree: &Tree, options: &EncodeOptions) -> Result<String> {
    check_delimiter(&options.delimiter)?;
    let mut writer = Writer::new(options);
    write_map(&mut writer, tree.root(), options)?;
    tracing::debug!(lines = writer.lines(), "encoded tree");
    Ok(writer.finish())
}

fn write_map(writer: &mut Writer<'_>, map: &Map, options: &EncodeOptions) -> Result<()> {
    for (key, node) in map {
        check_key(key, options)?;
        let mark = writer.mark();
        writer.push_name(key);
        match node {
            Node::Leaf(value) => {
                check_value(value)?;
                writer.write_entry(value);
            }
            Node::Map(child) => write_map(writer, child, options)?,
            Node::List(list) => write_list(writer, list, options)?,
        }
        writer.truncate_key(mark);
    }
    Ok(())
}

fn write_list(writer: &mut Writer<'_>, list: &List, options: &EncodeOptions) -> Result<()> {
    for (index, slot) in list.iter().enumerate() {
        let Some(node) = slot else {
            continue;
        };
        let mark = writer.mark();
        writer.push_index(index);
        match node {
            Node::Leaf(value) => {
                check_value(value)?;
                writer.write_entry(value);
            }
            Node::Map(child) => write_map(writer, child, options)?,
            Node::List(_) => {
                return Err(Error::encode(
                    "a list directly inside a list has no key-value form",
                ));
            }
        }
        writer.truncate_key(mark);
    }
    Ok(())
}

fn check_key(key: &str, options: &EncodeOptions) -> Result<()> {
    let reserved = key.contains(options.delimiter.as_str())
        || key.contains(['=', '[', ']', '\n', '\r']);
    if reserved {
        return Err(Error::encode(format!(
            "key `{key}` contains the delimiter or a reserved character"
        )));
    }
    Ok(())
}

fn check_value(value: &str) -> Result<()> {
    if value.contains(['=', '\n', '\r']) {
        return Err(Error::encode(format!(
            "value `{value}` contains '=' or a line break"
        )));
    }
    Ok(())
}
