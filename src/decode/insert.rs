use super::path::Segment;
use crate::tree::{List, Map, Node};
use crate::{Error, Result};

/// Place `value` at `path` below `root`.
///
/// Missing containers are created; an existing value of the wrong kind is
/// replaced (last write wins). Lists grow with holes up to the index.
pub fn insert_path(
    root: &mut Map,
    path: &[Segment<'_>],
    value: String,
    max_index: usize,
) -> Result<()> {
    let Some((last, parents)) = path.split_last() else {
        return Ok(());
    };

    let mut current = root;
    for segment in parents {
        current = match *segment {
            Segment::Name(name) => child_map(current, name),
            Segment::Indexed { name, index } => {
                let list = child_list(current, name);
                slot(list, index, max_index)?
                    .get_or_insert_with(|| Node::Map(Map::new()))
                    .coerce_map()
            }
        };
    }

    match *last {
        Segment::Name(name) => {
            current.insert(name.to_string(), Node::Leaf(value));
        }
        Segment::Indexed { name, index } => {
            let list = child_list(current, name);
            *slot(list, index, max_index)? = Some(Node::Leaf(value));
        }
    }
    Ok(())
}

fn child_map<'m>(map: &'m mut Map, name: &str) -> &'m mut Map {
    map.entry(name.to_string())
        .or_insert_with(|| Node::Map(Map::new()))
        .coerce_map()
}

fn child_list<'m>(map: &'m mut Map, name: &str) -> &'m mut List {
    map.entry(name.to_string())
        .or_insert_with(|| Node::List(List::new()))
        .coerce_list()
}

fn slot(list: &mut List, index: usize, max_index: usize) -> Result<&mut Option<Node>> {
    if index > max_index {
        return Err(Error::index_too_large(index, max_index));
    }
    let needed = index
        .checked_add(1)
        .ok_or_else(|| Error::index_too_large(index, max_index))?;
    if list.len() < needed {
        list.try_reserve(needed - list.len())
            .map_err(|_| Error::index_too_large(index, max_index))?;
        list.resize_with(needed, || None);
    }
    Ok(&mut list[index])
}
