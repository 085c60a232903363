//! Plain-text dump of a planar [`Graph`].
//!
//! ```text
//! Node A 0 0
//! Node B 3 0
//! Segment AB A B
//! End
//! ```
//!
//! Segment costs are not stored; they are recomputed from node coordinates
//! on load.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use tracing::{debug, warn};

use crate::airspace::text_lines;
use crate::error::{Error, Result};
use crate::network::{Graph, Node};

const END_MARKER: &str = "End";

/// Write every node, then every segment, then the end marker.
///
/// Names are single whitespace-free tokens in the dump. A graph holding any
/// other name is rejected before anything is written.
pub fn save_graph<W: Write>(graph: &Graph, mut writer: W) -> Result<()> {
    let names = graph
        .nodes()
        .iter()
        .map(|node| &node.name)
        .chain(graph.segments().iter().map(|segment| &segment.name));
    for name in names {
        if !is_dump_token(name) {
            return Err(Error::UnwritableName { name: name.clone() });
        }
    }

    for node in graph.nodes() {
        writeln!(
            writer,
            "Node {} {} {}",
            node.name, node.position.x, node.position.y
        )?;
    }
    for segment in graph.segments() {
        writeln!(
            writer,
            "Segment {} {} {}",
            segment.name, segment.origin, segment.destination
        )?;
    }
    writeln!(writer, "{END_MARKER}")?;
    writer.flush()?;
    Ok(())
}

fn is_dump_token(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(char::is_whitespace)
}

pub fn save_graph_to_path(graph: &Graph, path: &Path) -> Result<()> {
    let file = File::create(path).map_err(|source| data_file_error(path, source))?;
    save_graph(graph, BufWriter::new(file)).map_err(|err| with_path(err, path))?;
    debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        segments = graph.segment_count(),
        "saved graph"
    );
    Ok(())
}

/// Read a dump produced by [`save_graph`].
///
/// Only lines of exactly four tokens are considered. Anything else, including
/// nodes with unparseable coordinates, duplicate nodes and segments naming
/// unknown nodes or bytes that are not UTF-8, is skipped. Reading stops at
/// `End`.
pub fn load_graph<R: BufRead>(reader: R) -> Result<Graph> {
    let mut graph = Graph::default();
    let mut skipped = 0usize;

    for line in text_lines(reader) {
        let Some(line) = line? else {
            skipped += 1;
            continue;
        };
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let applied = match tokens.as_slice() {
            [marker] if *marker == END_MARKER => break,
            [] => continue,
            ["Node", name, x, y] => match (x.parse::<f64>(), y.parse::<f64>()) {
                (Ok(x), Ok(y)) => graph.add_node(Node::planar(*name, x, y)).is_ok(),
                _ => false,
            },
            ["Segment", name, origin, destination] => graph
                .add_named_segment(*name, &origin.to_string(), &destination.to_string())
                .map(|outcome| outcome.is_inserted())
                .unwrap_or(false),
            _ => false,
        };
        if !applied {
            skipped += 1;
        }
    }

    if skipped > 0 {
        warn!(skipped, "skipped graph dump lines");
    }
    Ok(graph)
}

pub fn load_graph_from_path(path: &Path) -> Result<Graph> {
    let file = File::open(path).map_err(|source| data_file_error(path, source))?;
    let graph = load_graph(BufReader::new(file)).map_err(|err| with_path(err, path))?;
    debug!(
        path = %path.display(),
        nodes = graph.node_count(),
        segments = graph.segment_count(),
        "loaded graph"
    );
    Ok(graph)
}

fn data_file_error(path: &Path, source: std::io::Error) -> Error {
    Error::DataFile {
        path: path.to_path_buf(),
        source,
    }
}

fn with_path(err: Error, path: &Path) -> Error {
    match err {
        Error::Io(source) => data_file_error(path, source),
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn writes_nodes_then_segments_then_end() {
        let mut graph = Graph::default();
        graph.add_node(Node::planar("A", 0.0, 0.0)).unwrap();
        graph.add_node(Node::planar("B", 3.0, 4.5)).unwrap();
        graph
            .add_named_segment("AB", &"A".to_string(), &"B".to_string())
            .unwrap();

        let mut buffer = Vec::new();
        save_graph(&graph, &mut buffer).unwrap();
        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "Node A 0 0\nNode B 3 4.5\nSegment AB A B\nEnd\n"
        );
    }

    #[test]
    fn names_with_whitespace_are_rejected_before_writing() {
        let mut graph = Graph::default();
        graph.add_node(Node::planar("A", 0.0, 0.0)).unwrap();
        graph.add_node(Node::planar("New York", 3.0, 4.0)).unwrap();

        let mut buffer = Vec::new();
        let err = save_graph(&graph, &mut buffer).unwrap_err();
        assert!(matches!(err, Error::UnwritableName { ref name } if name == "New York"));
        assert!(buffer.is_empty());
    }

    #[test]
    fn segment_names_are_checked_too() {
        let mut graph = Graph::default();
        graph.add_node(Node::planar("A", 0.0, 0.0)).unwrap();
        graph.add_node(Node::planar("B", 3.0, 4.0)).unwrap();
        graph
            .add_named_segment("A to B", &"A".to_string(), &"B".to_string())
            .unwrap();

        let mut buffer = Vec::new();
        assert!(matches!(
            save_graph(&graph, &mut buffer),
            Err(Error::UnwritableName { .. })
        ));
    }

    #[test]
    fn invalid_utf8_line_is_skipped() {
        let bytes: &[u8] = b"Node A 0 0\nNode \xffB 1 1\nNode C 3 4\nSegment AC A C\nEnd\n";
        let graph = load_graph(Cursor::new(bytes)).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_cost(&"A".to_string(), &"C".to_string()), Some(5.0));
    }

    #[test]
    fn load_skips_odd_lines_and_stops_at_end() {
        let text = "Node A 0 0\n\
                    Node B 3 4 extra\n\
                    Node B 3 4\n\
                    Node C x 1\n\
                    Segment AB A B\n\
                    Segment AZ A Z\n\
                    comment line\n\
                    End\n\
                    Node D 9 9\n";
        let graph = load_graph(Cursor::new(text)).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.segment_count(), 1);
        assert_eq!(graph.edge_cost(&"A".to_string(), &"B".to_string()), Some(5.0));
        assert!(!graph.contains(&"D".to_string()));
    }

    #[test]
    fn missing_dump_reports_path() {
        let err = load_graph_from_path(Path::new("/definitely/missing/graph.txt")).unwrap_err();
        assert!(matches!(err, Error::DataFile { .. }));
    }
}
