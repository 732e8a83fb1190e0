use log::debug;

use crate::{
    FileErr, NetworkFile, NetworkTopology, Result,
    cursor::{Cursor, split_verb},
};

/// The closed set of record verbs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Verb {
    Link,
    Node,
    Name,
    Topology,
    Learning,
    LayerModifier,
    Comment,
    Version,
}

impl Verb {
    fn parse(token: &str) -> Result<Self> {
        Ok(match token {
            "link" => Verb::Link,
            "node" => Verb::Node,
            "name" => Verb::Name,
            "networkTopology" => Verb::Topology,
            "learning" => Verb::Learning,
            "layerModifier" => Verb::LayerModifier,
            "comment" => Verb::Comment,
            "version" => Verb::Version,
            other => {
                return Err(FileErr::UnknownKeyword {
                    verb: other.to_string(),
                });
            }
        })
    }
}

/// Decodes a network description from its text lines.
///
/// Lines of length 1 or less are separators and skipped. The first malformed
/// line aborts the whole decode; nothing decoded after it and no partial
/// record ever reach the caller.
///
/// # Arguments
/// * `lines` - The record's lines, without trailing newlines. The caller owns
///   the underlying source; the decoder only ever walks it once, in order.
///
/// # Returns
/// The completed record on success, the first decode failure otherwise.
pub fn decode<I, S>(lines: I) -> Result<NetworkFile>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut file = NetworkFile::new();

    for line in lines {
        let line = line.as_ref();
        if line.len() <= 1 {
            continue;
        }
        decode_line(&mut file, line)?;
    }

    Ok(file)
}

fn decode_line(file: &mut NetworkFile, line: &str) -> Result<()> {
    let (token, args) = split_verb(line)?;
    let verb = Verb::parse(token)?;
    debug!(verb = token; "decoding clause");

    match verb {
        Verb::Link => decode_link(file, args),
        Verb::Node => decode_node(file, args),
        Verb::Name => decode_name(file, args),
        Verb::Topology => decode_topology(file, args),
        Verb::Learning => decode_learning(file, args),
        Verb::LayerModifier => decode_layer_modifier(file, args),
        // Comments carry no data; the format version is parsed but not
        // checked against anything yet.
        Verb::Comment | Verb::Version => Ok(()),
    }
}

fn decode_link(file: &mut NetworkFile, args: &str) -> Result<()> {
    let mut cursor = Cursor::new(args, "link");
    let layer = cursor.next_uint(',')?;
    let source = cursor.next_uint(',')?;
    let dest = cursor.next_uint(',')?;
    let weight = cursor.next_float(')')?;

    debug!("link: layer={layer} source={source} dest={dest} weight={weight}");
    file.set_weight(layer, source, dest, weight)
}

fn decode_node(file: &mut NetworkFile, args: &str) -> Result<()> {
    let mut cursor = Cursor::new(args, "node");
    let layer = cursor.next_uint(',')?;
    let node = cursor.next_uint(',')?;
    let bias = cursor.next_float(')')?;

    debug!("node: layer={layer} node={node} bias={bias}");
    file.set_bias(layer, node, bias)
}

// The name runs up to the first comma, so a name containing one loses its
// tail to the version fields.
fn decode_name(file: &mut NetworkFile, args: &str) -> Result<()> {
    let mut cursor = Cursor::new(args, "name");
    let name = cursor.next_text(',')?;
    let major = cursor.next_uint(',')?;
    let minor = cursor.next_uint(',')?;
    let revision = cursor.next_uint(')')?;

    debug!("name: {name} major={major} minor={minor} revision={revision}");
    file.set_identity(name, major, minor, revision);
    Ok(())
}

fn decode_topology(file: &mut NetworkFile, args: &str) -> Result<()> {
    let mut cursor = Cursor::new(args, "networkTopology");
    let input_nodes = cursor.next_uint(',')?;
    let hidden_nodes = cursor.next_uint(',')?;
    let output_nodes = cursor.next_uint(')')?;

    debug!("networkTopology: input={input_nodes} hidden={hidden_nodes} output={output_nodes}");
    file.set_topology(NetworkTopology::new(input_nodes, hidden_nodes, output_nodes));
    Ok(())
}

fn decode_learning(file: &mut NetworkFile, args: &str) -> Result<()> {
    let mut cursor = Cursor::new(args, "learning");
    let learning_rate = cursor.next_float(',')?;
    let momentum = cursor.next_float(')')?;

    debug!("learning: rate={learning_rate} momentum={momentum}");
    file.set_learning(learning_rate, momentum);
    Ok(())
}

fn decode_layer_modifier(file: &mut NetworkFile, args: &str) -> Result<()> {
    let mut cursor = Cursor::new(args, "layerModifier");
    let layer = cursor.next_uint(',')?;

    let mut more = true;
    while more {
        let (key, value, rest) = cursor.next_key_value()?;
        more = rest;

        match key {
            "biasNode" => {
                let enabled = value == "true";
                debug!("layerModifier: layer={layer} biasNode={enabled}");
                file.set_input_bias_node(layer, enabled)?;
            }
            other => {
                return Err(FileErr::UnknownModifier {
                    key: other.to_string(),
                });
            }
        }
    }

    Ok(())
}
