use std::{error::Error, fmt};

/// The crate's result type.
pub type Result<T> = std::result::Result<T, FileErr>;

/// Failures raised while decoding a network file.
///
/// Every variant aborts the decode that produced it; the caller never sees a
/// partially populated record.
#[derive(Debug)]
pub enum FileErr {
    /// The line carries no parenthesized argument section.
    NotARecordLine,
    /// The verb token is not part of the record grammar.
    UnknownKeyword { verb: String },
    /// A field terminator was missing or a field failed to parse.
    LineDecodeFailed { clause: &'static str },
    /// A modifier pair carried no `:` separator.
    KeyValueFormat,
    /// A layer code outside {0, 1, 2}.
    TooManyLayers { layer: usize },
    /// A `link` clause addressed the output layer; weights are owned by the
    /// source layer.
    LinkOnOutputLayer,
    /// A `node` clause addressed the input layer; input nodes carry no bias.
    InputNodeBias,
    /// The bias node modifier applies to the input layer only.
    BiasNodeOnInvalidLayer { layer: usize },
    /// A `layerModifier` key the decoder does not recognize.
    UnknownModifier { key: String },
    /// A clause needed dimensions before any `networkTopology` line fixed them.
    MissingTopology { clause: &'static str },
    /// A node index outside the dimensions fixed by the topology.
    NodeOutOfRange { layer: usize, node: usize },
}

impl fmt::Display for FileErr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileErr::NotARecordLine => write!(f, "not a valid record line"),
            FileErr::UnknownKeyword { verb } => write!(f, "unknown keyword: {verb}"),
            FileErr::LineDecodeFailed { clause } => {
                write!(f, "line decode failed in {clause} clause")
            }
            FileErr::KeyValueFormat => write!(f, "key:value format error"),
            FileErr::TooManyLayers { layer } => {
                write!(f, "too many layers: layer {layer} does not exist")
            }
            FileErr::LinkOnOutputLayer => {
                write!(f, "links cannot be owned by the output layer")
            }
            FileErr::InputNodeBias => write!(f, "input nodes have no bias"),
            FileErr::BiasNodeOnInvalidLayer { layer } => {
                write!(f, "bias node modifier is not valid on layer {layer}")
            }
            FileErr::UnknownModifier { key } => write!(f, "unknown layer modifier: {key}"),
            FileErr::MissingTopology { clause } => {
                write!(f, "{clause} requires a decoded networkTopology")
            }
            FileErr::NodeOutOfRange { layer, node } => {
                write!(f, "node {node} is out of range for layer {layer}")
            }
        }
    }
}

impl Error for FileErr {}
