use ndarray::{Array2, s};

use crate::{FileErr, NetworkTopology, Result};

/// A fully decoded network description.
///
/// Built up clause by clause during a decode and read-only afterwards: the
/// mutating operations are crate-private, the access surface is public. Both
/// weight matrices are indexed `[source_node][dest_node]` and owned by the
/// source layer, which is why layer 2 never owns links.
#[derive(Debug, Clone)]
pub struct NetworkFile {
    topology: Option<NetworkTopology>,

    input_weights: Array2<f32>,
    hidden_weights: Array2<f32>,
    hidden_biases: Vec<f32>,
    output_biases: Vec<f32>,

    name: String,
    major: usize,
    minor: usize,
    revision: usize,

    learning_rate: f32,
    momentum: f32,
}

impl NetworkFile {
    pub(crate) fn new() -> Self {
        Self {
            topology: None,
            input_weights: Array2::zeros((0, 0)),
            hidden_weights: Array2::zeros((0, 0)),
            hidden_biases: Vec::new(),
            output_biases: Vec::new(),
            name: String::new(),
            major: 0,
            minor: 0,
            revision: 0,
            learning_rate: 0.0,
            momentum: 0.0,
        }
    }

    /// Fixes the topology and dimensions every matrix and bias vector.
    ///
    /// A repeated `networkTopology` clause re-dimensions everything and drops
    /// previously decoded weights, exactly like a fresh record.
    pub(crate) fn set_topology(&mut self, topology: NetworkTopology) {
        self.input_weights = Array2::zeros((topology.input_nodes(), topology.hidden_nodes()));
        self.hidden_weights = Array2::zeros((topology.hidden_nodes(), topology.output_nodes()));
        self.hidden_biases = vec![0.0; topology.hidden_nodes()];
        self.output_biases = vec![0.0; topology.output_nodes()];
        self.topology = Some(topology);
    }

    pub(crate) fn set_identity(&mut self, name: &str, major: usize, minor: usize, revision: usize) {
        self.name = name.to_string();
        self.major = major;
        self.minor = minor;
        self.revision = revision;
    }

    pub(crate) fn set_learning(&mut self, learning_rate: f32, momentum: f32) {
        self.learning_rate = learning_rate;
        self.momentum = momentum;
    }

    /// Writes one link weight at `[source][dest]` of the given layer's matrix.
    ///
    /// Layer validity comes first: layer 2 never owns links and codes above 2
    /// name no layer, with or without a decoded topology.
    pub(crate) fn set_weight(
        &mut self,
        layer: usize,
        source: usize,
        dest: usize,
        weight: f32,
    ) -> Result<()> {
        match layer {
            0 | 1 => {}
            2 => return Err(FileErr::LinkOnOutputLayer),
            _ => return Err(FileErr::TooManyLayers { layer }),
        }

        if self.topology.is_none() {
            return Err(FileErr::MissingTopology { clause: "link" });
        }

        let matrix = if layer == 0 {
            &mut self.input_weights
        } else {
            &mut self.hidden_weights
        };

        if source >= matrix.nrows() {
            return Err(FileErr::NodeOutOfRange {
                layer,
                node: source,
            });
        }
        if dest >= matrix.ncols() {
            return Err(FileErr::NodeOutOfRange { layer, node: dest });
        }

        matrix[(source, dest)] = weight;
        Ok(())
    }

    /// Writes one node bias for the given layer.
    pub(crate) fn set_bias(&mut self, layer: usize, node: usize, bias: f32) -> Result<()> {
        match layer {
            1 | 2 => {}
            0 => return Err(FileErr::InputNodeBias),
            _ => return Err(FileErr::TooManyLayers { layer }),
        }

        if self.topology.is_none() {
            return Err(FileErr::MissingTopology { clause: "node" });
        }

        let biases = if layer == 1 {
            &mut self.hidden_biases
        } else {
            &mut self.output_biases
        };

        if node >= biases.len() {
            return Err(FileErr::NodeOutOfRange { layer, node });
        }

        biases[node] = bias;
        Ok(())
    }

    /// Applies the `biasNode` layer modifier.
    ///
    /// Enabling it grows the input→hidden matrix by one source row, keeping
    /// every weight decoded so far; disabling only clears the flag, the
    /// matrix is never shrunk back.
    pub(crate) fn set_input_bias_node(&mut self, layer: usize, enabled: bool) -> Result<()> {
        if layer != 0 {
            return Err(FileErr::BiasNodeOnInvalidLayer { layer });
        }

        let Some(topology) = self.topology.as_mut() else {
            return Err(FileErr::MissingTopology {
                clause: "layerModifier",
            });
        };

        if enabled && !topology.input_bias_node() {
            let rows = self.input_weights.nrows();
            let mut grown = Array2::zeros((rows + 1, self.input_weights.ncols()));
            grown
                .slice_mut(s![..rows, ..])
                .assign(&self.input_weights);
            self.input_weights = grown;
        }

        topology.set_input_bias_node(enabled);
        Ok(())
    }

    // access

    /// The decoded topology, or `None` when no `networkTopology` line was seen.
    pub fn topology(&self) -> Option<NetworkTopology> {
        self.topology
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Major versions differ across structurally different networks.
    pub fn major_version(&self) -> usize {
        self.major
    }

    /// Minor versions differ across training starting points.
    pub fn minor_version(&self) -> usize {
        self.minor
    }

    /// Revisions differ across amounts of training.
    pub fn revision(&self) -> usize {
        self.revision
    }

    pub fn learning_rate(&self) -> f32 {
        self.learning_rate
    }

    pub fn momentum(&self) -> f32 {
        self.momentum
    }

    /// The weight matrix owned by the given source layer.
    ///
    /// # Arguments
    /// * `layer` - 0 for input→hidden, 1 for hidden→output.
    ///
    /// # Errors
    /// The same layer validation the decoder applies, plus
    /// `FileErr::MissingTopology` when queried before any topology was
    /// decoded.
    pub fn link_weights(&self, layer: usize) -> Result<&Array2<f32>> {
        match layer {
            0 | 1 => {}
            2 => return Err(FileErr::LinkOnOutputLayer),
            _ => return Err(FileErr::TooManyLayers { layer }),
        }

        if self.topology.is_none() {
            return Err(FileErr::MissingTopology {
                clause: "linkWeights",
            });
        }

        Ok(if layer == 0 {
            &self.input_weights
        } else {
            &self.hidden_weights
        })
    }

    /// The bias vector of the given layer (1 hidden, 2 output).
    ///
    /// # Errors
    /// Layer 0 is `FileErr::InputNodeBias`; codes above 2 are
    /// `FileErr::TooManyLayers`.
    pub fn node_biases(&self, layer: usize) -> Result<&[f32]> {
        match layer {
            1 | 2 => {}
            0 => return Err(FileErr::InputNodeBias),
            _ => return Err(FileErr::TooManyLayers { layer }),
        }

        if self.topology.is_none() {
            return Err(FileErr::MissingTopology {
                clause: "nodeBiases",
            });
        }

        Ok(if layer == 1 {
            &self.hidden_biases
        } else {
            &self.output_biases
        })
    }

    /// One link weight, with the same validation as `link_weights`.
    pub fn link_value(&self, layer: usize, source: usize, dest: usize) -> Result<f32> {
        let matrix = self.link_weights(layer)?;

        if source >= matrix.nrows() {
            return Err(FileErr::NodeOutOfRange {
                layer,
                node: source,
            });
        }
        if dest >= matrix.ncols() {
            return Err(FileErr::NodeOutOfRange { layer, node: dest });
        }

        Ok(matrix[(source, dest)])
    }

    /// One node bias, with the same validation as `node_biases`.
    pub fn bias_value(&self, layer: usize, node: usize) -> Result<f32> {
        self.node_biases(layer)?
            .get(node)
            .copied()
            .ok_or(FileErr::NodeOutOfRange { layer, node })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn topologized() -> NetworkFile {
        let mut file = NetworkFile::new();
        file.set_topology(NetworkTopology::new(4, 5, 2));
        file
    }

    #[test]
    fn bias_row_growth_preserves_weights() {
        let mut file = topologized();
        file.set_weight(0, 2, 3, 0.75).unwrap();
        file.set_weight(0, 3, 4, -1.5).unwrap();

        file.set_input_bias_node(0, true).unwrap();

        let weights = file.link_weights(0).unwrap();
        assert_eq!(weights.dim(), (5, 5));
        assert_eq!(weights[(2, 3)], 0.75);
        assert_eq!(weights[(3, 4)], -1.5);
        assert_eq!(weights[(4, 0)], 0.0);
    }

    #[test]
    fn repeated_bias_modifier_grows_once() {
        let mut file = topologized();
        file.set_input_bias_node(0, true).unwrap();
        file.set_input_bias_node(0, true).unwrap();
        assert_eq!(file.link_weights(0).unwrap().dim(), (5, 5));
    }

    #[test]
    fn disabling_bias_node_keeps_dimensions() {
        let mut file = topologized();
        file.set_input_bias_node(0, true).unwrap();
        file.set_input_bias_node(0, false).unwrap();

        assert!(!file.topology().unwrap().input_bias_node());
        assert_eq!(file.link_weights(0).unwrap().dim(), (5, 5));
    }

    #[test]
    fn layer_validation_precedes_topology_checks() {
        let mut file = NetworkFile::new();

        assert!(matches!(
            file.set_weight(2, 0, 0, 1.0).unwrap_err(),
            FileErr::LinkOnOutputLayer
        ));
        assert!(matches!(
            file.set_bias(0, 1, 0.5).unwrap_err(),
            FileErr::InputNodeBias
        ));
        assert!(matches!(
            file.set_weight(7, 0, 0, 1.0).unwrap_err(),
            FileErr::TooManyLayers { layer: 7 }
        ));
    }

    #[test]
    fn untopologized_record_rejects_queries() {
        let file = NetworkFile::new();
        assert!(matches!(
            file.link_weights(0).unwrap_err(),
            FileErr::MissingTopology { .. }
        ));
        assert!(matches!(
            file.node_biases(1).unwrap_err(),
            FileErr::MissingTopology { .. }
        ));
    }

    #[test]
    fn out_of_range_indices_are_rejected() {
        let mut file = topologized();
        assert!(matches!(
            file.set_weight(0, 4, 0, 1.0).unwrap_err(),
            FileErr::NodeOutOfRange { layer: 0, node: 4 }
        ));
        assert!(matches!(
            file.set_bias(2, 2, 1.0).unwrap_err(),
            FileErr::NodeOutOfRange { layer: 2, node: 2 }
        ));
    }
}
