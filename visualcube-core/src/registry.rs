/// Mapping from the 26 position labels to the pieces occupying them
use crate::error::{CubeError, Result};
use crate::label::Label;
use crate::rotation::Orientation;

/// A scene node that can stand in for a cube piece.
///
/// The registry only ever reads the node's name and reads or writes its
/// orientation. Everything else about the node travels with it untouched.
pub trait SceneNode {
    fn name(&self) -> Option<&str>;

    /// Current orientation, identity when the node has none
    fn orientation(&self) -> Orientation;

    fn set_orientation(&mut self, orientation: Orientation);
}

/// Exactly one node per position label.
///
/// Slots are indexed by [`Label::index`]; the set of slots never changes
/// after construction, only which node sits in each one.
#[derive(Debug, Clone)]
pub struct PieceRegistry<N> {
    slots: Vec<N>,
}

impl<N: SceneNode> PieceRegistry<N> {
    /// Place each node at the slot named by its label. The input must hold
    /// exactly one node per label, in any order.
    pub fn from_nodes(nodes: Vec<N>) -> Result<Self> {
        if nodes.len() != Label::COUNT {
            return Err(CubeError::NodeCount {
                expected: Label::COUNT,
                actual: nodes.len(),
            });
        }

        let mut slots: Vec<Option<N>> = (0..Label::COUNT).map(|_| None).collect();
        for node in nodes {
            let name = node.name().unwrap_or_default();
            let label: Label = name
                .parse()
                .map_err(|_| CubeError::UnknownLabel(name.to_string()))?;
            let slot = &mut slots[label.index()];
            if slot.is_some() {
                return Err(CubeError::DuplicateLabel(label));
            }
            *slot = Some(node);
        }

        // 26 nodes, no duplicates: every slot is filled
        let slots: Vec<N> = slots.into_iter().flatten().collect();
        Ok(Self { slots })
    }

    /// Nodes whose name no longer matches the slot they occupy
    pub fn displaced(&self) -> Vec<Label> {
        self.iter()
            .filter(|(label, node)| node.name() != Some(label.as_str()))
            .map(|(label, _)| label)
            .collect()
    }
}

impl<N> PieceRegistry<N> {
    pub fn get(&self, label: Label) -> &N {
        &self.slots[label.index()]
    }

    pub fn get_mut(&mut self, label: Label) -> &mut N {
        &mut self.slots[label.index()]
    }

    /// Slots in canonical label order
    pub fn iter(&self) -> impl Iterator<Item = (Label, &N)> {
        Label::ALL.into_iter().zip(self.slots.iter())
    }

    /// Flatten into canonical label order for output
    pub fn into_nodes(self) -> Vec<N> {
        self.slots
    }

    /// Rearrange the nodes at `grid` so that slot `grid[i]` receives the node
    /// previously at `grid[source[i]]`. `source` must be a permutation of
    /// `0..9`.
    pub(crate) fn permute(&mut self, grid: &[Label; 9], source: &[usize; 9]) {
        let mut placed = [false; 9];
        for start in 0..9 {
            if placed[start] {
                continue;
            }
            placed[start] = true;
            let mut current = start;
            loop {
                let next = source[current];
                if next == start {
                    break;
                }
                self.slots.swap(grid[current].index(), grid[next].index());
                placed[next] = true;
                current = next;
            }
        }
    }
}
