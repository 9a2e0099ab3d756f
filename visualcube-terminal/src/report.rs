/// Colored text view of the cube state, one 3x3 grid per layer
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use std::io::Write;
use visualcube_core::{gltf::Node, Label, Orientation, SceneNode};

const ORIENTATION_EPS: f64 = 1e-9;

/// What happened to the piece in a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotState {
    Solved,
    Twisted,
    Displaced,
}

impl SlotState {
    pub fn of(label: Label, node: &Node) -> Self {
        if node.name.as_deref() != Some(label.as_str()) {
            SlotState::Displaced
        } else if node
            .orientation()
            .same_rotation(&Orientation::IDENTITY, ORIENTATION_EPS)
        {
            SlotState::Solved
        } else {
            SlotState::Twisted
        }
    }

    fn color(self) -> Color {
        match self {
            SlotState::Solved => Color::Green,
            SlotState::Twisted => Color::Yellow,
            SlotState::Displaced => Color::Red,
        }
    }
}

/// Nodes in canonical label order, as produced by generation
pub struct StateTable<'a> {
    nodes: &'a [Node],
}

impl<'a> StateTable<'a> {
    pub fn new(nodes: &'a [Node]) -> Self {
        Self { nodes }
    }

    fn slot(&self, label: Label) -> Option<(&'a Node, SlotState)> {
        let node = self.nodes.get(label.index())?;
        Some((node, SlotState::of(label, node)))
    }

    pub fn displaced(&self) -> usize {
        Label::ALL
            .into_iter()
            .filter_map(|label| self.slot(label))
            .filter(|(_, state)| *state == SlotState::Displaced)
            .count()
    }

    pub fn draw<W: Write>(&self, writer: &mut W) -> std::io::Result<()> {
        for layer in ['U', 'M', 'D'] {
            writer.queue(SetForegroundColor(Color::Cyan))?;
            writer.queue(Print(format!("{layer} layer\n")))?;
            for row in ['B', 'M', 'F'] {
                for column in ['L', 'M', 'R'] {
                    let code: String = [layer, row, column].iter().collect();
                    let cell = code.parse::<Label>().ok().and_then(|l| self.slot(l));
                    match cell {
                        Some((node, state)) => {
                            writer.queue(SetForegroundColor(state.color()))?;
                            writer.queue(Print(format!(
                                " {:<3}",
                                node.name.as_deref().unwrap_or("?")
                            )))?;
                        }
                        // hidden core
                        None => {
                            writer.queue(SetForegroundColor(Color::DarkGrey))?;
                            writer.queue(Print("  · "))?;
                        }
                    }
                }
                writer.queue(Print('\n'))?;
            }
        }
        writer.queue(ResetColor)?;
        writer.queue(Print(format!(
            "{} of {} pieces displaced\n",
            self.displaced(),
            Label::COUNT
        )))?;
        writer.flush()
    }
}
