use shapes_common::ItemId;

use crate::Item;

/// Side effects on the surrounding engine's visual representation.
///
/// The population never reads anything back through this port; it only
/// tells the visual layer what changed.
pub trait VisualPort {
    /// A new item exists and needs a visual at its placement.
    fn create_visual(&mut self, item: &Item);

    /// The item's visual should go away.
    fn destroy_visual(&mut self, id: ItemId);

    /// The item's visual should show `color`.
    fn set_visual_color(&mut self, id: ItemId, color: &str);
}

/// Port that ignores every call.
#[derive(Debug, Default)]
pub struct NullVisuals;

impl VisualPort for NullVisuals {
    fn create_visual(&mut self, _item: &Item) {}

    fn destroy_visual(&mut self, _id: ItemId) {}

    fn set_visual_color(&mut self, _id: ItemId, _color: &str) {}
}

/// A visual side effect as recorded by `RecordingVisuals`.
#[derive(Debug, Clone, PartialEq)]
pub enum VisualCommand {
    Create { id: ItemId, kind: String, color: String },
    Destroy { id: ItemId },
    SetColor { id: ItemId, color: String },
}

/// Port that records calls in order. Useful for tests and text front ends.
#[derive(Debug, Default)]
pub struct RecordingVisuals {
    commands: Vec<VisualCommand>,
}

impl RecordingVisuals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn commands(&self) -> &[VisualCommand] {
        &self.commands
    }

    pub fn drain(&mut self) -> Vec<VisualCommand> {
        std::mem::take(&mut self.commands)
    }
}

impl VisualPort for RecordingVisuals {
    fn create_visual(&mut self, item: &Item) {
        self.commands.push(VisualCommand::Create {
            id: item.id,
            kind: item.kind.clone(),
            color: item.color.clone(),
        });
    }

    fn destroy_visual(&mut self, id: ItemId) {
        self.commands.push(VisualCommand::Destroy { id });
    }

    fn set_visual_color(&mut self, id: ItemId, color: &str) {
        self.commands.push(VisualCommand::SetColor {
            id,
            color: color.to_string(),
        });
    }
}
