use tracing::warn;

use crate::sync::{ControlId, Instruction};

/// One toggle button on the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Control {
    pub id: ControlId,
    pub name: String,
    pub label: String,
    pub active: bool,
}

/// The rendered activity controls, in creation order, plus keyboard focus.
///
/// Focus follows a control's identity, so controls appearing or vanishing
/// elsewhere on the board never move it.
#[derive(Debug, Default)]
pub struct ActivityBoard {
    controls: Vec<Control>,
    focused: Option<ControlId>,
}

impl ActivityBoard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn controls(&self) -> &[Control] {
        &self.controls
    }

    pub fn len(&self) -> usize {
        self.controls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    pub fn control(&self, name: &str) -> Option<&Control> {
        self.controls.iter().find(|control| control.name == name)
    }

    pub fn focused(&self) -> Option<&Control> {
        let id = self.focused?;
        self.controls.iter().find(|control| control.id == id)
    }

    pub fn focused_index(&self) -> Option<usize> {
        let id = self.focused?;
        self.controls.iter().position(|control| control.id == id)
    }

    pub fn focus_prev(&mut self) {
        if let Some(index) = self.focused_index() {
            let index = index.saturating_sub(1);
            self.focused = Some(self.controls[index].id);
        }
    }

    pub fn focus_next(&mut self) {
        if let Some(index) = self.focused_index() {
            let index = (index + 1).min(self.controls.len() - 1);
            self.focused = Some(self.controls[index].id);
        }
    }

    /// Realizes one reconciler instruction.
    pub fn apply(&mut self, instruction: &Instruction) {
        match instruction {
            Instruction::Create { name, control } => {
                self.controls.push(Control {
                    id: *control,
                    name: name.clone(),
                    label: String::new(),
                    active: false,
                });
                if self.focused.is_none() {
                    self.focused = Some(*control);
                }
            }
            Instruction::UpdateLabel { name, label } => match self.control_mut(name) {
                Some(control) => control.label = label.clone(),
                None => warn!(%name, "label update for unknown control"),
            },
            Instruction::SetActive { name, active } => match self.control_mut(name) {
                Some(control) => control.active = *active,
                None => warn!(%name, "state update for unknown control"),
            },
            Instruction::Remove { name, control } => self.remove(name, *control),
        }
    }

    fn control_mut(&mut self, name: &str) -> Option<&mut Control> {
        self.controls.iter_mut().find(|control| control.name == name)
    }

    fn remove(&mut self, name: &str, id: ControlId) {
        let Some(index) = self.controls.iter().position(|control| control.id == id) else {
            warn!(%name, "removal of unknown control");
            return;
        };
        self.controls.remove(index);
        if self.focused == Some(id) {
            self.focused = if self.controls.is_empty() {
                None
            } else {
                Some(self.controls[index.min(self.controls.len() - 1)].id)
            };
        }
    }
}
