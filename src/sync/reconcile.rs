use std::collections::HashSet;

use super::{ControlId, Entry, Registry, Snapshot};

/// A single change the presentation layer has to make.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Instruction {
    Create { name: String, control: ControlId },
    UpdateLabel { name: String, label: String },
    SetActive { name: String, active: bool },
    Remove { name: String, control: ControlId },
}

impl Instruction {
    pub fn name(&self) -> &str {
        match self {
            Instruction::Create { name, .. }
            | Instruction::UpdateLabel { name, .. }
            | Instruction::SetActive { name, .. }
            | Instruction::Remove { name, .. } => name,
        }
    }
}

/// Brings `registry` in line with `snapshot` and returns the writes needed to
/// do the same to the rendered view.
///
/// Controls are keyed by activity name and survive across calls, so an
/// activity seen in consecutive snapshots keeps its control. Labels and
/// active flags are only written when they differ from what was last
/// written. Per-record instructions come first in snapshot order, removals
/// last.
pub fn reconcile(registry: &mut Registry, snapshot: &Snapshot) -> Vec<Instruction> {
    let mut instructions = Vec::new();

    for record in &snapshot.activities {
        if !registry.contains(&record.name) {
            let control = registry.allocate_control();
            registry.insert(record.name.clone(), Entry::new(control));
            instructions.push(Instruction::Create {
                name: record.name.clone(),
                control,
            });
        }
        let Some(entry) = registry.get_mut(&record.name) else {
            continue;
        };

        let label = record.label();
        if entry.label.as_deref() != Some(label.as_str()) {
            entry.label = Some(label.clone());
            instructions.push(Instruction::UpdateLabel {
                name: record.name.clone(),
                label,
            });
        }

        let active = record.is_active();
        if entry.active != Some(active) {
            entry.active = Some(active);
            instructions.push(Instruction::SetActive {
                name: record.name.clone(),
                active,
            });
        }
    }

    let current: HashSet<&str> = snapshot
        .activities
        .iter()
        .map(|record| record.name.as_str())
        .collect();
    let stale: Vec<String> = registry
        .keys()
        .rev()
        .filter(|name| !current.contains(name))
        .map(str::to_owned)
        .collect();
    for name in stale {
        if let Some(entry) = registry.remove(&name) {
            instructions.push(Instruction::Remove {
                name,
                control: entry.control,
            });
        }
    }

    instructions
}
