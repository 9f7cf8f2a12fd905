use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use crate::binding::Binding;
use crate::button::{ButtonId, Device};

/// Compiled bindings keyed by button identity.
///
/// Only grows: records are inserted by the compiler and never removed.
#[derive(Debug, Default, Clone)]
pub struct BindingRegistry {
    bindings: BTreeMap<ButtonId, Binding>,
}

impl BindingRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the record for an identity equal to `id`, inserting an empty
    /// one keyed by `id` if none exists.
    pub fn lookup_or_insert(&mut self, id: ButtonId) -> &mut Binding {
        self.bindings.entry(id).or_default()
    }

    /// Returns the registered identity equal to `id` together with its record.
    pub fn get(&self, id: &ButtonId) -> Option<(&ButtonId, &Binding)> {
        self.bindings.get_key_value(id)
    }

    /// Exact-match lookup for a set of held buttons.
    pub fn resolve(&self, device: Device, mask: u16) -> Option<(&ButtonId, &Binding)> {
        self.bindings
            .iter()
            .find(|(id, _)| id.device() == device && id.mask() == mask)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ButtonId, &Binding)> + '_ {
        self.bindings.iter()
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Display for BindingRegistry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for (id, binding) in self.iter() {
            writeln!(f, "{:#06x} {} = {}", id.mask(), id, binding)?;
        }

        Ok(())
    }
}
