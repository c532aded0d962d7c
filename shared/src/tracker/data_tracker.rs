use super::error::TrackerError;
use super::tracked_data::{TrackedData, TrackedType};
use super::tracked_value::{SerializedEntry, TrackedValue};
use super::MAX_SLOT_ID;

struct DataEntry {
    value: TrackedValue,
    initial: TrackedValue,
    synced: TrackedValue,
    dirty: bool,
}

/// Fixed-size slot table of typed, independently-dirty-tracked values.
///
/// The table is fully populated at construction by [`DataTrackerBuilder`];
/// schema violations there are programming errors in content code and panic
/// rather than surface as runtime results.
pub struct DataTracker {
    entries: Vec<DataEntry>,
    dirty: bool,
    on_changed: Option<Box<dyn FnMut(u8)>>,
}

impl DataTracker {
    /// Starts building a table with exactly `slot_count` slots. `label` names
    /// the owning entity class in schema-violation panics.
    pub fn builder(label: &'static str, slot_count: usize) -> DataTrackerBuilder {
        assert!(
            slot_count <= usize::from(MAX_SLOT_ID) + 1,
            "{label} declares {slot_count} tracked slots; max is {}",
            usize::from(MAX_SLOT_ID) + 1
        );
        DataTrackerBuilder {
            label,
            entries: (0..slot_count).map(|_| None).collect(),
        }
    }

    fn entry<T: TrackedType>(&self, key: TrackedData<T>) -> &DataEntry {
        let Some(entry) = self.entries.get(usize::from(key.slot())) else {
            panic!(
                "tracked data slot {} is out of range for a table of {} slot(s)",
                key.slot(),
                self.entries.len()
            );
        };
        entry
    }

    /// Reads the current value of a slot.
    ///
    /// # Panics
    ///
    /// Panics if the key's slot or kind does not match the table — a schema
    /// mismatch between the key constants and the builder path.
    pub fn get<T: TrackedType>(&self, key: TrackedData<T>) -> T {
        let entry = self.entry(key);
        let Some(value) = T::from_value(&entry.value) else {
            panic!(
                "tracked data slot {} holds {} values, key expected {}",
                key.slot(),
                entry.value.kind().name(),
                key.kind().name()
            );
        };
        value
    }

    /// Writes a slot, with value-equality dedup: a write that does not change
    /// the value is a complete no-op and raises no dirty flag.
    pub fn set<T: TrackedType>(&mut self, key: TrackedData<T>, value: T) {
        self.write(key, value, false);
    }

    /// Writes a slot unconditionally, marking it dirty even on an equal value
    pub fn force_set<T: TrackedType>(&mut self, key: TrackedData<T>, value: T) {
        self.write(key, value, true);
    }

    fn write<T: TrackedType>(&mut self, key: TrackedData<T>, value: T, force: bool) {
        let slot = key.slot();
        // kind check via the typed read; keeps mismatch panics in one place
        let current: T = self.get(key);
        let next = value.into_value();
        if !force && current.into_value() == next {
            return;
        }

        let entry = &mut self.entries[usize::from(slot)];
        entry.value = next;
        entry.dirty = true;
        self.dirty = true;
        if let Some(hook) = &mut self.on_changed {
            hook(slot);
        }
    }

    /// Whether any slot changed since the last drain
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Drains the change-set accumulated since the last synchronization
    /// point: `None` when nothing changed, otherwise the entries whose value
    /// differs from the last-synced one.
    ///
    /// Draining clears the dirty bits and commits the entries as synced, so
    /// this is called exactly once per outbound tick per entity. A slot that
    /// was written but returned to its synced value produces no entry.
    pub fn dirty_entries(&mut self) -> Option<Vec<SerializedEntry>> {
        if !self.dirty {
            return None;
        }
        self.dirty = false;

        let mut list = Vec::new();
        for (slot, entry) in self.entries.iter_mut().enumerate() {
            if !entry.dirty {
                continue;
            }
            entry.dirty = false;
            if entry.value != entry.synced {
                entry.synced = entry.value;
                list.push(SerializedEntry::new(slot as u8, entry.value));
            }
        }

        if list.is_empty() {
            None
        } else {
            Some(list)
        }
    }

    /// Read-only view of every slot whose value differs from its value at
    /// construction. Never clears anything; used for "changed since creation"
    /// checks, distinct from the tick-to-tick dirty mechanism.
    pub fn changed_entries(&self) -> Option<Vec<SerializedEntry>> {
        let list: Vec<SerializedEntry> = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.value != entry.initial)
            .map(|(slot, entry)| SerializedEntry::new(slot as u8, entry.value))
            .collect();

        if list.is_empty() {
            None
        } else {
            Some(list)
        }
    }

    /// Observer-side apply: writes each decoded entry into the local table and
    /// fires the same attribute-changed hook as a local mutation, so reacting
    /// code cannot tell whether state changed locally or remotely.
    pub fn write_updated_entries(&mut self, entries: &[SerializedEntry]) -> Result<(), TrackerError> {
        for update in entries {
            let len = self.entries.len();
            let Some(entry) = self.entries.get_mut(usize::from(update.slot)) else {
                return Err(TrackerError::UnknownSlot {
                    slot: update.slot,
                    len,
                });
            };
            if entry.value.kind() != update.value.kind() {
                return Err(TrackerError::kind_mismatch(
                    update.slot,
                    entry.value.kind(),
                    update.value.kind(),
                ));
            }
            entry.value = update.value;
            if let Some(hook) = &mut self.on_changed {
                hook(update.slot);
            }
        }
        Ok(())
    }

    /// Installs the per-entity attribute-changed hook, invoked with the slot
    /// id on every effective write, local or applied
    pub fn set_on_changed(&mut self, hook: Box<dyn FnMut(u8)>) {
        self.on_changed = Some(hook);
    }

    pub fn clear_on_changed(&mut self) {
        self.on_changed = None;
    }

    pub fn slot_count(&self) -> usize {
        self.entries.len()
    }
}

/// Populates a [`DataTracker`]'s slots; every declared slot must be added
/// exactly once before `build`.
pub struct DataTrackerBuilder {
    label: &'static str,
    entries: Vec<Option<DataEntry>>,
}

impl DataTrackerBuilder {
    /// Adds one slot with its initial value.
    ///
    /// # Panics
    ///
    /// Panics on a slot id outside the declared range or already populated —
    /// both are schema-integrity errors in the entity class's layout.
    pub fn add<T: TrackedType>(mut self, key: TrackedData<T>, value: T) -> Self {
        let slot = usize::from(key.slot());
        if slot >= self.entries.len() {
            panic!(
                "{}: tracked data id {} is too big; table has {} slot(s)",
                self.label,
                key.slot(),
                self.entries.len()
            );
        }
        if self.entries[slot].is_some() {
            panic!("{}: duplicate tracked data id {}", self.label, key.slot());
        }

        let value = value.into_value();
        self.entries[slot] = Some(DataEntry {
            value,
            initial: value,
            synced: value,
            dirty: false,
        });
        self
    }

    /// # Panics
    ///
    /// Panics if any declared slot was left unpopulated; a class that declares
    /// N tracked attributes must initialize all N in its constructor path.
    pub fn build(self) -> DataTracker {
        for (slot, entry) in self.entries.iter().enumerate() {
            if entry.is_none() {
                panic!("{} has not defined tracked data value {slot}", self.label);
            }
        }

        DataTracker {
            entries: self.entries.into_iter().flatten().collect(),
            dirty: false,
            on_changed: None,
        }
    }
}
