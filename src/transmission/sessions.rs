use std::sync::Arc;

use dashmap::DashMap;

use super::form::TransmissionForm;

/// Open transmission dialogs, one per packing list.
#[derive(Clone, Default)]
pub struct TransmissionSessions {
    forms: Arc<DashMap<String, TransmissionForm>>,
}

impl TransmissionSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `form` unless one is already open for the same packing
    /// list, in which case the open one wins. Returns the form now on file
    /// and whether it was newly created.
    pub fn open(&self, form: TransmissionForm) -> (TransmissionForm, bool) {
        let mut created = false;
        let entry = self
            .forms
            .entry(form.packing_list_id.clone())
            .or_insert_with(|| {
                created = true;
                form
            });
        (entry.value().clone(), created)
    }

    pub fn get(&self, packing_list_id: &str) -> Option<TransmissionForm> {
        self.forms.get(packing_list_id).map(|f| f.value().clone())
    }

    /// Runs `f` against the open form while holding its shard lock.
    pub fn update<R>(
        &self,
        packing_list_id: &str,
        f: impl FnOnce(&mut TransmissionForm) -> R,
    ) -> Option<R> {
        self.forms.get_mut(packing_list_id).map(|mut form| f(form.value_mut()))
    }

    pub fn close(&self, packing_list_id: &str) -> Option<TransmissionForm> {
        self.forms.remove(packing_list_id).map(|(_, form)| form)
    }
}
