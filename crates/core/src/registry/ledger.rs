/// Bookkeeping of the descriptor ids this bridge instance has registered.
///
/// The ledger is the only mutable state the bridge owns. It exists so that
/// teardown removes exactly what this instance added, and nothing else:
/// entries registered by the host itself or by other plugins are invisible
/// to it. Insertion order is preserved; duplicates are not recorded.
#[derive(Debug, Default)]
pub struct RegistrationLedger {
    ids: Vec<String>,
}

impl RegistrationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a successful registration. Ignores ids already present.
    pub fn record(&mut self, id: impl Into<String>) {
        let id = id.into();
        if !self.ids.contains(&id) {
            self.ids.push(id);
        }
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.iter().any(|i| i == id)
    }

    /// The recorded ids, in registration order.
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    /// Take every recorded id, leaving the ledger empty.
    pub fn drain(&mut self) -> Vec<String> {
        std::mem::take(&mut self.ids)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}
