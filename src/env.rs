use std::collections::BTreeMap;

/// Key/value table behind a load.
///
/// File loads write each assignment here and bind whatever reads back;
/// [`crate::EnvLoader::load_from_env`] binds from it directly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetEnv {
    kind: TargetEnvKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TargetEnvKind {
    /// Backed by the process environment; merged keys outlive the load.
    Process,
    /// Private to this table; nothing outside the loader observes it.
    Memory(BTreeMap<String, String>),
}

impl Default for TargetEnv {
    fn default() -> Self {
        Self::memory()
    }
}

impl TargetEnv {
    /// Table backed by the process environment.
    ///
    /// # Safety
    ///
    /// File loads call [`std::env::set_var`] for every assignment. No other
    /// thread may touch the process environment while a loader holding this
    /// table runs.
    pub unsafe fn process() -> Self {
        Self {
            kind: TargetEnvKind::Process,
        }
    }

    /// Empty private table. The default for [`crate::EnvLoader`].
    pub fn memory() -> Self {
        Self::from_memory(BTreeMap::new())
    }

    /// Private table seeded with `map`, typically to stand in for the process
    /// environment in tests.
    pub fn from_memory(map: BTreeMap<String, String>) -> Self {
        Self {
            kind: TargetEnvKind::Memory(map),
        }
    }

    /// Private copy of the process environment as it is right now.
    ///
    /// Non-Unicode names and values are converted lossily.
    pub fn from_process_snapshot() -> Self {
        let map = std::env::vars_os()
            .map(|(key, value)| {
                (
                    key.to_string_lossy().into_owned(),
                    value.to_string_lossy().into_owned(),
                )
            })
            .collect();
        Self::from_memory(map)
    }

    pub fn is_process(&self) -> bool {
        matches!(self.kind, TargetEnvKind::Process)
    }

    /// Contents of a private table, `None` for the process table.
    pub fn as_memory(&self) -> Option<&BTreeMap<String, String>> {
        match &self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    pub fn as_memory_mut(&mut self) -> Option<&mut BTreeMap<String, String>> {
        match &mut self.kind {
            TargetEnvKind::Memory(map) => Some(map),
            TargetEnvKind::Process => None,
        }
    }

    pub fn get_var(&self, key: &str) -> Option<String> {
        match &self.kind {
            TargetEnvKind::Process => {
                std::env::var_os(key).map(|value| value.to_string_lossy().into_owned())
            }
            TargetEnvKind::Memory(map) => map.get(key).cloned(),
        }
    }

    pub(crate) fn set_var(&mut self, key: &str, value: &str) {
        match &mut self.kind {
            // SAFETY: upheld by the caller of `TargetEnv::process`.
            TargetEnvKind::Process => unsafe { std::env::set_var(key, value) },
            TargetEnvKind::Memory(map) => {
                map.insert(key.to_owned(), value.to_owned());
            }
        }
    }

    /// Store `key=value`, replacing any previous value, and return what the
    /// table now holds for `key`.
    ///
    /// Binding the returned string keeps file loads and table loads in
    /// agreement. Keys must not contain `=` and neither side may contain NUL;
    /// the line grammar guarantees both.
    pub fn merge(&mut self, key: &str, value: &str) -> String {
        self.set_var(key, value);
        self.get_var(key).unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_overwrites_and_returns_stored_value() {
        let mut initial = BTreeMap::new();
        initial.insert("NAME".to_owned(), "old".to_owned());
        let mut target = TargetEnv::from_memory(initial);

        assert_eq!(target.merge("NAME", "new"), "new");
        let map = target.as_memory().expect("memory target");
        assert_eq!(map.get("NAME").expect("NAME should exist"), "new");
    }

    #[test]
    fn default_target_is_empty_memory() {
        let target = TargetEnv::default();

        assert!(!target.is_process());
        assert!(target.as_memory().expect("memory target").is_empty());
        assert_eq!(target.get_var("MISSING"), None);
    }

    #[test]
    fn process_snapshot_is_detached_from_process() {
        let mut snapshot = TargetEnv::from_process_snapshot();
        snapshot.merge("ENVRECORD_SNAPSHOT_ONLY", "1");

        assert!(std::env::var_os("ENVRECORD_SNAPSHOT_ONLY").is_none());
        assert_eq!(
            snapshot.get_var("ENVRECORD_SNAPSHOT_ONLY").as_deref(),
            Some("1")
        );
    }
}
