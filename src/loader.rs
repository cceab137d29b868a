use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use crate::binder::{Binding, bind_field};
use crate::env::TargetEnv;
use crate::error::Error;
use crate::model::{Entry, LoadReport, UnknownKeyPolicy};
use crate::parser::{Entries, push_keep_last};
use crate::record::Record;
use crate::validate::{check_fields, check_registry};

const DEFAULT_FILE: &str = ".env";

/// Load an env file into `record`, merging every assignment into the process
/// environment on the way.
///
/// # Safety
///
/// The caller must ensure no other threads concurrently read or write the
/// process environment while this runs.
pub unsafe fn from_path<R>(path: impl AsRef<Path>, record: &mut R) -> Result<LoadReport, Error>
where
    R: Record + ?Sized,
{
    // SAFETY: forwarded to our caller.
    let target = unsafe { TargetEnv::process() };
    EnvLoader::new()
        .path(path)
        .target(target)
        .load_from_file(record)
}

/// Populate `record` from the current process environment.
///
/// Reads a snapshot of the environment and never writes to it.
pub fn from_env<R>(record: &mut R) -> Result<LoadReport, Error>
where
    R: Record + ?Sized,
{
    EnvLoader::new()
        .target(TargetEnv::from_process_snapshot())
        .load_from_env(record)
}

/// Builder-style record loader.
#[derive(Debug, Clone, Default)]
pub struct EnvLoader {
    paths: Vec<PathBuf>,
    unknown_keys: UnknownKeyPolicy,
    target: TargetEnv,
}

impl EnvLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn path(mut self, path: impl AsRef<Path>) -> Self {
        self.paths.push(path.as_ref().to_path_buf());
        self
    }

    pub fn paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        self.paths
            .extend(paths.into_iter().map(|path| path.as_ref().to_path_buf()));
        self
    }

    pub fn unknown_keys(mut self, policy: UnknownKeyPolicy) -> Self {
        self.unknown_keys = policy;
        self
    }

    pub fn target(mut self, target: TargetEnv) -> Self {
        self.target = target;
        self
    }

    pub fn target_env(&self) -> &TargetEnv {
        &self.target
    }

    pub fn target_env_mut(&mut self) -> &mut TargetEnv {
        &mut self.target
    }

    pub fn into_target(self) -> TargetEnv {
        self.target
    }

    /// Parse every configured file without touching the target or a record.
    ///
    /// Later files win for keys assigned more than once.
    pub fn parse_only(&self) -> Result<Vec<Entry>, Error> {
        let mut merged = Vec::new();
        let mut by_key = HashMap::<String, usize>::new();
        for path in self.effective_paths() {
            let file = File::open(&path)?;
            for entry in Entries::new(BufReader::new(file), Some(path)) {
                push_keep_last(&mut merged, &mut by_key, entry?);
            }
        }
        Ok(merged)
    }

    /// Load every configured file into `record`, then check that every field
    /// is populated.
    ///
    /// Each assignment is merged into the target table and the stored value
    /// is read back before binding. The first error aborts the load and may
    /// leave `record` partially updated.
    pub fn load_from_file<R>(&mut self, record: &mut R) -> Result<LoadReport, Error>
    where
        R: Record + ?Sized,
    {
        check_registry(record)?;
        let mut report = LoadReport::default();

        for path in self.effective_paths() {
            let file = File::open(&path)?;
            report.files_read += 1;

            let mut entries = Entries::new(BufReader::new(file), Some(path));
            for entry in entries.by_ref() {
                let entry = entry?;
                let value = self.target.merge(&entry.key, &entry.value);
                self.bind_entry(record, &entry.key, &value, &mut report)?;
            }
            report.lines_read += entries.lines_read();
        }

        check_fields(record)?;
        tracing::debug!(
            files_read = report.files_read,
            bound = report.bound,
            skipped_unknown = report.skipped_unknown,
            "loaded record from env files"
        );
        Ok(report)
    }

    /// Populate `record` straight from the target table, then check that
    /// every field is populated.
    ///
    /// Fields with no same-named key are left untouched.
    pub fn load_from_env<R>(&mut self, record: &mut R) -> Result<LoadReport, Error>
    where
        R: Record + ?Sized,
    {
        check_registry(record)?;
        let mut report = LoadReport::default();

        for &name in record.field_names() {
            let Some(value) = self.target.get_var(name) else {
                continue;
            };
            self.bind_entry(record, name, &value, &mut report)?;
        }

        check_fields(record)?;
        tracing::debug!(bound = report.bound, "loaded record from environment");
        Ok(report)
    }

    fn bind_entry<R>(
        &self,
        record: &mut R,
        key: &str,
        value: &str,
        report: &mut LoadReport,
    ) -> Result<(), Error>
    where
        R: Record + ?Sized,
    {
        match bind_field(record, key, value)? {
            Binding::Bound => report.bound += 1,
            Binding::Unsupported => {}
            Binding::Unknown => match self.unknown_keys {
                UnknownKeyPolicy::Skip => {
                    tracing::debug!(key, "skipping key with no matching field");
                    report.skipped_unknown += 1;
                }
                UnknownKeyPolicy::Reject => {
                    return Err(Error::UnknownField {
                        field: key.to_owned(),
                    });
                }
            },
        }
        Ok(())
    }

    fn effective_paths(&self) -> Vec<PathBuf> {
        if self.paths.is_empty() {
            vec![PathBuf::from(DEFAULT_FILE)]
        } else {
            self.paths.clone()
        }
    }
}
