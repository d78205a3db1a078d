//! Versioned upgrade plan
//!
//! Applies format changes in version order, writing a version savepoint after
//! each step so an interrupted run resumes after the last completed step.

use crate::error::{ConfigError, UpgradeError, UpgradeResult};
use crate::reconcile::{FormatChange, FormatReconciler};
use crate::registry::PluginRegistry;
use crate::store::ConfigStore;

/// One versioned upgrade step
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeStep {
    /// Version reached once the step completes
    pub version: u64,
    /// Change applied by the step
    pub change: FormatChange,
}

impl UpgradeStep {
    /// Step adding a format
    #[inline]
    pub fn add(version: u64, format: impl Into<String>) -> Self {
        Self {
            version,
            change: FormatChange::Add(format.into()),
        }
    }

    /// Step removing a format
    #[inline]
    pub fn remove(version: u64, format: impl Into<String>) -> Self {
        Self {
            version,
            change: FormatChange::Remove(format.into()),
        }
    }
}

/// Result of a plan run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpgradeOutcome {
    /// Version the run started from
    pub from_version: u64,
    /// Version reached
    pub version: u64,
    /// Versions of the steps applied, in order
    pub applied: Vec<u64>,
}

impl UpgradeOutcome {
    /// Check if any step ran
    #[inline]
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.applied.is_empty()
    }
}

/// Ordered set of upgrade steps
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradePlan {
    steps: Vec<UpgradeStep>,
}

impl UpgradePlan {
    /// Create plan, sorting steps by version
    ///
    /// # Errors
    /// Returns [`UpgradeError::DuplicateStep`] if two steps share a version
    pub fn new(mut steps: Vec<UpgradeStep>) -> UpgradeResult<Self> {
        steps.sort_by_key(|step| step.version);
        if let Some(pair) = steps.windows(2).find(|pair| pair[0].version == pair[1].version) {
            return Err(UpgradeError::DuplicateStep(pair[0].version));
        }
        Ok(Self { steps })
    }

    /// Steps in version order
    #[inline]
    #[must_use]
    pub fn steps(&self) -> &[UpgradeStep] {
        &self.steps
    }

    /// Steps newer than a version
    pub fn pending(&self, from_version: u64) -> impl Iterator<Item = &UpgradeStep> {
        self.steps.iter().filter(move |step| step.version > from_version)
    }

    /// Latest version in the plan
    #[inline]
    #[must_use]
    pub fn latest_version(&self) -> Option<u64> {
        self.steps.last().map(|step| step.version)
    }

    /// Run every step newer than `from_version`
    ///
    /// # Errors
    /// Returns [`UpgradeError::StepFailed`] for the first failing step; steps
    /// before it keep their savepoints
    pub fn run<R, S>(
        &self,
        from_version: u64,
        reconciler: &FormatReconciler<'_, R, S>,
    ) -> UpgradeResult<UpgradeOutcome>
    where
        R: PluginRegistry + ?Sized,
        S: ConfigStore + ?Sized,
    {
        let version_key = reconciler.settings().version_key();
        let mut outcome = UpgradeOutcome {
            from_version,
            version: from_version,
            applied: Vec::new(),
        };

        for step in self.pending(from_version) {
            tracing::info!(version = step.version, change = %step.change, "Running upgrade step");
            reconciler
                .apply(&step.change)
                .map_err(|e| UpgradeError::step_failed(step.version, e))?;
            reconciler
                .store()
                .set(&version_key, &step.version.to_string())
                .map_err(|e| UpgradeError::step_failed(step.version, UpgradeError::from(e)))?;

            outcome.version = step.version;
            outcome.applied.push(step.version);
        }

        if outcome.is_noop() {
            tracing::debug!(version = from_version, "No pending upgrade steps");
        }
        Ok(outcome)
    }

    /// Run from the version savepoint held in the store
    ///
    /// A missing savepoint counts as version 0.
    ///
    /// # Errors
    /// Returns [`UpgradeError::InvalidVersion`] if the savepoint is not a
    /// number, otherwise as [`UpgradePlan::run`]
    pub fn run_from_store<R, S>(
        &self,
        reconciler: &FormatReconciler<'_, R, S>,
    ) -> UpgradeResult<UpgradeOutcome>
    where
        R: PluginRegistry + ?Sized,
        S: ConfigStore + ?Sized,
    {
        let from_version = stored_version(reconciler)?;
        self.run(from_version, reconciler)
    }
}

fn stored_version<R, S>(reconciler: &FormatReconciler<'_, R, S>) -> UpgradeResult<u64>
where
    R: PluginRegistry + ?Sized,
    S: ConfigStore + ?Sized,
{
    match reconciler.store().get(&reconciler.settings().version_key()) {
        Ok(record) => {
            let parsed = record.value.trim().parse::<u64>();
            parsed.map_err(|_| UpgradeError::InvalidVersion(record.value))
        }
        Err(ConfigError::NotFound { .. }) => Ok(0),
        Err(e) => Err(e.into()),
    }
}
