//! # Derived Channel Engine
//!
//! Applies a registered calculation to every sensor group that carries its
//! required roles and appends the results to the dataset as new channels.
//!
//! The output of group `<prefix>` with monitor suffix `<mon>` is named
//! `<prefix><output suffix>:<mon>`, e.g. `1001S:MON1` for the shear of
//! rosette 1001. Re-running a calculation skips every output that already
//! exists, so repeated runs are no-ops.
//!
//! Derived channels are never fed back into group detection: there is no
//! chained derivation.

mod registry;


use std::fmt;

use log::{debug, info, warn};
use serde::Serialize;

use crate::dataset::{Column, Dataset};
use crate::groups::{GroupTable, SensorGroups};
use crate::session::CoreError;

pub use registry::{CalculationRegistry, DerivedChannelSpec, Formula, AVERAGE, SHEAR};

/// Non-fatal problem met while deriving channels
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DerivationWarning {
    /// An input channel of a group is not in the dataset; the group was skipped
    MissingInput {
        /// Group prefix
        prefix: String,
        /// Role whose channel is missing
        role: char,
        /// Name of the missing channel
        channel: String,
    },

    /// The group's channels disagree on the monitor suffix; the output used one of them
    MixedMonitorSuffix {
        /// Group prefix
        prefix: String,
        /// Suffix used in the output name
        used: String,
        /// Every suffix observed on the group
        observed: Vec<String>,
    },
}

impl fmt::Display for DerivationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DerivationWarning::MissingInput {
                prefix,
                role,
                channel,
            } => write!(
                f,
                "group {prefix}: input {role} ('{channel}') missing, group skipped"
            ),
            DerivationWarning::MixedMonitorSuffix {
                prefix,
                used,
                observed,
            } => write!(
                f,
                "group {prefix}: mixed monitor suffixes [{}], output uses '{used}'",
                observed.join(", ")
            ),
        }
    }
}

/// Result of one derivation run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DerivationOutcome {
    /// Id of the calculation that ran
    pub calculation: String,

    /// Channels appended to the dataset, in group order
    pub names: Vec<String>,

    /// Outputs that already existed and were left alone
    pub skipped_existing: Vec<String>,

    /// Non-fatal problems
    pub warnings: Vec<DerivationWarning>,
}

impl DerivationOutcome {
    /// Number of channels appended
    pub fn added(&self) -> usize {
        self.names.len()
    }
}

/// Run a calculation over the groups and append its outputs to the dataset.
///
/// Fails with [`CoreError::UnknownCalculation`] if the calculation's role set does
/// not correspond to a group table. Per group, either the whole output
/// column is appended or nothing is.
pub fn compute_derived(
    dataset: &mut Dataset,
    groups: &SensorGroups,
    spec: &DerivedChannelSpec,
) -> Result<DerivationOutcome, CoreError> {
    let table = GroupTable::for_roles(&spec.required_roles)
        .ok_or_else(|| CoreError::UnknownCalculation(spec.id.clone()))?;

    let mut outcome = DerivationOutcome {
        calculation: spec.id.clone(),
        ..Default::default()
    };

    'groups: for group in groups.table(table) {
        let output = group.output_name(&spec.output_suffix);
        if dataset.contains(&output) {
            debug!("{} already present, skipping", output);
            outcome.skipped_existing.push(output);
            continue;
        }

        let mut inputs: Vec<&Column> = Vec::with_capacity(spec.required_roles.len());
        for &role in &spec.required_roles {
            let channel = group.channel(role).unwrap_or_default();
            match dataset.column(channel) {
                Some(column) => inputs.push(column),
                None => {
                    let warning = DerivationWarning::MissingInput {
                        prefix: group.prefix().to_string(),
                        role,
                        channel: channel.to_string(),
                    };
                    warn!("{}: {}", spec.id, warning);
                    outcome.warnings.push(warning);
                    continue 'groups;
                }
            }
        }

        let mut args = vec![0.0; inputs.len()];
        let values: Vec<f64> = (0..dataset.row_count())
            .map(|row| {
                for (arg, column) in args.iter_mut().zip(&inputs) {
                    *arg = column.values[row];
                }
                (spec.formula)(&args)
            })
            .collect();
        let unit = inputs.first().and_then(|c| c.unit.clone());

        if group.is_mixed_suffix() {
            let warning = DerivationWarning::MixedMonitorSuffix {
                prefix: group.prefix().to_string(),
                used: group.monitor_suffix().to_string(),
                observed: group.observed_suffixes().iter().cloned().collect(),
            };
            warn!("{}: {}", spec.id, warning);
            outcome.warnings.push(warning);
        }

        dataset.append_column(Column {
            name: output.clone(),
            unit,
            values,
        })?;
        outcome.names.push(output);
    }

    info!(
        "{}: {} channel(s) added, {} already present",
        spec.id,
        outcome.added(),
        outcome.skipped_existing.len()
    );
    Ok(outcome)
}
