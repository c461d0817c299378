use std::fmt;

use crate::groups::{AVERAGE_ROLES, SHEAR_ROLES};

/// Element-wise formula; receives one value per required role, in role order
pub type Formula = fn(&[f64]) -> f64;

/// Id of the built-in shear calculation
pub const SHEAR: &str = "shear";

/// Id of the built-in average calculation
pub const AVERAGE: &str = "average";

/// A registered derived-channel calculation
#[derive(Clone)]
pub struct DerivedChannelSpec {
    /// Stable identifier used to request the calculation
    pub id: String,

    /// Human-readable label
    pub label: String,

    /// Role letters the formula consumes, in argument order
    pub required_roles: Vec<char>,

    /// Inserted between prefix and `:` in the output channel name
    pub output_suffix: String,

    /// The formula itself
    pub formula: Formula,
}

impl DerivedChannelSpec {
    /// Create a calculation spec
    pub fn new(
        id: impl Into<String>,
        label: impl Into<String>,
        required_roles: &[char],
        output_suffix: impl Into<String>,
        formula: Formula,
    ) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            required_roles: required_roles.to_vec(),
            output_suffix: output_suffix.into(),
            formula,
        }
    }

    /// Shear from a rosette: `S = 2B - A - C`
    pub fn shear() -> Self {
        Self::new(SHEAR, "Shear (S = 2B - A - C)", &SHEAR_ROLES, "S", |v| {
            2.0 * v[1] - v[0] - v[2]
        })
    }

    /// Mean of a gauge pair: `Avg = (D + E) / 2`
    pub fn average() -> Self {
        Self::new(AVERAGE, "Average (Avg = (D+E)/2)", &AVERAGE_ROLES, "Avg", |v| {
            (v[0] + v[1]) / 2.0
        })
    }
}

impl fmt::Debug for DerivedChannelSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedChannelSpec")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("required_roles", &self.required_roles)
            .field("output_suffix", &self.output_suffix)
            .finish_non_exhaustive()
    }
}

/// Calculations available to a session, keyed by id
#[derive(Debug, Clone)]
pub struct CalculationRegistry {
    specs: Vec<DerivedChannelSpec>,
}

impl Default for CalculationRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl CalculationRegistry {
    /// Registry without any calculation
    pub fn empty() -> Self {
        Self { specs: Vec::new() }
    }

    /// Registry with shear and average
    pub fn builtin() -> Self {
        Self {
            specs: vec![DerivedChannelSpec::shear(), DerivedChannelSpec::average()],
        }
    }

    /// Add a calculation, replacing any with the same id
    pub fn register(&mut self, spec: DerivedChannelSpec) {
        match self.specs.iter_mut().find(|s| s.id == spec.id) {
            Some(existing) => *existing = spec,
            None => self.specs.push(spec),
        }
    }

    /// Look up a calculation by id
    pub fn get(&self, id: &str) -> Option<&DerivedChannelSpec> {
        self.specs.iter().find(|s| s.id == id)
    }

    /// Registered ids in registration order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.specs.iter().map(|s| s.id.as_str())
    }

    /// Registered calculations in registration order
    pub fn iter(&self) -> impl Iterator<Item = &DerivedChannelSpec> {
        self.specs.iter()
    }
}
