//! # Sensor Group Detector
//!
//! Physical strain channels follow the naming convention
//! `<prefix><role>:<monitor suffix>`, for example `1002A:MON1`: a numeric
//! prefix identifying the measurement location, a single uppercase role
//! letter identifying the gauge within that location, and the data
//! acquisition monitor the channel was recorded on.
//!
//! Channels sharing a prefix form a [`SensorGroup`]. Two views over the
//! groups feed the derived channel engine:
//!
//! - shear rosettes: groups with roles `A`, `B` and `C`
//! - average pairs: groups with roles `D` and `E`
//!
//! Detection depends only on the set of names. Input is sorted before it is
//! accumulated, so whenever two names compete for the same slot (a role
//! letter, or the monitor suffix of a prefix) the one sorting last wins no
//! matter in which order the channels were listed. Prefixes whose channels
//! disagree on the monitor suffix are reported as mixed-suffix groups.


use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use log::warn;
use serde::Serialize;

/// Roles of a shear rosette
pub const SHEAR_ROLES: [char; 3] = ['A', 'B', 'C'];

/// Roles of an average pair
pub const AVERAGE_ROLES: [char; 2] = ['D', 'E'];

/// Components of a physical channel name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedChannelName<'a> {
    /// Numeric location prefix, leading zeros preserved
    pub prefix: &'a str,
    /// Role letter
    pub role: char,
    /// Text after the first `:`
    pub monitor_suffix: &'a str,
}

/// Split a channel name into prefix, role and monitor suffix.
///
/// The part before the first `:` must consist of one or more ASCII digits
/// followed by exactly one ASCII uppercase letter. Names without a `:` or
/// with any other base name return `None`.
pub fn parse_channel_name(name: &str) -> Option<ParsedChannelName<'_>> {
    let (base, monitor_suffix) = name.split_once(':')?;
    let role = base.chars().last()?;
    if !role.is_ascii_uppercase() {
        return None;
    }
    let prefix = &base[..base.len() - role.len_utf8()];
    if prefix.is_empty() || !prefix.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(ParsedChannelName {
        prefix,
        role,
        monitor_suffix,
    })
}

/// Numeric group prefix, ordered by value then by spelling
#[derive(Debug, Clone, PartialEq, Eq)]
struct PrefixKey(String);

impl Ord for PrefixKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let a = self.0.trim_start_matches('0');
        let b = other.0.trim_start_matches('0');
        a.len()
            .cmp(&b.len())
            .then_with(|| a.cmp(b))
            .then_with(|| self.0.cmp(&other.0))
    }
}

impl PartialOrd for PrefixKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Physical channels sharing one numeric prefix
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensorGroup {
    prefix: String,
    roles: BTreeMap<char, String>,
    monitor_suffix: String,
    observed_suffixes: BTreeSet<String>,
}

impl SensorGroup {
    fn new(prefix: &str) -> Self {
        Self {
            prefix: prefix.to_string(),
            roles: BTreeMap::new(),
            monitor_suffix: String::new(),
            observed_suffixes: BTreeSet::new(),
        }
    }

    /// Numeric prefix
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Channel filling a role
    pub fn channel(&self, role: char) -> Option<&str> {
        self.roles.get(&role).map(String::as_str)
    }

    /// Role letter to channel name, ordered by letter
    pub fn roles(&self) -> &BTreeMap<char, String> {
        &self.roles
    }

    /// Whether every listed role is present
    pub fn has_roles(&self, roles: &[char]) -> bool {
        roles.iter().all(|r| self.roles.contains_key(r))
    }

    /// Monitor suffix used for channels derived from this group
    pub fn monitor_suffix(&self) -> &str {
        &self.monitor_suffix
    }

    /// Every monitor suffix seen on this prefix
    pub fn observed_suffixes(&self) -> &BTreeSet<String> {
        &self.observed_suffixes
    }

    /// Whether channels of this prefix disagree on the monitor suffix
    pub fn is_mixed_suffix(&self) -> bool {
        self.observed_suffixes.len() > 1
    }

    /// Name of the channel derived from this group with the given output suffix
    pub fn output_name(&self, output_suffix: &str) -> String {
        format!("{}{}:{}", self.prefix, output_suffix, self.monitor_suffix)
    }
}

impl fmt::Display for SensorGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let roles: String = self.roles.keys().collect();
        write!(f, "{} [{}] :{}", self.prefix, roles, self.monitor_suffix)?;
        if self.is_mixed_suffix() {
            let all: Vec<&str> = self.observed_suffixes.iter().map(String::as_str).collect();
            write!(f, " (mixed: {})", all.join(", "))?;
        }
        Ok(())
    }
}

/// Group tables the derived channel engine can draw from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupTable {
    /// Groups with roles A, B and C
    ShearRosettes,
    /// Groups with roles D and E
    AveragePairs,
}

impl GroupTable {
    /// Roles a group must carry to appear in this table
    pub fn roles(&self) -> &'static [char] {
        match self {
            GroupTable::ShearRosettes => &SHEAR_ROLES,
            GroupTable::AveragePairs => &AVERAGE_ROLES,
        }
    }

    /// Table whose role set equals the given roles, ignoring order and repeats
    pub fn for_roles(roles: &[char]) -> Option<Self> {
        let wanted: BTreeSet<char> = roles.iter().copied().collect();
        [GroupTable::ShearRosettes, GroupTable::AveragePairs]
            .into_iter()
            .find(|table| table.roles().iter().copied().collect::<BTreeSet<_>>() == wanted)
    }
}

/// Sensor groups detected in one dataset, ordered by prefix
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorGroups {
    groups: BTreeMap<PrefixKey, SensorGroup>,
}

impl SensorGroups {
    /// Group physical channel names by prefix
    pub fn detect<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut sorted: Vec<S> = names.into_iter().collect();
        sorted.sort_by(|a, b| a.as_ref().cmp(b.as_ref()));

        let mut groups: BTreeMap<PrefixKey, SensorGroup> = BTreeMap::new();
        for name in &sorted {
            let name = name.as_ref();
            let Some(parsed) = parse_channel_name(name) else {
                continue;
            };
            let group = groups
                .entry(PrefixKey(parsed.prefix.to_string()))
                .or_insert_with(|| SensorGroup::new(parsed.prefix));
            group.roles.insert(parsed.role, name.to_string());
            group.monitor_suffix = parsed.monitor_suffix.to_string();
            group.observed_suffixes.insert(parsed.monitor_suffix.to_string());
        }

        let detected = Self { groups };
        for group in detected.mixed_suffix_groups() {
            warn!(
                "Sensor group {} mixes monitor suffixes {:?}; derived channels use '{}'",
                group.prefix(),
                group.observed_suffixes(),
                group.monitor_suffix()
            );
        }
        detected
    }

    /// Number of groups
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// Whether no channel matched the naming convention
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// All groups ordered by prefix
    pub fn iter(&self) -> impl Iterator<Item = &SensorGroup> {
        self.groups.values()
    }

    /// Group for a prefix
    pub fn get(&self, prefix: &str) -> Option<&SensorGroup> {
        self.groups.get(&PrefixKey(prefix.to_string()))
    }

    /// Groups carrying every role of the table
    pub fn table(&self, table: GroupTable) -> Vec<&SensorGroup> {
        self.iter().filter(|g| g.has_roles(table.roles())).collect()
    }

    /// Groups with roles A, B and C
    pub fn shear_rosettes(&self) -> Vec<&SensorGroup> {
        self.table(GroupTable::ShearRosettes)
    }

    /// Groups with roles D and E
    pub fn average_pairs(&self) -> Vec<&SensorGroup> {
        self.table(GroupTable::AveragePairs)
    }

    /// Groups whose channels carry more than one monitor suffix
    pub fn mixed_suffix_groups(&self) -> Vec<&SensorGroup> {
        self.iter().filter(|g| g.is_mixed_suffix()).collect()
    }
}
