//! Ordered set of channels requested for display.

use serde::Serialize;

/// Channels on the chart, in the order they were added
///
/// Membership is unique; insertion order drives legend and table column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PlottedChannelSet {
    names: Vec<String>,
}

impl PlottedChannelSet {
    /// Append a channel. Returns `false` and changes nothing if it is blank or already present.
    pub fn insert(&mut self, name: &str) -> bool {
        if name.trim().is_empty() || self.contains(name) {
            return false;
        }
        self.names.push(name.to_string());
        true
    }

    /// Remove a channel. Returns `false` if it was not present.
    pub fn remove(&mut self, name: &str) -> bool {
        let before = self.names.len();
        self.names.retain(|n| n != name);
        self.names.len() != before
    }

    /// Remove every channel
    pub fn clear(&mut self) {
        self.names.clear();
    }

    /// Whether a channel is plotted
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    /// Number of plotted channels
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether nothing is plotted
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Plotted channel names in insertion order
    pub fn names(&self) -> &[String] {
        &self.names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insertion_order_and_uniqueness() {
        let mut set = PlottedChannelSet::default();
        assert!(set.insert("10B:MON1"));
        assert!(set.insert("10A:MON1"));
        assert!(!set.insert("10B:MON1"));
        assert!(!set.insert("   "));
        assert!(!set.insert(""));
        assert_eq!(set.names(), &["10B:MON1".to_string(), "10A:MON1".to_string()]);

        assert!(set.remove("10B:MON1"));
        assert!(!set.remove("10B:MON1"));
        assert_eq!(set.len(), 1);

        assert!(set.insert("10B:MON1"));
        assert_eq!(set.names().last().map(String::as_str), Some("10B:MON1"));

        set.clear();
        assert!(set.is_empty());
    }
}
