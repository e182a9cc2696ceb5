//! Output shapes produced by the aggregators

use chrono::Weekday;
use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};

/// One calendar day and the number of leads created on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyCountPoint {
    /// Literal `YYYY-MM-DD` day key
    pub date: String,
    pub count: usize,
}

/// Days in ascending order, one entry per distinct day present.
pub type DailyCount = Vec<DailyCountPoint>;

/// A named bucket and its size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub name: String,
    pub value: usize,
}

impl CategoryCount {
    pub fn new(name: impl Into<String>, value: usize) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Device buckets, largest first.
pub type CategoryDistribution = Vec<CategoryCount>;

/// At most `limit` values of one attribution field, largest first.
pub type TopNRanking = Vec<CategoryCount>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowNode {
    pub name: String,
}

impl FlowNode {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

/// Weighted edge between two node indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowLink {
    pub source: usize,
    pub target: usize,
    pub value: usize,
}

/// Tiered source → campaign → ad set → ad graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowGraph {
    pub nodes: Vec<FlowNode>,
    pub links: Vec<FlowLink>,
}

impl FlowGraph {
    /// Graph holding a single placeholder node and no links.
    pub fn sentinel(name: &str) -> Self {
        Self {
            nodes: vec![FlowNode::new(name)],
            links: Vec::new(),
        }
    }
}

/// Lead counts per weekday, Sunday first.
///
/// Serializes as a map keyed `"0"` (Sunday) to `"6"` (Saturday); all seven
/// keys are always present.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WeekdayHistogram {
    counts: [usize; 7],
}

impl WeekdayHistogram {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn increment(&mut self, weekday: Weekday) {
        self.counts[weekday.num_days_from_sunday() as usize] += 1;
    }

    pub fn get(&self, weekday: Weekday) -> usize {
        self.counts[weekday.num_days_from_sunday() as usize]
    }

    /// Counts indexed by days from Sunday.
    pub fn counts(&self) -> &[usize; 7] {
        &self.counts
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

impl Serialize for WeekdayHistogram {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.counts.len()))?;
        for (day, count) in self.counts.iter().enumerate() {
            map.serialize_entry(&day.to_string(), count)?;
        }
        map.end()
    }
}
