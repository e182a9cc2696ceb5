//! Source → campaign → ad set → ad flow graph
//!
//! Every record contributes one unit of flow along its attribution path.
//! Node names carry their tier label, so equal raw values on different tiers
//! (a campaign and an ad both called "Retargeting") stay distinct nodes.

use crate::{DataAggregator, FlowGraph, FlowLink, FlowNode, Grouping};
use leadboard_common::{ensure, LeadField, LeadRecord, Result};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tracing::{debug, error, instrument, warn};

/// Placeholder for a missing tier value. Records are never dropped.
pub const UNKNOWN_TIER_VALUE: &str = "Desconhecido";

/// Sentinel node shown when there is not enough data for a graph.
pub const NO_DATA_NODE: &str = "No Data";

/// Sentinel node shown when building the graph failed.
pub const ERROR_NODE: &str = "Error";

/// One level of the attribution funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunnelTier {
    Source,
    Campaign,
    AdSet,
    Ad,
}

impl FunnelTier {
    /// Tiers in node emission order.
    pub const ALL: [FunnelTier; 4] = [Self::Source, Self::Campaign, Self::AdSet, Self::Ad];

    pub fn label(self) -> &'static str {
        match self {
            Self::Source => "Fonte",
            Self::Campaign => "Campanha",
            Self::AdSet => "Conjunto",
            Self::Ad => "Anúncio",
        }
    }

    pub fn field(self) -> LeadField {
        match self {
            Self::Source => LeadField::Source,
            Self::Campaign => LeadField::Campaign,
            Self::AdSet => LeadField::AdSet,
            Self::Ad => LeadField::Ad,
        }
    }

    /// `"<label>: <value>"`
    pub fn node_name(self, value: &str) -> String {
        format!("{}: {}", self.label(), value)
    }
}

/// Result of building the flow graph.
///
/// Insufficient data and internal failure are kept apart here; only
/// [`display_graph`](Self::display_graph) collapses them into sentinel nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum FlowGraphOutcome {
    Ready(FlowGraph),
    Empty,
    Failed { reason: String },
}

impl FlowGraphOutcome {
    /// Classify a build result: graphs with at most one node or no links are
    /// reported as `Empty`, errors as `Failed`.
    pub fn from_build(result: Result<FlowGraph>) -> Self {
        match result {
            Ok(graph) if graph.nodes.len() <= 1 || graph.links.is_empty() => Self::Empty,
            Ok(graph) => Self::Ready(graph),
            Err(e) => {
                error!(error = %e, "Flow graph construction failed");
                Self::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    pub fn graph(&self) -> Option<&FlowGraph> {
        match self {
            Self::Ready(graph) => Some(graph),
            _ => None,
        }
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, Self::Ready(_))
    }

    /// Graph to hand to a renderer, with sentinel nodes for non-ready outcomes.
    pub fn display_graph(&self) -> FlowGraph {
        match self {
            Self::Ready(graph) => graph.clone(),
            Self::Empty => FlowGraph::sentinel(NO_DATA_NODE),
            Self::Failed { .. } => FlowGraph::sentinel(ERROR_NODE),
        }
    }
}

/// Builds the four-tier flow graph.
#[derive(Debug, Clone, Copy, Default)]
pub struct FlowGraphBuilder;

impl FlowGraphBuilder {
    pub fn new() -> Self {
        Self
    }

    /// Build and validate the raw graph without sentinel handling.
    pub fn build(&self, records: &[LeadRecord]) -> Result<FlowGraph> {
        let mut tiers: [Grouping<&str, ()>; 4] = Default::default();
        let mut edges: [Grouping<(&str, &str), ()>; 3] = Default::default();

        for record in records {
            let path = FunnelTier::ALL
                .map(|tier| record.field(tier.field()).unwrap_or(UNKNOWN_TIER_VALUE));

            for (grouping, value) in tiers.iter_mut().zip(path) {
                grouping.insert(value, ());
            }
            for (step, grouping) in edges.iter_mut().enumerate() {
                grouping.insert((path[step], path[step + 1]), ());
            }
        }

        let mut nodes = Vec::new();
        let mut index: HashMap<String, usize> = HashMap::new();
        for (tier, grouping) in FunnelTier::ALL.iter().zip(&tiers) {
            for value in grouping.keys() {
                let name = tier.node_name(value);
                index.insert(name.clone(), nodes.len());
                nodes.push(FlowNode { name });
            }
        }

        let mut links = Vec::new();
        for (step, grouping) in edges.iter().enumerate() {
            let (from_tier, to_tier) = (FunnelTier::ALL[step], FunnelTier::ALL[step + 1]);
            for ((from, to), value) in grouping.counts() {
                let source = index.get(&from_tier.node_name(from));
                let target = index.get(&to_tier.node_name(to));
                match (source, target) {
                    (Some(&source), Some(&target)) => links.push(FlowLink {
                        source,
                        target,
                        value,
                    }),
                    _ => warn!(from, to, "Skipping flow edge with unresolved endpoint"),
                }
            }
        }

        let graph = FlowGraph { nodes, links };
        validate_graph(&graph)?;
        Ok(graph)
    }
}

impl DataAggregator for FlowGraphBuilder {
    type Output = FlowGraphOutcome;

    #[instrument(skip_all, fields(records = records.len()))]
    fn aggregate(&self, records: &[LeadRecord]) -> FlowGraphOutcome {
        let outcome = FlowGraphOutcome::from_build(self.build(records));
        if let Some(graph) = outcome.graph() {
            debug!(
                nodes = graph.nodes.len(),
                links = graph.links.len(),
                "Built flow graph"
            );
        }
        outcome
    }
}

/// Check the structural invariants of a flow graph: every link points at two
/// distinct existing nodes, carries a positive value, and appears once.
pub fn validate_graph(graph: &FlowGraph) -> Result<()> {
    let node_count = graph.nodes.len();
    let mut seen = HashSet::new();

    for link in &graph.links {
        ensure!(
            link.source < node_count && link.target < node_count,
            aggregation: "link {} -> {} points outside {} nodes",
            link.source,
            link.target,
            node_count
        );
        ensure!(link.source != link.target, aggregation: "self-loop on node {}", link.source);
        ensure!(
            link.value > 0,
            aggregation: "link {} -> {} has zero weight",
            link.source,
            link.target
        );
        ensure!(
            seen.insert((link.source, link.target)),
            aggregation: "duplicate link {} -> {}",
            link.source,
            link.target
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use leadboard_common::test_utils::{lead, LeadBuilder};
    use serde_json::json;

    fn names(graph: &FlowGraph) -> Vec<&str> {
        graph.nodes.iter().map(|n| n.name.as_str()).collect()
    }

    #[test]
    fn test_single_path_graph() {
        let records = vec![
            lead(1, ["Google", "Brand", "Desktop", "Banner A"], "2024-01-01T10:00:00"),
            lead(2, ["Google", "Brand", "Desktop", "Banner A"], "2024-01-01T12:00:00"),
        ];

        let outcome = FlowGraphBuilder::new().aggregate(&records);
        let graph = outcome.graph().unwrap();
        assert_eq!(
            names(graph),
            vec![
                "Fonte: Google",
                "Campanha: Brand",
                "Conjunto: Desktop",
                "Anúncio: Banner A"
            ]
        );
        assert_eq!(
            graph.links,
            vec![
                FlowLink { source: 0, target: 1, value: 2 },
                FlowLink { source: 1, target: 2, value: 2 },
                FlowLink { source: 2, target: 3, value: 2 },
            ]
        );
    }

    #[test]
    fn test_equal_values_on_different_tiers_stay_distinct() {
        let records = vec![lead(
            1,
            ["Retargeting", "Retargeting", "Retargeting", "Retargeting"],
            "2024-01-01",
        )];

        let graph = FlowGraphBuilder::new().build(&records).unwrap();
        assert_eq!(graph.nodes.len(), 4);
        assert_eq!(graph.links.len(), 3);
        assert!(graph.links.iter().all(|l| l.source != l.target));
    }

    #[test]
    fn test_missing_tiers_become_unknown() {
        let records = vec![LeadBuilder::new(1).campaign("Brand").ad("Video").build()];

        let graph = FlowGraphBuilder::new().build(&records).unwrap();
        assert_eq!(
            names(&graph),
            vec![
                "Fonte: Desconhecido",
                "Campanha: Brand",
                "Conjunto: Desconhecido",
                "Anúncio: Video"
            ]
        );
    }

    #[test]
    fn test_edge_keys_are_structured() {
        // Raw values containing the arrow must not collide with another pair.
        let records = vec![
            lead(1, ["a->b", "c", "x", "y"], "2024-01-01"),
            lead(2, ["a", "b->c", "x", "y"], "2024-01-01"),
        ];

        let graph = FlowGraphBuilder::new().build(&records).unwrap();
        let first_step: Vec<&FlowLink> = graph.links.iter().take(2).collect();
        assert_eq!(first_step.len(), 2);
        assert_eq!(first_step[0].value, 1);
        assert_eq!(first_step[1].value, 1);
    }

    #[test]
    fn test_branching_links_merge_counts() {
        let records = vec![
            lead(1, ["Google", "Brand", "Mobile", "Video"], "2024-01-01"),
            lead(2, ["Google", "Brand", "Desktop", "Banner"], "2024-01-01"),
            lead(3, ["Facebook", "Brand", "Mobile", "Video"], "2024-01-01"),
        ];

        let graph = FlowGraphBuilder::new().build(&records).unwrap();
        // Fonte: Google, Fonte: Facebook, Campanha: Brand, Conjunto x2, Anúncio x2
        assert_eq!(graph.nodes.len(), 7);
        let google_brand = graph
            .links
            .iter()
            .find(|l| l.source == 0 && l.target == 2)
            .unwrap();
        assert_eq!(google_brand.value, 2);
        let mobile_video = graph
            .links
            .iter()
            .find(|l| graph.nodes[l.source].name == "Conjunto: Mobile")
            .unwrap();
        assert_eq!(mobile_video.value, 2);
        assert!(validate_graph(&graph).is_ok());
    }

    #[test]
    fn test_empty_input_is_no_data() {
        let outcome = FlowGraphBuilder::new().aggregate(&[]);
        assert_eq!(outcome, FlowGraphOutcome::Empty);
        assert_eq!(
            serde_json::to_value(outcome.display_graph()).unwrap(),
            json!({"nodes": [{"name": "No Data"}], "links": []})
        );
    }

    #[test]
    fn test_invalid_graph_is_failed() {
        let graph = FlowGraph {
            nodes: vec![FlowNode::new("Fonte: A"), FlowNode::new("Campanha: B")],
            links: vec![FlowLink { source: 0, target: 5, value: 1 }],
        };

        let outcome = FlowGraphOutcome::from_build(validate_graph(&graph).map(|_| graph));
        assert!(matches!(outcome, FlowGraphOutcome::Failed { .. }));
        assert_eq!(outcome.display_graph(), FlowGraph::sentinel(ERROR_NODE));
    }

    #[test]
    fn test_validate_rejects_self_loops_and_duplicates() {
        let nodes = vec![FlowNode::new("a"), FlowNode::new("b")];
        let self_loop = FlowGraph {
            nodes: nodes.clone(),
            links: vec![FlowLink { source: 1, target: 1, value: 1 }],
        };
        let duplicate = FlowGraph {
            nodes,
            links: vec![
                FlowLink { source: 0, target: 1, value: 1 },
                FlowLink { source: 0, target: 1, value: 2 },
            ],
        };

        assert!(validate_graph(&self_loop).is_err());
        assert!(validate_graph(&duplicate).is_err());
    }

    #[test]
    fn test_outcome_serializes_with_status_tag() {
        let ready = FlowGraphOutcome::Ready(FlowGraph::sentinel("x"));
        let value = serde_json::to_value(&ready).unwrap();
        assert_eq!(value["status"], "ready");
        assert_eq!(value["nodes"][0]["name"], "x");

        let failed = FlowGraphOutcome::Failed {
            reason: "boom".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&failed).unwrap(),
            json!({"status": "failed", "reason": "boom"})
        );
        assert_eq!(
            serde_json::to_value(FlowGraphOutcome::Empty).unwrap(),
            json!({"status": "empty"})
        );
    }
}
