//! Stakeholder network analysis
//!
//! Two bodies are connected when they share at least one primary
//! stakeholder; the number of shared stakeholders is the edge weight.
//! The escalation walk follows `Escalation_To` links upwards.

use crate::models::GovernanceBody;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet, VecDeque};

/// Undirected weighted edge between two bodies
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderEdge {
    pub source: String,
    pub target: String,
    /// Number of shared stakeholders (always > 0)
    pub weight: usize,
    pub shared: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StakeholderGraph {
    /// Every body, connected or not, in store order
    pub nodes: Vec<String>,
    pub edges: Vec<StakeholderEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeCentrality {
    pub name: String,
    pub degree: usize,
    pub centrality: f64,
}

/// One hop on an escalation route
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EscalationStep {
    pub body: String,
    /// Hops from the starting body
    pub distance: u32,
}

/// Network analyzer over a snapshot of bodies
pub struct NetworkAnalyzer;

impl NetworkAnalyzer {
    /// Connect every pair of bodies whose stakeholder sets intersect
    pub fn cross_reference(bodies: &[GovernanceBody]) -> StakeholderGraph {
        let stakeholder_sets: Vec<HashSet<&str>> = bodies
            .iter()
            .map(|b| b.primary_stakeholders.iter().collect())
            .collect();

        let mut edges = Vec::new();
        for (i, a) in bodies.iter().enumerate() {
            for (j, b) in bodies.iter().enumerate().skip(i + 1) {
                // Keep the shared names in the first body's tag order
                let shared: Vec<String> = a
                    .primary_stakeholders
                    .iter()
                    .filter(|s| stakeholder_sets[j].contains(s))
                    .map(str::to_string)
                    .collect();

                if shared.is_empty() {
                    continue;
                }
                edges.push(StakeholderEdge {
                    source: a.name.clone(),
                    target: b.name.clone(),
                    weight: shared.len(),
                    shared,
                });
            }
        }

        StakeholderGraph {
            nodes: bodies.iter().map(|b| b.name.clone()).collect(),
            edges,
        }
    }

    /// Degree over `n - 1` for every node; zero when `n <= 1`
    pub fn degree_centrality(graph: &StakeholderGraph) -> Vec<NodeCentrality> {
        let mut degrees: HashMap<&str, usize> = HashMap::new();
        for edge in &graph.edges {
            *degrees.entry(edge.source.as_str()).or_insert(0) += 1;
            *degrees.entry(edge.target.as_str()).or_insert(0) += 1;
        }

        let n = graph.nodes.len();
        graph
            .nodes
            .iter()
            .map(|name| {
                let degree = degrees.get(name.as_str()).copied().unwrap_or(0);
                let centrality = if n <= 1 {
                    0.0
                } else {
                    degree as f64 / (n - 1) as f64
                };
                NodeCentrality {
                    name: name.clone(),
                    degree,
                    centrality,
                }
            })
            .collect()
    }

    /// Every body reachable from `start` through `Escalation_To`, nearest first.
    /// Cycles are visited once.
    pub fn escalation_route(bodies: &[GovernanceBody], start: &str) -> Vec<EscalationStep> {
        let targets: HashMap<&str, Vec<&str>> = bodies
            .iter()
            .map(|b| (b.name.as_str(), b.escalation_to.iter().collect()))
            .collect();

        let mut route = Vec::new();
        let mut visited: HashSet<&str> = HashSet::from([start]);
        let mut queue: VecDeque<(&str, u32)> = VecDeque::from([(start, 0)]);

        while let Some((name, distance)) = queue.pop_front() {
            let Some(next) = targets.get(name) else {
                continue;
            };
            for &target in next {
                if visited.insert(target) {
                    route.push(EscalationStep {
                        body: target.to_string(),
                        distance: distance + 1,
                    });
                    queue.push_back((target, distance + 1));
                }
            }
        }

        route
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TagList;
    use crate::registry::sample;
    use pretty_assertions::assert_eq;

    fn with_stakeholders(name: &str, stakeholders: &[&str]) -> GovernanceBody {
        let mut body = sample::governance_bodies().remove(0);
        body.name = name.to_string();
        body.primary_stakeholders = TagList::new(stakeholders.iter().copied());
        body
    }

    #[test]
    fn test_cross_reference_of_sample() {
        let bodies = sample::governance_bodies();
        let graph = NetworkAnalyzer::cross_reference(&bodies);

        assert_eq!(graph.nodes.len(), 8);
        assert_eq!(graph.edges.len(), 6);

        let procurement = graph
            .edges
            .iter()
            .find(|e| e.source == "Commercial Gateway Review Board")
            .unwrap();
        assert_eq!(procurement.target, "Procuring Board");
        assert_eq!(procurement.weight, 2);
        assert_eq!(
            procurement.shared,
            vec!["Director of Commercial".to_string(), "Finance Business Partners".to_string()]
        );
    }

    #[test]
    fn test_centrality_bounds() {
        let bodies = sample::governance_bodies();
        let graph = NetworkAnalyzer::cross_reference(&bodies);
        let centrality = NetworkAnalyzer::degree_centrality(&graph);

        assert_eq!(centrality.len(), bodies.len());
        assert!(centrality
            .iter()
            .all(|c| (0.0..=1.0).contains(&c.centrality)));

        let forum = centrality
            .iter()
            .find(|c| c.name == "Service Innovation Forum")
            .unwrap();
        assert_eq!(forum.degree, 2);
        assert!((forum.centrality - 2.0 / 7.0).abs() < 1e-9);
    }

    #[test]
    fn test_two_connected_nodes_are_fully_central() {
        let bodies = vec![
            with_stakeholders("A", &["Residents"]),
            with_stakeholders("B", &["Residents", "Councillors"]),
        ];
        let graph = NetworkAnalyzer::cross_reference(&bodies);
        let centrality = NetworkAnalyzer::degree_centrality(&graph);
        assert_eq!(centrality.iter().map(|c| c.centrality).collect::<Vec<_>>(), vec![1.0, 1.0]);
    }

    #[test]
    fn test_single_or_empty_graph_is_zero() {
        let graph = NetworkAnalyzer::cross_reference(&[with_stakeholders("Solo", &["Residents"])]);
        let centrality = NetworkAnalyzer::degree_centrality(&graph);
        assert_eq!(centrality[0].centrality, 0.0);

        assert!(NetworkAnalyzer::degree_centrality(&StakeholderGraph::default()).is_empty());
    }

    #[test]
    fn test_disconnected_bodies_are_still_nodes() {
        let bodies = vec![
            with_stakeholders("A", &["Residents"]),
            with_stakeholders("B", &["Councillors"]),
            with_stakeholders("C", &[]),
        ];
        let graph = NetworkAnalyzer::cross_reference(&bodies);
        assert_eq!(graph.nodes, vec!["A", "B", "C"]);
        assert!(graph.edges.is_empty());
    }

    #[test]
    fn test_escalation_route() {
        let bodies = sample::governance_bodies();
        let route = NetworkAnalyzer::escalation_route(&bodies, "Commercial Gateway Review Board");
        assert_eq!(
            route,
            vec![
                EscalationStep { body: "Procuring Board".into(), distance: 1 },
                EscalationStep { body: "Executive Leadership Team".into(), distance: 2 },
                EscalationStep { body: "Cabinet".into(), distance: 3 },
            ]
        );
        assert!(NetworkAnalyzer::escalation_route(&bodies, "Cabinet").is_empty());
    }

    #[test]
    fn test_escalation_route_stops_on_cycles() {
        let mut bodies = sample::governance_bodies();
        bodies[0].escalation_to = TagList::new(["Commercial Gateway Review Board"]);
        let route = NetworkAnalyzer::escalation_route(&bodies, "Commercial Gateway Review Board");
        assert_eq!(route.len(), 3);
    }
}
