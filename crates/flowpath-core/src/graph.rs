// Rust guideline compliant 2026-10-12

//! Workflow graph module.
//!
//! A `WorkflowGraph` maps status names to their outgoing transitions for one
//! issue type, as observed through the tracker. Status names are compared
//! case-insensitively everywhere; the tracker is not consistent about casing.

use crate::error::{Result, WorkflowError};
use crate::models::{fold, same_status, Transition};
use chrono::{DateTime, Utc};
use petgraph::dot::Dot;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::Bfs;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use tabled::{builder::Builder, settings::Style};

/// Directed graph of one issue type's workflow.
#[derive(Debug, Clone, PartialEq)]
pub struct WorkflowGraph {
    /// Issue type name ("Task").
    pub issue_type: String,
    /// Issue type identifier.
    pub issue_type_id: String,
    /// Issue key the graph was discovered from.
    pub discovered_from: Option<String>,
    /// When discovery completed.
    pub discovered_at: Option<DateTime<Utc>>,
    states: BTreeMap<String, Vec<Transition>>,
}

/// Persisted form of a `WorkflowGraph`.
///
/// The issue type name is not part of the record; it is the key the record
/// is stored under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowRecord {
    /// Issue type identifier.
    pub id: String,
    /// Issue key the graph was discovered from.
    #[serde(default)]
    pub discovered_from: Option<String>,
    /// ISO-8601 discovery timestamp.
    #[serde(default, with = "crate::timestamp::option")]
    pub discovered_at: Option<DateTime<Utc>>,
    /// Outgoing transitions per status.
    #[serde(default)]
    pub states: BTreeMap<String, Vec<Transition>>,
}

impl WorkflowGraph {
    /// Creates an empty graph for an issue type.
    pub fn new(issue_type: impl Into<String>, issue_type_id: impl Into<String>) -> Self {
        Self {
            issue_type: issue_type.into(),
            issue_type_id: issue_type_id.into(),
            discovered_from: None,
            discovered_at: None,
            states: BTreeMap::new(),
        }
    }

    /// Replaces all outgoing transitions for `status`.
    ///
    /// An existing entry is matched case-insensitively and keeps its original
    /// spelling. The last write for a status wins.
    pub fn add_state(&mut self, status: &str, transitions: Vec<Transition>) {
        let key = self
            .state_key(status)
            .map(str::to_string)
            .unwrap_or_else(|| status.to_string());
        self.states.insert(key, transitions);
    }

    /// Returns the recorded transitions for `status`.
    ///
    /// Unknown statuses have no transitions; this is not an error.
    pub fn transitions_from(&self, status: &str) -> &[Transition] {
        self.state_key(status)
            .and_then(|key| self.states.get(key))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns the stored spelling of `status` if it has recorded transitions.
    pub fn state_key(&self, status: &str) -> Option<&str> {
        let wanted = fold(status);
        self.states
            .keys()
            .find(|key| fold(key) == wanted)
            .map(String::as_str)
    }

    /// Returns true if transitions have been recorded for `status`.
    pub fn has_state(&self, status: &str) -> bool {
        self.state_key(status).is_some()
    }

    /// Returns the recorded states and their transitions.
    pub fn states(&self) -> &BTreeMap<String, Vec<Transition>> {
        &self.states
    }

    /// Number of statuses with recorded transitions.
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Returns true if nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    /// Returns every known status: recorded states plus transition targets.
    pub fn all_states(&self) -> BTreeSet<String> {
        self.display_names().into_values().collect()
    }

    /// Returns transition targets that have no recorded transitions yet.
    pub fn unexplored(&self) -> BTreeSet<String> {
        self.states
            .values()
            .flatten()
            .filter(|t| !self.has_state(&t.to))
            .map(|t| t.to.clone())
            .collect()
    }

    /// Breadth-first search for the shortest path whose last edge satisfies `goal`.
    ///
    /// The frontier is expanded in the insertion order of each state's
    /// transitions, so among equally short paths the first one recorded wins.
    /// Returns `None` if no known path reaches a matching edge.
    pub fn search<F>(&self, from: &str, goal: F) -> Option<Vec<Transition>>
    where
        F: Fn(&Transition) -> bool,
    {
        let index: HashMap<String, &[Transition]> = self
            .states
            .iter()
            .map(|(status, transitions)| (fold(status), transitions.as_slice()))
            .collect();
        let start = fold(from);
        let mut visited: HashSet<String> = HashSet::from([start.clone()]);
        let mut parents: HashMap<String, (String, Transition)> = HashMap::new();
        let mut queue: VecDeque<String> = VecDeque::from([start.clone()]);

        while let Some(current) = queue.pop_front() {
            let outgoing = index.get(&current).copied().unwrap_or(&[]);
            for transition in outgoing {
                if goal(transition) {
                    let mut path = Self::unwind(&parents, &start, &current);
                    path.push(transition.clone());
                    return Some(path);
                }

                let next = fold(&transition.to);
                if visited.insert(next.clone()) {
                    parents.insert(next.clone(), (current.clone(), transition.clone()));
                    queue.push_back(next);
                }
            }
        }

        None
    }

    /// Rebuilds the transition chain from `start` to `end` out of the predecessor map.
    fn unwind(
        parents: &HashMap<String, (String, Transition)>,
        start: &str,
        end: &str,
    ) -> Vec<Transition> {
        let mut path = Vec::new();
        let mut cursor = end.to_string();
        while cursor != start {
            match parents.get(&cursor) {
                Some((parent, transition)) => {
                    path.push(transition.clone());
                    cursor = parent.clone();
                }
                None => break,
            }
        }
        path.reverse();
        path
    }

    /// Finds the shortest known route from `from` towards `target`.
    ///
    /// A destination status match is preferred; only if none exists is the
    /// target treated as a fragment of a transition name ("start" for
    /// "Start Progress").
    pub fn route(&self, from: &str, target: &str) -> Option<Vec<Transition>> {
        self.search(from, |t| same_status(&t.to, target))
            .or_else(|| self.search(from, |t| t.matches_target(target)))
    }

    /// Computes the shortest path from one status to another.
    ///
    /// # Arguments
    ///
    /// * `from` - Starting status
    /// * `to` - Target status name, or a fragment of a transition name
    ///
    /// # Returns
    ///
    /// The ordered transitions to execute; empty if `from` already is `to`.
    ///
    /// # Errors
    ///
    /// Returns `WorkflowError::PathNotFound` with the set of statuses
    /// reachable from `from` if the known graph has no route.
    pub fn path_to(&self, from: &str, to: &str) -> Result<Vec<Transition>> {
        if same_status(from, to) {
            return Ok(Vec::new());
        }

        self.route(from, to).ok_or_else(|| {
            WorkflowError::PathNotFound {
                from: from.to_string(),
                to: to.to_string(),
                reachable: self.reachable_from(from),
                committed: Vec::new(),
            }
            .into()
        })
    }

    /// Returns every status reachable from `status`, including itself.
    pub fn reachable_from(&self, status: &str) -> BTreeSet<String> {
        let (graph, nodes) = self.build_digraph();
        let Some(&start) = nodes.get(&fold(status)) else {
            return BTreeSet::from([status.to_string()]);
        };

        let mut reachable = BTreeSet::new();
        let mut bfs = Bfs::new(&graph, start);
        while let Some(node) = bfs.next(&graph) {
            reachable.insert(graph[node].clone());
        }
        reachable
    }

    /// Maps folded status names to the spelling shown to users.
    ///
    /// Recorded state keys win over transition targets.
    fn display_names(&self) -> BTreeMap<String, String> {
        let mut names: BTreeMap<String, String> = self
            .states
            .keys()
            .map(|key| (fold(key), key.clone()))
            .collect();
        for transition in self.states.values().flatten() {
            names
                .entry(fold(&transition.to))
                .or_insert_with(|| transition.to.clone());
        }
        names
    }

    /// Builds a petgraph view of the workflow, keyed by folded status name.
    fn build_digraph(&self) -> (DiGraph<String, Transition>, HashMap<String, NodeIndex>) {
        let mut graph = DiGraph::new();
        let mut nodes = HashMap::new();

        for (folded, display) in self.display_names() {
            let idx = graph.add_node(display);
            nodes.insert(folded, idx);
        }

        for (status, transitions) in &self.states {
            let Some(&from_idx) = nodes.get(&fold(status)) else {
                continue;
            };
            for transition in transitions {
                if let Some(&to_idx) = nodes.get(&fold(&transition.to)) {
                    graph.add_edge(from_idx, to_idx, transition.clone());
                }
            }
        }

        (graph, nodes)
    }
}

impl WorkflowGraph {
    /// Renders the workflow as a simple directed listing.
    pub fn to_ascii(&self) -> String {
        let mut output = format!("Workflow: {} ({})\n", self.issue_type, self.issue_type_id);
        if let Some(key) = &self.discovered_from {
            output.push_str(&format!("Discovered from: {}\n", key));
        }
        if let Some(at) = &self.discovered_at {
            output.push_str(&format!("Discovered at: {}\n", crate::timestamp::format(at)));
        }

        for (status, transitions) in &self.states {
            output.push_str(&format!("\n[{}]\n", status));
            if transitions.is_empty() {
                output.push_str("  (no transitions)\n");
            }
            for t in transitions {
                output.push_str(&format!("  --{}--> {}\n", t.name, t.to));
            }
        }

        output
    }

    /// Renders the workflow as a table of state, transition, id, and target.
    pub fn to_table(&self) -> String {
        let mut builder = Builder::default();
        builder.push_record(vec!["State", "Transition", "ID", "To"]);

        for (status, transitions) in &self.states {
            if transitions.is_empty() {
                builder.push_record(vec![status.as_str(), "-", "-", "-"]);
            }
            for t in transitions {
                builder.push_record(vec![
                    status.as_str(),
                    t.name.as_str(),
                    t.id.as_str(),
                    t.to.as_str(),
                ]);
            }
        }

        let mut table = builder.build();
        table.with(Style::modern());
        table.to_string()
    }

    /// Renders the workflow in Graphviz DOT format, edges labelled by transition name.
    pub fn to_dot(&self) -> String {
        let (graph, _) = self.build_digraph();
        let labelled = graph.map(|_, status| status.clone(), |_, t| t.name.clone());
        format!("{}", Dot::new(&labelled))
    }
}

impl Serialize for WorkflowGraph {
    /// Serializes as the persisted record plus the issue type name.
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct View<'a> {
            issue_type: &'a str,
            #[serde(flatten)]
            record: WorkflowRecord,
        }

        View {
            issue_type: &self.issue_type,
            record: self.to_record(),
        }
        .serialize(serializer)
    }
}

impl WorkflowGraph {
    /// Converts the graph into its persisted form.
    pub fn to_record(&self) -> WorkflowRecord {
        WorkflowRecord {
            id: self.issue_type_id.clone(),
            discovered_from: self.discovered_from.clone(),
            discovered_at: self.discovered_at,
            states: self.states.clone(),
        }
    }

    /// Restores a graph stored under `issue_type`.
    pub fn from_record(issue_type: &str, record: WorkflowRecord) -> Self {
        Self {
            issue_type: issue_type.to_string(),
            issue_type_id: record.id,
            discovered_from: record.discovered_from,
            discovered_at: record.discovered_at,
            states: record.states,
        }
    }
}
