//! Timeline estimation and critical-path analysis

use crate::duration::parse_deadline;
use mandate_domain::Rule;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::warn;

/// A role with more rules than this is reported as a bottleneck
const BOTTLENECK_TASK_THRESHOLD: usize = 2;

/// Durations beyond this many days draw a warning
const LONG_DURATION_DAYS: u64 = 60;

/// One scheduled rule in the execution timeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    /// Id of the scheduled rule
    pub rule_id: String,

    /// The rule's action text
    pub task: String,

    /// Who executes the task
    pub responsible_role: String,

    /// First day of execution (day 0 = policy start)
    pub start_day: u64,

    /// Day the task completes
    pub end_day: u64,

    /// Task duration in days
    pub duration: u64,

    /// Ids of rules that must complete first
    pub dependencies: Vec<String>,
}

/// Complete execution timeline for one policy's rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineReport {
    /// Day the last task completes; 0 for an empty rule list
    pub total_estimated_days: u64,

    /// Longest dependency chain, in start-to-finish order
    pub critical_path: Vec<String>,

    /// All entries, sorted by start day
    pub timeline: Vec<TimelineEntry>,

    /// Overloaded roles with parallelization suggestions
    pub bottlenecks: Vec<String>,

    /// Feasibility warnings (very long or zero durations, unstable
    /// scheduling)
    pub warnings: Vec<String>,
}

/// Estimates execution timelines from rule text and deadlines
///
/// Dependencies are inferred heuristically from the rule text, not
/// declared by the caller; scheduling propagates start days to a fixed
/// point, bounded so cyclic inference output terminates with a warning
/// instead of hanging.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimelineEstimator;

impl TimelineEstimator {
    /// Create an estimator
    pub fn new() -> Self {
        Self
    }

    /// Generate the execution timeline for a policy's rules
    pub fn generate_execution_timeline(&self, rules: &[Rule]) -> TimelineReport {
        let dependencies = self.detect_dependencies(rules);

        let durations: HashMap<&str, u64> = rules
            .iter()
            .map(|r| (r.rule_id.as_str(), parse_deadline(&r.deadline)))
            .collect();

        let mut warnings = Vec::new();
        let (start_days, end_days) =
            self.schedule(rules, &dependencies, &durations, &mut warnings);

        let mut timeline: Vec<TimelineEntry> = rules
            .iter()
            .map(|rule| {
                let rid = rule.rule_id.as_str();
                TimelineEntry {
                    rule_id: rule.rule_id.clone(),
                    task: rule.action.clone(),
                    responsible_role: rule.responsible_role.clone(),
                    start_day: start_days.get(rid).copied().unwrap_or(0),
                    end_day: end_days.get(rid).copied().unwrap_or(0),
                    duration: durations.get(rid).copied().unwrap_or(0),
                    dependencies: dependencies.get(rid).cloned().unwrap_or_default(),
                }
            })
            .collect();

        let total_estimated_days = end_days.values().copied().max().unwrap_or(0);
        let critical_path = self.find_critical_path(&timeline, total_estimated_days);

        warnings.extend(self.duration_warnings(&timeline));
        let bottlenecks = self.detect_bottlenecks(rules);

        timeline.sort_by_key(|entry| entry.start_day);

        TimelineReport {
            total_estimated_days,
            critical_path,
            timeline,
            bottlenecks,
            warnings,
        }
    }

    /// Infer rule dependencies from text patterns
    ///
    /// A rule depends on another when its text says "after verification"
    /// and the other rule's action verifies something, or when it
    /// disburses a scholarship and a verification rule exists. Duplicate
    /// edges are suppressed; cycles are not detected here (the scheduler
    /// cap is the safety bound).
    pub fn detect_dependencies(&self, rules: &[Rule]) -> HashMap<String, Vec<String>> {
        let mut deps: HashMap<String, Vec<String>> = HashMap::with_capacity(rules.len());

        for rule in rules {
            let action = rule.action.to_lowercase();
            let conditions = rule.conditions.join(" ").to_lowercase();
            let mut rule_deps: Vec<String> = Vec::new();

            if action.contains("after verification") || conditions.contains("after verification") {
                for other in rules {
                    if other.rule_id == rule.rule_id {
                        continue;
                    }
                    if other.action.to_lowercase().contains("verif")
                        && !rule_deps.contains(&other.rule_id)
                    {
                        rule_deps.push(other.rule_id.clone());
                    }
                }
            }

            if action.contains("scholarship") && !action.contains("verif") {
                for other in rules {
                    if other.action.to_lowercase().contains("verif")
                        && !rule_deps.contains(&other.rule_id)
                    {
                        rule_deps.push(other.rule_id.clone());
                    }
                }
            }

            deps.insert(rule.rule_id.clone(), rule_deps);
        }

        deps
    }

    /// Propagate start days until stable, or until the iteration cap
    ///
    /// The cap (`rules.len() + 1`) guarantees termination when the
    /// inferred dependencies are cyclic; hitting it records a warning
    /// and leaves a best-effort schedule.
    fn schedule<'a>(
        &self,
        rules: &'a [Rule],
        dependencies: &HashMap<String, Vec<String>>,
        durations: &HashMap<&'a str, u64>,
        warnings: &mut Vec<String>,
    ) -> (HashMap<&'a str, u64>, HashMap<&'a str, u64>) {
        let mut start_days: HashMap<&str, u64> =
            rules.iter().map(|r| (r.rule_id.as_str(), 0)).collect();
        let mut end_days: HashMap<&str, u64> = rules
            .iter()
            .map(|r| {
                let rid = r.rule_id.as_str();
                (rid, durations.get(rid).copied().unwrap_or(0))
            })
            .collect();

        let cap = rules.len() + 1;
        let mut iterations = 0;
        loop {
            let mut changed = false;

            for rule in rules {
                let rid = rule.rule_id.as_str();
                let Some(rule_deps) = dependencies.get(rid) else {
                    continue;
                };
                if rule_deps.is_empty() {
                    continue;
                }

                // Dependencies missing from the map are ignored rather
                // than fatal.
                let candidate_start = rule_deps
                    .iter()
                    .filter_map(|dep| end_days.get(dep.as_str()).copied())
                    .max()
                    .unwrap_or(0);

                let current_start = start_days.get(rid).copied().unwrap_or(0);
                if candidate_start > current_start {
                    let duration = durations.get(rid).copied().unwrap_or(0);
                    start_days.insert(rid, candidate_start);
                    end_days.insert(rid, candidate_start + duration);
                    changed = true;
                }
            }

            iterations += 1;
            if !changed {
                break;
            }
            if iterations >= cap {
                warn!(cap, "scheduling did not stabilize; dependency cycle suspected");
                warnings.push(format!(
                    "Scheduling did not stabilize within {} iterations; dependency cycle suspected, schedule may be inconsistent.",
                    cap
                ));
                break;
            }
        }

        (start_days, end_days)
    }

    /// Walk backward from the last-finishing rule along the dependencies
    /// that forced each start day
    fn find_critical_path(&self, timeline: &[TimelineEntry], total_days: u64) -> Vec<String> {
        let Some(terminal) = timeline.iter().find(|t| t.end_day == total_days) else {
            return Vec::new();
        };

        let mut path = vec![terminal.rule_id.clone()];
        let mut current = terminal;

        loop {
            if current.dependencies.is_empty() {
                break;
            }
            let critical_dep = timeline.iter().find(|t| {
                current.dependencies.contains(&t.rule_id) && t.end_day == current.start_day
            });
            match critical_dep {
                Some(dep) => {
                    path.push(dep.rule_id.clone());
                    current = dep;
                }
                None => break,
            }
        }

        path.reverse();
        path
    }

    /// Roles assigned more tasks than one owner can run sequentially
    fn detect_bottlenecks(&self, rules: &[Rule]) -> Vec<String> {
        let mut counts: Vec<(&str, usize)> = Vec::new();
        for rule in rules {
            let role = rule.responsible_role.as_str();
            if role.is_empty() {
                continue;
            }
            match counts.iter_mut().find(|(r, _)| *r == role) {
                Some((_, count)) => *count += 1,
                None => counts.push((role, 1)),
            }
        }

        counts
            .into_iter()
            .filter(|(_, count)| *count > BOTTLENECK_TASK_THRESHOLD)
            .map(|(role, count)| {
                format!(
                    "Role '{}' is a bottleneck ({} tasks). Suggest parallelization.",
                    role, count
                )
            })
            .collect()
    }

    fn duration_warnings(&self, timeline: &[TimelineEntry]) -> Vec<String> {
        let mut warnings = Vec::new();
        for entry in timeline {
            if entry.duration > LONG_DURATION_DAYS {
                warnings.push(format!(
                    "Rule {} has a very long duration ({} days).",
                    entry.rule_id, entry.duration
                ));
            }
            if entry.duration == 0 {
                warnings.push(format!(
                    "Rule {} has 'immediate' execution. Ensure feasible.",
                    entry.rule_id
                ));
            }
        }
        warnings
    }
}
