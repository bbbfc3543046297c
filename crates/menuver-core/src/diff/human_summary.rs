//! Human-readable summary renderer for version diffs.

use crate::diff::model::VersionDiff;

/// Render a plain-text summary of a [`VersionDiff`]
///
/// Informational only; the structured diff is authoritative.
pub fn render_diff_summary(diff: &VersionDiff) -> String {
    let mut out = String::new();

    if diff.is_empty() {
        out.push_str("No changes.\n");
        return out;
    }

    out.push_str(&format!(
        "{} added, {} removed, {} modified\n",
        diff.added.len(),
        diff.removed.len(),
        diff.modified.len()
    ));

    for node in &diff.added {
        out.push_str(&format!("+ {} [{}] ({})\n", node.name, node.kind, node.lineage_key));
    }

    for node in &diff.removed {
        out.push_str(&format!("- {} [{}] ({})\n", node.name, node.kind, node.lineage_key));
    }

    for node in &diff.modified {
        out.push_str(&format!("~ {} ({})\n", node.name, node.lineage_key));
        for (field, change) in &node.changes {
            out.push_str(&format!("    {}: {} -> {}\n", field, change.old, change.new));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diff::model::{FieldChange, NodeChange, NodeRef};
    use serde_json::json;
    use std::collections::BTreeMap;

    #[test]
    fn test_empty_diff_summary() {
        assert_eq!(render_diff_summary(&VersionDiff::default()), "No changes.\n");
    }

    #[test]
    fn test_summary_lists_every_change() {
        let mut changes = BTreeMap::new();
        changes.insert(
            "name".to_string(),
            FieldChange {
                old: json!("Help"),
                new: json!("Support"),
            },
        );
        let diff = VersionDiff {
            added: vec![NodeRef {
                lineage_key: "k1".to_string(),
                node_id: "n1".to_string(),
                name: "FAQ".to_string(),
                kind: "view".to_string(),
            }],
            removed: vec![],
            modified: vec![NodeChange {
                lineage_key: "k2".to_string(),
                node_id: "n2".to_string(),
                name: "Support".to_string(),
                changes,
            }],
        };

        let summary = render_diff_summary(&diff);
        assert!(summary.starts_with("1 added, 0 removed, 1 modified\n"));
        assert!(summary.contains("+ FAQ [view] (k1)\n"));
        assert!(summary.contains("~ Support (k2)\n"));
        assert!(summary.contains("    name: \"Help\" -> \"Support\"\n"));
    }
}
