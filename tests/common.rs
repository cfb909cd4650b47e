use chrono::{DateTime, TimeZone, Utc};

use rscm::{CommitId, Entry, Graph, StagedNode};

pub fn t(secs: i64) -> DateTime<Utc> {
    Utc.timestamp_opt(secs, 0).unwrap()
}

// Commit a single-file snapshot. Since this is used only by tests,
// panics if the commit fails.
#[allow(dead_code)]
pub fn commit_file(
    graph: &mut Graph,
    parent: Option<CommitId>,
    branch: &str,
    name: &str,
    content: &str,
) -> CommitId {
    graph
        .commit(
            StagedNode::new(branch),
            vec![Entry::file(name, content, t(0))],
            parent,
            None,
        )
        .unwrap()
}

// Build a graph from a list of (parent index, branch) pairs. Entry `i` of
// the result is the ID of the `i`th commit; a parent index of `None` makes a
// new root. Parent indexes must refer to earlier commits.
#[allow(dead_code)]
pub fn build_graph(graph: &mut Graph, shape: &[(Option<usize>, &str)]) -> Vec<CommitId> {
    let mut ids: Vec<CommitId> = Vec::with_capacity(shape.len());

    for (i, (parent, branch)) in shape.iter().enumerate() {
        let parent = parent.map(|p| ids[p]);
        let id = commit_file(graph, parent, branch, &format!("f{}", i), branch);
        ids.push(id);
    }

    ids
}
