// Copyright (C) 2026 by GiGa infosystems

//! Plan the order in which the projects depending on a target project should be upgraded, see
//! [`plan_upgrade_order`].

use crate::project::ProjectPackages;

/// Mark every project that transitively depends on the project at `target` by walking dependent
/// edges with an explicit worklist.
///
/// The target itself only ends up marked if the graph cycles back into it. Cycles terminate
/// because every project is enqueued at most once.
fn depends_on_target(universe: &[ProjectPackages], target: usize) -> Vec<bool> {
    let mut marked = vec![false; universe.len()];
    let mut todo = vec![target];

    while let Some(current) = todo.pop() {
        let current_name = &universe[current].project_name;
        for (index, dependent) in universe.iter().enumerate() {
            if !marked[index] && dependent.references(current_name) {
                marked[index] = true;
                todo.push(index);
            }
        }
    }

    marked
}

/// Returns the order in which the projects constrained by `target_project_name` should be
/// upgraded, or [`None`] if no project in `universe` has that name.
///
/// The order starts with the target project. A project is appended once all of its immediate
/// dependencies that themselves transitively depend on the target are already in the order;
/// dependencies outside the target's subgraph don't constrain it (they are unaffected by this
/// upgrade). Afterwards its dependents are visited in universe order, which retries projects
/// that were blocked on it earlier. Every project appears at most once, and a project with
/// several constrained dependencies ("diamond") only appears after all of them.
///
/// On a dependency cycle within the target's subgraph, the cycle members can never have all
/// their constrained dependencies done; they are left out of the order rather than looping. This
/// also applies to a target that is part of a cycle, in which case the order comes back empty.
pub fn plan_upgrade_order<'a>(
    universe: &'a [ProjectPackages],
    target_project_name: &str,
) -> Option<Vec<&'a ProjectPackages>> {
    let target = universe
        .iter()
        .position(|project| project.project_name == target_project_name)?;

    let constrained = depends_on_target(universe, target);

    let mut done = vec![false; universe.len()];
    let mut order = Vec::new();

    // The stack reproduces the recursive walk of the dependent fan-out: dependents get pushed in
    // reverse universe order, so the first dependent's subtree is exhausted before the next one
    // starts.
    let mut todo = vec![target];
    while let Some(current) = todo.pop() {
        if done[current] {
            continue;
        }

        let ready = universe.iter().enumerate().all(|(index, dependency)| {
            !universe[current].references(&dependency.project_name)
                || !constrained[index]
                || done[index]
        });
        if !ready {
            // Not all constrained dependencies are done; a later visit via another dependent
            // path retries this project.
            continue;
        }

        done[current] = true;
        order.push(&universe[current]);

        let current_name = &universe[current].project_name;
        for (index, dependent) in universe.iter().enumerate().rev() {
            if !done[index] && dependent.references(current_name) {
                todo.push(index);
            }
        }
    }

    Some(order)
}
