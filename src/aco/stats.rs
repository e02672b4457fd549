use prettytable::{Cell, Row, Table};

use crate::{
    aco::colony::ColonyStats,
    csp::{
        constraint::Constraint,
        problem::ConstraintId,
        propagation::{PerConstraintStats, PropagationStats},
    },
};

/// Render per-constraint propagation counters as a table, cheapest
/// constraints first.
pub fn render_propagation_table(
    stats: &PropagationStats,
    constraints: &[Box<dyn Constraint>],
) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Constraint Type"),
        Cell::new("ID"),
        Cell::new("Description"),
        Cell::new("Revisions"),
        Cell::new("Prunings"),
        Cell::new("Time / Call (µs)"),
        Cell::new("Total Time (ms)"),
    ]));

    let mut sorted_stats: Vec<(&ConstraintId, &PerConstraintStats)> =
        stats.constraint_stats.iter().collect();
    sorted_stats.sort_by_key(|entry| entry.1.time_spent_micros);

    for (constraint_id, constraint_stats) in sorted_stats {
        let descriptor = constraints[*constraint_id].descriptor();
        let avg_time = if constraint_stats.revisions > 0 {
            constraint_stats.time_spent_micros as f64 / constraint_stats.revisions as f64
        } else {
            0.0
        };

        table.add_row(Row::new(vec![
            Cell::new(&descriptor.name),
            Cell::new(&constraint_id.to_string()),
            Cell::new(&descriptor.description),
            Cell::new(&constraint_stats.revisions.to_string()),
            Cell::new(&constraint_stats.prunings.to_string()),
            Cell::new(&format!("{:.2}", avg_time)),
            Cell::new(&format!(
                "{:.2}",
                constraint_stats.time_spent_micros as f64 / 1000.0
            )),
        ]));
    }

    table.to_string()
}

/// Render the per-cycle best sizes of a colony run as a table.
pub fn render_colony_table(stats: &ColonyStats) -> String {
    let mut table = Table::new();
    table.add_row(Row::new(vec![
        Cell::new("Cycle"),
        Cell::new("Best Size"),
    ]));

    for (cycle, size) in stats.cycle_best_sizes.iter().enumerate() {
        table.add_row(Row::new(vec![
            Cell::new(&cycle.to_string()),
            Cell::new(&size.to_string()),
        ]));
    }

    table.add_row(Row::new(vec![
        Cell::new("Outcome"),
        Cell::new(&format!("{:?}", stats.outcome)),
    ]));

    table.to_string()
}
