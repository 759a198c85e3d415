/// Output formatting: fixed-width text report and JSON.
use std::fmt::Write;

use poolseed_core::{decode, Competitor, PoolAssignment, ResolveReport, Roster};
use serde::Serialize;

use crate::bail;

#[derive(Serialize)]
struct JsonCompetitor<'a> {
    first_name: &'a str,
    last_name: &'a str,
    club: &'a str,
    rank: String,
}

#[derive(Serialize)]
struct JsonPool<'a> {
    pool: usize,
    size: usize,
    members: Vec<JsonCompetitor<'a>>,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    pools: Vec<JsonPool<'a>>,
    report: ResolveReport,
}

/// One competitor line: first, last, club, grade letter, sub-level.
fn competitor_line(c: &Competitor) -> String {
    let (letter, sub_level) = decode(c.rank);
    format!(
        "{:<21}{:<24}{:<24}{:<8}{:<2}",
        c.first_name, c.last_name, c.club, letter, sub_level
    )
}

/// The competitor list, in roster order.
pub fn render_roster(roster: &Roster) -> String {
    let mut out = String::from("Competitor List\n");
    for c in roster {
        let _ = writeln!(out, "{}", competitor_line(c));
    }
    out.push('\n');
    out
}

/// The pool list, one block per pool.
pub fn render_pools(assignment: &PoolAssignment) -> String {
    let mut out = String::from("Pool List\n");
    for (i, pool) in assignment.pools.iter().enumerate() {
        let _ = writeln!(out, "--)------- Pool # {} -------(-- ({})", i + 1, pool.len());
        for c in pool {
            let _ = writeln!(out, "{}", competitor_line(c));
        }
        out.push('\n');
    }
    out
}

pub fn render_json(assignment: &PoolAssignment) -> Result<String, serde_json::Error> {
    let pools = assignment
        .pools
        .iter()
        .enumerate()
        .map(|(i, pool)| JsonPool {
            pool: i + 1,
            size: pool.len(),
            members: pool
                .iter()
                .map(|c| JsonCompetitor {
                    first_name: &c.first_name,
                    last_name: &c.last_name,
                    club: &c.club,
                    rank: c.rank.to_string(),
                })
                .collect(),
        })
        .collect();

    let output = JsonOutput {
        pools,
        report: assignment.report,
    };

    serde_json::to_string_pretty(&output)
}

/// Print the text report to stdout.
pub fn print_table(roster: &Roster, assignment: &PoolAssignment, show_roster: bool) {
    if show_roster {
        print!("{}", render_roster(roster));
    }
    print!("{}", render_pools(assignment));
}

pub fn print_json(assignment: &PoolAssignment) {
    let json = render_json(assignment).unwrap_or_else(|e| bail(format!("Failed to serialize pools: {e}")));
    println!("{json}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use poolseed_core::assign_pools;

    fn sample_roster() -> Roster {
        [
            ("LASTER", "Rory", "SALLE", "C12"),
            ("DOE", "Jane", "", "U"),
            ("ROE", "Rich", "BLADE", "A"),
        ]
        .into_iter()
        .map(|(last, first, club, rank)| Competitor::from_fields(last, first, club, rank).unwrap())
        .collect()
    }

    #[test]
    fn test_competitor_line_columns() {
        let roster = sample_roster();
        let line = competitor_line(&roster[1]);
        assert_eq!(line.len(), 21 + 24 + 24 + 8 + 2);
        assert!(line.starts_with("Rory                 LASTER"));
        assert_eq!(&line[69..], "C       12");
    }

    #[test]
    fn test_competitor_line_empty_sub_level() {
        let roster = sample_roster();
        let line = competitor_line(&roster[0]);
        assert_eq!(&line[69..], "A         ");
    }

    #[test]
    fn test_render_roster_lists_in_rank_order() {
        let text = render_roster(&sample_roster());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Competitor List");
        assert!(lines[1].starts_with("Rich"));
        assert!(lines[2].starts_with("Rory"));
        assert!(lines[3].starts_with("Jane"));
        assert_eq!(lines[4], "");
        assert_eq!(lines.len(), 5);
        assert!(text.ends_with("\n\n"));
    }

    #[test]
    fn test_render_pools_headers() {
        let roster = sample_roster();
        let assignment = assign_pools(&roster);
        let text = render_pools(&assignment);
        assert!(text.starts_with("Pool List\n--)------- Pool # 1 -------(-- (1)\n"));
        assert!(text.contains("--)------- Pool # 3 -------(-- (1)"));
    }

    #[test]
    fn test_render_json_structure() {
        let roster = sample_roster();
        let assignment = assign_pools(&roster);
        let value: serde_json::Value = serde_json::from_str(&render_json(&assignment).unwrap()).unwrap();
        let pools = value["pools"].as_array().unwrap();
        assert_eq!(pools.len(), 3);
        assert_eq!(pools[0]["pool"], 1);
        assert_eq!(pools[0]["members"][0]["rank"], "A");
        assert_eq!(pools[1]["members"][0]["rank"], "C12");
        assert_eq!(value["report"]["converged"], true);
        assert_eq!(value["report"]["rounds"], 1);
    }

    #[test]
    fn test_render_json_empty_roster() {
        let roster = Roster::new(Vec::new());
        let assignment = assign_pools(&roster);
        let value: serde_json::Value = serde_json::from_str(&render_json(&assignment).unwrap()).unwrap();
        assert_eq!(value["pools"], serde_json::json!([]));
        assert_eq!(value["report"]["converged"], true);
        assert_eq!(value["report"]["same_rank_swaps"], 0);
    }
}
