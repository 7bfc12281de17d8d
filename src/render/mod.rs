//! Builds the rows of the points table body. Rows are kept as structured cells and only turned
//! into markup at the very end, with every value escaped on the way out.

mod page;

pub use page::Page;

use crate::generic_structs::{Standings, TeamStanding};
use std::fmt::Write;

pub const TABLE_BODY_ID: &str = "points-table-body";

/// Position, team, played, won, lost, tied, no result, points, nrr
pub const COLUMNS: usize = 9;

const FLAG_STYLE: &str = "width:24px;vertical-align:middle;margin-right:8px;";

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Team { flag: Option<String>, name: String },
    /// One cell across the whole row, for telling the reader something went wrong.
    Notice(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn from_standing(team: &TeamStanding) -> Self {
        let cells = vec![
            Cell::Text(team.position.to_string()),
            Cell::Team {
                flag: team.flag().map(str::to_owned),
                name: team.team_name.clone(),
            },
            Cell::Text(team.played.to_string()),
            Cell::Text(team.won.to_string()),
            Cell::Text(team.lost.to_string()),
            Cell::Text(team.tied().to_string()),
            Cell::Text(team.no_result().to_string()),
            Cell::Text(team.points.to_string()),
            Cell::Text(team.nrr.to_string()),
        ];
        Row { cells }
    }

    pub fn notice(message: &str) -> Self {
        Row {
            cells: vec![Cell::Notice(message.to_owned())],
        }
    }

    pub fn to_html(&self) -> String {
        let mut out = String::from("<tr>");
        for cell in &self.cells {
            match cell {
                Cell::Text(text) => {
                    let _ = write!(out, "<td>{}</td>", escape_html(text));
                }
                Cell::Team { flag, name } => {
                    out.push_str("<td>");
                    if let Some(flag) = flag {
                        let _ = write!(
                            out,
                            "<img src=\"{}\" alt=\"{}\" style=\"{}\">",
                            escape_html(flag),
                            escape_html(name),
                            FLAG_STYLE
                        );
                    }
                    let _ = write!(out, "{}</td>", escape_html(name));
                }
                Cell::Notice(message) => {
                    let _ = write!(
                        out,
                        "<td colspan=\"{}\" class=\"error\">{}</td>",
                        COLUMNS,
                        escape_html(message)
                    );
                }
            }
        }
        out.push_str("</tr>");
        out
    }
}

/// The `<tbody>` we own for the lifetime of a page.
#[derive(Debug, Clone, PartialEq)]
pub struct TableBody {
    id: String,
    rows: Vec<Row>,
}

impl Default for TableBody {
    fn default() -> Self {
        TableBody::new(TABLE_BODY_ID)
    }
}

impl TableBody {
    pub fn new(id: &str) -> Self {
        TableBody {
            id: id.to_owned(),
            rows: vec![],
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn clear(&mut self) {
        self.rows.clear();
    }

    pub fn append(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Whatever was there before goes, one row per team comes in, in the order given.
    pub fn replace_rows(&mut self, standings: &Standings) {
        self.clear();
        for team in standings.iter() {
            self.append(Row::from_standing(team));
        }
    }

    pub fn show_error(&mut self, message: &str) {
        self.clear();
        self.append(Row::notice(message));
    }

    pub fn inner_html(&self) -> String {
        self.rows
            .iter()
            .map(Row::to_html)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_html(&self) -> String {
        format!(
            "<tbody id=\"{}\">\n{}\n</tbody>",
            escape_html(&self.id),
            self.inner_html()
        )
    }
}

pub fn escape_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
