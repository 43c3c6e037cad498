use std::fmt;

use crate::layout::SeatLayout;
use crate::seat::{SeatId, Section};
use crate::seat_map::{OccupancySummary, SeatMap};

pub const WINDOW_ROWS: u32 = 10;
pub const AISLE_MARKER: &str = "X   X   X";

/// A block of consecutive rows shown together on the status screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub start: u32,
    pub end: u32,
}

impl RowWindow {
    /// Window number `choice` (1-based) of the layout, if there is one.
    pub fn from_choice(layout: &SeatLayout, choice: u32) -> Option<Self> {
        Self::all(layout).into_iter().nth(choice.checked_sub(1)? as usize)
    }

    /// The layout's rows cut into windows of `WINDOW_ROWS`.
    pub fn all(layout: &SeatLayout) -> Vec<Self> {
        let first = *layout.rows.start();
        let last = *layout.rows.end();
        (first..=last)
            .step_by(WINDOW_ROWS as usize)
            .map(|start| Self {
                start,
                end: (start + WINDOW_ROWS - 1).min(last),
            })
            .collect()
    }

    pub fn rows(&self) -> impl Iterator<Item = u32> {
        self.start..=self.end
    }
}

impl fmt::Display for RowWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rows {}-{}", self.start, self.end)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatCell {
    pub seat: SeatId,
    pub marker: String,
}

impl fmt::Display for SeatCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.seat, self.marker)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionGrid {
    pub section: Section,
    pub columns: Vec<char>,
    pub rows: Vec<Vec<SeatCell>>,
}

impl SectionGrid {
    fn build(map: &SeatMap, section: Section, window: RowWindow) -> Self {
        let columns = map.layout().columns(section).to_vec();
        let rows = window
            .rows()
            .map(|row| {
                columns
                    .iter()
                    .filter_map(|&column| {
                        let seat = SeatId::new(row, column);
                        map.status(&seat).map(|status| SeatCell {
                            seat,
                            marker: status.marker().to_string(),
                        })
                    })
                    .collect()
            })
            .collect();

        Self { section, columns, rows }
    }

    fn column_span(&self) -> String {
        match (self.columns.first(), self.columns.last()) {
            (Some(first), Some(last)) => format!("{}-{}", first, last),
            _ => String::new(),
        }
    }
}

/// Snapshot of one row window, front and rear sections separated by the aisle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusGrid {
    pub window: RowWindow,
    pub front: SectionGrid,
    pub rear: SectionGrid,
    pub summary: OccupancySummary,
}

impl StatusGrid {
    pub fn build(map: &SeatMap, window: RowWindow) -> Self {
        Self {
            window,
            front: SectionGrid::build(map, Section::Front, window),
            rear: SectionGrid::build(map, Section::Rear, window),
            summary: map.summary(),
        }
    }

    fn write_section(f: &mut fmt::Formatter<'_>, window: RowWindow, grid: &SectionGrid) -> fmt::Result {
        writeln!(
            f,
            "{} Section ({}, Columns {}):",
            grid.section.label(),
            window,
            grid.column_span()
        )?;
        for row in &grid.rows {
            let line: Vec<String> = row.iter().map(|cell| cell.to_string()).collect();
            writeln!(f, "{}", line.join("  "))?;
        }
        Ok(())
    }
}

impl fmt::Display for StatusGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Booking Status ({}) ---", self.window)?;
        writeln!(
            f,
            "Booked {} of {} bookable seats ({:.1}%), {} storage",
            self.summary.booked,
            self.summary.bookable(),
            self.summary.utilization() * 100.0,
            self.summary.storage
        )?;
        writeln!(f)?;
        Self::write_section(f, self.window, &self.front)?;
        writeln!(f)?;
        writeln!(f, "Aisle:")?;
        writeln!(f, "{}", AISLE_MARKER)?;
        writeln!(f)?;
        Self::write_section(f, self.window, &self.rear)
    }
}
