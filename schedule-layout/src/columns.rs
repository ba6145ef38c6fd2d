use crate::{CollisionBlock, ColumnAssignment, NormalizedEvent};

impl ColumnAssignment {
    /// Share of the day column, in percent.
    #[must_use]
    pub fn width_percent(&self) -> f32 {
        100.0 / self.total_columns as f32
    }

    #[must_use]
    pub fn left_percent(&self) -> f32 {
        self.column_index as f32 * self.width_percent()
    }
}

/// Greedy first-fit packing of a block's events into columns.
///
/// Each event goes into the first column, in creation order, whose most
/// recently placed event has already ended; otherwise a new column is
/// opened. Placement must stay first-fit by creation order so existing
/// layouts do not shift. Assignments are returned in block order.
pub fn assign_columns(block: &CollisionBlock) -> Vec<ColumnAssignment> {
    let mut order: Vec<usize> = (0..block.len()).collect();
    order.sort_by_key(|&idx| block.events()[idx].start_minute);

    // end of the last event placed in each column
    let mut column_ends: Vec<u32> = Vec::new();
    let mut indices = vec![0; block.len()];

    for idx in order {
        let event: &NormalizedEvent = &block.events()[idx];

        let column = match column_ends
            .iter()
            .position(|&end| end <= event.start_minute)
        {
            Some(column) => column,
            None => {
                column_ends.push(event.end_minute);
                column_ends.len() - 1
            }
        };

        column_ends[column] = event.end_minute;
        indices[idx] = column;
    }

    let total_columns = column_ends.len();
    indices
        .into_iter()
        .map(|column_index| ColumnAssignment {
            column_index,
            total_columns,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision_blocks;

    fn event(start: u32, end: u32) -> NormalizedEvent {
        NormalizedEvent {
            group: "M1".into(),
            title: format!("{start}-{end}"),
            start_minute: start,
            end_minute: end,
            date: None,
            location: None,
        }
    }

    fn columns_of(events: Vec<NormalizedEvent>) -> Vec<(usize, usize)> {
        let blocks = collision_blocks(events);
        assert_eq!(blocks.len(), 1);
        assign_columns(&blocks[0])
            .into_iter()
            .map(|c| (c.column_index, c.total_columns))
            .collect()
    }

    #[test]
    fn single_event_fills_the_day() {
        assert_eq!(columns_of(vec![event(540, 600)]), [(0, 1)]);
    }

    #[test]
    fn nested_events_reuse_a_freed_column() {
        // 09:00-11:00, 09:15-09:45, 09:50-10:30
        let assigned = columns_of(vec![event(540, 660), event(555, 585), event(590, 630)]);
        assert_eq!(assigned, [(0, 2), (1, 2), (1, 2)]);
    }

    #[test]
    fn first_fit_prefers_lowest_free_column() {
        let assigned = columns_of(vec![
            event(540, 600),
            event(545, 700),
            event(550, 620),
            event(610, 650),
        ]);
        // column 0 frees at 600, so the 610 event lands there before column 2
        assert_eq!(assigned, [(0, 3), (1, 3), (2, 3), (0, 3)]);
    }

    #[test]
    fn column_compares_against_last_placed_event_only() {
        // column 0 is reused each time its latest event ends
        let assigned = columns_of(vec![
            event(540, 560),
            event(545, 700),
            event(560, 580),
            event(575, 590),
            event(580, 600),
        ]);
        assert_eq!(assigned, [(0, 3), (1, 3), (0, 3), (2, 3), (0, 3)]);
    }

    #[test]
    fn geometry_splits_the_column_evenly() {
        let assignment = ColumnAssignment {
            column_index: 2,
            total_columns: 4,
        };
        assert_eq!(assignment.width_percent(), 25.0);
        assert_eq!(assignment.left_percent(), 50.0);
    }
}
