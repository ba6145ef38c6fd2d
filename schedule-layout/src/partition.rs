use crate::NormalizedEvent;

/// A maximal run of events connected through shared time, ordered by start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CollisionBlock {
    events: Vec<NormalizedEvent>,
    end_minute: u32,
}

impl CollisionBlock {
    fn new(first: NormalizedEvent) -> Self {
        Self {
            end_minute: first.end_minute,
            events: vec![first],
        }
    }

    fn push(&mut self, event: NormalizedEvent) {
        self.end_minute = self.end_minute.max(event.end_minute);
        self.events.push(event);
    }

    #[must_use]
    pub fn events(&self) -> &[NormalizedEvent] {
        &self.events
    }

    #[must_use]
    pub fn into_events(self) -> Vec<NormalizedEvent> {
        self.events
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    #[must_use]
    pub fn start_minute(&self) -> u32 {
        // events are in start order
        self.events
            .first()
            .map_or(self.end_minute, |event| event.start_minute)
    }

    /// Latest end among all events in the block.
    #[must_use]
    pub fn end_minute(&self) -> u32 {
        self.end_minute
    }

    /// Largest number of events active at the same instant.
    #[must_use]
    pub fn max_concurrency(&self) -> usize {
        let mut edges: Vec<(u32, i32)> = self
            .events
            .iter()
            .flat_map(|event| [(event.start_minute, 1), (event.end_minute, -1)])
            .collect();

        // ends sort before starts at the same minute, ranges are half-open
        edges.sort_unstable();

        let mut active = 0;
        let mut peak = 0;
        for (_, delta) in edges {
            active += delta;
            peak = peak.max(active);
        }

        peak as usize
    }
}

/// Splits a day's events into collision blocks with a single sweep over
/// the events sorted by start. Ties keep their input order.
pub fn collision_blocks(mut events: Vec<NormalizedEvent>) -> Vec<CollisionBlock> {
    events.sort_by_key(|event| event.start_minute);

    let mut blocks: Vec<CollisionBlock> = Vec::new();
    for event in events {
        match blocks.last_mut() {
            Some(current) if event.start_minute < current.end_minute => current.push(event),
            _ => blocks.push(CollisionBlock::new(event)),
        }
    }

    blocks
}
