use rand::Rng;
use rand::seq::IndexedRandom;

use crate::chart::Note;
use crate::config::generation::RECENT_LANE_WINDOW;

/// Picks lanes for the notes of one onset, steering away from lanes that
/// were used moments before.
#[derive(Debug, Clone, Copy)]
pub struct LaneSelector {
    lanes: u8,
}

impl LaneSelector {
    pub fn new(lanes: u8) -> Self {
        Self { lanes }
    }

    pub fn lanes(&self) -> u8 {
        self.lanes
    }

    /// Choose up to `count` distinct lanes for notes at `time`.
    ///
    /// Lanes not touched by any note in `placed` within the recent window are
    /// preferred. When there are not enough of those, any lane still free at
    /// exactly `time` may be used, and fewer than `count` lanes come back only
    /// if the slot is that crowded.
    pub fn select<R: Rng + ?Sized>(
        &self,
        placed: &[Note],
        time: f64,
        count: usize,
        rng: &mut R,
    ) -> Vec<u8> {
        let mut recent = vec![false; self.lanes as usize];
        let mut occupied = vec![false; self.lanes as usize];
        for note in placed {
            let Some(slot) = recent.get_mut(note.lane as usize) else {
                continue;
            };
            if (note.time - time).abs() < RECENT_LANE_WINDOW {
                *slot = true;
            }
            if note.time == time {
                occupied[note.lane as usize] = true;
            }
        }

        let preferred: Vec<u8> = (0..self.lanes).filter(|&l| !recent[l as usize]).collect();
        let pool = if preferred.len() >= count {
            preferred
        } else {
            (0..self.lanes).filter(|&l| !occupied[l as usize]).collect()
        };

        pool.choose_multiple(rng, count.min(pool.len()))
            .copied()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_select_distinct_lanes() {
        let selector = LaneSelector::new(4);
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let mut lanes = selector.select(&[], 1.0, 3, &mut rng);
            assert_eq!(lanes.len(), 3);
            lanes.sort_unstable();
            lanes.dedup();
            assert_eq!(lanes.len(), 3);
            assert!(lanes.iter().all(|&l| l < 4));
        }
    }

    #[test]
    fn test_select_avoids_recent_lanes() {
        let selector = LaneSelector::new(4);
        let placed = vec![Note::tap(1.0, 0, 0.5), Note::tap(1.1, 2, 0.5)];
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..50 {
            let lanes = selector.select(&placed, 1.2, 2, &mut rng);
            let mut sorted = lanes.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![1, 3]);
        }
    }

    #[test]
    fn test_select_ignores_old_notes() {
        let selector = LaneSelector::new(2);
        let placed = vec![Note::tap(0.0, 0, 0.5), Note::tap(0.0, 1, 0.5)];
        let mut rng = StdRng::seed_from_u64(3);
        let lanes = selector.select(&placed, 0.3, 2, &mut rng);
        assert_eq!(lanes.len(), 2);
    }

    #[test]
    fn test_select_falls_back_to_free_lanes() {
        let selector = LaneSelector::new(4);
        // lanes 0 and 1 are recent, lane 1 is also taken at the exact time
        let placed = vec![Note::tap(0.9, 0, 0.5), Note::tap(1.0, 1, 0.5)];
        let mut rng = StdRng::seed_from_u64(5);
        for _ in 0..50 {
            let lanes = selector.select(&placed, 1.0, 3, &mut rng);
            let mut sorted = lanes.clone();
            sorted.sort_unstable();
            assert_eq!(sorted, vec![0, 2, 3]);
        }
    }

    #[test]
    fn test_select_caps_at_free_lanes() {
        let selector = LaneSelector::new(2);
        let placed = vec![Note::tap(1.0, 0, 0.5)];
        let mut rng = StdRng::seed_from_u64(9);
        assert_eq!(selector.select(&placed, 1.0, 2, &mut rng), vec![1]);
    }
}
