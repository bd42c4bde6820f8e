// Copyright  (C) 2020, Kisio Digital and/or its affiliates. All rights reserved.
//
// This file is part of Navitia,
// the software to build cool stuff with public transport.
//
// Hope you'll enjoy and contribute to this project,
// powered by Kisio Digital (www.kisio.com).
// Help us simplify mobility and open public transport:
// a non ending quest to the responsive locomotion way of traveling!
//
// This contribution is a part of the research and development work of the
// IVA Project which aims to enhance traveler information and is carried out
// under the leadership of the Technological Research Institute SystemX,
// with the partnership and support of the transport organization authority
// Ile-De-France Mobilités (IDFM), SNCF, and public funds
// under the scope of the French Program "Investissements d’Avenir".
//
// LICENCE: This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.
//
// Stay tuned using
// twitter @navitia
// channel `#navitia` on riot https://riot.im/app/#/room/#navitia:matrix.org
// https://groups.google.com/d/forum/navitia
// www.navitia.io


use crate::subway_data::{Direction, Line, Stop};

/// Initial reservation of the per-search label arena.
pub const INITIAL_POOL_CAPACITY: usize = 200_000;

/// Index of a label in the pool of its search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabelIdx {
    pub(crate) idx: u32,
}

/// One state of the propagation : the cost vector accumulated to reach
/// `stop` riding `line`, plus the ancestry needed to rebuild the path.
///
/// Labels form a forest rooted at the origin labels; a parent index is
/// always strictly smaller than the index of its child.
#[derive(Debug, Clone)]
pub struct Label {
    /// cumulative travel minutes since the requested departure
    pub arrival_time: f64,
    /// sum of the convenience scores of the interchange stations crossed
    pub convenience_sum: f64,
    /// sum of the congestion ratios of the ride hops taken
    pub congestion_sum: f64,
    /// worst interchange difficulty met so far, in [0, 1]
    pub max_transfer_difficulty: f64,
    pub transfers: u8,
    /// number of hops represented, divisor of the averages
    pub depth: u16,
    pub parent: Option<LabelIdx>,
    pub stop: Stop,
    pub line: Line,
    /// direction of the last ride hop, Unknown after a departure or transfer
    pub direction: Direction,
    pub created_round: u8,
    /// true for labels created by a departure or a transfer; a transfer
    /// label may not immediately transfer again
    pub is_first_move: bool,
}

impl Label {
    pub fn avg_convenience(&self) -> f64 {
        self.convenience_sum / f64::from(self.depth)
    }

    pub fn avg_congestion(&self) -> f64 {
        self.congestion_sum / f64::from(self.depth)
    }
}

/// Append-only arena of the labels of one search.
///
/// Indices stay stable for the whole search, which makes the parent links
/// safe; the arena is cleared when the next search begins.
pub struct LabelPool {
    labels: Vec<Label>,
}

impl LabelPool {
    pub fn new() -> Self {
        Self {
            labels: Vec::with_capacity(INITIAL_POOL_CAPACITY),
        }
    }

    pub fn clear(&mut self) {
        self.labels.clear();
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn push(&mut self, label: Label) -> LabelIdx {
        debug_assert!(self.labels.len() < u32::max_value() as usize);
        let idx = LabelIdx {
            idx: self.labels.len() as u32,
        };
        self.labels.push(label);
        idx
    }

    /// Returns `true` if `stop` appears anywhere on the ancestry chain of
    /// `label_idx`, the label itself included. This is the U-turn/cycle
    /// check of the ride phase; the chain is short (bounded by the number
    /// of rounds times the ride depth), so walking it beats carrying a
    /// visited set in every label.
    pub fn has_ancestor_at(&self, label_idx: LabelIdx, stop: Stop) -> bool {
        let mut current = Some(label_idx);
        while let Some(idx) = current {
            let label = &self[idx];
            if label.stop == stop {
                return true;
            }
            current = label.parent;
        }
        false
    }
}

impl Default for LabelPool {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<LabelIdx> for LabelPool {
    type Output = Label;

    fn index(&self, label_idx: LabelIdx) -> &Label {
        &self.labels[label_idx.idx as usize]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::subway_data::{Direction, Line, Stop};

    fn label_at(stop: usize, parent: Option<LabelIdx>, depth: u16) -> Label {
        Label {
            arrival_time: 0.0,
            convenience_sum: 0.0,
            congestion_sum: 0.0,
            max_transfer_difficulty: 0.0,
            transfers: 0,
            depth,
            parent,
            stop: Stop { idx: stop },
            line: Line { idx: 0 },
            direction: Direction::Unknown,
            created_round: 0,
            is_first_move: false,
        }
    }

    #[test]
    fn ancestor_walk_finds_every_station_of_the_chain() {
        let mut pool = LabelPool::new();
        let root = pool.push(label_at(0, None, 1));
        let middle = pool.push(label_at(1, Some(root), 2));
        let leaf = pool.push(label_at(2, Some(middle), 3));

        for stop in 0..3 {
            assert!(pool.has_ancestor_at(leaf, Stop { idx: stop }));
        }
        assert!(!pool.has_ancestor_at(leaf, Stop { idx: 7 }));
        assert!(!pool.has_ancestor_at(root, Stop { idx: 1 }));
    }

    #[test]
    fn parents_precede_children() {
        let mut pool = LabelPool::new();
        let root = pool.push(label_at(0, None, 1));
        let child = pool.push(label_at(1, Some(root), 2));
        assert!(root.idx < child.idx);
        assert_eq!(pool[child].parent, Some(root));
    }
}
