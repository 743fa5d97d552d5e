//! Binary space partition packing, largest photos first.
//!
//! Free space is a binary tree stored in an arena. Placing a unit into a
//! free node consumes the node's top-left corner and splits the rest into a
//! "right" child (beside the unit, as tall as the unit) and a "down" child
//! (below the unit, as wide as the node). Search is first-fit in depth-first
//! order, right subtree before down subtree.

use tracing::{debug, trace};

use super::{PageFrame, position};
use crate::expand::ExpandedUnit;
use crate::model::{LayoutPosition, PxRect};

#[derive(Debug, Clone, Copy)]
struct Node {
    rect: PxRect,
    used: bool,
    right: usize,
    down: usize,
}

/// Arena-backed free-rectangle tree. Children are only set on used nodes.
#[derive(Debug, Clone)]
pub struct FreeTree {
    nodes: Vec<Node>,
}

impl FreeTree {
    pub fn new(root: PxRect) -> Self {
        Self {
            nodes: vec![Node {
                rect: root,
                used: false,
                right: 0,
                down: 0,
            }],
        }
    }

    /// First unused node, in depth-first order, that can hold `w x h`.
    pub fn find(&self, w: i64, h: i64) -> Option<usize> {
        let mut stack = vec![0usize];
        while let Some(idx) = stack.pop() {
            let node = &self.nodes[idx];
            if node.used {
                stack.push(node.down);
                stack.push(node.right);
            } else if w <= node.rect.width && h <= node.rect.height {
                return Some(idx);
            }
        }
        None
    }

    /// Marks `idx` used by a `w x h` unit at its top-left corner and adds the
    /// right/down remainders, separated from the unit by the gaps.
    pub fn split(&mut self, idx: usize, w: i64, h: i64, gap_h: i64, gap_v: i64) -> PxRect {
        let r = self.nodes[idx].rect;
        let right = PxRect::new(
            r.left.saturating_add(w).saturating_add(gap_h),
            r.top,
            r.width.saturating_sub(w).saturating_sub(gap_h),
            h,
        );
        let down = PxRect::new(
            r.left,
            r.top.saturating_add(h).saturating_add(gap_v),
            r.width,
            r.height.saturating_sub(h).saturating_sub(gap_v),
        );
        let right_idx = self.push(right);
        let down_idx = self.push(down);
        let node = &mut self.nodes[idx];
        node.used = true;
        node.right = right_idx;
        node.down = down_idx;
        PxRect::new(r.left, r.top, w, h)
    }

    fn push(&mut self, rect: PxRect) -> usize {
        self.nodes.push(Node {
            rect,
            used: false,
            right: 0,
            down: 0,
        });
        self.nodes.len() - 1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Orders units by descending physical area; equal areas keep input order.
pub fn sort_by_area_desc<'a>(units: &[ExpandedUnit<'a>]) -> Vec<ExpandedUnit<'a>> {
    let mut sorted = units.to_vec();
    sorted.sort_by(|a, b| b.size().area_mm2().total_cmp(&a.size().area_mm2()));
    sorted
}

pub fn place(units: &[ExpandedUnit<'_>], frame: &PageFrame) -> Vec<LayoutPosition> {
    let mut tree = FreeTree::new(frame.printable());
    let mut positions = Vec::with_capacity(units.len());

    for unit in sort_by_area_desc(units) {
        let Some(px) = frame.unit_px(&unit) else {
            continue;
        };
        match tree.find(px.width, px.height) {
            Some(idx) => {
                let placed = tree.split(idx, px.width, px.height, px.gap_h, px.gap_v);
                trace!(
                    photo_id = unit.photo_id(),
                    x = placed.left,
                    y = placed.top,
                    "compact: placed"
                );
                positions.push(position(&unit, placed.left, placed.top, &px));
            }
            None => {
                debug!(
                    photo_id = unit.photo_id(),
                    copy = unit.copy,
                    "compact: no free node fits"
                );
            }
        }
    }

    positions
}
