//! Guillotine rectangle packing.
//!
//! Rectangles are placed largest-first into a binary tree of free regions.
//! Each placement splits its region into a right remainder and a below
//! remainder. When a pass runs out of room the canvas doubles along its
//! shorter axis and packing restarts from scratch.

use crate::error::{AtlasError, Result};
use log::debug;

/// Top-left offset of a packed rectangle inside the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PackedPlacement {
    pub x: u32,
    pub y: u32,
}

/// Output of a packing pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackResult {
    /// One placement per input rectangle, in input order.
    pub positions: Vec<PackedPlacement>,
    /// Canvas width and height in texels.
    pub canvas: (u32, u32),
}

/// Packs rectangles with a fixed gutter of `padding` texels around each.
#[derive(Debug, Clone, Copy, Default)]
pub struct RectanglePacker {
    padding: u32,
}

impl RectanglePacker {
    pub fn new(padding: u32) -> Self {
        Self { padding }
    }

    pub fn padding(&self) -> u32 {
        self.padding
    }

    /// Pack `sizes` (width, height) and return their placements plus the canvas.
    pub fn pack(&self, sizes: &[(u32, u32)]) -> Result<PackResult> {
        if sizes.is_empty() {
            return Err(AtlasError::InvalidInput(
                "cannot pack an empty rectangle set".to_string(),
            ));
        }

        let gutter = self
            .padding
            .checked_mul(2)
            .ok_or_else(|| overflow("padding"))?;

        let mut effective = Vec::with_capacity(sizes.len());
        for (i, &(width, height)) in sizes.iter().enumerate() {
            if width == 0 || height == 0 {
                return Err(AtlasError::InvalidInput(format!(
                    "rectangle {} has zero size ({}x{})",
                    i, width, height
                )));
            }
            let w = width.checked_add(gutter).ok_or_else(|| overflow("rectangle width"))?;
            let h = height.checked_add(gutter).ok_or_else(|| overflow("rectangle height"))?;
            effective.push((w, h));
        }

        // Stable sort keeps insertion order among equal keys.
        let mut order: Vec<usize> = (0..effective.len()).collect();
        order.sort_by(|&a, &b| {
            let key_a = effective[a].0.max(effective[a].1);
            let key_b = effective[b].0.max(effective[b].1);
            key_b.cmp(&key_a)
        });

        let mut canvas = initial_canvas(&effective)?;
        loop {
            if let Some(origins) = try_pack(&order, &effective, canvas) {
                debug!(
                    "packed {} rectangles into {}x{} canvas",
                    sizes.len(),
                    canvas.0,
                    canvas.1
                );

                let positions = origins
                    .into_iter()
                    .map(|(x, y)| PackedPlacement {
                        x: x + self.padding,
                        y: y + self.padding,
                    })
                    .collect();
                return Ok(PackResult { positions, canvas });
            }

            debug!("{}x{} canvas too small, growing", canvas.0, canvas.1);
            canvas = grow(canvas)?;
        }
    }
}

/// Pack `sizes` with the given padding.
pub fn pack(sizes: &[(u32, u32)], padding: u32) -> Result<PackResult> {
    RectanglePacker::new(padding).pack(sizes)
}

/// A node in the free-region tree. Leaves are free, inner nodes hold a placed rectangle.
#[derive(Debug)]
struct Node {
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    used: bool,
    right: Option<usize>,
    down: Option<usize>,
}

impl Node {
    fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
            used: false,
            right: None,
            down: None,
        }
    }
}

struct RegionTree {
    nodes: Vec<Node>,
}

impl RegionTree {
    fn new(width: u32, height: u32) -> Self {
        Self {
            nodes: vec![Node::new(0, 0, width, height)],
        }
    }

    /// Find the first free node that can hold `width` x `height`, searching
    /// each right subtree before the matching below subtree.
    fn find(&self, width: u32, height: u32) -> Option<usize> {
        let mut stack = vec![0];
        while let Some(index) = stack.pop() {
            let node = &self.nodes[index];
            if node.used {
                stack.extend(node.down);
                stack.extend(node.right);
            } else if width <= node.width && height <= node.height {
                return Some(index);
            }
        }
        None
    }

    /// Occupy the top-left of node `index` and split the rest into right and below remainders.
    fn split(&mut self, index: usize, width: u32, height: u32) -> (u32, u32) {
        let (x, y, node_width, node_height) = {
            let node = &self.nodes[index];
            (node.x, node.y, node.width, node.height)
        };

        let right = (node_width > width).then(|| {
            self.nodes.push(Node::new(x + width, y, node_width - width, height));
            self.nodes.len() - 1
        });
        let down = (node_height > height).then(|| {
            self.nodes.push(Node::new(x, y + height, node_width, node_height - height));
            self.nodes.len() - 1
        });

        let node = &mut self.nodes[index];
        node.used = true;
        node.right = right;
        node.down = down;
        (x, y)
    }
}

/// One packing pass at a fixed canvas size. Returns region origins in input order.
fn try_pack(
    order: &[usize],
    effective: &[(u32, u32)],
    canvas: (u32, u32),
) -> Option<Vec<(u32, u32)>> {
    let mut tree = RegionTree::new(canvas.0, canvas.1);
    let mut origins = vec![(0, 0); effective.len()];

    for &i in order {
        let (width, height) = effective[i];
        let node = tree.find(width, height)?;
        origins[i] = tree.split(node, width, height);
    }

    Some(origins)
}

/// Smallest power-of-two canvas that holds the largest rectangle and whose
/// area covers the total rectangle area.
fn initial_canvas(effective: &[(u32, u32)]) -> Result<(u32, u32)> {
    let max_width = effective.iter().map(|&(w, _)| w).max().unwrap_or(1);
    let max_height = effective.iter().map(|&(_, h)| h).max().unwrap_or(1);
    let total_area: u64 = effective.iter().map(|&(w, h)| w as u64 * h as u64).sum();

    let mut canvas = (
        max_width.checked_next_power_of_two().ok_or_else(|| overflow("canvas width"))?,
        max_height.checked_next_power_of_two().ok_or_else(|| overflow("canvas height"))?,
    );
    while (canvas.0 as u64) * (canvas.1 as u64) < total_area {
        canvas = grow(canvas)?;
    }

    Ok(canvas)
}

/// Double the shorter axis (width on ties).
fn grow((width, height): (u32, u32)) -> Result<(u32, u32)> {
    if width <= height {
        let width = width.checked_mul(2).ok_or_else(|| overflow("canvas width"))?;
        Ok((width, height))
    } else {
        let height = height.checked_mul(2).ok_or_else(|| overflow("canvas height"))?;
        Ok((width, height))
    }
}

fn overflow(what: &str) -> AtlasError {
    AtlasError::InvalidInput(format!("{} exceeds the u32 range", what))
}
