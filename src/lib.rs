pub mod node;

pub use node::*;

use log::debug;

impl Bintree {
	/// Prunes the tree in place, collapsing subtrees as high up as
	/// possible.
	///
	/// A subtree collapses into a single leaf when at least `pct` of
	/// its leaves are within `tol` of the average color stored at the
	/// subtree's root; the squared red/green/blue distance is what is
	/// compared, and the surviving leaf keeps that stored average.
	/// Subtrees that don't qualify are descended into and judged
	/// against their own averages.
	///
	/// `pct` outside `[0, 1]` and negative `tol` are accepted as given:
	/// the tree then either always collapses or never does. Trees are
	/// only expected to be pruned once; the decision for a node is made
	/// against whatever its subtree currently holds.
	pub fn prune(&mut self, pct: f64, tol: i64) {
		prune_node(self.root_mut(), pct, tol);
		debug!("pruned to {} leaves (pct {}, tol {})", self.leaf_count(), pct, tol);
	}
}

fn prune_node(node: &mut BintreeNode, pct: f64, tol: i64) {
	if node.is_leaf() {
		return;
	}
	let (within, total) = leaves_within_tol(tol, node.avg, node);
	if within as f64 / total as f64 >= pct {
		node.left = None;
		node.right = None;
	} else if let (Some(left), Some(right)) = (node.left.as_deref_mut(), node.right.as_deref_mut()) {
		prune_node(left, pct, tol);
		prune_node(right, pct, tol);
	}
}

/// Counts the leaves below `node` within `tol` of `reference`, along
/// with the total number of leaves.
fn leaves_within_tol(tol: i64, reference: Color, node: &BintreeNode) -> (u64, u64) {
	match (node.left.as_deref(), node.right.as_deref()) {
		(Some(left), Some(right)) => {
			let (lw, lt) = leaves_within_tol(tol, reference, left);
			let (rw, rt) = leaves_within_tol(tol, reference, right);
			(lw + rw, lt + rt)
		}
		_ => (within_tol(tol, reference, node.avg) as u64, 1)
	}
}

fn within_tol(tol: i64, a: Color, b: Color) -> bool {
	let dr = a.0[0] as i64 - b.0[0] as i64;
	let dg = a.0[1] as i64 - b.0[1] as i64;
	let db = a.0[2] as i64 - b.0[2] as i64;
	dr * dr + dg * dg + db * db <= tol
}
