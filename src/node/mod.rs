pub mod error;
pub mod stats;

use stats::RegionSource;

/// Color of a single pixel, and of a region average.
pub type Color = ::image::Rgba<u8>;

/// Node in a binary partition tree over a pixel grid.
///
/// Covers the rectangle from `ul` to `lr` (both corners inclusive, so a
/// node with `ul == lr` covers one pixel) and stores the average color
/// over that rectangle.
///
/// A node with no children is a leaf; any other node has exactly two,
/// splitting its rectangle along one straight vertical or horizontal
/// line. `avg` is fixed when the node is made and is never recomputed,
/// so tree descent can stop at any level and still give a meaningful
/// block preview.
#[derive(Clone, Debug)]
pub struct BintreeNode {
	pub ul: (u32, u32),
	pub lr: (u32, u32),
	pub avg: Color,
	pub left: Option<Box<BintreeNode>>,
	pub right: Option<Box<BintreeNode>>,
}

impl BintreeNode {
	fn new(ul: (u32, u32), lr: (u32, u32), avg: Color) -> Self {
		BintreeNode { ul, lr, avg, left: None, right: None }
	}

	/// Whether this node has no children.
	pub fn is_leaf(&self) -> bool {
		self.left.is_none() && self.right.is_none()
	}

	/// Number of leaves in the subtree rooted at this node.
	pub fn leaf_count(&self) -> usize {
		match (self.left.as_deref(), self.right.as_deref()) {
			(Some(left), Some(right)) => left.leaf_count() + right.leaf_count(),
			_ => 1
		}
	}
}

/// Binary partition tree over a fixed width-by-height pixel grid.
///
/// The tree exclusively owns its node graph; cloning deep-copies every
/// node, and dropping the tree releases the whole graph. The root
/// always covers the full grid, and the leaves always tile it exactly.
#[derive(Clone, Debug)]
pub struct Bintree {
	root: BintreeNode,
	width: u32,
	height: u32,
}

impl Bintree {
	/// Builds a tree over a `width` x `height` grid whose statistics are
	/// answered by `source`.
	///
	/// Fails on a grid with no pixels; nothing is allocated in that case.
	pub fn from_source<S: RegionSource>(
		width: u32,
		height: u32,
		source: &S
	) -> Result<Self, error::BuildError> {
		if width == 0 || height == 0 {
			return Err(error::BuildError::EmptyGrid);
		}
		Ok(Bintree {
			root: partition(source, (0, 0), (width - 1, height - 1)),
			width,
			height,
		})
	}

	/// Width of the grid the tree was built over.
	pub fn width(&self) -> u32 {
		self.width
	}

	/// Height of the grid the tree was built over.
	pub fn height(&self) -> u32 {
		self.height
	}

	/// The root node, covering the full grid.
	pub fn root(&self) -> &BintreeNode {
		&self.root
	}

	/// Number of leaves in the tree; one block in the rendered output.
	pub fn leaf_count(&self) -> usize {
		self.root.leaf_count()
	}

	pub(crate) fn root_mut(&mut self) -> &mut BintreeNode {
		&mut self.root
	}
}

/// Recursively partitions the rectangle from `ul` to `lr` into a subtree.
///
/// A single-pixel rectangle becomes a leaf. Anything larger is split by
/// the candidate cut whose two halves have the lowest combined variance
/// score: every vertical cut is tried left to right, then every
/// horizontal cut top to bottom, and a tie falls to the later candidate.
/// The left child takes the half containing `ul`, the right child the
/// half containing `lr`.
fn partition<S: RegionSource>(source: &S, ul: (u32, u32), lr: (u32, u32)) -> BintreeNode {
	let mut node = BintreeNode::new(ul, lr, source.mean(ul, lr));
	if ul == lr {
		return node;
	}
	let mut best_score = i64::MAX;
	let mut left_lr = ul;
	let mut right_ul = lr;
	// Vertical cuts: left half ends at column x, right half starts at x + 1
	for x in ul.0..lr.0 {
		let score = source.score(ul, (x, lr.1)) + source.score((x + 1, ul.1), lr);
		if score <= best_score {
			best_score = score;
			left_lr = (x, lr.1);
			right_ul = (x + 1, ul.1);
		}
	}
	// Horizontal cuts: upper half ends at row y, lower half starts at y + 1
	for y in ul.1..lr.1 {
		let score = source.score(ul, (lr.0, y)) + source.score((ul.0, y + 1), lr);
		if score <= best_score {
			best_score = score;
			left_lr = (lr.0, y);
			right_ul = (ul.0, y + 1);
		}
	}
	node.left = Some(Box::new(partition(source, ul, left_lr)));
	node.right = Some(Box::new(partition(source, right_ul, lr)));
	node
}

pub mod image;
