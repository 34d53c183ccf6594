use super::error::BuildError;
use super::stats::RegionStats;
use super::{Bintree, BintreeNode};

use log::debug;

impl Bintree {
	/// Builds a partition tree from an image.
	///
	/// Every leaf of the fresh tree is a single pixel, so rendering it
	/// straight back reproduces `img` exactly; the tree only loses
	/// detail once it is pruned. Fails if `img` has no pixels.
	pub fn from_image(img: &image::RgbaImage) -> Result<Self, BuildError> {
		let stats = RegionStats::new(img);
		let tree = Bintree::from_source(img.width(), img.height(), &stats)?;
		debug!(
			"partitioned {}x{} image into {} leaves",
			tree.width(),
			tree.height(),
			tree.leaf_count()
		);
		Ok(tree)
	}

	/// Paints the tree back into a pixel grid of its original dimensions.
	///
	/// Each leaf's rectangle is filled with the leaf's stored average
	/// color; branch nodes contribute nothing of their own. May be used
	/// on pruned trees.
	pub fn render(&self) -> image::RgbaImage {
		let mut img = image::RgbaImage::new(self.width(), self.height());
		render_node(&mut img, self.root());
		img
	}
}

fn render_node(img: &mut image::RgbaImage, node: &BintreeNode) {
	if let (Some(left), Some(right)) = (node.left.as_deref(), node.right.as_deref()) {
		render_node(img, left);
		render_node(img, right);
	} else {
		for y in node.ul.1..=node.lr.1 {
			for x in node.ul.0..=node.lr.0 {
				img.put_pixel(x, y, node.avg);
			}
		}
	}
}
