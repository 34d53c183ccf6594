/// Reason why an image couldn't be turned into a partition tree.
#[derive(Debug)]
pub enum BuildError {
	/// The grid has zero width or zero height; there is nothing to partition.
	EmptyGrid,
}
