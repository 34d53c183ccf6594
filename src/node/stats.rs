use super::Color;

/// Source of aggregate color statistics over axis-aligned rectangles of
/// a fixed pixel grid.
///
/// Rectangles are named by their upper-left and lower-right corners,
/// both inclusive. The partitioner asks for a score once per candidate
/// cut, so implementors should answer both queries in constant (or at
/// least amortized-cheap) time.
pub trait RegionSource {
	/// The average color over the rectangle from `ul` to `lr`, computed
	/// per channel with truncating integer division.
	fn mean(&self, ul: (u32, u32), lr: (u32, u32)) -> Color;
	/// The sum, over every pixel in the rectangle, of the squared
	/// per-channel deviation from the rectangle's mean color. Red,
	/// green and blue only; alpha does not count toward the score.
	fn score(&self, ul: (u32, u32), lr: (u32, u32)) -> i64;
}

/// Prefix-sum tables over an image, answering `RegionSource` queries in
/// constant time.
///
/// One pass over the image accumulates cumulative channel sums (and
/// sums of squares for the three scored channels) with a zeroed border
/// row and column, so any rectangle total is four table lookups.
pub struct RegionStats {
	width: usize,
	sums: Vec<[i64; 4]>,
	squares: Vec<[i64; 3]>,
}

impl RegionStats {
	/// Builds the cumulative tables for `img`.
	pub fn new(img: &image::RgbaImage) -> Self {
		let (w, h) = (img.width() as usize, img.height() as usize);
		let mut sums = vec![[0i64; 4]; (w + 1) * (h + 1)];
		let mut squares = vec![[0i64; 3]; (w + 1) * (h + 1)];
		for (x, y, pixel) in img.enumerate_pixels() {
			let (x, y) = (x as usize, y as usize);
			let here = (y + 1) * (w + 1) + (x + 1);
			let above = y * (w + 1) + (x + 1);
			let left = (y + 1) * (w + 1) + x;
			let diag = y * (w + 1) + x;
			for c in 0..4 {
				let v = pixel.0[c] as i64;
				sums[here][c] = v + sums[above][c] + sums[left][c] - sums[diag][c];
				if c < 3 {
					squares[here][c] = v * v + squares[above][c] + squares[left][c]
						- squares[diag][c];
				}
			}
		}
		RegionStats { width: w, sums, squares }
	}

	fn corner(&self, x: usize, y: usize) -> usize {
		y * (self.width + 1) + x
	}

	/// Channel totals over an inclusive rectangle, by inclusion-exclusion.
	fn rect<const N: usize>(
		&self,
		table: &[[i64; N]],
		ul: (u32, u32),
		lr: (u32, u32)
	) -> [i64; N] {
		let (x0, y0) = (ul.0 as usize, ul.1 as usize);
		let (x1, y1) = (lr.0 as usize + 1, lr.1 as usize + 1);
		let mut totals = [0i64; N];
		for c in 0..N {
			totals[c] = table[self.corner(x1, y1)][c] - table[self.corner(x1, y0)][c]
				- table[self.corner(x0, y1)][c] + table[self.corner(x0, y0)][c];
		}
		totals
	}
}

fn area(ul: (u32, u32), lr: (u32, u32)) -> i64 {
	(lr.0 - ul.0 + 1) as i64 * (lr.1 - ul.1 + 1) as i64
}

impl RegionSource for RegionStats {
	fn mean(&self, ul: (u32, u32), lr: (u32, u32)) -> Color {
		let area = area(ul, lr);
		let sums = self.rect(&self.sums, ul, lr);
		image::Rgba([
			(sums[0] / area) as u8,
			(sums[1] / area) as u8,
			(sums[2] / area) as u8,
			(sums[3] / area) as u8,
		])
	}

	fn score(&self, ul: (u32, u32), lr: (u32, u32)) -> i64 {
		let area = area(ul, lr);
		let sums = self.rect(&self.sums, ul, lr);
		let squares = self.rect(&self.squares, ul, lr);
		(0..3).map(|c| squares[c] - (sums[c] * sums[c]) / area).sum()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn img(w: u32, h: u32, pixels: &[[u8; 4]]) -> image::RgbaImage {
		image::RgbaImage::from_raw(w, h, pixels.concat()).unwrap()
	}

	#[test]
	fn single_pixel_mean_is_that_pixel() {
		let stats = RegionStats::new(&img(1, 1, &[[10, 20, 30, 40]]));
		assert_eq!(stats.mean((0, 0), (0, 0)), image::Rgba([10, 20, 30, 40]));
		assert_eq!(stats.score((0, 0), (0, 0)), 0);
	}

	#[test]
	fn mean_truncates_per_channel() {
		let stats = RegionStats::new(&img(2, 1, &[[0, 0, 0, 255], [10, 20, 31, 255]]));
		// 31 / 2 rounds down
		assert_eq!(stats.mean((0, 0), (1, 0)), image::Rgba([5, 10, 15, 255]));
	}

	#[test]
	fn score_is_the_sum_of_squared_deviations() {
		let stats = RegionStats::new(&img(2, 1, &[[0, 0, 0, 0], [10, 20, 30, 0]]));
		// per channel: sumsq - sum^2 / area = 100-50, 400-200, 900-450
		assert_eq!(stats.score((0, 0), (1, 0)), 50 + 200 + 450);
	}

	#[test]
	fn score_ignores_alpha() {
		let stats = RegionStats::new(&img(2, 1, &[[5, 5, 5, 0], [5, 5, 5, 255]]));
		assert_eq!(stats.score((0, 0), (1, 0)), 0);
	}

	#[test]
	fn sub_rectangles_are_queried_by_inclusion_exclusion() {
		let stats = RegionStats::new(&img(2, 2, &[
			[1, 0, 0, 255], [3, 0, 0, 255],
			[5, 0, 0, 255], [7, 0, 0, 255],
		]));
		assert_eq!(stats.mean((1, 0), (1, 1)), image::Rgba([5, 0, 0, 255]));
		assert_eq!(stats.mean((0, 1), (1, 1)), image::Rgba([6, 0, 0, 255]));
		assert_eq!(stats.mean((0, 0), (1, 1)), image::Rgba([4, 0, 0, 255]));
		assert_eq!(stats.mean((0, 0), (0, 0)), image::Rgba([1, 0, 0, 255]));
	}
}
