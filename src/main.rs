use image::error::ImageError;

use bintree_img::Bintree;
use bintree_img::error::BuildError;

/// Helper function for `main`.
fn error_exit(msg: &str, code: i32) -> ! {
	eprintln!("{}", msg);
	std::process::exit(code)
}

/// `clap`-based CLI for block-compressing images with a binary partition tree.
///
/// May exit process with status code if there are errors:
///
/// 1: `clap` error
///
/// 2: invalid arguments
///
/// 3: file I/O issues
///
/// 4: invalid image data
///
/// 5: computation limits exceeded
///
/// 10: other, potentially unknown error
fn main() {
	env_logger::init();
	let clap_matches = clap::App::new("bintree_img")
		.version("0.1.0")
		.about("Approximates images with a variance-minimizing binary partition tree.")
		.arg_from_usage("-p, --prune=[PCT] 'Fraction of leaves that must match the subtree average for it to collapse; defaults to 0.85'")
		.arg_from_usage("-t, --tolerance=[N] 'Maximum squared color distance for a leaf to count as matching; defaults to 1024'")
		.arg_from_usage("-n, --no-prune 'Render the full tree without pruning'")
		.arg_from_usage("<INPUT> 'Path to input image'")
		.arg_from_usage("[OUTPUT] 'Path to output file; defaults to INPUT with a modified file extension'")
		.get_matches();

	let input_path = clap_matches.value_of("INPUT").unwrap();
	let source = match image::open(input_path) {
		Ok(i) => i,
		Err(e) => {
			let (msg, code) = match e {
				ImageError::Decoding(_) => ("Invalid image data", 4),
				ImageError::Limits(_) => ("Computation limits exceeded", 5),
				ImageError::IoError(_) => ("File not found or could not be read", 3),
				_ => ("An error occurred", 10)
			};
			error_exit(msg, code)
		}
	}.into_rgba();
	let (pct, tol) = (
		match clap_matches.value_of("prune").unwrap_or("0.85").parse::<f64>() {
			Ok(n) => n,
			Err(_) => error_exit("Non-numeric value for prune", 2)
		},
		match clap_matches.value_of("tolerance").unwrap_or("1024").parse::<i64>() {
			Ok(n) => n,
			Err(_) => error_exit("Non-numeric value for tolerance", 2)
		}
	);
	let mut tree = match Bintree::from_image(&source) {
		Ok(t) => t,
		Err(BuildError::EmptyGrid) => error_exit("Input image is empty", 4)
	};
	if !clap_matches.is_present("no-prune") {
		tree.prune(pct, tol);
	}
	eprintln!("{} leaves in rendered tree", tree.leaf_count());
	match tree.render().save(clap_matches.value_of("OUTPUT")
		.unwrap_or(&(input_path.rsplitn(2, '.').last().unwrap().to_string() + ".tree.png"))) {
		Ok(_) => (),
		Err(_) => error_exit("Could not save output", 3)
	}
}
