use argh::FromArgs;
use std::path::PathBuf;

use filtra::{
    imgproc::filter::apply_all,
    io::{montage, png as png_io},
};

#[derive(FromArgs)]
/// Apply the built-in 3x3 filter bank to a PNG image and save a montage
struct Args {
    /// path to an input png image
    #[argh(option, short = 'i')]
    image_path: PathBuf,

    /// path for the output montage (default: convolution_results.png)
    #[argh(option, short = 'o', default = "PathBuf::from(\"convolution_results.png\")")]
    output_path: PathBuf,

    /// background pixels between panels (default: 4)
    #[argh(option, short = 'g', default = "4")]
    gap: usize,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    // read the image as grayscale
    let gray = png_io::read_image_png_gray8(&args.image_path)?;
    log::info!("loaded {} as {}", args.image_path.display(), gray.size());

    // apply the whole kernel catalog
    let outputs = apply_all(&gray)?;
    for (kind, out) in outputs.iter() {
        log::info!("{kind}: {}", out.size());
    }

    // compose the original followed by the filter outputs, in catalog order
    let mut panels = vec![&gray];
    panels.extend(outputs.iter().map(|(_, out)| out));
    montage::write_montage_png(&args.output_path, &panels, args.gap)?;

    println!(
        "Convolutions complete. Results saved to '{}'",
        args.output_path.display()
    );

    Ok(())
}
