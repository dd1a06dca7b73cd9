//! Writing frames to image files
//!
//! PNG stills and PNG sequences, plus a looping animated GIF. A white tint
//! writes single-channel grayscale PNGs; any other tint writes RGBA.

use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use image::codecs::gif::{GifEncoder, Repeat};
use image::codecs::png::PngEncoder;
use image::{Delay, ExtendedColorType, Frame as ImageFrame, ImageEncoder, RgbaImage};

use crate::error::{Error, Result};
use crate::render::{Frame, FrameSequence};
use crate::tint::Tint;

/// Delay between GIF frames, matching a 20 fps preview loop
pub const DEFAULT_FRAME_DELAY_MS: u32 = 50;

fn image_err(e: image::ImageError) -> Error {
    Error::Image(e.to_string())
}

fn dimensions(frame: &Frame) -> Result<(u32, u32)> {
    if frame.pixels().is_empty() {
        return Err(Error::EmptyFrame);
    }
    let width = u32::try_from(frame.width()).map_err(|_| Error::Image("frame too wide".into()))?;
    let height = u32::try_from(frame.height()).map_err(|_| Error::Image("frame too tall".into()))?;
    Ok((width, height))
}

/// Encode one frame as PNG bytes
pub fn encode_png(frame: &Frame, tint: &Tint) -> Result<Vec<u8>> {
    let (width, height) = dimensions(frame)?;
    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    if *tint == Tint::WHITE {
        encoder
            .write_image(frame.pixels(), width, height, ExtendedColorType::L8)
            .map_err(image_err)?;
    } else {
        encoder
            .write_image(&tint.colorize(frame), width, height, ExtendedColorType::Rgba8)
            .map_err(image_err)?;
    }
    Ok(png)
}

pub fn write_png(frame: &Frame, tint: &Tint, path: &Path) -> Result<()> {
    let png = encode_png(frame, tint)?;
    std::fs::write(path, png)?;
    Ok(())
}

/// Write `dir/prefix_0000.png`, `dir/prefix_0001.png`, ... creating `dir`
/// if needed. Returns the written paths in frame order.
pub fn write_png_sequence(sequence: &FrameSequence, tint: &Tint, dir: &Path, prefix: &str) -> Result<Vec<PathBuf>> {
    std::fs::create_dir_all(dir)?;
    let mut paths = Vec::with_capacity(sequence.len());
    for (index, frame) in sequence.iter().enumerate() {
        let path = dir.join(format!("{prefix}_{index:04}.png"));
        write_png(frame, tint, &path)?;
        paths.push(path);
    }
    tracing::info!(frames = paths.len(), dir = %dir.display(), "png sequence written");
    Ok(paths)
}

/// Write the sequence as an endlessly looping animated GIF
pub fn write_gif(sequence: &FrameSequence, tint: &Tint, path: &Path, frame_delay_ms: u32) -> Result<()> {
    if sequence.is_empty() {
        return Err(Error::EmptySequence);
    }
    let file = BufWriter::new(File::create(path)?);
    let mut encoder = GifEncoder::new(file);
    encoder.set_repeat(Repeat::Infinite).map_err(image_err)?;

    let delay = Delay::from_numer_denom_ms(frame_delay_ms, 1);
    for frame in sequence {
        let (width, height) = dimensions(frame)?;
        let rgba = RgbaImage::from_raw(width, height, tint.colorize(frame))
            .ok_or_else(|| Error::Image("pixel buffer does not match frame size".into()))?;
        encoder
            .encode_frame(ImageFrame::from_parts(rgba, 0, 0, delay))
            .map_err(image_err)?;
    }
    tracing::info!(frames = sequence.len(), path = %path.display(), "gif written");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Settings;
    use crate::render::{render_frame, render_sequence};
    use image::codecs::gif::GifDecoder;
    use image::{AnimationDecoder, GenericImageView};

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("hyperspace-{name}-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn test_grayscale_png_round_trip() {
        let config = Settings::default().with_size(16, 10).build().unwrap();
        let frame = render_frame(&config, 0.6);
        let dir = scratch_dir("png");
        let path = dir.join("frame.png");
        write_png(&frame, &Tint::WHITE, &path).unwrap();

        let img = image::open(&path).unwrap();
        assert_eq!(img.dimensions(), (16, 11));
        let gray = img.to_luma8();
        assert_eq!(gray.as_raw().as_slice(), frame.pixels());
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_tinted_png_is_rgba() {
        let frame = Frame::from_pixels(2, 1, vec![0, 255]).unwrap();
        let png = encode_png(&frame, &Tint::new(200, 100, 50, 255)).unwrap();
        let img = image::load_from_memory(&png).unwrap().to_rgba8();
        assert_eq!(img.get_pixel(0, 0).0, [0, 0, 0, 255]);
        assert_eq!(img.get_pixel(1, 0).0, [200, 100, 50, 255]);
    }

    #[test]
    fn test_png_sequence_names() {
        let config = Settings::default().with_size(8, 5).with_frames(3, 0.2).build().unwrap();
        let seq = render_sequence(&config);
        let dir = scratch_dir("seq");
        let paths = write_png_sequence(&seq, &Tint::WHITE, &dir.join("out"), "tunnel").unwrap();
        assert_eq!(paths.len(), 3);
        assert!(paths[0].ends_with("tunnel_0000.png"));
        assert!(paths[2].ends_with("tunnel_0002.png"));
        assert!(paths.iter().all(|p| p.exists()));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_gif_frame_count() {
        let config = Settings::default().with_size(12, 9).with_frames(4, 0.2).build().unwrap();
        let seq = render_sequence(&config);
        let dir = scratch_dir("gif");
        let path = dir.join("tunnel.gif");
        write_gif(&seq, &Tint::WHITE, &path, DEFAULT_FRAME_DELAY_MS).unwrap();

        let reader = std::io::BufReader::new(File::open(&path).unwrap());
        let frames = GifDecoder::new(reader).unwrap().into_frames().collect_frames().unwrap();
        assert_eq!(frames.len(), 4);
        assert_eq!(frames[0].buffer().dimensions(), (12, 9));
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_empty_inputs_rejected() {
        let dir = scratch_dir("empty");
        let err = write_gif(&FrameSequence::default(), &Tint::WHITE, &dir.join("x.gif"), 50).unwrap_err();
        assert!(matches!(err, Error::EmptySequence));
        let empty = Frame::from_pixels(0, 0, Vec::new()).unwrap();
        assert!(matches!(encode_png(&empty, &Tint::WHITE), Err(Error::EmptyFrame)));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
