use image::{ImageBuffer, Luma, Rgba};

/// Converts a frame to grayscale with the ITU-R BT.601 luma weights
/// (Y = 0.299*R + 0.587*G + 0.114*B), the same weighting OpenCV's
/// BGR→GRAY uses. Tesseract reads the bank label more reliably from this
/// copy than from the color frame.
pub fn to_grayscale(img: &ImageBuffer<Rgba<u8>, Vec<u8>>) -> ImageBuffer<Luma<u8>, Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut output = ImageBuffer::new(width, height);

    for (x, y, pixel) in img.enumerate_pixels() {
        let r = pixel[0] as f32;
        let g = pixel[1] as f32;
        let b = pixel[2] as f32;
        let luma = (0.299 * r + 0.587 * g + 0.114 * b).round().min(255.0);
        output.put_pixel(x, y, Luma([luma as u8]));
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_grayscale_weights() {
        let mut img: ImageBuffer<Rgba<u8>, Vec<u8>> = ImageBuffer::new(4, 1);
        img.put_pixel(0, 0, Rgba([255, 255, 255, 255]));
        img.put_pixel(1, 0, Rgba([255, 0, 0, 255]));
        img.put_pixel(2, 0, Rgba([0, 255, 0, 255]));
        img.put_pixel(3, 0, Rgba([0, 0, 255, 255]));

        let gray = to_grayscale(&img);

        assert_eq!(gray.dimensions(), (4, 1));
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
        assert_eq!(gray.get_pixel(1, 0)[0], 76);
        assert_eq!(gray.get_pixel(2, 0)[0], 150);
        assert_eq!(gray.get_pixel(3, 0)[0], 29);
    }

    #[test]
    fn test_to_grayscale_ignores_alpha() {
        let img = ImageBuffer::from_pixel(2, 2, Rgba([100u8, 100, 100, 0]));
        let gray = to_grayscale(&img);
        assert!(gray.pixels().all(|p| p[0] == 100));
    }
}
