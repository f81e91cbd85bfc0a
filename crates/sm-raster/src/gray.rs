use sm_core::{Image, Rgb8};

/// Converts an RGB canvas to single-channel intensity with the usual
/// 0.299/0.587/0.114 weighting.
pub fn luma(img: &Image<Rgb8>) -> Image<u8> {
    let data = img
        .data()
        .iter()
        .map(|&[r, g, b]| {
            let v = r as f32 * 0.299 + g as f32 * 0.587 + b as f32 * 0.114;
            (v + 0.5) as u8
        })
        .collect();

    Image::from_vec(img.width(), img.height(), data).expect("same dimensions as input")
}

/// Global threshold maximizing between-class variance over the histogram.
pub fn otsu_threshold(gray: &Image<u8>) -> u8 {
    let mut hist = [0u32; 256];
    for &px in gray.data() {
        hist[px as usize] += 1;
    }

    let total = gray.data().len() as f64;
    let mut sum = 0.0;
    for (i, &count) in hist.iter().enumerate() {
        sum += count as f64 * i as f64;
    }

    let mut threshold = 0u8;
    let mut best = 0.0;
    let mut w_bg = 0.0;
    let mut sum_bg = 0.0;

    for (i, &count) in hist.iter().enumerate() {
        w_bg += count as f64;
        if w_bg == 0.0 {
            continue;
        }
        let w_fg = total - w_bg;
        if w_fg == 0.0 {
            break;
        }

        sum_bg += count as f64 * i as f64;
        let mean_diff = sum_bg / w_bg - (sum - sum_bg) / w_fg;
        let between = w_bg * w_fg * mean_diff * mean_diff;
        if between > best {
            best = between;
            threshold = i as u8;
        }
    }

    threshold
}

/// Inverse binarization: `value <= threshold` becomes 255, else 0.
pub fn binarize_inv(gray: &Image<u8>, threshold: u8) -> Image<u8> {
    let data = gray
        .data()
        .iter()
        .map(|&v| if v <= threshold { 255 } else { 0 })
        .collect();

    Image::from_vec(gray.width(), gray.height(), data).expect("same dimensions as input")
}

#[cfg(test)]
mod tests {
    use super::{binarize_inv, luma, otsu_threshold};
    use sm_core::Image;

    #[test]
    fn luma_weighting() {
        let img = Image::from_vec(2, 1, vec![[255, 0, 0], [0, 255, 0]]).expect("valid image");
        let g = luma(&img);
        // 255 * 0.299 = 76.2, 255 * 0.587 = 149.7
        assert_eq!(g.data(), &[76, 150]);
    }

    #[test]
    fn otsu_separates_bimodal_histogram() {
        let mut data = vec![50u8; 32];
        data.extend(vec![180u8; 32]);
        let gray = Image::from_vec(8, 8, data).expect("valid image");

        let t = otsu_threshold(&gray);
        assert!(t >= 50 && t < 180, "threshold {t} must split the modes");
    }

    #[test]
    fn binarize_inv_polarity() {
        let gray = Image::from_vec(3, 1, vec![10, 100, 200]).expect("valid image");
        let bin = binarize_inv(&gray, 100);
        assert_eq!(bin.data(), &[255, 255, 0]);
    }
}
