use crate::Error;

/// An RGB pixel, `[r, g, b]`.
pub type Rgb8 = [u8; 3];

/// Owned, contiguous row-major pixel buffer.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        let expected = width.checked_mul(height).ok_or(Error::SizeMismatch {
            expected: usize::MAX,
            actual: data.len(),
        })?;

        if data.len() != expected {
            return Err(Error::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn data(&self) -> &[T] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.width + x)
    }

    pub fn get_mut(&mut self, x: usize, y: usize) -> Option<&mut T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get_mut(y * self.width + x)
    }

    pub fn row(&self, y: usize) -> &[T] {
        assert!(y < self.height, "row index out of bounds");
        let start = y * self.width;
        &self.data[start..start + self.width]
    }

    /// Writes `value` if `(x, y)` is in bounds, otherwise does nothing.
    /// Drawing code clips per pixel with this.
    pub fn put(&mut self, x: i32, y: i32, value: T) {
        if x < 0 || y < 0 {
            return;
        }
        if let Some(px) = self.get_mut(x as usize, y as usize) {
            *px = value;
        }
    }
}

impl<T: Clone> Image<T> {
    pub fn new_fill(width: usize, height: usize, value: T) -> Self {
        let len = width.checked_mul(height).expect("image size overflow");
        Self {
            width,
            height,
            data: vec![value; len],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Image;
    use crate::Error;

    #[test]
    fn from_vec_validates_length() {
        let ok = Image::from_vec(2, 3, vec![0u8; 6]);
        assert!(ok.is_ok());

        let err = Image::from_vec(2, 3, vec![0u8; 5]);
        assert_eq!(
            err.unwrap_err(),
            Error::SizeMismatch {
                expected: 6,
                actual: 5
            }
        );
    }

    #[test]
    fn fill_get_and_put() {
        let mut img = Image::new_fill(4, 3, 7u8);
        assert_eq!(img.get(3, 2), Some(&7));
        assert_eq!(img.get(4, 0), None);
        assert_eq!(img.row(1), &[7, 7, 7, 7]);

        img.put(1, 1, 42);
        assert_eq!(img.get(1, 1), Some(&42));

        // Out-of-bounds writes are clipped, not panics.
        img.put(-1, 0, 9);
        img.put(0, 99, 9);
        assert_eq!(img.get(0, 0), Some(&7));
    }
}
