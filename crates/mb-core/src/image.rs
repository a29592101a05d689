use crate::Error;

/// Owned, tightly packed row-major image.
#[derive(Debug, Clone, PartialEq)]
pub struct Image<T> {
    width: usize,
    height: usize,
    data: Vec<T>,
}

impl<T> Image<T> {
    /// Wraps `data`, which must hold exactly `width * height` elements.
    pub fn from_vec(width: usize, height: usize, data: Vec<T>) -> Result<Self, Error> {
        check_len(min_required_len(width, height, width), data.len(), true)?;
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Builds an image by evaluating `f(x, y)` in row-major order.
    pub fn from_fn(width: usize, height: usize, mut f: impl FnMut(usize, usize) -> T) -> Self {
        let data = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self {
            width,
            height,
            data,
        }
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

    pub fn get(&self, x: usize, y: usize) -> Option<&T> {
        (x < self.width && y < self.height).then(|| &self.data[y * self.width + x])
    }

    pub fn row_mut(&mut self, y: usize) -> &mut [T] {
        let w = self.width;
        &mut self.data[y * w..(y + 1) * w]
    }

    pub fn as_view(&self) -> ImageView<'_, T> {
        ImageView {
            width: self.width,
            height: self.height,
            stride: self.width,
            data: &self.data,
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

/// Borrowed, possibly strided view over a row-major buffer.
///
/// `stride` is measured in elements and may exceed `width` for padded rows.
/// The final row only needs `width` elements.
#[derive(Debug, Clone, Copy)]
pub struct ImageView<'a, T> {
    width: usize,
    height: usize,
    stride: usize,
    data: &'a [T],
}

impl<'a, T> ImageView<'a, T> {
    pub fn from_slice(
        width: usize,
        height: usize,
        stride: usize,
        data: &'a [T],
    ) -> Result<Self, Error> {
        if stride < width {
            return Err(Error::InvalidStride);
        }
        check_len(min_required_len(width, height, stride), data.len(), false)?;

        Ok(Self {
            width,
            height,
            stride,
            data,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Row `y` without padding. Panics when `y >= height`.
    pub fn row(&self, y: usize) -> &'a [T] {
        assert!(y < self.height, "row {y} outside view of height {}", self.height);
        &self.data[y * self.stride..][..self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &'a [T]> + '_ {
        (0..self.height).map(|y| self.row(y))
    }

    pub fn get(&self, x: usize, y: usize) -> Option<&'a T> {
        (x < self.width && y < self.height).then(|| &self.data[y * self.stride + x])
    }
}

/// Copies a view into a packed image, mapping every element with `f`.
pub fn map_view<T, U>(view: &ImageView<'_, T>, mut f: impl FnMut(&T) -> U) -> Image<U> {
    let mut data = Vec::with_capacity(view.width() * view.height());
    for row in view.rows() {
        data.extend(row.iter().map(&mut f));
    }

    Image {
        width: view.width(),
        height: view.height(),
        data,
    }
}

/// Elements needed to hold `height` rows of `stride`, where the last row only
/// needs `width`. `None` on overflow.
fn min_required_len(width: usize, height: usize, stride: usize) -> Option<usize> {
    match (width, height) {
        (0, _) | (_, 0) => Some(0),
        _ => (height - 1).checked_mul(stride)?.checked_add(width),
    }
}

/// `exact` demands `actual == expected`; otherwise `actual` may be longer.
fn check_len(expected: Option<usize>, actual: usize, exact: bool) -> Result<(), Error> {
    let expected = expected.unwrap_or(usize::MAX);
    let ok = if exact {
        actual == expected
    } else {
        actual >= expected
    };
    if ok {
        Ok(())
    } else {
        Err(Error::SizeMismatch { expected, actual })
    }
}

#[cfg(test)]
mod tests {
    use super::{Image, ImageView, map_view};
    use crate::Error;

    #[test]
    fn padded_view_skips_row_tails() {
        let buf = [7u8, 8, 0, 9, 10, 0, 11, 12];
        let view = ImageView::from_slice(2, 3, 3, &buf).expect("valid view");

        let rows: Vec<&[u8]> = view.rows().collect();
        assert_eq!(rows, vec![&[7u8, 8][..], &[9, 10], &[11, 12]]);
        assert_eq!(view.get(1, 2), Some(&12));
        assert_eq!(view.get(2, 0), None);
        assert_eq!(view.get(0, 3), None);
    }

    #[test]
    fn short_or_narrow_buffers_are_rejected() {
        let buf = [1u8, 2, 0, 3, 4];
        assert!(ImageView::from_slice(2, 2, 3, &buf).is_ok());
        assert_eq!(
            ImageView::from_slice(2, 2, 3, &buf[..4]).err(),
            Some(Error::SizeMismatch {
                expected: 5,
                actual: 4
            })
        );
        assert_eq!(
            ImageView::from_slice(4, 1, 3, &buf).err(),
            Some(Error::InvalidStride)
        );
    }

    #[test]
    fn from_vec_rejects_wrong_length() {
        let err = Image::from_vec(3, 3, vec![0.0f32; 8]).expect_err("length mismatch");
        assert_eq!(
            err,
            Error::SizeMismatch {
                expected: 9,
                actual: 8
            }
        );
        assert!(Image::from_vec(0, 5, Vec::<f32>::new()).is_ok());
    }

    #[test]
    fn from_fn_is_row_major() {
        let img = Image::from_fn(3, 2, |x, y| 10 * y + x);
        assert_eq!(img.data(), &[0, 1, 2, 10, 11, 12]);
        assert_eq!(img.get(2, 1), Some(&12));
    }

    #[test]
    fn row_mut_writes_one_row() {
        let mut img = Image::new_fill(2, 3, 0u8);
        img.row_mut(1).fill(5);
        assert_eq!(img.data(), &[0, 0, 5, 5, 0, 0]);
    }

    #[test]
    fn map_view_drops_row_padding() {
        let buf = [10u8, 20, 255, 30, 40, 255];
        let view = ImageView::from_slice(2, 2, 3, &buf).expect("valid view");
        let out = map_view(&view, |&v| f32::from(v) * 0.5);

        assert_eq!((out.width(), out.height()), (2, 2));
        assert_eq!(out.data(), &[5.0, 10.0, 15.0, 20.0]);
    }
}
