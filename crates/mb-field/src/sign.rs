use mb_core::{Error, ImageView};

use crate::distance::ChannelField;

/// Negates all three channels wherever `alpha >= threshold`.
///
/// Purely pointwise: the sign follows the alpha test even where the nearest
/// edge geometry would suggest otherwise.
pub fn apply_sign(
    field: &mut ChannelField,
    alpha: &ImageView<'_, f32>,
    threshold: f32,
) -> Result<(), Error> {
    let (w, h) = (field.width(), field.height());
    if alpha.width() != w || alpha.height() != h {
        return Err(Error::SizeMismatch {
            expected: w * h,
            actual: alpha.width() * alpha.height(),
        });
    }

    for (y, row) in alpha.rows().enumerate() {
        for channel in field.channels_mut() {
            for (d, &a) in channel.row_mut(y).iter_mut().zip(row) {
                if a >= threshold {
                    *d = -*d;
                }
            }
        }
    }

    Ok(())
}
