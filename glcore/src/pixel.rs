//! Client memory layout of pixel transfers.
//!
//! Image uploads and readbacks read or write client memory with a layout given by the pixel store
//! parameters of the context. The size of a transfer must be computed the same way as the driver,
//! otherwise it reads or writes past the end of the slice.
use crate::{
    api::{gl, Api, GLenum},
    error::{Error, GlResult},
};

/// Direction of a pixel transfer.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PixelDirection {
    /// From the driver to client memory (readbacks).
    Pack,
    /// From client memory to the driver (image uploads).
    Unpack,
}

/// Size in bytes of one pixel, `None` if the combination is not known.
pub fn pixel_size(format: GLenum, ty: GLenum) -> Option<usize> {
    // packed types hold a whole pixel
    match ty {
        gl::UNSIGNED_BYTE_3_3_2 | gl::UNSIGNED_BYTE_2_3_3_REV => return Some(1),
        gl::UNSIGNED_SHORT_5_6_5
        | gl::UNSIGNED_SHORT_5_6_5_REV
        | gl::UNSIGNED_SHORT_4_4_4_4
        | gl::UNSIGNED_SHORT_4_4_4_4_REV
        | gl::UNSIGNED_SHORT_5_5_5_1
        | gl::UNSIGNED_SHORT_1_5_5_5_REV => return Some(2),
        gl::UNSIGNED_INT_8_8_8_8
        | gl::UNSIGNED_INT_8_8_8_8_REV
        | gl::UNSIGNED_INT_10_10_10_2
        | gl::UNSIGNED_INT_2_10_10_10_REV
        | gl::UNSIGNED_INT_24_8
        | gl::UNSIGNED_INT_10F_11F_11F_REV
        | gl::UNSIGNED_INT_5_9_9_9_REV => return Some(4),
        gl::FLOAT_32_UNSIGNED_INT_24_8_REV => return Some(8),
        _ => {}
    }

    let components = match format {
        gl::RED
        | gl::GREEN
        | gl::BLUE
        | gl::RED_INTEGER
        | gl::GREEN_INTEGER
        | gl::BLUE_INTEGER
        | gl::DEPTH_COMPONENT
        | gl::STENCIL_INDEX => 1,
        gl::RG | gl::RG_INTEGER | gl::DEPTH_STENCIL => 2,
        gl::RGB | gl::BGR | gl::RGB_INTEGER | gl::BGR_INTEGER => 3,
        gl::RGBA | gl::BGRA | gl::RGBA_INTEGER | gl::BGRA_INTEGER => 4,
        _ => return None,
    };
    let component_size = match ty {
        gl::UNSIGNED_BYTE | gl::BYTE => 1,
        gl::UNSIGNED_SHORT | gl::SHORT | gl::HALF_FLOAT => 2,
        gl::UNSIGNED_INT | gl::INT | gl::FLOAT => 4,
        _ => return None,
    };
    Some(components * component_size)
}

/// Pixel store parameters of one transfer direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct PixelStore {
    pub alignment: usize,
    /// Pixels per row, 0 for the width of the image.
    pub row_length: usize,
    /// Rows per image of a 3D transfer, 0 for the height of the image.
    pub image_height: usize,
    pub skip_pixels: usize,
    pub skip_rows: usize,
    pub skip_images: usize,
}

impl Default for PixelStore {
    fn default() -> Self {
        PixelStore {
            alignment: 4,
            row_length: 0,
            image_height: 0,
            skip_pixels: 0,
            skip_rows: 0,
            skip_images: 0,
        }
    }
}

impl PixelStore {
    /// Reads the current parameters from the driver.
    pub fn query(api: &dyn Api, direction: PixelDirection) -> PixelStore {
        let pnames = match direction {
            PixelDirection::Pack => [
                gl::PACK_ALIGNMENT,
                gl::PACK_ROW_LENGTH,
                gl::PACK_IMAGE_HEIGHT,
                gl::PACK_SKIP_PIXELS,
                gl::PACK_SKIP_ROWS,
                gl::PACK_SKIP_IMAGES,
            ],
            PixelDirection::Unpack => [
                gl::UNPACK_ALIGNMENT,
                gl::UNPACK_ROW_LENGTH,
                gl::UNPACK_IMAGE_HEIGHT,
                gl::UNPACK_SKIP_PIXELS,
                gl::UNPACK_SKIP_ROWS,
                gl::UNPACK_SKIP_IMAGES,
            ],
        };
        let get = |i: usize| api.get_integer(pnames[i]).max(0) as usize;
        PixelStore {
            alignment: get(0),
            row_length: get(1),
            image_height: get(2),
            skip_pixels: get(3),
            skip_rows: get(4),
            skip_images: get(5),
        }
    }

    /// Number of bytes of client memory touched by a transfer of `size` pixels.
    ///
    /// `dimensions` is the dimensionality of the image: rows are skipped only for 2D and 3D
    /// transfers, images only for 3D ones. Rows are padded to `alignment`, except the last one.
    pub fn required_len(&self, pixel_size: usize, size: [u32; 3], dimensions: u32) -> usize {
        let (width, height, depth) = (size[0] as usize, size[1] as usize, size[2] as usize);
        if width == 0 || height == 0 || depth == 0 {
            return 0;
        }
        let alignment = self.alignment.max(1);
        let row_pixels = if self.row_length > 0 {
            self.row_length
        } else {
            width
        };
        let row_bytes = row_pixels.saturating_mul(pixel_size);
        let row_stride = row_bytes.saturating_add(alignment - 1) / alignment * alignment;
        let image_rows = if self.image_height > 0 {
            self.image_height
        } else {
            height
        };
        let image_stride = row_stride.saturating_mul(image_rows);
        let skip_rows = if dimensions >= 2 { self.skip_rows } else { 0 };
        let skip_images = if dimensions >= 3 { self.skip_images } else { 0 };

        (skip_images + depth - 1)
            .saturating_mul(image_stride)
            .saturating_add((skip_rows + height - 1).saturating_mul(row_stride))
            .saturating_add((self.skip_pixels + width).saturating_mul(pixel_size))
    }
}

/// Checks that `len` bytes of client memory hold a transfer of `size` pixels.
pub fn check_transfer_len(
    format: GLenum,
    ty: GLenum,
    size: [u32; 3],
    dimensions: u32,
    store: &PixelStore,
    len: usize,
) -> GlResult<()> {
    let pixel_size = pixel_size(format, ty).ok_or(Error::UnsupportedPixelFormat { format, ty })?;
    let required = store.required_len(pixel_size, size, dimensions);
    if len < required {
        return Err(Error::BufferTooSmall {
            required,
            actual: len,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rows_are_padded_to_the_alignment() {
        let store = PixelStore::default();
        let rgb = pixel_size(gl::RGB, gl::UNSIGNED_BYTE).unwrap();
        // two rows of 3 bytes, the first one padded to 4
        assert_eq!(store.required_len(rgb, [1, 2, 1], 2), 7);
        assert_eq!(store.required_len(rgb, [4, 2, 1], 2), 12 + 12);
        let tight = PixelStore {
            alignment: 1,
            ..PixelStore::default()
        };
        assert_eq!(tight.required_len(rgb, [1, 2, 1], 2), 6);
    }

    #[test]
    fn row_length_and_skips_extend_the_transfer() {
        let store = PixelStore {
            row_length: 8,
            skip_pixels: 1,
            skip_rows: 2,
            ..PixelStore::default()
        };
        // RGBA8: rows of 32 bytes, starting 2 rows and 1 pixel in
        assert_eq!(store.required_len(4, [4, 2, 1], 2), 3 * 32 + 5 * 4);
        // skipped rows don't apply to 1D images
        assert_eq!(store.required_len(4, [4, 1, 1], 1), 5 * 4);
    }

    #[test]
    fn volumes_use_the_image_height() {
        let store = PixelStore {
            image_height: 4,
            skip_images: 1,
            ..PixelStore::default()
        };
        assert_eq!(store.required_len(1, [4, 2, 2], 3), 2 * 16 + 4 + 4);
        assert_eq!(store.required_len(1, [4, 2, 0], 3), 0);
    }

    #[test]
    fn packed_and_unknown_formats() {
        assert_eq!(pixel_size(gl::RGB, gl::UNSIGNED_SHORT_5_6_5), Some(2));
        assert_eq!(pixel_size(gl::DEPTH_STENCIL, gl::UNSIGNED_INT_24_8), Some(4));
        assert_eq!(pixel_size(gl::RGBA_INTEGER, gl::INT), Some(16));
        assert!(matches!(
            check_transfer_len(gl::RGBA, 0x1234, [1, 1, 1], 2, &PixelStore::default(), 64),
            Err(Error::UnsupportedPixelFormat { ty: 0x1234, .. })
        ));
        assert!(matches!(
            check_transfer_len(gl::RGB, gl::UNSIGNED_BYTE, [1, 2, 1], 2, &PixelStore::default(), 6),
            Err(Error::BufferTooSmall { required: 7, actual: 6 })
        ));
    }
}
