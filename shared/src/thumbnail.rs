use futures::future::LocalBoxFuture;

use crate::data_url::DataUrl;
use crate::error::ThumbnailError;
use crate::types::Thumbnail;

/// Turns a picked file into an inline thumbnail in two asynchronous stages.
///
/// `read` loads the raw file as a data URL; `render` decodes it, stretches it
/// onto a `THUMBNAIL_WIDTH`×`THUMBNAIL_HEIGHT` surface and re-encodes it as
/// `THUMBNAIL_MIME`. The card awaits them in order and checks its own
/// lifetime in between.
pub trait ThumbnailGenerator {
    type Source;

    fn read(&self, source: Self::Source) -> LocalBoxFuture<'static, Result<DataUrl, ThumbnailError>>;

    fn render(&self, image: DataUrl) -> LocalBoxFuture<'static, Result<Thumbnail, ThumbnailError>>;
}

#[cfg(feature = "image-thumbnail")]
pub use native::{ImageSource, ImageThumbnailer};

#[cfg(feature = "image-thumbnail")]
mod native {
    use std::io::Cursor;

    use futures::future::{self, FutureExt, LocalBoxFuture};
    use image::imageops::FilterType;
    use image::{DynamicImage, ImageFormat};

    use crate::constants::{THUMBNAIL_HEIGHT, THUMBNAIL_MIME, THUMBNAIL_WIDTH};
    use crate::data_url::DataUrl;
    use crate::error::ThumbnailError;
    use crate::types::Thumbnail;

    use super::ThumbnailGenerator;

    /// An image file already in memory, as handed over by a file picker.
    #[derive(Debug, Clone)]
    pub struct ImageSource {
        pub mime: String,
        pub bytes: Vec<u8>,
    }

    impl ImageSource {
        pub fn new(mime: &str, bytes: Vec<u8>) -> Self {
            Self { mime: mime.to_string(), bytes }
        }
    }

    /// Host-side generator backed by the `image` crate.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct ImageThumbnailer;

    impl ThumbnailGenerator for ImageThumbnailer {
        type Source = ImageSource;

        fn read(&self, source: ImageSource) -> LocalBoxFuture<'static, Result<DataUrl, ThumbnailError>> {
            if source.bytes.is_empty() {
                return future::ready(Err(ThumbnailError::Read("empty file".to_string()))).boxed_local();
            }
            future::ready(Ok(DataUrl::from_bytes(&source.mime, &source.bytes))).boxed_local()
        }

        fn render(&self, image: DataUrl) -> LocalBoxFuture<'static, Result<Thumbnail, ThumbnailError>> {
            future::ready(render_jpeg(&image)).boxed_local()
        }
    }

    fn render_jpeg(image: &DataUrl) -> Result<Thumbnail, ThumbnailError> {
        let bytes = image.decode()?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|err| ThumbnailError::Decode(err.to_string()))?;
        let resized = decoded.resize_exact(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, FilterType::Triangle);
        // JPEG has no alpha channel
        let flat = DynamicImage::ImageRgb8(resized.to_rgb8());
        let mut out = Cursor::new(Vec::new());
        flat.write_to(&mut out, ImageFormat::Jpeg)
            .map_err(|err| ThumbnailError::Encode(err.to_string()))?;
        Ok(Thumbnail(DataUrl::from_bytes(THUMBNAIL_MIME, &out.into_inner())))
    }

}
