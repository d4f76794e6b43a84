use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use futures::future::{FutureExt, LocalBoxFuture};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, File, FileReader, HtmlCanvasElement, HtmlImageElement};

use shared::constants::{THUMBNAIL_HEIGHT, THUMBNAIL_MIME, THUMBNAIL_WIDTH};
use shared::data_url::DataUrl;
use shared::error::ThumbnailError;
use shared::thumbnail::ThumbnailGenerator;
use shared::types::Thumbnail;

use crate::utils::{create_element, js_message};

type Settle = Rc<RefCell<Option<oneshot::Sender<bool>>>>;

/// Browser generator: `FileReader` for the read stage, an `<img>` plus a 2D
/// canvas for the render stage.
#[derive(Debug, Clone, Copy, Default)]
pub struct CanvasThumbnailer;

impl ThumbnailGenerator for CanvasThumbnailer {
    type Source = File;

    fn read(&self, file: File) -> LocalBoxFuture<'static, Result<DataUrl, ThumbnailError>> {
        read_as_data_url(file).boxed_local()
    }

    fn render(&self, image: DataUrl) -> LocalBoxFuture<'static, Result<Thumbnail, ThumbnailError>> {
        draw_thumbnail(image).boxed_local()
    }
}

fn settle_callback(settle: &Settle, loaded: bool) -> Closure<dyn FnMut()> {
    let settle = settle.clone();
    Closure::<dyn FnMut()>::new(move || {
        if let Some(tx) = settle.borrow_mut().take() {
            tx.send(loaded).ok();
        }
    })
}

/// Detaches the reader's handlers when the read finishes or is aborted, so the
/// browser never calls into a dropped closure.
struct ReaderGuard {
    reader: FileReader,
    onload: Closure<dyn FnMut()>,
    onerror: Closure<dyn FnMut()>,
}

impl Drop for ReaderGuard {
    fn drop(&mut self) {
        self.reader.set_onload(None);
        self.reader.set_onerror(None);
        if self.reader.ready_state() == FileReader::LOADING {
            self.reader.abort();
        }
    }
}

struct ImageGuard {
    image: HtmlImageElement,
    onload: Closure<dyn FnMut()>,
    onerror: Closure<dyn FnMut()>,
}

impl Drop for ImageGuard {
    fn drop(&mut self) {
        self.image.set_onload(None);
        self.image.set_onerror(None);
    }
}

async fn read_as_data_url(file: File) -> Result<DataUrl, ThumbnailError> {
    let reader = FileReader::new().map_err(|err| ThumbnailError::Read(js_message(&err)))?;
    let (tx, rx) = oneshot::channel();
    let settle: Settle = Rc::new(RefCell::new(Some(tx)));

    let guard = ReaderGuard {
        onload: settle_callback(&settle, true),
        onerror: settle_callback(&settle, false),
        reader,
    };
    guard.reader.set_onload(Some(guard.onload.as_ref().unchecked_ref()));
    guard.reader.set_onerror(Some(guard.onerror.as_ref().unchecked_ref()));
    guard.reader.read_as_data_url(&file).map_err(|err| ThumbnailError::Read(js_message(&err)))?;

    if !rx.await.unwrap_or(false) {
        let reason = guard.reader.error().map(|err| err.message()).unwrap_or_default();
        return Err(ThumbnailError::Read(reason));
    }

    guard.reader.result()
        .ok()
        .and_then(|value| value.as_string())
        .ok_or_else(|| ThumbnailError::Read("empty result".to_string()))
        .and_then(DataUrl::parse)
}

async fn draw_thumbnail(source: DataUrl) -> Result<Thumbnail, ThumbnailError> {
    let image = HtmlImageElement::new().map_err(|err| ThumbnailError::Decode(js_message(&err)))?;
    let (tx, rx) = oneshot::channel();
    let settle: Settle = Rc::new(RefCell::new(Some(tx)));

    let guard = ImageGuard {
        onload: settle_callback(&settle, true),
        onerror: settle_callback(&settle, false),
        image,
    };
    guard.image.set_onload(Some(guard.onload.as_ref().unchecked_ref()));
    guard.image.set_onerror(Some(guard.onerror.as_ref().unchecked_ref()));
    guard.image.set_src(source.as_str());

    if !rx.await.unwrap_or(false) {
        return Err(ThumbnailError::Decode("image failed to load".to_string()));
    }

    let canvas = create_element("canvas")
        .and_then(|element| element.dyn_into::<HtmlCanvasElement>().ok())
        .ok_or_else(|| ThumbnailError::Canvas("cannot create canvas".to_string()))?;
    canvas.set_width(THUMBNAIL_WIDTH);
    canvas.set_height(THUMBNAIL_HEIGHT);

    let context = canvas.get_context("2d")
        .map_err(|err| ThumbnailError::Canvas(js_message(&err)))?
        .and_then(|context| context.dyn_into::<CanvasRenderingContext2d>().ok())
        .ok_or_else(|| ThumbnailError::Canvas("2d context unavailable".to_string()))?;

    // stretched, aspect ratio is not kept
    context
        .draw_image_with_html_image_element_and_dw_and_dh(
            &guard.image,
            0.0,
            0.0,
            THUMBNAIL_WIDTH as f64,
            THUMBNAIL_HEIGHT as f64,
        )
        .map_err(|err| ThumbnailError::Canvas(js_message(&err)))?;

    let url = canvas.to_data_url_with_type(THUMBNAIL_MIME)
        .map_err(|err| ThumbnailError::Encode(js_message(&err)))?;
    Ok(Thumbnail(DataUrl::parse(url)?))
}
