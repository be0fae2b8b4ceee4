use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use inkfield::{font_size_for, Raster, RasterError, TextBounds, TextRasterizer};

/// Font family the text is drawn in (always bold).
pub const FONT_FAMILY: &str = "Arial";

pub(crate) fn js_error(context: &str, err: JsValue) -> RasterError {
    RasterError::Backend(format!("{}: {:?}", context, err))
}

/// Create a detached canvas element.
pub(crate) fn create_canvas() -> Result<HtmlCanvasElement, RasterError> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| RasterError::Backend("no document".to_string()))?;
    document
        .create_element("canvas")
        .map_err(|e| js_error("create canvas", e))?
        .dyn_into::<HtmlCanvasElement>()
        .map_err(|_| RasterError::Backend("element is not a canvas".to_string()))
}

pub(crate) fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, RasterError> {
    canvas
        .get_context("2d")
        .map_err(|e| js_error("get 2d context", e))?
        .ok_or_else(|| RasterError::Backend("no 2d context".to_string()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| RasterError::Backend("context is not 2d".to_string()))
}

/// [`TextRasterizer`] that draws with the browser's own text engine on an
/// off-screen canvas and reads the pixels back.
pub struct CanvasRasterizer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl CanvasRasterizer {
    pub fn new() -> Result<Self, RasterError> {
        let canvas = create_canvas()?;
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx })
    }
}

impl TextRasterizer for CanvasRasterizer {
    fn rasterize(
        &mut self,
        text: &str,
        width: u32,
        height: u32,
    ) -> Result<(Raster, TextBounds), RasterError> {
        if width == 0 || height == 0 {
            return Ok((Raster::empty(), TextBounds::ZERO));
        }

        // resizing resets all context state
        self.canvas.set_width(width);
        self.canvas.set_height(height);
        let (w, h) = (width as f64, height as f64);
        let ctx = &self.ctx;

        ctx.set_fill_style_str("black");
        ctx.fill_rect(0.0, 0.0, w, h);

        let font_size = font_size_for(width, height);
        ctx.set_font(&format!("bold {}px {}", font_size, FONT_FAMILY));
        ctx.set_text_align("center");
        ctx.set_text_baseline("middle");
        ctx.set_fill_style_str("white");
        ctx.fill_text(text, w / 2.0, h / 2.0)
            .map_err(|e| js_error("fill text", e))?;

        let measured = ctx
            .measure_text(text)
            .map_err(|e| js_error("measure text", e))?
            .width() as f32;

        let Clamped(pixels) = ctx
            .get_image_data(0.0, 0.0, w, h)
            .map_err(|e| js_error("read pixels", e))?
            .data();
        let raster = Raster::from_rgba(width, height, pixels)?;

        Ok((raster, TextBounds::centered(measured, font_size, width, height)))
    }
}
