//! Page-level side effects: user-agent sniffing, document title and favicon.

use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlLinkElement};

use inkfield::{MarqueeFrame, RasterError, FAVICON_SIZE};

use crate::canvas::{context_2d, create_canvas, js_error};

const MOBILE_MARKERS: &[&str] = &[
    "android",
    "webos",
    "iphone",
    "ipad",
    "ipod",
    "blackberry",
    "windows phone",
];

const FAVICON_ID: &str = "dynamic-favicon";
const FAVICON_FONT: &str = "bold 12px monospace";

/// Case-insensitive match against the usual handheld user-agent markers.
pub fn is_mobile_user_agent(user_agent: &str) -> bool {
    let ua = user_agent.to_lowercase();
    MOBILE_MARKERS.iter().any(|m| ua.contains(m))
}

/// Whether the current browser looks like a phone or tablet.
pub fn detect_mobile() -> bool {
    web_sys::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .is_some_and(|ua| is_mobile_user_agent(&ua))
}

pub fn is_hidden() -> bool {
    document().is_some_and(|d| d.hidden())
}

fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Paints marquee frames: sets the document title and redraws the favicon.
pub struct MarqueePainter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
}

impl MarqueePainter {
    pub fn new() -> Result<Self, RasterError> {
        let canvas = create_canvas()?;
        let size = FAVICON_SIZE as u32;
        canvas.set_width(size);
        canvas.set_height(size);
        let ctx = context_2d(&canvas)?;
        Ok(Self { canvas, ctx })
    }

    /// Advance of one letter in the favicon font.
    pub fn letter_width(&self) -> f32 {
        self.ctx.set_font(FAVICON_FONT);
        self.ctx
            .measure_text("W")
            .map(|m| m.width() as f32)
            .unwrap_or(0.0)
    }

    pub fn paint(&self, frame: &MarqueeFrame) -> Result<(), RasterError> {
        let Some(document) = document() else {
            return Ok(());
        };
        document.set_title(&frame.title);
        self.draw_favicon(frame)?;
        self.publish(&document)
    }

    fn draw_favicon(&self, frame: &MarqueeFrame) -> Result<(), RasterError> {
        let ctx = &self.ctx;
        let size = FAVICON_SIZE as f64;

        ctx.set_fill_style_str("#fff");
        ctx.fill_rect(0.0, 0.0, size, size);

        let gradient = ctx.create_linear_gradient(0.0, 0.0, size, size);
        for stop in &frame.favicon.gradient {
            gradient
                .add_color_stop(stop.offset, stop.color)
                .map_err(|e| js_error("gradient stop", e))?;
        }
        ctx.set_fill_style_canvas_gradient(&gradient);
        ctx.fill_rect(0.0, 0.0, size, size);

        ctx.set_font(FAVICON_FONT);
        ctx.set_text_align("left");
        ctx.set_text_baseline("middle");
        ctx.set_stroke_style_str("#fff");
        ctx.set_line_width(2.0);
        ctx.set_fill_style_str("#000");

        let mut buf = [0u8; 4];
        for letter in &frame.favicon.letters {
            let ch = letter.ch.encode_utf8(&mut buf);
            let (x, y) = (letter.x as f64, letter.y as f64);
            ctx.stroke_text(ch, x, y).map_err(|e| js_error("stroke text", e))?;
            ctx.fill_text(ch, x, y).map_err(|e| js_error("fill text", e))?;
        }
        Ok(())
    }

    fn publish(&self, document: &Document) -> Result<(), RasterError> {
        let url = self
            .canvas
            .to_data_url_with_type("image/png")
            .map_err(|e| js_error("encode favicon", e))?;

        let link = match document.get_element_by_id(FAVICON_ID) {
            Some(el) => el,
            None => {
                let el = document
                    .create_element("link")
                    .map_err(|e| js_error("create link", e))?;
                el.set_id(FAVICON_ID);
                if let Some(head) = document.head() {
                    head.append_child(&el).map_err(|e| js_error("append favicon", e))?;
                }
                el
            }
        };
        let link = link
            .dyn_into::<HtmlLinkElement>()
            .map_err(|_| RasterError::Backend("favicon element is not a link".to_string()))?;
        link.set_rel("icon");
        link.set_href(&url);
        Ok(())
    }
}
