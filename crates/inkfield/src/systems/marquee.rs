//! Title and favicon marquee.
//!
//! Pure scroll/layout state. The host paints the result: it sets the document
//! title and draws the letters onto a 16×16 favicon canvas. Both advance on a
//! host timer every [`MARQUEE_PERIOD`], independent of animation frames, so
//! they keep moving in background tabs where they scroll faster.

/// Host timer period in seconds.
pub const MARQUEE_PERIOD: f32 = 0.05;
/// Favicon edge length in pixels.
pub const FAVICON_SIZE: f32 = 16.0;
/// Advance of one letter in `bold 12px monospace`, used until the host measures it.
pub const DEFAULT_LETTER_WIDTH: f32 = 7.2;

const TITLE_STEP_VISIBLE: f32 = 0.3;
const TITLE_STEP_HIDDEN: f32 = 1.0;
const FAVICON_BASE_SPEED: f32 = 1.5;
const HIDDEN_SPEED_MULTIPLIER: f32 = 5.0;
const HUE_STEP: f32 = 2.5;

const GRADIENT: [(f32, &str); 4] = [
    (0.0, "#ff6b6b"),
    (0.33, "#4ecdc4"),
    (0.66, "#45b7d1"),
    (1.0, "#9966ff"),
];

/// Scrolling document title: the text padded to twice its length, rotated.
#[derive(Debug, Clone)]
pub struct TitleMarquee {
    chars: Vec<char>,
    pos: f32,
}

impl TitleMarquee {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            pos: 0.0,
        }
    }

    /// Title for the current scroll position.
    pub fn display(&self) -> String {
        let len = self.chars.len();
        if len == 0 {
            return String::new();
        }
        let visible = len * 2;
        let mut padded: Vec<char> = self.chars.clone();
        padded.resize(visible, ' ');
        let doubled: Vec<char> = padded.iter().chain(padded.iter()).copied().collect();
        let start = (self.pos % len as f32).floor() as usize;
        doubled[start..start + visible].iter().collect()
    }

    /// Return the current title, then scroll.
    pub fn advance(&mut self, hidden: bool) -> String {
        let title = self.display();
        let len = self.chars.len() as f32;
        if len > 0.0 {
            let step = if hidden { TITLE_STEP_HIDDEN } else { TITLE_STEP_VISIBLE };
            self.pos = (self.pos + step) % len;
        }
        title
    }
}

/// One gradient colour stop (offset in [0, 1)).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    pub offset: f32,
    pub color: &'static str,
}

/// Where to draw one favicon letter (baseline-middle, left-aligned).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LetterPlacement {
    pub ch: char,
    pub x: f32,
    pub y: f32,
}

/// Everything needed to paint one favicon frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FaviconFrame {
    pub gradient: [GradientStop; 4],
    pub letters: Vec<LetterPlacement>,
}

/// Favicon scroller: letters bob on a sine wave over a drifting gradient.
#[derive(Debug, Clone)]
pub struct FaviconMarquee {
    chars: Vec<char>,
    scroll_pos: f32,
    current_speed: f32,
    speed_multiplier: f32,
    hue_offset: f32,
    frame: u64,
}

impl FaviconMarquee {
    pub fn new(text: &str) -> Self {
        Self {
            chars: text.chars().collect(),
            scroll_pos: 0.0,
            current_speed: FAVICON_BASE_SPEED,
            speed_multiplier: 1.0,
            hue_offset: 0.0,
            frame: 0,
        }
    }

    pub fn set_speed_multiplier(&mut self, multiplier: f32) {
        self.speed_multiplier = multiplier;
        self.current_speed = FAVICON_BASE_SPEED * multiplier;
    }

    pub fn speed_multiplier(&self) -> f32 {
        self.speed_multiplier
    }

    /// Gradient stops shifted by `offset` percent, wrapped into [0, 1).
    pub fn gradient(offset: f32) -> [GradientStop; 4] {
        GRADIENT.map(|(pos, color)| GradientStop {
            offset: (pos + offset / 100.0) % 1.0,
            color,
        })
    }

    /// Lay out the next frame and advance the animation.
    pub fn update(&mut self, letter_width: f32) -> FaviconFrame {
        self.frame += 1;

        let gradient = Self::gradient(self.hue_offset);
        self.hue_offset = (self.hue_offset + HUE_STEP * self.speed_multiplier) % 100.0;

        let lw = letter_width.max(0.0);
        let total = self.chars.len() as f32 * lw + FAVICON_SIZE;
        let scroll = self.scroll_pos % total;
        let frame = self.frame as f32;

        let mut letters = Vec::with_capacity(self.chars.len() * 2);
        for (i, &ch) in self.chars.iter().enumerate() {
            let fi = i as f32;
            let y = FAVICON_SIZE / 2.0 + (frame / 5.0 + fi / 2.0).sin() * 4.0;
            let x = FAVICON_SIZE - scroll + fi * lw;
            letters.push(LetterPlacement { ch, x, y });
            // wrap around so the strip re-enters from the right
            if x + lw < FAVICON_SIZE {
                letters.push(LetterPlacement { ch, x: x + total, y });
            }
        }

        // total >= FAVICON_SIZE, so the wrap never divides by zero
        self.scroll_pos = (self.scroll_pos + self.current_speed) % total;
        FaviconFrame { gradient, letters }
    }
}

/// Output of one marquee update.
#[derive(Debug, Clone, PartialEq)]
pub struct MarqueeFrame {
    pub title: String,
    pub favicon: FaviconFrame,
}

/// Title + favicon marquee sharing one host timer.
#[derive(Debug, Clone)]
pub struct Marquee {
    title: TitleMarquee,
    favicon: FaviconMarquee,
    hidden: bool,
    letter_width: f32,
}

impl Marquee {
    pub fn new(text: &str) -> Self {
        Self {
            title: TitleMarquee::new(text),
            favicon: FaviconMarquee::new(text),
            hidden: false,
            letter_width: DEFAULT_LETTER_WIDTH,
        }
    }

    /// Page visibility changed: hidden pages scroll faster.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
        self.favicon.set_speed_multiplier(if hidden { HIDDEN_SPEED_MULTIPLIER } else { 1.0 });
    }

    pub fn is_hidden(&self) -> bool {
        self.hidden
    }

    /// Use a measured letter advance instead of [`DEFAULT_LETTER_WIDTH`].
    pub fn set_letter_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.letter_width = width;
        }
    }

    /// Produce the next frame. Called once per [`MARQUEE_PERIOD`].
    pub fn update(&mut self) -> MarqueeFrame {
        MarqueeFrame {
            favicon: self.favicon.update(self.letter_width),
            title: self.title.advance(self.hidden),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_window_is_twice_text_length() {
        let t = TitleMarquee::new("abc");
        assert_eq!(t.display(), "abc   ");
    }

    #[test]
    fn title_scrolls_by_whole_characters() {
        let mut t = TitleMarquee::new("abc");
        // 0.3 per update while visible → index 1 after four updates (1.2)
        for _ in 0..4 {
            t.advance(false);
        }
        assert_eq!(t.display(), "bc   a");
    }

    #[test]
    fn hidden_title_scrolls_one_per_update() {
        let mut t = TitleMarquee::new("abc");
        assert_eq!(t.advance(true), "abc   ");
        assert_eq!(t.advance(true), "bc   a");
        assert_eq!(t.advance(true), "c   ab");
        // wraps modulo the text length, not the padded length
        assert_eq!(t.advance(true), "abc   ");
    }

    #[test]
    fn empty_title_is_empty() {
        let mut t = TitleMarquee::new("");
        assert_eq!(t.advance(false), "");
    }

    #[test]
    fn gradient_offsets_wrap() {
        let stops = FaviconMarquee::gradient(50.0);
        assert!((stops[0].offset - 0.5).abs() < 1e-6);
        assert!((stops[3].offset - 0.5).abs() < 1e-6);
        assert!((stops[1].offset - 0.83).abs() < 1e-5);
        assert!((stops[2].offset - 0.16).abs() < 1e-5);
        assert_eq!(stops[0].color, "#ff6b6b");
    }

    #[test]
    fn first_favicon_frame_starts_offscreen_right() {
        let mut f = FaviconMarquee::new("ab");
        let frame = f.update(8.0);
        assert_eq!(frame.letters.len(), 2);
        assert_eq!(frame.letters[0].x, 16.0);
        assert_eq!(frame.letters[1].x, 24.0);
        let expected_y = 8.0 + (1.0f32 / 5.0).sin() * 4.0;
        assert!((frame.letters[0].y - expected_y).abs() < 1e-5);
    }

    #[test]
    fn letters_wrap_when_leaving_left_edge() {
        let mut f = FaviconMarquee::new("ab");
        // total = 2*8 + 16 = 32; scroll 30 → 'a' at x = -14
        for _ in 0..20 {
            f.update(8.0);
        }
        let frame = f.update(8.0);
        let a: Vec<_> = frame.letters.iter().filter(|l| l.ch == 'a').collect();
        assert_eq!(a.len(), 2);
        assert!((a[1].x - a[0].x - 32.0).abs() < 1e-4);
    }

    #[test]
    fn hidden_page_speeds_up_favicon() {
        let mut m = Marquee::new("zeo.lol");
        m.set_hidden(true);
        assert_eq!(m.favicon.speed_multiplier(), 5.0);
        m.set_hidden(false);
        assert_eq!(m.favicon.speed_multiplier(), 1.0);
    }

    #[test]
    fn update_yields_title_and_favicon() {
        let mut m = Marquee::new("zeo.lol");
        let frame = m.update();
        assert_eq!(frame.title.chars().count(), 14);
        assert_eq!(frame.favicon.letters.len(), 7);
    }

    #[test]
    fn hidden_marquee_scrolls_title_a_full_character() {
        let mut m = Marquee::new("abc");
        m.set_hidden(true);
        assert_eq!(m.update().title, "abc   ");
        assert_eq!(m.update().title, "bc   a");
    }

    #[test]
    fn scroll_positions_stay_bounded() {
        let mut t = TitleMarquee::new("zeo.lol");
        let mut f = FaviconMarquee::new("zeo.lol");
        f.set_speed_multiplier(HIDDEN_SPEED_MULTIPLIER);
        for _ in 0..200_000 {
            t.advance(true);
            f.update(8.0);
        }
        assert!(t.pos >= 0.0 && t.pos < 7.0, "title pos {}", t.pos);
        let total = 7.0 * 8.0 + FAVICON_SIZE;
        assert!(f.scroll_pos >= 0.0 && f.scroll_pos < total, "scroll {}", f.scroll_pos);
        // still moving after many updates
        let before = t.display();
        t.advance(true);
        assert_ne!(t.display(), before);
    }

    #[test]
    fn bad_letter_width_is_ignored() {
        let mut m = Marquee::new("x");
        m.set_letter_width(f32::NAN);
        m.set_letter_width(-1.0);
        assert_eq!(m.letter_width, DEFAULT_LETTER_WIDTH);
        m.set_letter_width(6.0);
        assert_eq!(m.letter_width, 6.0);
    }
}
