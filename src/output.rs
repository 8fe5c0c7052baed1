use anyhow::Result;

use crate::types::{Frame, GestureLabel, LandmarkSet, HAND_CONNECTIONS};

/// Preview colors and sizes, resolved from config.
#[derive(Debug, Clone, Copy)]
pub struct PreviewStyle {
    pub landmark_color: u32,
    pub connection_color: u32,
    pub dot_size: usize,
}

/// What the preview should show for the current frame.
pub struct PreviewState<'a> {
    pub hand: Option<&'a LandmarkSet>,
    pub raw_label: Option<GestureLabel>,
    pub confirmed: Option<GestureLabel>,
}

pub struct WindowOutput {
    window: minifb::Window,
    buffer: Vec<u32>,
    width: usize,
    height: usize,
    style: PreviewStyle,
}

impl WindowOutput {
    pub fn new(title: &str, width: usize, height: usize, style: PreviewStyle) -> Result<Self> {
        let mut window = minifb::Window::new(
            title,
            width,
            height,
            minifb::WindowOptions {
                resize: true,
                ..minifb::WindowOptions::default()
            },
        ).map_err(|e| anyhow::anyhow!("Failed to create window: {}", e))?;

        window.limit_update_rate(Some(std::time::Duration::from_micros(16600))); // ~60 FPS

        Ok(Self {
            window,
            buffer: vec![0; width * height],
            width,
            height,
            style,
        })
    }

    /// True once the window is closed or Q / Escape is pressed.
    pub fn quit_requested(&self) -> bool {
        !self.window.is_open()
            || self.window.is_key_down(minifb::Key::Escape)
            || self.window.is_key_down(minifb::Key::Q)
    }

    pub fn show(&mut self, frame: &Frame, state: &PreviewState) -> Result<()> {
        let target_w = frame.width() as usize;
        let target_h = frame.height() as usize;
        if target_w != self.width || target_h != self.height {
            self.width = target_w;
            self.height = target_h;
        }
        if self.buffer.len() != self.width * self.height {
            self.buffer.resize(self.width * self.height, 0);
        }

        // Copy frame to buffer
        for (i, pixel) in frame.pixels().enumerate() {
            if i >= self.buffer.len() { break; }
            let r = pixel[0] as u32;
            let g = pixel[1] as u32;
            let b = pixel[2] as u32;
            self.buffer[i] = (r << 16) | (g << 8) | b;
        }

        if let Some(hand) = state.hand {
            self.draw_hand(hand);
        }
        self.draw_indicator(state.raw_label, state.confirmed);

        self.window
            .update_with_buffer(&self.buffer, self.width, self.height)
            .map_err(|e| anyhow::anyhow!("Window update failed: {}", e))?;

        Ok(())
    }

    fn to_pixel(&self, x: f32, y: f32) -> (f32, f32) {
        (x * self.width as f32, y * self.height as f32)
    }

    fn draw_hand(&mut self, hand: &LandmarkSet) {
        let color = self.style.connection_color;
        for &(a, b) in HAND_CONNECTIONS.iter() {
            let (ax, ay) = self.to_pixel(hand.point(a).x, hand.point(a).y);
            let (bx, by) = self.to_pixel(hand.point(b).x, hand.point(b).y);
            let mut t = 0.0;
            while t <= 1.0 {
                let px = ax + (bx - ax) * t;
                let py = ay + (by - ay) * t;
                self.draw_point(px as i32, py as i32, color);
                t += 0.01;
            }
        }

        let dot = self.style.dot_size as i32;
        let color = self.style.landmark_color;
        for p in hand.points() {
            let (px, py) = self.to_pixel(p.x, p.y);
            for dy in -dot / 2..=dot / 2 {
                for dx in -dot / 2..=dot / 2 {
                    self.draw_point(px as i32 + dx, py as i32 + dy, color);
                }
            }
        }
    }

    /// Top-left square: confirmed label fill, raw label border.
    fn draw_indicator(&mut self, raw: Option<GestureLabel>, confirmed: Option<GestureLabel>) {
        let size = 28;
        let fill = label_color(confirmed);
        let border = label_color(raw);
        for y in 0..size {
            for x in 0..size {
                let edge = x < 3 || y < 3 || x >= size - 3 || y >= size - 3;
                self.draw_point(10 + x, 10 + y, if edge { border } else { fill });
            }
        }
    }

    fn draw_point(&mut self, x: i32, y: i32, color: u32) {
        if x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height {
            let idx = y as usize * self.width + x as usize;
            if idx < self.buffer.len() {
                self.buffer[idx] = color;
            }
        }
    }
}

fn label_color(label: Option<GestureLabel>) -> u32 {
    match label {
        Some(GestureLabel::Open) => 0x0000C850,
        Some(GestureLabel::Closed) => 0x00DC2828,
        None => 0x00646464,
    }
}

/// "#RRGGBB" to 0RGB. Anything else falls back to red.
pub fn parse_hex(hex: &str) -> u32 {
    if hex.len() == 7 && hex.starts_with('#') {
        u32::from_str_radix(&hex[1..], 16).unwrap_or(0x00FF0000)
    } else {
        0x00FF0000 // Default Red
    }
}
