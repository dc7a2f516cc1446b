//! Playback cursor over a precomputed trajectory.
//!
//! The cursor only picks which frame is on screen; the frames themselves are
//! computed up front by the model crates.

pub const DEFAULT_FPS: f64 = 60.0;

#[derive(Debug, Clone)]
pub struct FrameCursor {
    pub(crate) frame: usize,
    pub(crate) playing: bool,
    pub(crate) last_tick: Option<f64>,
    pub frames_per_second: f64,
}

impl Default for FrameCursor {
    fn default() -> Self {
        Self {
            frame: 0,
            playing: true,
            last_tick: None,
            frames_per_second: DEFAULT_FPS,
        }
    }
}

impl FrameCursor {
    /// Current frame, clamped to a trajectory of `frame_count` frames.
    pub fn frame(&self, frame_count: usize) -> usize {
        self.frame.min(frame_count.saturating_sub(1))
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn toggle(&mut self) {
        self.playing = !self.playing;
        self.last_tick = None;
    }

    pub fn restart(&mut self) {
        self.frame = 0;
        self.last_tick = None;
    }

    /// Move forward by however many frames fit into the time since the last
    /// tick, looping at the end. Returns whether the frame changed.
    pub fn advance(&mut self, now: f64, frame_count: usize) -> bool {
        if !self.playing || frame_count == 0 {
            return false;
        }
        let Some(last) = self.last_tick else {
            self.last_tick = Some(now);
            return false;
        };

        let steps = ((now - last) * self.frames_per_second).floor();
        if steps < 1.0 {
            return false;
        }
        self.last_tick = Some(last + steps / self.frames_per_second);
        self.frame = (self.frame(frame_count) + steps as usize) % frame_count;
        true
    }

    /// Play/pause, restart and a frame scrubber.
    pub fn show_controls(&mut self, ui: &mut egui::Ui, frame_count: usize) {
        ui.horizontal(|ui| {
            let label = if self.playing { "⏸ Pause" } else { "▶ Play" };
            if ui.button(label).clicked() {
                self.toggle();
            }
            if ui.button("⏮ Restart").clicked() {
                self.restart();
            }
            ui.add(
                egui::DragValue::new(&mut self.frames_per_second)
                    .speed(1.0)
                    .range(1.0..=240.0)
                    .suffix(" fps"),
            );
            if frame_count > 0 {
                let mut frame = self.frame(frame_count);
                if ui
                    .add(egui::Slider::new(&mut frame, 0..=frame_count - 1).text("frame"))
                    .changed()
                {
                    self.frame = frame;
                    self.last_tick = None;
                }
            }
        });
    }
}
