//! Windowless backend that replays a scripted event sequence and records
//! every presented frame.
//!
//! The script is a list of per-frame batches: batch `n` is what `poll_event`
//! drains before the `n`th present. Once the script runs out the surface
//! reports `Quit`, so a headless run always terminates.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use mpg_core::{DrawOp, PlatformEvent, RecordingCanvas};

use crate::surface::{Platform, PlatformError, PlatformSurface};
use crate::window::PlatformConfig;

/// Shared view of what the headless backend did, readable after the
/// surface itself has been dropped.
#[derive(Debug, Default)]
pub struct HeadlessStats {
    surfaces_created: Cell<usize>,
    surfaces_released: Cell<usize>,
    frames: RefCell<Vec<Vec<DrawOp>>>,
}

impl HeadlessStats {
    pub fn surfaces_created(&self) -> usize {
        self.surfaces_created.get()
    }

    pub fn surfaces_released(&self) -> usize {
        self.surfaces_released.get()
    }

    pub fn frame_count(&self) -> usize {
        self.frames.borrow().len()
    }

    /// Draw ops of every presented frame, oldest first.
    pub fn frames(&self) -> Vec<Vec<DrawOp>> {
        self.frames.borrow().clone()
    }
}

pub struct HeadlessPlatform {
    script: Vec<Vec<PlatformEvent>>,
    failure: Option<String>,
    max_texture_dimension: u32,
    stats: Rc<HeadlessStats>,
}

impl HeadlessPlatform {
    pub fn new(script: Vec<Vec<PlatformEvent>>) -> Self {
        Self {
            script,
            failure: None,
            max_texture_dimension: RecordingCanvas::DEFAULT_MAX_TEXTURE_DIMENSION,
            stats: Rc::new(HeadlessStats::default()),
        }
    }

    /// A platform whose surface creation always fails with `reason`.
    pub fn failing(reason: &str) -> Self {
        let mut platform = Self::new(Vec::new());
        platform.failure = Some(reason.to_string());
        platform
    }

    pub fn with_max_texture_dimension(mut self, max: u32) -> Self {
        self.max_texture_dimension = max;
        self
    }

    pub fn stats(&self) -> Rc<HeadlessStats> {
        Rc::clone(&self.stats)
    }
}

impl Platform for HeadlessPlatform {
    type Surface = HeadlessSurface;

    fn create_surface(&mut self, config: &PlatformConfig) -> Result<HeadlessSurface, PlatformError> {
        if let Some(reason) = &self.failure {
            return Err(PlatformError::Window(reason.clone()));
        }
        self.stats
            .surfaces_created
            .set(self.stats.surfaces_created.get() + 1);
        log::debug!(
            "Headless surface '{}' created: {}x{}",
            config.title,
            config.width,
            config.height
        );

        let mut script: VecDeque<VecDeque<PlatformEvent>> = self
            .script
            .iter()
            .map(|batch| batch.iter().copied().collect())
            .collect();
        let pending = script.pop_front().unwrap_or_default();
        Ok(HeadlessSurface {
            canvas: RecordingCanvas::new(config.width, config.height)
                .with_max_texture_dimension(self.max_texture_dimension),
            pending,
            script,
            exhausted: false,
            stats: Rc::clone(&self.stats),
        })
    }
}

pub struct HeadlessSurface {
    canvas: RecordingCanvas,
    pending: VecDeque<PlatformEvent>,
    script: VecDeque<VecDeque<PlatformEvent>>,
    exhausted: bool,
    stats: Rc<HeadlessStats>,
}

impl PlatformSurface for HeadlessSurface {
    type Canvas = RecordingCanvas;

    fn poll_event(&mut self) -> Option<PlatformEvent> {
        if self.exhausted {
            self.exhausted = false;
            return Some(PlatformEvent::Quit);
        }
        self.pending.pop_front()
    }

    fn canvas(&mut self) -> &mut RecordingCanvas {
        &mut self.canvas
    }

    fn present(&mut self) {
        let ops = self.canvas.take_ops();
        log::trace!("Headless frame presented with {} ops", ops.len());
        self.stats.frames.borrow_mut().push(ops);

        self.pending.clear();
        match self.script.pop_front() {
            Some(batch) => self.pending = batch,
            None => self.exhausted = true,
        }
    }
}

impl Drop for HeadlessSurface {
    fn drop(&mut self) {
        self.stats
            .surfaces_released
            .set(self.stats.surfaces_released.get() + 1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mpg_core::{Canvas, Color, Key};

    #[test]
    fn events_are_delivered_one_batch_per_frame() {
        let mut platform = HeadlessPlatform::new(vec![
            vec![PlatformEvent::left_click(1, 2)],
            vec![PlatformEvent::KeyDown(Key::Escape)],
        ]);
        let mut surface = platform
            .create_surface(&PlatformConfig::default())
            .expect("headless surface");

        assert_eq!(surface.poll_event(), Some(PlatformEvent::left_click(1, 2)));
        assert_eq!(surface.poll_event(), None);
        surface.present();
        assert_eq!(surface.poll_event(), Some(PlatformEvent::KeyDown(Key::Escape)));
        assert_eq!(surface.poll_event(), None);
    }

    #[test]
    fn exhausted_script_reports_quit_once_per_frame() {
        let mut platform = HeadlessPlatform::new(Vec::new());
        let mut surface = platform
            .create_surface(&PlatformConfig::default())
            .expect("headless surface");
        assert_eq!(surface.poll_event(), None);
        surface.present();
        assert_eq!(surface.poll_event(), Some(PlatformEvent::Quit));
        assert_eq!(surface.poll_event(), None);
    }

    #[test]
    fn present_records_frame_ops() {
        let mut platform = HeadlessPlatform::new(Vec::new());
        let stats = platform.stats();
        let mut surface = platform
            .create_surface(&PlatformConfig::default())
            .expect("headless surface");
        surface.canvas().clear(Color::BLACK);
        surface.present();
        surface.present();

        assert_eq!(stats.frame_count(), 2);
        assert_eq!(stats.frames()[0], vec![DrawOp::Clear(Color::BLACK)]);
        assert!(stats.frames()[1].is_empty());
    }

    #[test]
    fn stats_track_surface_lifetime() {
        let mut platform = HeadlessPlatform::new(Vec::new());
        let stats = platform.stats();
        let surface = platform
            .create_surface(&PlatformConfig::default())
            .expect("headless surface");
        assert_eq!(stats.surfaces_created(), 1);
        assert_eq!(stats.surfaces_released(), 0);
        drop(surface);
        assert_eq!(stats.surfaces_released(), 1);
    }

    #[test]
    fn failing_platform_reports_window_error() {
        let mut platform = HeadlessPlatform::failing("no display");
        let stats = platform.stats();
        match platform.create_surface(&PlatformConfig::default()) {
            Err(PlatformError::Window(reason)) => assert_eq!(reason, "no display"),
            Err(other) => panic!("unexpected error: {other}"),
            Ok(_) => panic!("failing platform must not create a surface"),
        }
        assert_eq!(stats.surfaces_created(), 0);
    }

    #[test]
    fn canvas_uses_configured_size() {
        let mut platform = HeadlessPlatform::new(Vec::new());
        let config = PlatformConfig {
            width: 320,
            height: 200,
            ..PlatformConfig::default()
        };
        let mut surface = platform.create_surface(&config).expect("headless surface");
        assert_eq!(surface.canvas().size(), (320, 200));
    }
}
