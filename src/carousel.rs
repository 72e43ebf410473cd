//! Image/content carousel.
//!
//! A cyclic state machine over slide positions. Relative moves wrap in both
//! directions; absolute jumps must name an existing slide.
//!
//! The jump check is stricter than the dot handlers found on existing sites,
//! which move the track to whatever index they are given. Here an
//! out-of-range [`Carousel::go_to`] fails with [`CarouselError::InvalidIndex`]
//! and leaves the position and the display unchanged.

use thiserror::Error;

use crate::markup::CarouselMarkup;
use crate::page::Effect;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CarouselError {
    #[error("Slide index {index} out of range (carousel has {slide_count} slides)")]
    InvalidIndex { index: usize, slide_count: usize },
}

/// Relative navigation command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Prev,
    Next,
}

impl Direction {
    /// Parse the signed step used by carousel controls (`-1` / `1`).
    pub fn from_step(step: i32) -> Option<Self> {
        match step {
            -1 => Some(Direction::Prev),
            1 => Some(Direction::Next),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Carousel {
    track_present: bool,
    slide_count: usize,
    dot_count: usize,
    current_slide: usize,
}

impl Carousel {
    pub fn new(markup: Option<&CarouselMarkup>) -> Self {
        match markup {
            Some(m) => Self {
                track_present: true,
                slide_count: m.slide_count,
                dot_count: m.dot_count,
                current_slide: 0,
            },
            None => Self::default(),
        }
    }

    /// A carousel with no track, or with one slide or fewer, ignores commands.
    pub fn is_active(&self) -> bool {
        self.track_present && self.slide_count > 1
    }

    pub fn current_slide(&self) -> usize {
        self.current_slide
    }

    pub fn slide_count(&self) -> usize {
        self.slide_count
    }

    pub fn move_by(&mut self, direction: Direction) -> Vec<Effect> {
        if !self.is_active() {
            return Vec::new();
        }
        self.current_slide = match direction {
            Direction::Prev if self.current_slide == 0 => self.slide_count - 1,
            Direction::Prev => self.current_slide - 1,
            Direction::Next => (self.current_slide + 1) % self.slide_count,
        };
        self.position_effects()
    }

    pub fn go_to(&mut self, index: usize) -> Result<Vec<Effect>, CarouselError> {
        if !self.is_active() {
            return Ok(Vec::new());
        }
        if index >= self.slide_count {
            return Err(CarouselError::InvalidIndex {
                index,
                slide_count: self.slide_count,
            });
        }
        self.current_slide = index;
        Ok(self.position_effects())
    }

    /// Track transform followed by one update per dot indicator.
    fn position_effects(&self) -> Vec<Effect> {
        let mut effects = Vec::with_capacity(self.dot_count + 1);
        effects.push(Effect::SetTrackTransform(track_transform(self.current_slide)));
        effects.extend((0..self.dot_count).map(|index| Effect::SetDotActive {
            index,
            active: index == self.current_slide,
        }));
        effects
    }
}

/// CSS transform placing `slide` in view.
pub fn track_transform(slide: usize) -> String {
    format!("translateX(-{}%)", slide * 100)
}
