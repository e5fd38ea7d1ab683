//! Rotating image carousel.

use std::time::Duration;

/// Default time between automatic slide advances.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(3);

/// Slide selection state for a carousel.
///
/// Timing is the caller's concern; the carousel only tracks which slide is
/// active.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Carousel {
    slides: Vec<String>,
    current: usize,
}

impl Carousel {
    /// Create a carousel with the first slide active.
    pub fn new(slides: Vec<String>) -> Self {
        Self { slides, current: 0 }
    }

    /// Advance to the next slide, wrapping after the last.
    pub fn next(&mut self) -> Option<&str> {
        if self.slides.is_empty() {
            return None;
        }
        self.current = (self.current + 1) % self.slides.len();
        self.active()
    }

    /// Make `index` the active slide. Out-of-range indexes are ignored.
    pub fn show(&mut self, index: usize) -> bool {
        if index >= self.slides.len() {
            return false;
        }
        self.current = index;
        true
    }

    /// The active slide's image reference.
    pub fn active(&self) -> Option<&str> {
        self.slides.get(self.current).map(String::as_str)
    }

    /// Index of the active slide.
    pub fn active_index(&self) -> usize {
        self.current
    }

    /// Whether automatic rotation should run at all.
    pub fn rotates(&self) -> bool {
        !self.slides.is_empty()
    }

    /// All slides.
    pub fn slides(&self) -> &[String] {
        &self.slides
    }

    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carousel(n: usize) -> Carousel {
        Carousel::new((1..=n).map(|i| format!("s{i}.jpg")).collect())
    }

    #[test]
    fn test_next_wraps() {
        let mut c = carousel(3);
        assert_eq!(c.active(), Some("s1.jpg"));
        assert_eq!(c.next(), Some("s2.jpg"));
        assert_eq!(c.next(), Some("s3.jpg"));
        assert_eq!(c.next(), Some("s1.jpg"));
        assert_eq!(c.active_index(), 0);
    }

    #[test]
    fn test_show() {
        let mut c = carousel(3);
        assert!(c.show(2));
        assert_eq!(c.active(), Some("s3.jpg"));
        assert!(!c.show(3));
        assert_eq!(c.active_index(), 2);
    }

    #[test]
    fn test_empty_carousel() {
        let mut c = Carousel::default();
        assert!(!c.rotates());
        assert!(c.next().is_none());
        assert!(c.active().is_none());
        assert!(c.is_empty());
    }

    #[test]
    fn test_single_slide_stays() {
        let mut c = carousel(1);
        assert!(c.rotates());
        assert_eq!(c.next(), Some("s1.jpg"));
        assert_eq!(c.len(), 1);
    }
}
