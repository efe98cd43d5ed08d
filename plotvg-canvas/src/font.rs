//! Font keys and the font registry consulted by text-drawing canvases.
//!
//! A [`Font`] is only an identifier. The [`FontRegistry`] maps it to a
//! [`Face`] holding the raw font file bytes; backends that actually draw
//! glyphs parse those bytes with `ttf-parser` at draw time.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, RwLock};

/// Slant of a font face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

/// Weight of a font face.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Composite key identifying a font face.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Font {
    /// Typeface family, e.g. "Liberation".
    pub typeface: String,
    /// Variant within the typeface, e.g. "Serif" or "Mono".
    pub variant: String,
    pub style: FontStyle,
    pub weight: FontWeight,
}

impl Font {
    /// A regular-weight, upright font.
    pub fn new(typeface: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            typeface: typeface.into(),
            variant: variant.into(),
            ..Default::default()
        }
    }

    /// Same font with a different style.
    pub fn with_style(mut self, style: FontStyle) -> Self {
        self.style = style;
        self
    }

    /// Same font with a different weight.
    pub fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// PostScript-like face name, e.g. `LiberationSerif-BoldItalic`.
    pub fn name(&self) -> String {
        let suffix = match (self.weight, self.style) {
            (FontWeight::Normal, FontStyle::Normal) => "Regular",
            (FontWeight::Bold, FontStyle::Normal) => "Bold",
            (FontWeight::Normal, FontStyle::Italic) => "Italic",
            (FontWeight::Bold, FontStyle::Italic) => "BoldItalic",
        };
        format!("{}{}-{}", self.typeface, self.variant, suffix)
    }

    /// Family name as written in SVG output ("Liberation Serif").
    pub(crate) fn family(&self) -> String {
        if self.variant.is_empty() {
            self.typeface.clone()
        } else {
            format!("{} {}", self.typeface, self.variant)
        }
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

/// A font key bound to the font file that renders it.
#[derive(Debug, Clone)]
pub struct Face {
    pub font: Font,
    /// Raw font file data (TTF/OTF). Arc-wrapped for cheap cloning.
    pub data: Arc<Vec<u8>>,
    /// Face index within a font collection.
    pub index: u32,
}

impl Face {
    pub fn new(font: Font, data: Vec<u8>) -> Self {
        Self::from_shared(font, Arc::new(data), 0)
    }

    /// Bind a font key to already shared font data.
    pub fn from_shared(font: Font, data: Arc<Vec<u8>>, index: u32) -> Self {
        Self { font, data, index }
    }
}

/// Thread-safe mapping from [`Font`] keys to [`Face`]s.
///
/// Registries are populated once and then shared (as `Arc<FontRegistry>`)
/// between canvases and replay operations. Lookups take a read lock only.
#[derive(Debug, Default)]
pub struct FontRegistry {
    faces: RwLock<HashMap<Font, Face>>,
}

impl FontRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register faces, replacing any face previously stored under the same key.
    pub fn add(&self, faces: impl IntoIterator<Item = Face>) {
        let mut map = self.faces.write().unwrap_or_else(|e| e.into_inner());
        for face in faces {
            log::debug!(target: "canvas", "registering font {}", face.font.name());
            map.insert(face.font.clone(), face);
        }
    }

    /// Look up the face for a font key.
    pub fn resolve(&self, font: &Font) -> Option<Face> {
        self.faces
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(font)
            .cloned()
    }

    /// Whether a face is registered for the font key.
    pub fn has(&self, font: &Font) -> bool {
        self.faces
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(font)
    }

    pub fn len(&self) -> usize {
        self.faces.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted, de-duplicated typeface names present in the registry.
    pub fn typefaces(&self) -> Vec<String> {
        let map = self.faces.read().unwrap_or_else(|e| e.into_inner());
        let mut names: Vec<String> = map.keys().map(|f| f.typeface.clone()).collect();
        names.sort();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::thread;

    #[rstest]
    #[case(FontWeight::Normal, FontStyle::Normal, "LiberationSerif-Regular")]
    #[case(FontWeight::Bold, FontStyle::Normal, "LiberationSerif-Bold")]
    #[case(FontWeight::Normal, FontStyle::Italic, "LiberationSerif-Italic")]
    #[case(FontWeight::Bold, FontStyle::Italic, "LiberationSerif-BoldItalic")]
    fn test_font_name(#[case] weight: FontWeight, #[case] style: FontStyle, #[case] name: &str) {
        let f = Font::new("Liberation", "Serif")
            .with_weight(weight)
            .with_style(style);
        assert_eq!(f.name(), name);
    }

    #[test]
    fn test_font_name_without_variant() {
        assert_eq!(Font::new("Mincho", "").name(), "Mincho-Regular");
        assert_eq!(Font::new("Liberation", "Serif").family(), "Liberation Serif");
    }

    #[test]
    fn test_resolve_by_full_key() {
        let reg = FontRegistry::new();
        let regular = Font::new("Liberation", "Sans");
        reg.add([Face::new(regular.clone(), vec![1u8, 2, 3])]);

        assert!(reg.has(&regular));
        assert!(!reg.has(&regular.clone().with_weight(FontWeight::Bold)));
        let face = reg.resolve(&regular).expect("registered face");
        assert_eq!(face.data.as_slice(), &[1, 2, 3]);
        assert_eq!(reg.typefaces(), vec!["Liberation".to_string()]);
    }

    #[test]
    fn test_concurrent_lookups() {
        let reg = Arc::new(FontRegistry::new());
        let font = Font::new("Liberation", "Mono");
        reg.add([Face::new(font.clone(), Vec::new())]);

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let reg = reg.clone();
                let font = font.clone();
                thread::spawn(move || (0..100).all(|_| reg.has(&font)))
            })
            .collect();
        for h in handles {
            assert!(h.join().unwrap());
        }
    }
}
