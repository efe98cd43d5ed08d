use crate::font::{Face, Font, FontRegistry, FontStyle, FontWeight};
use std::path::PathBuf;
use std::sync::Arc;

/// Font configuration used to populate a [`FontRegistry`].
///
/// Describes where fonts come from (system directories, extra directories,
/// in-memory data). Resolving the configuration does the expensive scanning
/// once; the resulting registry is then shared between canvases.
#[derive(Clone, Debug)]
pub struct FontConfig {
    /// Custom font data to register (font file bytes + optional key override).
    pub custom_fonts: Vec<CustomFont>,
    /// Whether to load system fonts (default: true).
    pub load_system_fonts: bool,
    /// Additional directories to scan for font files.
    pub font_dirs: Vec<PathBuf>,
}

impl Default for FontConfig {
    fn default() -> Self {
        Self {
            custom_fonts: Vec::new(),
            load_system_fonts: true,
            font_dirs: Vec::new(),
        }
    }
}

/// A custom font to register, consisting of raw font file data and an optional key override.
#[derive(Clone, Debug)]
pub struct CustomFont {
    /// Raw font file data (TTF/OTF). Arc-wrapped for cheap cloning.
    pub data: Arc<Vec<u8>>,
    /// Key to register the data under. If None, the family, style and weight
    /// are read from the font's tables and every face in the file is registered.
    pub font: Option<Font>,
}

impl FontConfig {
    /// Resolve this configuration into a populated font registry.
    ///
    /// Fonts discovered by scanning are keyed by family name (as typeface,
    /// with an empty variant); faces of weight 600 and above count as bold.
    pub fn resolve(&self) -> FontRegistry {
        let registry = FontRegistry::new();

        let mut db = fontdb::Database::new();
        if self.load_system_fonts {
            db.load_system_fonts();
        }
        for dir in &self.font_dirs {
            db.load_fonts_dir(dir);
        }
        registry.add(faces_from_fontdb(&db));

        for custom in &self.custom_fonts {
            match &custom.font {
                Some(font) => {
                    registry.add([Face::from_shared(font.clone(), custom.data.clone(), 0)]);
                }
                None => {
                    let mut db = fontdb::Database::new();
                    db.load_font_data(Vec::from(custom.data.as_slice()));
                    let faces = faces_from_fontdb(&db);
                    if faces.is_empty() {
                        log::warn!(target: "canvas", "custom font data contained no usable faces");
                    }
                    registry.add(faces);
                }
            }
        }

        log::debug!(target: "canvas", "resolved {} font faces", registry.len());
        registry
    }
}

/// Convert every face known to a [`fontdb::Database`] into registry entries.
fn faces_from_fontdb(db: &fontdb::Database) -> Vec<Face> {
    db.faces()
        .filter_map(|info| {
            let (family, _lang) = info.families.first()?;
            let font = Font {
                typeface: family.clone(),
                variant: String::new(),
                style: match info.style {
                    fontdb::Style::Normal => FontStyle::Normal,
                    fontdb::Style::Italic | fontdb::Style::Oblique => FontStyle::Italic,
                },
                weight: if info.weight.0 >= 600 {
                    FontWeight::Bold
                } else {
                    FontWeight::Normal
                },
            };
            let (data, index) =
                db.with_face_data(info.id, |data, index| (Arc::new(data.to_vec()), index))?;
            Some(Face::from_shared(font, data, index))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_font_config() {
        let config = FontConfig::default();
        assert!(config.custom_fonts.is_empty());
        assert!(config.load_system_fonts);
        assert!(config.font_dirs.is_empty());
    }

    #[test]
    fn test_no_system_fonts_gives_empty_registry() {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        assert!(config.resolve().is_empty());
    }

    #[test]
    fn test_custom_font_with_explicit_key() {
        let font = Font::new("Liberation", "Serif");
        let config = FontConfig {
            load_system_fonts: false,
            custom_fonts: vec![CustomFont {
                data: Arc::new(vec![0u8; 16]),
                font: Some(font.clone()),
            }],
            ..FontConfig::default()
        };
        let registry = config.resolve();
        assert!(registry.has(&font));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_unparseable_custom_font_without_key_is_skipped() {
        let config = FontConfig {
            load_system_fonts: false,
            custom_fonts: vec![CustomFont {
                data: Arc::new(b"not a font".to_vec()),
                font: None,
            }],
            ..FontConfig::default()
        };
        assert!(config.resolve().is_empty());
    }

    #[test]
    fn test_font_config_clone_is_cheap() {
        let data = Arc::new(vec![0u8; 1000]);
        let config = FontConfig {
            custom_fonts: vec![CustomFont {
                data: data.clone(),
                font: None,
            }],
            ..FontConfig::default()
        };
        let cloned = config.clone();
        assert!(Arc::ptr_eq(
            &config.custom_fonts[0].data,
            &cloned.custom_fonts[0].data
        ));
    }
}
