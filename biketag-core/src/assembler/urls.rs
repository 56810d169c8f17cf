//! Image URL helpers

use biketag_common::Error;
use std::fmt;
use std::str::FromStr;

/// Extensions the image host serves size variants for
const SIZED_EXTENSIONS: &[&str] = &[".jpg", ".jpeg", ".png", ".bmp"];

/// Extension of the last path segment, including the dot
///
/// `""` when the segment has no dot or only a leading one.
pub fn url_extension(url: &str) -> &str {
    let segment = url.rsplit('/').next().unwrap_or(url);
    match segment.rfind('.') {
        Some(dot) if dot > 0 => &segment[dot..],
        _ => "",
    }
}

/// Medium-size variant used as the record thumbnail (`abc.jpg` -> `abcm.jpg`)
pub fn thumbnail_url(url: &str) -> String {
    with_size_code(url, url_extension(url), "m")
}

fn with_size_code(url: &str, extension: &str, code: &str) -> String {
    if extension.is_empty() {
        return url.to_string();
    }
    let stem = &url[..url.len() - extension.len()];
    format!("{}{}{}", stem, code, extension)
}

/// Image size variant
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ImageSize {
    #[default]
    Original,
    Small,
    Medium,
    Large,
}

impl ImageSize {
    /// Suffix inserted before the extension
    pub fn code(self) -> &'static str {
        match self {
            ImageSize::Original => "",
            ImageSize::Small => "s",
            ImageSize::Medium => "m",
            ImageSize::Large => "l",
        }
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ImageSize::Original => "original",
            ImageSize::Small => "small",
            ImageSize::Medium => "medium",
            ImageSize::Large => "large",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for ImageSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "original" => Ok(ImageSize::Original),
            "s" | "small" => Ok(ImageSize::Small),
            "m" | "medium" => Ok(ImageSize::Medium),
            "l" | "large" => Ok(ImageSize::Large),
            other => Err(Error::InvalidInput(format!("Unknown image size: {}", other))),
        }
    }
}

/// URL of the `size` variant of an image
///
/// Only `.jpg`, `.jpeg`, `.png` and `.bmp` URLs have variants; anything else
/// is returned unchanged.
pub fn image_url_variant(url: &str, size: ImageSize) -> String {
    let extension = url_extension(url);
    if !SIZED_EXTENSIONS.contains(&extension) {
        return url.to_string();
    }
    with_size_code(url, extension, size.code())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_extension() {
        assert_eq!(url_extension("https://i.imgur.com/abc.jpg"), ".jpg");
        assert_eq!(url_extension("https://i.imgur.com/abc.tar.gz"), ".gz");
        assert_eq!(url_extension("https://imgur.com/a/xyz"), "");
        assert_eq!(url_extension("https://i.imgur.com/.hidden"), "");
        assert_eq!(url_extension(""), "");
    }

    #[test]
    fn test_thumbnail_url() {
        assert_eq!(thumbnail_url("https://i.imgur.com/abc.jpg"), "https://i.imgur.com/abcm.jpg");
        assert_eq!(thumbnail_url("https://imgur.com/a/xyz"), "https://imgur.com/a/xyz");
    }

    #[test]
    fn test_size_variants() {
        let url = "https://i.imgur.com/abc.png";
        assert_eq!(image_url_variant(url, ImageSize::Original), url);
        assert_eq!(image_url_variant(url, ImageSize::Small), "https://i.imgur.com/abcs.png");
        assert_eq!(image_url_variant(url, ImageSize::Medium), "https://i.imgur.com/abcm.png");
        assert_eq!(image_url_variant(url, ImageSize::Large), "https://i.imgur.com/abcl.png");
    }

    #[test]
    fn test_unsupported_extension_unchanged() {
        assert_eq!(
            image_url_variant("https://i.imgur.com/abc.gif", ImageSize::Large),
            "https://i.imgur.com/abc.gif"
        );
        assert_eq!(
            image_url_variant("https://imgur.com/a/xyz", ImageSize::Small),
            "https://imgur.com/a/xyz"
        );
    }

    #[test]
    fn test_parse_size() {
        assert_eq!("".parse::<ImageSize>().unwrap(), ImageSize::Original);
        assert_eq!("small".parse::<ImageSize>().unwrap(), ImageSize::Small);
        assert_eq!("M".parse::<ImageSize>().unwrap(), ImageSize::Medium);
        assert_eq!("l".parse::<ImageSize>().unwrap(), ImageSize::Large);
        assert!("huge".parse::<ImageSize>().is_err());
    }
}
