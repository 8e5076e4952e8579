use mime_guess::Mime;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ImageFormat {
    Tiff,
    Png,
    Jpeg,
    Other,
}

impl From<Mime> for ImageFormat {
    fn from(mime: Mime) -> Self {
        use mime_guess::mime::*;

        match (mime.type_(), mime.subtype()) {
            (IMAGE, name) if name.as_str() == "tiff" => ImageFormat::Tiff,
            (IMAGE, PNG) => ImageFormat::Png,
            (IMAGE, JPEG) => ImageFormat::Jpeg,
            _ => ImageFormat::Other,
        }
    }
}

impl ImageFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageFormat::Tiff => "TIFF",
            ImageFormat::Png => "PNG",
            ImageFormat::Jpeg => "JPEG",
            ImageFormat::Other => "other",
        }
    }
}

impl std::fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
