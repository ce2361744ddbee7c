//! Image URL derivation.
//!
//! Asset ids encode everything needed to address the original file on the
//! image CDN: `image-<hash>-<width>x<height>-<format>`. Resized renditions
//! are requested through query parameters, so deriving a URL never touches
//! the network.

use crate::config::CmsConfig;
use crate::content::{Crop, ImageRef};

/// Default image CDN host
pub const DEFAULT_IMAGE_HOST: &str = "https://cdn.sanity.io";

/// Parsed image asset id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetId {
    pub hash: String,
    pub width: u32,
    pub height: u32,
    pub format: String,
}

impl AssetId {
    /// Parse `image-<hash>-<W>x<H>-<format>`
    pub fn parse(reference: &str) -> Option<Self> {
        let rest = reference.strip_prefix("image-")?;
        let mut parts = rest.rsplitn(3, '-');
        let format = parts.next()?;
        let dims = parts.next()?;
        let hash = parts.next()?;

        let (w, h) = dims.split_once('x')?;
        let width: u32 = w.parse().ok()?;
        let height: u32 = h.parse().ok()?;

        let valid = !hash.is_empty()
            && hash.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !format.is_empty()
            && format.chars().all(|c| c.is_ascii_alphanumeric())
            && width > 0
            && height > 0;

        valid.then(|| Self {
            hash: hash.to_string(),
            width,
            height,
            format: format.to_string(),
        })
    }

    /// Source rectangle after applying crop insets, in pixels
    fn crop_rect(&self, crop: &Crop) -> Option<Rect> {
        if crop.is_empty() {
            return None;
        }
        let w = self.width as f64;
        let h = self.height as f64;
        let left = (crop.left * w).round();
        let top = (crop.top * h).round();
        let width = ((1.0 - crop.left - crop.right) * w).round();
        let height = ((1.0 - crop.top - crop.bottom) * h).round();

        (width >= 1.0 && height >= 1.0 && left >= 0.0 && top >= 0.0).then_some(Rect {
            left: left as u32,
            top: top as u32,
            width: width as u32,
            height: height as u32,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Rect {
    left: u32,
    top: u32,
    width: u32,
    height: u32,
}

/// A derived rendition with its display size
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedImage {
    pub url: String,
    pub width: u32,
    pub height: u32,
}

/// Builds CDN URLs for image references of one project/dataset
#[derive(Debug, Clone)]
pub struct ImageUrlBuilder {
    host: String,
    project_id: String,
    dataset: String,
}

impl ImageUrlBuilder {
    pub fn new(project_id: impl Into<String>, dataset: impl Into<String>) -> Self {
        Self {
            host: DEFAULT_IMAGE_HOST.to_string(),
            project_id: project_id.into(),
            dataset: dataset.into(),
        }
    }

    /// Builder for a validated backend configuration
    pub fn from_config(cms: &CmsConfig) -> Self {
        Self::new(cms.project_id.trim(), cms.dataset.trim()).with_host(&cms.image_host)
    }

    pub fn with_host(mut self, host: &str) -> Self {
        self.host = host.trim_end_matches('/').to_string();
        self
    }

    /// URL of a rendition `width` pixels wide (and `height` high, if given).
    ///
    /// Returns `None` when the image has no asset or the asset id is
    /// malformed; callers omit the image in that case.
    pub fn url(&self, image: &ImageRef, width: u32, height: Option<u32>) -> Option<String> {
        let asset = self.asset(image)?;
        if width == 0 || height == Some(0) {
            return None;
        }

        let mut url = format!(
            "{}/images/{}/{}/{}-{}x{}.{}",
            self.host,
            self.project_id,
            self.dataset,
            asset.hash,
            asset.width,
            asset.height,
            asset.format
        );

        let mut params = Vec::with_capacity(3);
        if let Some(rect) = image.crop.as_ref().and_then(|c| asset.crop_rect(c)) {
            params.push(format!(
                "rect={},{},{},{}",
                rect.left, rect.top, rect.width, rect.height
            ));
        }
        params.push(format!("w={}", width));
        if let Some(h) = height {
            params.push(format!("h={}", h));
        }

        url.push('?');
        url.push_str(&params.join("&"));
        Some(url)
    }

    /// Rendition `width` pixels wide whose height keeps the source (or
    /// cropped) aspect ratio
    pub fn fit_width(&self, image: &ImageRef, width: u32) -> Option<DerivedImage> {
        let asset = self.asset(image)?;
        let (src_w, src_h) = match image.crop.as_ref().and_then(|c| asset.crop_rect(c)) {
            Some(rect) => (rect.width, rect.height),
            None => (asset.width, asset.height),
        };
        let height = ((width as f64) * (src_h as f64) / (src_w as f64)).round().max(1.0) as u32;

        let url = self.url(image, width, Some(height))?;
        Some(DerivedImage { url, width, height })
    }

    fn asset(&self, image: &ImageRef) -> Option<AssetId> {
        let reference = image.asset_id()?;
        let parsed = AssetId::parse(reference);
        if parsed.is_none() {
            tracing::debug!(asset = %reference, "malformed image asset reference");
        }
        parsed
    }
}
