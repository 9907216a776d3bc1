//! Image providers for the optional logo and QR code.
//!
//! The renderer never fetches or generates images itself. It asks an
//! [`ImageProvider`] once per run; a provider that fails logs why and
//! yields `None`, and the labels simply print without that element.

use image::{DynamicImage, GrayImage, Luma};
use std::time::Duration;

use crate::error::EtiquetaError;

/// A source for one optional label image.
pub trait ImageProvider {
    /// The image to print, or `None` to leave it off.
    fn provide(&self) -> Option<DynamicImage>;
}

/// Provider for a disabled element.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoImage;

impl ImageProvider for NoImage {
    fn provide(&self) -> Option<DynamicImage> {
        None
    }
}

/// An already-decoded image.
#[derive(Debug, Clone)]
pub struct StaticImage(pub DynamicImage);

impl ImageProvider for StaticImage {
    fn provide(&self) -> Option<DynamicImage> {
        Some(self.0.clone())
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Downloads an image over HTTP(S). One attempt, no retry.
#[derive(Debug, Clone)]
pub struct HttpImage {
    url: String,
    timeout: Duration,
}

impl HttpImage {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: Duration::from_secs(10),
        }
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Download and decode the image.
    pub fn fetch(&self) -> Result<DynamicImage, EtiquetaError> {
        let client = reqwest::blocking::Client::builder()
            .user_agent("etiqueta/0.1")
            .timeout(self.timeout)
            .build()
            .map_err(|e| EtiquetaError::Image(format!("HTTP client error: {}", e)))?;

        let response = client
            .get(&self.url)
            .send()
            .map_err(|e| EtiquetaError::Image(format!("Failed to download {}: {}", self.url, e)))?;
        if !response.status().is_success() {
            return Err(EtiquetaError::Image(format!(
                "Failed to download {}: HTTP {}",
                self.url,
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .map_err(|e| EtiquetaError::Image(format!("Failed to read {}: {}", self.url, e)))?;

        image::load_from_memory(&bytes)
            .map_err(|e| EtiquetaError::Image(format!("Failed to decode {}: {}", self.url, e)))
    }
}

impl ImageProvider for HttpImage {
    fn provide(&self) -> Option<DynamicImage> {
        match self.fetch() {
            Ok(image) => {
                tracing::info!(url = %self.url, "logo loaded");
                Some(image)
            }
            Err(e) => {
                tracing::warn!("logo load failed, printing without it: {}", e);
                None
            }
        }
    }
}

// ============================================================================
// QR
// ============================================================================

/// Renders a QR code for a fixed payload.
#[derive(Debug, Clone)]
pub struct QrImage {
    payload: String,
    /// Pixels per module
    module_px: u32,
    /// Quiet zone width in modules
    border: u32,
}

impl QrImage {
    /// 2-pixel modules with a 1-module quiet zone.
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            module_px: 2,
            border: 1,
        }
    }

    /// Render the code as a black-on-white grayscale bitmap.
    pub fn render(&self) -> Result<GrayImage, EtiquetaError> {
        let code = qrcode::QrCode::new(self.payload.as_bytes())
            .map_err(|e| EtiquetaError::Image(format!("QR code generation failed: {}", e)))?;

        let modules = code.width() as u32;
        let module_px = self.module_px.max(1);
        let side = (modules + 2 * self.border) * module_px;
        let mut img = GrayImage::from_pixel(side, side, Luma([255u8]));

        for qy in 0..modules {
            for qx in 0..modules {
                if code[(qx as usize, qy as usize)] != qrcode::Color::Dark {
                    continue;
                }
                for cy in 0..module_px {
                    for cx in 0..module_px {
                        let px = (qx + self.border) * module_px + cx;
                        let py = (qy + self.border) * module_px + cy;
                        img.put_pixel(px, py, Luma([0u8]));
                    }
                }
            }
        }

        Ok(img)
    }
}

impl ImageProvider for QrImage {
    fn provide(&self) -> Option<DynamicImage> {
        match self.render() {
            Ok(img) => {
                tracing::info!(payload = %self.payload, "QR code generated");
                Some(DynamicImage::ImageLuma8(img))
            }
            Err(e) => {
                tracing::warn!("{}; printing without QR code", e);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_image() {
        assert!(NoImage.provide().is_none());
    }

    #[test]
    fn test_static_image() {
        let img = DynamicImage::new_rgb8(4, 3);
        let provided = StaticImage(img).provide().unwrap();
        assert_eq!((provided.width(), provided.height()), (4, 3));
    }

    #[test]
    fn test_qr_dimensions_and_quiet_zone() {
        let img = QrImage::new("https://example.com").render().unwrap();
        // version 2 (25 modules) + 1-module border each side, 2px modules
        assert_eq!(img.width(), img.height());
        assert_eq!(img.width() % 2, 0);
        assert_eq!(img.get_pixel(0, 0)[0], 255);
        assert_eq!(img.get_pixel(1, 1)[0], 255);
        // top-left finder pattern starts right after the quiet zone
        assert_eq!(img.get_pixel(2, 2)[0], 0);
    }

    #[test]
    fn test_qr_provider_yields_image() {
        let img = QrImage::new("https://example.com").provide().unwrap();
        assert!(img.width() > 0);
    }

    #[test]
    fn test_unreachable_logo_degrades_to_none() {
        // Port 9 (discard) is closed on test hosts: connection refused.
        let provider = HttpImage::new("http://127.0.0.1:9/logo.png")
            .timeout(Duration::from_secs(2));
        assert!(matches!(provider.fetch(), Err(EtiquetaError::Image(_))));
        assert!(provider.provide().is_none());
    }
}
