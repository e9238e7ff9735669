// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

use std::io::Cursor;

use async_trait::async_trait;
use image::{GrayImage, ImageFormat, Luma};
use qrcode::{types::QrError, Color, QrCode};

use super::{CodeEncoder, CodeImage, EcLevel};

/// Light modules kept around the symbol so scanners can find it.
pub const QUIET_ZONE_MODULES: u32 = 4;

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

#[derive(thiserror::Error, Debug)]
pub enum QrEncodeError {
    #[error("QR encoding failed: {0}")]
    Qr(#[from] QrError),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}

/// Renders QR codes as grayscale PNGs.
#[derive(Debug, Default, Clone, Copy)]
pub struct QrCodeEncoder;

impl QrCodeEncoder {
    /// Synchronous rendering used by [`CodeEncoder::encode`].
    pub fn render(
        &self,
        data: &str,
        size: u32,
        ec_level: EcLevel,
    ) -> Result<CodeImage, QrEncodeError> {
        let code = QrCode::with_error_correction_level(data.as_bytes(), ec_level.into())?;
        let modules = code.width() as u32;
        let colors = code.to_colors();

        let span = modules + 2 * QUIET_ZONE_MODULES;
        let scale = size.div_ceil(span).max(1);
        let dimension = span * scale;

        let image = GrayImage::from_fn(dimension, dimension, |x, y| {
            let (mx, my) = (x / scale, y / scale);
            let inside = QUIET_ZONE_MODULES..QUIET_ZONE_MODULES + modules;
            if !inside.contains(&mx) || !inside.contains(&my) {
                return LIGHT;
            }
            let index =
                ((my - QUIET_ZONE_MODULES) * modules + (mx - QUIET_ZONE_MODULES)) as usize;
            match colors[index] {
                Color::Dark => DARK,
                Color::Light => LIGHT,
            }
        });

        let mut png = Vec::new();
        image.write_to(&mut Cursor::new(&mut png), ImageFormat::Png)?;

        Ok(CodeImage {
            png,
            width: dimension,
            height: dimension,
        })
    }
}

#[async_trait]
impl CodeEncoder for QrCodeEncoder {
    type AdapterError = QrEncodeError;

    async fn encode(
        &self,
        data: &str,
        size: u32,
        ec_level: EcLevel,
    ) -> Result<CodeImage, Self::AdapterError> {
        self.render(data, size, ec_level)
    }
}

impl From<EcLevel> for qrcode::EcLevel {
    fn from(level: EcLevel) -> Self {
        match level {
            EcLevel::Low => qrcode::EcLevel::L,
            EcLevel::Medium => qrcode::EcLevel::M,
            EcLevel::Quartile => qrcode::EcLevel::Q,
            EcLevel::High => qrcode::EcLevel::H,
        }
    }
}
