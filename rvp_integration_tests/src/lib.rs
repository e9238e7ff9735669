// Copyright 2023-, Semiotic AI, Inc.
// SPDX-License-Identifier: Apache-2.0

//! Helpers that play the role of a phone scanning a printed receipt.

use anyhow::{anyhow, Result};
use image::ImageFormat;
use rvp_core::receipt::{CompactDocument, VerificationPayload};

/// Decodes the text held by the single QR code in a PNG image.
pub fn scan_png(png: &[u8]) -> Result<String> {
    let luma = image::load_from_memory_with_format(png, ImageFormat::Png)?.to_luma8();
    let mut prepared = rqrr::PreparedImage::prepare_from_greyscale(
        luma.width() as usize,
        luma.height() as usize,
        |x, y| luma.get_pixel(x as u32, y as u32)[0],
    );
    let grids = prepared.detect_grids();
    let grid = match grids.as_slice() {
        [grid] => grid,
        _ => return Err(anyhow!("expected one code in the image, found {}", grids.len())),
    };
    let (_, content) = grid.decode()?;
    Ok(content)
}

/// What a scanner learns from a code: the payload and, when present, the
/// embedded compact document.
#[derive(Debug)]
pub struct ScannedReceipt {
    pub raw: serde_json::Value,
    pub payload: VerificationPayload,
    pub document: Option<CompactDocument>,
}

pub fn scan_receipt(png: &[u8]) -> Result<ScannedReceipt> {
    let text = scan_png(png)?;
    let raw = serde_json::from_str(&text)?;
    let payload = VerificationPayload::from_json(&text)?;
    let document = payload
        .compact_document
        .as_deref()
        .map(CompactDocument::decode)
        .transpose()?;
    Ok(ScannedReceipt {
        raw,
        payload,
        document,
    })
}
