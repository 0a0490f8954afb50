//! Page images from scanned PDFs (via lopdf) and plain image files.

use std::collections::HashSet;
use std::path::Path;

use image::{DynamicImage, ImageBuffer, Rgba};
use lopdf::{Dictionary, Document, Object, ObjectId};
use tracing::{debug, trace, warn};

use super::{DocumentKind, PageRasterizer, Result};
use crate::error::PdfError;

/// Rasterizer for scanned documents.
///
/// Scanned PDFs carry one image XObject per page; those images are the pages.
#[derive(Debug, Clone, Default)]
pub struct DocumentRasterizer {
    /// Maximum pages to return (0 = unlimited).
    max_pages: usize,
}

impl DocumentRasterizer {
    /// Create a new rasterizer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Cap the number of page images produced.
    pub fn with_max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    fn rasterize_pdf(&self, data: &[u8]) -> Result<Vec<DynamicImage>> {
        let (doc, _) = load_pdf(data)?;
        let pages = doc.get_pages();

        let mut images = Vec::new();
        for (number, page_id) in pages.iter() {
            if self.limit_reached(images.len()) {
                debug!("Page limit {} reached", self.max_pages);
                break;
            }
            let page_images = page_images(&doc, *page_id);
            trace!("Page {}: {} images", number, page_images.len());
            images.extend(page_images);
        }

        // Some producers do not link page images through the resource tree.
        if images.is_empty() {
            debug!("No XObject images found on any page, scanning all objects");
            images = all_images(&doc);
        }

        if images.is_empty() {
            return Err(PdfError::ImageExtraction(
                "no page images found in PDF".to_string(),
            ));
        }

        if self.max_pages > 0 {
            images.truncate(self.max_pages);
        }

        debug!("Rasterized PDF with {} pages into {} images", pages.len(), images.len());
        Ok(images)
    }

    fn limit_reached(&self, count: usize) -> bool {
        self.max_pages > 0 && count >= self.max_pages
    }
}

impl PageRasterizer for DocumentRasterizer {
    fn rasterize(&self, path: &Path) -> Result<Vec<DynamicImage>> {
        match DocumentKind::from_path(path)? {
            DocumentKind::Pdf => {
                let data = std::fs::read(path)?;
                self.rasterize_pdf(&data)
            }
            DocumentKind::Image => {
                let image = image::open(path)?;
                debug!("Loaded image page {}x{}", image.width(), image.height());
                Ok(vec![image])
            }
        }
    }
}

/// Parse a PDF, decrypting documents protected only by an empty password.
///
/// Returns the document and the bytes of its decrypted form.
pub(super) fn load_pdf(data: &[u8]) -> Result<(Document, Vec<u8>)> {
    let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

    let raw = if doc.is_encrypted() {
        if doc.decrypt("").is_err() {
            return Err(PdfError::Encrypted);
        }
        debug!("Decrypted PDF with empty password");

        let mut decrypted = Vec::new();
        doc.save_to(&mut decrypted)
            .map_err(|e| PdfError::Parse(format!("failed to save decrypted PDF: {}", e)))?;
        decrypted
    } else {
        data.to_vec()
    };

    if doc.get_pages().is_empty() {
        return Err(PdfError::NoPages);
    }

    Ok((doc, raw))
}

/// Images referenced from a page's XObject resources.
fn page_images(doc: &Document, page_id: ObjectId) -> Vec<DynamicImage> {
    let Some(resources) = page_resources(doc, page_id) else {
        return Vec::new();
    };

    let mut images = Vec::new();
    if let Ok(xobjects) = resources.get(b"XObject") {
        if let Ok((_, Object::Dictionary(xobj_dict))) = doc.dereference(xobjects) {
            for (_name, obj_ref) in xobj_dict.iter() {
                if let Ok((_, obj)) = doc.dereference(obj_ref) {
                    if let Some(img) = decode_image_object(doc, obj) {
                        images.push(img);
                    }
                }
            }
        }
    }
    images
}

/// Every decodable image object in the document, in object order.
fn all_images(doc: &Document) -> Vec<DynamicImage> {
    let mut images = Vec::new();
    let mut seen: HashSet<ObjectId> = HashSet::new();

    for (id, object) in doc.objects.iter() {
        if !seen.insert(*id) {
            continue;
        }
        if let Some(img) = decode_image_object(doc, object) {
            images.push(img);
        }
    }
    images
}

/// Resources dictionary of a page, following `Parent` inheritance.
fn page_resources(doc: &Document, node_id: ObjectId) -> Option<Dictionary> {
    let Ok(Object::Dictionary(dict)) = doc.get_object(node_id) else {
        return None;
    };

    if let Ok(resources) = dict.get(b"Resources") {
        if let Ok((_, Object::Dictionary(res_dict))) = doc.dereference(resources) {
            return Some(res_dict.clone());
        }
    }

    match dict.get(b"Parent") {
        Ok(Object::Reference(parent_id)) => page_resources(doc, *parent_id),
        _ => None,
    }
}

fn decode_image_object(doc: &Document, obj: &Object) -> Option<DynamicImage> {
    let Object::Stream(stream) = obj else {
        return None;
    };
    let dict = &stream.dict;

    if dict.get(b"Subtype").ok()?.as_name().ok()? != b"Image" {
        return None;
    }

    let width = u32::try_from(dict.get(b"Width").ok()?.as_i64().ok()?).ok()?;
    let height = u32::try_from(dict.get(b"Height").ok()?.as_i64().ok()?).ok()?;
    trace!("Found image object: {}x{}", width, height);

    if let Ok(filter) = dict.get(b"Filter") {
        let filter_name = match filter {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            _ => None,
        };

        match filter_name {
            Some(b"DCTDecode") => {
                return image::load_from_memory_with_format(&stream.content, image::ImageFormat::Jpeg)
                    .map_err(|e| warn!("Failed to decode JPEG page image: {}", e))
                    .ok();
            }
            Some(b"JPXDecode") | Some(b"CCITTFaxDecode") | Some(b"JBIG2Decode") => {
                warn!(
                    "Unsupported image filter {}",
                    String::from_utf8_lossy(filter_name.unwrap_or_default())
                );
                return None;
            }
            _ => {}
        }
    }

    let data = stream
        .decompressed_content()
        .unwrap_or_else(|_| stream.content.clone());

    let color_space = dict
        .get(b"ColorSpace")
        .ok()
        .and_then(|o| match o {
            Object::Name(name) => Some(name.as_slice()),
            Object::Array(arr) => arr.first().and_then(|o| o.as_name().ok()),
            Object::Reference(r) => doc.get_object(*r).ok().and_then(|o| o.as_name().ok()),
            _ => None,
        })
        .unwrap_or(b"DeviceRGB");

    let bits = dict
        .get(b"BitsPerComponent")
        .ok()
        .and_then(|o| o.as_i64().ok())
        .map_or(Some(8), |bits| u8::try_from(bits).ok())?;

    raw_to_image(&data, width, height, color_space, bits)
}

/// Decode uncompressed 8-bit RGB or gray samples.
fn raw_to_image(
    data: &[u8],
    width: u32,
    height: u32,
    color_space: &[u8],
    bits_per_component: u8,
) -> Option<DynamicImage> {
    if bits_per_component != 8 {
        trace!("Unsupported bits per component: {}", bits_per_component);
        return None;
    }

    let channels: usize = match color_space {
        b"DeviceRGB" | b"RGB" => 3,
        b"DeviceGray" | b"G" => 1,
        _ => {
            trace!("Unsupported color space: {}", String::from_utf8_lossy(color_space));
            return None;
        }
    };

    let pixels = (width as usize).checked_mul(height as usize)?;
    let sample_len = pixels.checked_mul(channels)?;
    if data.len() < sample_len {
        trace!("Image data too short: {} < {}", data.len(), sample_len);
        return None;
    }

    let mut rgba = Vec::with_capacity(pixels.checked_mul(4)?);
    for chunk in data[..sample_len].chunks_exact(channels) {
        match chunk {
            [gray] => rgba.extend_from_slice(&[*gray, *gray, *gray, 255]),
            [r, g, b] => rgba.extend_from_slice(&[*r, *g, *b, 255]),
            _ => return None,
        }
    }

    ImageBuffer::<Rgba<u8>, _>::from_raw(width, height, rgba).map(DynamicImage::ImageRgba8)
}
