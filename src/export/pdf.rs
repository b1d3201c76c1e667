//! Single-page PDF composition.
//!
//! Embeds the captured grayscale bitmap as a FlateDecode DeviceGray image
//! XObject and places it on one A4 page by the computed [`Placement`].

use std::io::Write;

use flate2::Compression;
use flate2::write::ZlibEncoder;
use pdf_writer::{Content, Filter, Finish, Name, Pdf, Rect, Ref};

use super::ExportError;
use super::geometry::{PageGeometry, Placement, POINTS_PER_INCH};
use crate::preview::Bitmap;

const IMAGE_NAME: Name = Name(b"Im1");

/// Compose a captured bitmap onto a single page and serialize the PDF.
pub fn compose(bitmap: &Bitmap, page: PageGeometry, placement: Placement) -> Result<Vec<u8>, ExportError> {
    let samples = deflate(&bitmap.pixels)?;

    let page_w = (page.page_width * POINTS_PER_INCH) as f32;
    let page_h = (page.page_height * POINTS_PER_INCH) as f32;

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let image_id = Ref::new(4);
    let content_id = Ref::new(5);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    {
        let mut page_obj = pdf.page(page_id);
        page_obj.media_box(Rect::new(0.0, 0.0, page_w, page_h));
        page_obj.parent(page_tree_id);
        page_obj.contents(content_id);
        page_obj
            .resources()
            .x_objects()
            .pair(IMAGE_NAME, image_id);
    }

    let mut image = pdf.image_xobject(image_id, &samples);
    image.filter(Filter::FlateDecode);
    image.width(bitmap.width as i32);
    image.height(bitmap.height as i32);
    image.color_space().device_gray();
    image.bits_per_component(8);
    image.finish();

    // PDF places a unit image through the current transform, with the
    // origin at the bottom-left of the page; placement is measured from
    // the top, so flip the y coordinate here.
    let draw_w = (placement.width * POINTS_PER_INCH) as f32;
    let draw_h = (placement.height * POINTS_PER_INCH) as f32;
    let x = (placement.x * POINTS_PER_INCH) as f32;
    let y = page_h - (placement.y * POINTS_PER_INCH) as f32 - draw_h;

    let mut content = Content::new();
    content.save_state();
    content.transform([draw_w, 0.0, 0.0, draw_h, x, y]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    Ok(pdf.finish())
}

fn deflate(data: &[u8]) -> Result<Vec<u8>, ExportError> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder
        .write_all(data)
        .map_err(|e| ExportError::Compose(format!("sample compression failed: {e}")))?;
    encoder
        .finish()
        .map_err(|e| ExportError::Compose(format!("sample compression failed: {e}")))
}
