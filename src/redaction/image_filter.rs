//! Image redaction against the region set

use tracing::{debug, info, instrument};

use super::RegionFilter;
use crate::error::Result;
use crate::geometry::{Matrix, Quad};
use crate::image::{
    direct, image_rect_to_clean, raster, supports_direct_cleaning, CleaningPlan, ImageCleaningKey, PdfImage,
    PixelRect, RedactedImage,
};
use crate::types::FilterResult;

impl RegionFilter {
    /// Areas of an image placed by `ctm` that the regions cover.
    ///
    /// The image's page-space rectangle is the bounding box of its unit
    /// square. A region covering all of it short-circuits to
    /// [`CleaningPlan::WholeImage`] (compared within the configured
    /// epsilon); partial overlaps are mapped back into the unit square.
    pub fn regions_to_be_cleaned(&self, ctm: &Matrix) -> Result<CleaningPlan> {
        let image_rect = Quad::unit_square(ctm).bounding_box();

        let mut areas = Vec::new();
        for region in &self.regions {
            let Some(overlap) = region.intersection(&image_rect) else {
                continue;
            };
            if overlap.approx_eq(&image_rect, self.config.epsilon) {
                return Ok(CleaningPlan::WholeImage);
            }
            areas.push(overlap.transform(ctm, true)?);
        }
        Ok(CleaningPlan::Areas(areas))
    }

    /// Key under which the cleaning of this image occurrence may be memoised;
    /// `None` when there is nothing to edit
    pub fn image_cleaning_key(&self, image: &PdfImage, ctm: &Matrix) -> Result<Option<ImageCleaningKey>> {
        Ok(match self.regions_to_be_cleaned(ctm)? {
            CleaningPlan::Areas(areas) if !areas.is_empty() => Some(ImageCleaningKey::new(image.id, areas)),
            _ => None,
        })
    }

    pub fn supports_direct_cleaning(&self, image: &PdfImage) -> bool {
        supports_direct_cleaning(image, &self.config.unsupported_direct_filters)
    }

    /// Redacts an image occurrence.
    ///
    /// Returns `removed` when a region covers the whole image and an
    /// unmodified result without artifact when nothing is covered. Direct
    /// edits clear the covered samples in `image.samples` itself; clone the
    /// image first to keep the original. Images without a container come
    /// back as [`RedactedImage::Samples`], to be stored unfiltered.
    ///
    /// Raster editing of 8-bit palette PNGs paints white and then maps
    /// every pixel back onto the palette, so white must be one of its
    /// entries or the call fails with a palette error.
    #[instrument(skip(self, image), fields(id = ?image.id, width = image.width, height = image.height))]
    pub fn filter_image(&self, image: &mut PdfImage, ctm: &Matrix) -> Result<FilterResult<RedactedImage>> {
        let areas = match self.regions_to_be_cleaned(ctm)? {
            CleaningPlan::WholeImage => {
                info!("Image {:?} fully covered, removing it", image.id);
                return Ok(FilterResult::removed());
            }
            CleaningPlan::Areas(areas) if areas.is_empty() => return Ok(FilterResult::new(false, None)),
            CleaningPlan::Areas(areas) => areas,
        };

        let rects: Vec<PixelRect> = areas
            .iter()
            .map(|area| image_rect_to_clean(area, image.width, image.height))
            .collect();

        if self.supports_direct_cleaning(image) {
            debug!("Clearing {} areas directly in the sample buffer", rects.len());
            direct::clean_samples(&mut image.samples, image.width, image.height, image.bits_per_component, &rects)?;
            return Ok(FilterResult::modified(RedactedImage::InPlace));
        }

        debug!("Repainting {} areas through the image codec", rects.len());
        Ok(FilterResult::modified(raster::clean_raster(image, &rects)?))
    }
}
