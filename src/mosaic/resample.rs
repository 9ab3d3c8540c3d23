use crate::foundation::error::GraftResult;
use crate::mosaic::model::Mosaic;
use crate::rewrite::resampler::{self, ResampleAlgorithm};

impl Mosaic {
    /// Same mosaic with every `mosaic` and `stack_scenes` node resampled by `resampler`.
    pub fn update_resampler(&self, resampler: ResampleAlgorithm) -> GraftResult<Mosaic> {
        let graft = resampler::update_resampler(self.graft(), resampler)?;
        Ok(self.with_graft(graft))
    }

    /// [`Mosaic::update_resampler`] taking the algorithm name.
    pub fn update_resampler_named(&self, resampler: &str) -> GraftResult<Mosaic> {
        self.update_resampler(resampler.parse()?)
    }
}
