use crate::model::{PhotoMargin, PhotoSize, PhotoSpec};

/// One copy of a photo waiting to be placed.
#[derive(Debug, Clone, Copy)]
pub struct ExpandedUnit<'a> {
    spec: &'a PhotoSpec,
    /// Position of the originating spec in the input slice.
    pub spec_index: usize,
    /// Which copy of the spec this is, starting at 0.
    pub copy: usize,
}

impl<'a> ExpandedUnit<'a> {
    pub fn spec(&self) -> &'a PhotoSpec {
        self.spec
    }

    pub fn photo_id(&self) -> &'a str {
        &self.spec.id
    }

    pub fn size(&self) -> PhotoSize {
        self.spec.size
    }

    pub fn margin(&self) -> Option<PhotoMargin> {
        self.spec.margin
    }
}

/// Flattens specs into placeable units.
///
/// Spec `i` contributes `repeat_count` consecutive units, in spec order.
/// Non-positive counts contribute nothing.
pub fn expand_specs(specs: &[PhotoSpec]) -> Vec<ExpandedUnit<'_>> {
    let total: usize = specs.iter().map(PhotoSpec::requested).sum();
    let mut units = Vec::with_capacity(total);
    for (spec_index, spec) in specs.iter().enumerate() {
        for copy in 0..spec.requested() {
            units.push(ExpandedUnit {
                spec,
                spec_index,
                copy,
            });
        }
    }
    units
}
