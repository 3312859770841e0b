//! Curated template samples
//!
//! The samples are embedded at compile time so tests never depend on the working
//! directory.

const SAMPLES: &[(&str, &str)] = &[
    ("page", include_str!("../../../samples/page.cisto")),
    ("comments", include_str!("../../../samples/comments.cisto")),
    ("siblings", include_str!("../../../samples/siblings.cisto")),
];

pub struct Samples;

impl Samples {
    /// Returns the sample called `name` (file name without `.cisto`).
    ///
    /// Panics on unknown names: a typo in a test should fail loudly.
    pub fn get(name: &str) -> &'static str {
        Self::try_get(name).unwrap_or_else(|| {
            panic!(
                "Unknown sample {:?}, available: {}",
                name,
                Self::names().collect::<Vec<_>>().join(", ")
            )
        })
    }

    pub fn try_get(name: &str) -> Option<&'static str> {
        SAMPLES
            .iter()
            .find(|(sample, _)| *sample == name)
            .map(|(_, source)| *source)
    }

    pub fn names() -> impl Iterator<Item = &'static str> {
        SAMPLES.iter().map(|(name, _)| *name)
    }
}
