use crate::buffer::ByteBuffer;
use crate::cipher::{self, DEFAULT_SHIFT};
use crate::counters::UsageCounters;
use crate::rle::{self, RleError};
use crate::text::{self, ReplaceError, ReplacePolicy};
use serde::Deserialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Replace failed: {0}")]
    Replace(#[from] ReplaceError),
    #[error("Run-length codec failed: {0}")]
    Rle(#[from] RleError),
    /// Wraps the failure of one step with its position in the pipeline.
    #[error("Step {index} ({name}) failed")]
    Step {
        index: usize,
        name: &'static str,
        #[source]
        source: Box<PipelineError>,
    },
}

/// A `Transform` turns one [`ByteBuffer`] into a new one.
///
/// Implementations must not depend on hidden mutable state: applying the same
/// transform to the same input twice gives identical output. This is the seam
/// [`Pipeline`] composes over, so callers can add their own steps next to the
/// built-in ones.
pub trait Transform: Send + Sync {
    /// Short name used in log events and error messages.
    fn name(&self) -> &'static str;

    fn apply(&self, input: &ByteBuffer) -> Result<ByteBuffer, PipelineError>;
}

/// A built-in transform as written in configuration, tagged by `op`.
///
/// ```toml
/// [[pipeline]]
/// op = "replace"
/// old = "World"
/// new = "Everyone"
/// ```
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(tag = "op", rename_all = "kebab-case", deny_unknown_fields)]
pub enum TransformStep {
    Trim {},
    Upper {},
    Lower {},
    Capitalize {},
    Reverse {},
    Replace {
        old: String,
        new: String,
    },
    CaesarEncode {
        #[serde(default)]
        shift: Option<i64>,
    },
    CaesarDecode {
        #[serde(default)]
        shift: Option<i64>,
    },
    RleCompress {},
    RleDecompress {},
}

impl TransformStep {
    pub fn name(&self) -> &'static str {
        match self {
            TransformStep::Trim {} => "trim",
            TransformStep::Upper {} => "upper",
            TransformStep::Lower {} => "lower",
            TransformStep::Capitalize {} => "capitalize",
            TransformStep::Reverse {} => "reverse",
            TransformStep::Replace { .. } => "replace",
            TransformStep::CaesarEncode { .. } => "caesar-encode",
            TransformStep::CaesarDecode { .. } => "caesar-decode",
            TransformStep::RleCompress {} => "rle-compress",
            TransformStep::RleDecompress {} => "rle-decompress",
        }
    }
}

/// A [`TransformStep`] bound to the settings it needs at run time.
#[derive(Debug, Clone)]
pub struct ConfiguredStep {
    step: TransformStep,
    replace_policy: ReplacePolicy,
    default_shift: i64,
}

impl ConfiguredStep {
    pub fn new(step: TransformStep, replace_policy: ReplacePolicy, default_shift: i64) -> Self {
        Self {
            step,
            replace_policy,
            default_shift,
        }
    }
}

impl Transform for ConfiguredStep {
    fn name(&self) -> &'static str {
        self.step.name()
    }

    fn apply(&self, input: &ByteBuffer) -> Result<ByteBuffer, PipelineError> {
        let output = match &self.step {
            TransformStep::Trim {} => text::trim(input),
            TransformStep::Upper {} => text::to_upper(input),
            TransformStep::Lower {} => text::to_lower(input),
            TransformStep::Capitalize {} => text::capitalize(input),
            TransformStep::Reverse {} => text::reverse(input),
            TransformStep::Replace { old, new } => text::replace_all(
                input,
                old.as_bytes(),
                new.as_bytes(),
                self.replace_policy,
            )?,
            TransformStep::CaesarEncode { shift } => {
                cipher::caesar_encode(input, shift.unwrap_or(self.default_shift))
            }
            TransformStep::CaesarDecode { shift } => {
                cipher::caesar_decode(input, shift.unwrap_or(self.default_shift))
            }
            TransformStep::RleCompress {} => rle::compress(input)?,
            TransformStep::RleDecompress {} => rle::decompress(input)?,
        };
        Ok(output)
    }
}

/// An ordered chain of transforms applied to one buffer.
#[derive(Default)]
pub struct Pipeline {
    transforms: Vec<Box<dyn Transform>>,
}

impl Pipeline {
    /// Builds a pipeline from configured steps.
    pub fn new(steps: Vec<TransformStep>, replace_policy: ReplacePolicy, default_shift: i64) -> Self {
        let mut pipeline = Self::default();
        for step in steps {
            pipeline.push(ConfiguredStep::new(step, replace_policy, default_shift));
        }
        pipeline
    }

    /// Builds a pipeline using the forward-scan replace policy and [`DEFAULT_SHIFT`].
    pub fn with_defaults(steps: Vec<TransformStep>) -> Self {
        Self::new(steps, ReplacePolicy::default(), DEFAULT_SHIFT)
    }

    pub fn push<T: Transform + 'static>(&mut self, transform: T) {
        self.transforms.push(Box::new(transform));
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }

    /// Applies every step in order, starting from `input`.
    ///
    /// Each completed step records one operation and its output length into
    /// `counters`. An empty pipeline returns a copy of `input`.
    ///
    /// # Errors
    /// The first failing step stops the run; the returned
    /// [`PipelineError::Step`] names its index and name.
    pub fn run(
        &self,
        input: &ByteBuffer,
        counters: &mut UsageCounters,
    ) -> Result<ByteBuffer, PipelineError> {
        let mut current = input.duplicate();
        for (index, transform) in self.transforms.iter().enumerate() {
            let name = transform.name();
            let output = transform
                .apply(&current)
                .map_err(|source| PipelineError::Step {
                    index,
                    name,
                    source: Box::new(source),
                })?;
            tracing::debug!(
                index,
                step = name,
                input_len = current.len(),
                output_len = output.len(),
                "pipeline step applied"
            );
            counters.record_operation();
            counters.record_bytes(output.len());
            current = output;
        }
        Ok(current)
    }
}

impl fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.transforms.iter().map(|t| t.name()))
            .finish()
    }
}
