//! Glimmer applies procedural glitter and sparkle effects to still images.
//!
//! A frame is a fresh copy of the source bitmap with two stochastic passes on top:
//!
//! - glitter: per-pixel gray (or colored) speckle, see [`apply_glitter`]
//! - sparkles: rotated, translucent star glyphs, see [`SparkleCompositor`]
//!
//! [`assemble_frames`] produces [`FRAME_COUNT`] independent frames, and an [`AnimationEncoder`]
//! such as [`GifExporter`] turns them into an animation. [`EffectSession`] bundles the reusable
//! pieces (surface, compositor, random stream) for interactive use.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod foundation;

pub(crate) mod config;
pub(crate) mod effects;
pub(crate) mod encode;
pub(crate) mod pipeline;
pub(crate) mod render;

pub use crate::foundation::core::{Affine, Region, Span, Vec2};
pub use crate::foundation::error::{GlimmerError, GlimmerResult};

pub use crate::assets::decode::{SourceImage, decode_image, load_image};
pub use crate::assets::sprites::{SPRITE_COUNT, SpriteSheet, SpriteStore};
pub use crate::config::GlimmerConfig;
pub use crate::effects::glitter::{GlitterStats, apply_glitter};
pub use crate::effects::params::{
    EffectParams, GlitterParams, NoiseTone, SparkleAnchor, SparkleParams, ui_range,
};
pub use crate::effects::sparkle::{SparkleCompositor, SparkleStats};
pub use crate::encode::gif::{
    AnimationEncoder, EncodedAnimation, GifExporter, GifOpts, export_animation,
};
pub use crate::encode::still::EncodedFrame;
pub use crate::pipeline::assemble::{FRAME_COUNT, FrameSequence, assemble_frames, assemble_on};
pub use crate::pipeline::frame::{FrameCompositor, FrameStats};
pub use crate::pipeline::preview::{PreviewRequest, PreviewSlot, Ticket, run_preview_worker};
pub use crate::pipeline::session::{EffectSession, SessionOpts};
pub use crate::render::surface::{FrameRGBA, Surface, TransformScope};
