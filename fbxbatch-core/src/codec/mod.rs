// ============================================================================
// fbxbatch-core/src/codec/mod.rs
// ============================================================================
//
// BATCH CODEC: Reading and writing batch.xml
//
// Document layout (element names and nesting are the contract with the
// converter backend, which reads the same file independently):
//
//   BatchConversion
//     Output                 text: output directory
//     FbxFile*
//       Filename             text: input path, unique in the batch
//       CollisionGeneration  text: "None" | "Convex" | "Concave" | ""
//       AnimClip*
//         Name               text: clip name, unique in the file
//         Keyframes          attributes Begin, End, FPS ('.' decimals)
//
// Everything the encoder writes is accepted by the decoder and decodes to the
// same descriptor.

pub mod decoder;
pub mod encoder;
pub mod events;
pub mod number;

pub use decoder::{decode, decode_events, try_decode};
pub use encoder::{EncodeSummary, encode};
pub use events::{EventSource, XmlEvent, XmlEventReader};

pub(crate) const ROOT: &str = "BatchConversion";
pub(crate) const OUTPUT: &str = "Output";
pub(crate) const FBX_FILE: &str = "FbxFile";
pub(crate) const FILENAME: &str = "Filename";
pub(crate) const COLLISION: &str = "CollisionGeneration";
pub(crate) const ANIM_CLIP: &str = "AnimClip";
pub(crate) const CLIP_NAME: &str = "Name";
pub(crate) const KEYFRAMES: &str = "Keyframes";
pub(crate) const BEGIN: &str = "Begin";
pub(crate) const END: &str = "End";
pub(crate) const FPS: &str = "FPS";
