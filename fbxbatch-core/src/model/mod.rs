// ============================================================================
// fbxbatch-core/src/model/mod.rs
// ============================================================================
//
// DESCRIPTOR MODEL: In-memory representation of a batch of conversion jobs
//
// KEY COMPONENTS:
// - BatchDescriptor: output directory plus the ordered set of input files
// - FileEntry: collision generation tag plus the ordered set of clips
// - ClipDescriptor: begin/end frame and playback rate of one clip
// - CollisionType: the collision generation tag as stored in batch.xml
//
// The model is plain owned data. Hosts mutate it; the encoder only borrows it.
// Nothing here is validated on the way in or out of the codec.

mod ordered;

pub use ordered::{DuplicateKey, OrderedMap};

use crate::error::{CoreError, CoreResult};

use serde::{Serialize, Serializer};
use std::fmt;
use std::hash::{Hash, Hasher};

// ============================================================================
// COLLISION TYPE
// ============================================================================

/// Collision mesh generation requested for a converted model.
///
/// The decoder accepts any tag; values it does not recognise are kept in
/// `Other` and written back unchanged.
///
/// Two values are equal when they carry the same tag, so `Other("Convex")`
/// equals `Convex` and `Other("")` equals `Unset`, matching what a save and
/// reload produces.
#[derive(Debug, Clone, Default)]
pub enum CollisionType {
    None,
    Convex,
    Concave,
    /// No choice made yet (empty tag).
    #[default]
    Unset,
    Other(String),
}

impl CollisionType {
    /// Interprets the text of a `CollisionGeneration` element.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "None" => CollisionType::None,
            "Convex" => CollisionType::Convex,
            "Concave" => CollisionType::Concave,
            "" => CollisionType::Unset,
            other => CollisionType::Other(other.to_string()),
        }
    }

    /// Text written into the `CollisionGeneration` element.
    pub fn as_tag(&self) -> &str {
        match self {
            CollisionType::None => "None",
            CollisionType::Convex => "Convex",
            CollisionType::Concave => "Concave",
            CollisionType::Unset => "",
            CollisionType::Other(tag) => tag,
        }
    }

    pub fn is_set(&self) -> bool {
        !self.as_tag().is_empty()
    }
}

impl PartialEq for CollisionType {
    fn eq(&self, other: &Self) -> bool {
        self.as_tag() == other.as_tag()
    }
}

impl Eq for CollisionType {}

impl Hash for CollisionType {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.as_tag().hash(state);
    }
}

impl fmt::Display for CollisionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_set() {
            f.write_str(self.as_tag())
        } else {
            f.write_str("(unset)")
        }
    }
}

impl Serialize for CollisionType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_tag())
    }
}

// ============================================================================
// CLIP DESCRIPTOR
// ============================================================================

/// A named sub-range of an animation timeline. The name is the key it is
/// stored under in [`FileEntry::clips`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipDescriptor {
    pub begin_frame: f64,
    pub end_frame: f64,
    pub fps: f64,
}

impl ClipDescriptor {
    pub fn new(begin_frame: f64, end_frame: f64, fps: f64) -> Self {
        Self {
            begin_frame,
            end_frame,
            fps,
        }
    }

    /// Checks applied by hosts before accepting user input. The codec never
    /// calls this.
    pub fn check(&self) -> CoreResult<()> {
        if !(self.begin_frame.is_finite() && self.end_frame.is_finite() && self.fps.is_finite()) {
            return Err(CoreError::InvalidClip(
                "Begin, End and FPS must be valid numbers".to_string(),
            ));
        }
        if self.begin_frame > self.end_frame {
            return Err(CoreError::InvalidClip(format!(
                "Begin ({}) is after End ({})",
                self.begin_frame, self.end_frame
            )));
        }
        if self.fps < 0.0 {
            return Err(CoreError::InvalidClip(format!(
                "FPS ({}) must not be negative",
                self.fps
            )));
        }
        Ok(())
    }
}

// ============================================================================
// FILE ENTRY
// ============================================================================

/// One conversion job: an input file's collision setting and clips.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct FileEntry {
    pub collision_type: CollisionType,
    pub clips: OrderedMap<String, ClipDescriptor>,
}

impl FileEntry {
    pub fn new(collision_type: CollisionType) -> Self {
        Self {
            collision_type,
            clips: OrderedMap::new(),
        }
    }

    /// Adds a clip; `file` only names the entry in the error.
    pub fn add_clip(&mut self, file: &str, name: impl Into<String>, clip: ClipDescriptor) -> CoreResult<()> {
        self.clips
            .insert(name.into(), clip)
            .map_err(|dup| CoreError::DuplicateClip {
                file: file.to_string(),
                clip: dup.key,
            })
    }

    pub fn remove_clip(&mut self, name: &str) -> Option<ClipDescriptor> {
        self.clips.remove(name)
    }

    pub fn clip(&self, name: &str) -> Option<&ClipDescriptor> {
        self.clips.get(name)
    }

    /// Builder-style helper for constructing entries in one expression.
    ///
    /// A name that is already present keeps its first clip; the new one is
    /// dropped with a warning (and a panic in debug builds). Use
    /// [`FileEntry::add_clip`] where duplicates must be handled.
    pub fn with_clip(mut self, name: impl Into<String>, clip: ClipDescriptor) -> Self {
        if let Err(dup) = self.clips.insert(name.into(), clip) {
            log::warn!("Ignoring duplicate clip '{}'", dup.key);
            debug_assert!(false, "duplicate clip '{}' passed to FileEntry::with_clip", dup.key);
        }
        self
    }
}

// ============================================================================
// BATCH DESCRIPTOR
// ============================================================================

/// The full set of conversion jobs plus the shared output directory.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct BatchDescriptor {
    pub output_dir: String,
    pub files: OrderedMap<String, FileEntry>,
}

impl BatchDescriptor {
    pub fn new(output_dir: impl Into<String>) -> Self {
        Self {
            output_dir: output_dir.into(),
            files: OrderedMap::new(),
        }
    }

    /// True when there is neither an output directory nor any file.
    pub fn is_empty(&self) -> bool {
        self.output_dir.is_empty() && self.files.is_empty()
    }

    pub fn add_file(&mut self, path: impl Into<String>, entry: FileEntry) -> CoreResult<()> {
        self.files
            .insert(path.into(), entry)
            .map_err(|dup| CoreError::DuplicateFile(dup.key))
    }

    pub fn remove_file(&mut self, path: &str) -> Option<FileEntry> {
        self.files.remove(path)
    }

    pub fn file(&self, path: &str) -> Option<&FileEntry> {
        self.files.get(path)
    }

    pub fn file_mut(&mut self, path: &str) -> Option<&mut FileEntry> {
        self.files.get_mut(path)
    }

    /// Total number of clips across all files.
    pub fn clip_count(&self) -> usize {
        self.files.values().map(|entry| entry.clips.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collision_tags_round_trip() {
        for tag in ["None", "Convex", "Concave", "", "Triangle"] {
            assert_eq!(CollisionType::from_tag(tag).as_tag(), tag);
        }
        assert_eq!(CollisionType::from_tag("convex"), CollisionType::Other("convex".into()));
        assert_eq!(CollisionType::default(), CollisionType::Unset);
        assert!(!CollisionType::Unset.is_set());
    }

    #[test]
    fn test_collision_equality_follows_tag() {
        assert_eq!(CollisionType::Other("Convex".into()), CollisionType::Convex);
        assert_eq!(CollisionType::Other(String::new()), CollisionType::Unset);
        assert!(!CollisionType::Other(String::new()).is_set());
        assert_ne!(CollisionType::Other("convex".into()), CollisionType::Convex);
        assert_ne!(CollisionType::None, CollisionType::Unset);
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "duplicate clip 'Walk'")]
    fn test_with_clip_duplicate_panics_in_debug() {
        let _ = FileEntry::new(CollisionType::Convex)
            .with_clip("Walk", ClipDescriptor::new(0.0, 1.0, 24.0))
            .with_clip("Walk", ClipDescriptor::new(2.0, 3.0, 24.0));
    }

    #[test]
    fn test_clip_check() {
        assert!(ClipDescriptor::new(0.0, 30.0, 24.0).check().is_ok());
        assert!(ClipDescriptor::new(10.0, 10.0, 0.0).check().is_ok());
        assert!(matches!(
            ClipDescriptor::new(31.0, 30.0, 24.0).check(),
            Err(CoreError::InvalidClip(_))
        ));
        assert!(matches!(
            ClipDescriptor::new(0.0, 30.0, -1.0).check(),
            Err(CoreError::InvalidClip(_))
        ));
        assert!(matches!(
            ClipDescriptor::new(f64::NAN, 30.0, 24.0).check(),
            Err(CoreError::InvalidClip(_))
        ));
    }

    #[test]
    fn test_add_file_and_clip_reject_duplicates() {
        let mut batch = BatchDescriptor::new("C:/out/");
        batch.add_file("a.fbx", FileEntry::new(CollisionType::Convex)).unwrap();
        assert!(matches!(
            batch.add_file("a.fbx", FileEntry::default()),
            Err(CoreError::DuplicateFile(path)) if path == "a.fbx"
        ));
        assert_eq!(batch.file("a.fbx").unwrap().collision_type, CollisionType::Convex);

        let entry = batch.file_mut("a.fbx").unwrap();
        entry.add_clip("a.fbx", "Walk", ClipDescriptor::new(0.0, 30.0, 24.0)).unwrap();
        let err = entry
            .add_clip("a.fbx", "Walk", ClipDescriptor::new(1.0, 2.0, 3.0))
            .unwrap_err();
        assert!(matches!(err, CoreError::DuplicateClip { ref clip, .. } if clip == "Walk"));
        assert_eq!(batch.clip_count(), 1);

        assert!(batch.remove_file("a.fbx").is_some());
        assert!(batch.files.is_empty());
        assert!(!batch.is_empty());
    }
}
