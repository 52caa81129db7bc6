//! Conversion jobs as the converter backend will carry them out.
//!
//! The backend reads batch.xml on its own and is more forgiving than the
//! decoder: any collision tag other than `Convex` or `Concave` means no
//! collision mesh, and the output file is named after the input file's stem.
//! This module reproduces that interpretation so hosts can preview a batch.

use crate::config::OUTPUT_EXTENSION;
use crate::model::{BatchDescriptor, ClipDescriptor, CollisionType, FileEntry};

use serde::Serialize;

/// Collision mesh the backend will actually generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollisionStrategy {
    None,
    Convex,
    Concave,
}

impl From<&CollisionType> for CollisionStrategy {
    fn from(collision: &CollisionType) -> Self {
        // The backend only sees the tag.
        match collision.as_tag() {
            "Convex" => CollisionStrategy::Convex,
            "Concave" => CollisionStrategy::Concave,
            _ => CollisionStrategy::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClipJob {
    pub name: String,
    pub begin_frame: f64,
    pub end_frame: f64,
    pub fps: f64,
    /// Seconds between sampled bone transforms (two frames), if fps allows it.
    pub sample_interval: Option<f64>,
}

impl ClipJob {
    fn new(name: &str, clip: &ClipDescriptor) -> Self {
        let sample_interval = (clip.fps > 0.0).then(|| 2.0 / clip.fps);
        Self {
            name: name.to_string(),
            begin_frame: clip.begin_frame,
            end_frame: clip.end_frame,
            fps: clip.fps,
            sample_interval,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConversionJob {
    pub input: String,
    pub output_path: String,
    pub collision: CollisionStrategy,
    pub clips: Vec<ClipJob>,
}

impl ConversionJob {
    pub fn new(output_dir: &str, input: &str, entry: &FileEntry) -> Self {
        Self {
            input: input.to_string(),
            output_path: output_path(output_dir, input),
            collision: CollisionStrategy::from(&entry.collision_type),
            clips: entry
                .clips
                .iter()
                .map(|(name, clip)| ClipJob::new(name, clip))
                .collect(),
        }
    }
}

/// One job per file, in batch order.
pub fn plan(batch: &BatchDescriptor) -> Vec<ConversionJob> {
    batch
        .files
        .iter()
        .map(|(input, entry)| ConversionJob::new(&batch.output_dir, input, entry))
        .collect()
}

/// `output_dir` joined textually with the input's stem and the mesh extension.
///
/// The output directory is used verbatim (hosts store it with a trailing
/// separator), and both `/` and `\` separate directories in the input path.
pub fn output_path(output_dir: &str, input: &str) -> String {
    let file_name = input.rsplit(&['/', '\\'][..]).next().unwrap_or(input);
    let stem = match file_name.rfind('.') {
        Some(0) | None => file_name,
        Some(dot) => &file_name[..dot],
    };
    format!("{}{}.{}", output_dir, stem, OUTPUT_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path() {
        assert_eq!(output_path("C:/out/", "C:\\assets\\hero.fbx"), "C:/out/hero.ttmesh");
        assert_eq!(output_path("out/", "assets/props/crate.v2.fbx"), "out/crate.v2.ttmesh");
        assert_eq!(output_path("", "model"), "model.ttmesh");
        assert_eq!(output_path("o/", ".hidden"), "o/.hidden.ttmesh");
    }

    #[test]
    fn test_plan_interprets_batch() {
        let mut batch = BatchDescriptor::new("C:/out/");
        batch
            .add_file(
                "C:/in/hero.fbx",
                FileEntry::new(CollisionType::Concave)
                    .with_clip("Walk", ClipDescriptor::new(0.0, 30.0, 24.0))
                    .with_clip("Pose", ClipDescriptor::new(0.0, 0.0, 0.0)),
            )
            .unwrap();
        batch
            .add_file("C:/in/rock.fbx", FileEntry::new(CollisionType::Other("Box".into())))
            .unwrap();
        batch.add_file("C:/in/tree.fbx", FileEntry::default()).unwrap();

        let jobs = plan(&batch);
        assert_eq!(jobs.len(), 3);
        assert_eq!(jobs[0].output_path, "C:/out/hero.ttmesh");
        assert_eq!(jobs[0].collision, CollisionStrategy::Concave);
        assert_eq!(jobs[0].clips[0].sample_interval, Some(2.0 / 24.0));
        assert_eq!(jobs[0].clips[1].sample_interval, None);
        assert_eq!(jobs[1].collision, CollisionStrategy::None);
        assert_eq!(jobs[2].collision, CollisionStrategy::None);
        assert_eq!(jobs[2].input, "C:/in/tree.fbx");
    }

    #[test]
    fn test_collision_strategy_reads_the_tag() {
        let spelled_out = CollisionType::Other("Concave".into());
        assert_eq!(CollisionStrategy::from(&spelled_out), CollisionStrategy::Concave);
        assert_eq!(CollisionStrategy::from(&CollisionType::Unset), CollisionStrategy::None);
    }
}
