// ============================================================================
// fbxbatch-core/src/codec/encoder.rs
// ============================================================================
//
// BATCH ENCODER: BatchDescriptor -> batch.xml
//
// Files are written in insertion order. An entry whose input file does not
// exist is skipped with one MissingInput notification; that never aborts the
// encode. Only a failing sink is an error.

use super::number::format_decimal;
use super::{
    ANIM_CLIP, BEGIN, CLIP_NAME, COLLISION, END, FBX_FILE, FILENAME, FPS, KEYFRAMES, OUTPUT, ROOT,
};
use crate::error::{CoreError, CoreResult};
use crate::model::{BatchDescriptor, FileEntry};
use crate::notifications::{Notification, Notifier};
use crate::oracle::ExistenceOracle;

use log::{debug, info};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{self, Write};

/// Which files made it into the document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EncodeSummary {
    /// Paths written, in document order
    pub written: Vec<String>,
    /// Paths skipped because the existence oracle did not find them
    pub skipped: Vec<String>,
}

/// Writes `batch` as a batch document to `sink`.
///
/// # Errors
///
/// * `CoreError::Sink` - if writing to or flushing `sink` fails
pub fn encode<W: Write>(
    batch: &BatchDescriptor,
    sink: &mut W,
    oracle: &dyn ExistenceOracle,
    notifier: &dyn Notifier,
) -> CoreResult<EncodeSummary> {
    let mut summary = EncodeSummary::default();
    let mut writer = Writer::new_with_indent(&mut *sink, b' ', 2);

    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(sink_error)?;
    writer
        .write_event(Event::Start(BytesStart::new(ROOT)))
        .map_err(sink_error)?;
    write_text_element(&mut writer, OUTPUT, &batch.output_dir)?;

    for (path, entry) in batch.files.iter() {
        if !oracle.exists(path) {
            info!("Skipping '{}': input file not found", path);
            notifier.notify(&Notification::MissingInput { path: path.clone() });
            summary.skipped.push(path.clone());
            continue;
        }

        write_file(&mut writer, path, entry)?;
        summary.written.push(path.clone());
    }

    writer
        .write_event(Event::End(BytesEnd::new(ROOT)))
        .map_err(sink_error)?;

    sink.write_all(b"\n").map_err(CoreError::Sink)?;
    sink.flush().map_err(CoreError::Sink)?;

    debug!(
        "Encoded batch: {} file(s) written, {} skipped",
        summary.written.len(),
        summary.skipped.len()
    );
    Ok(summary)
}

fn write_file<W: Write>(writer: &mut Writer<W>, path: &str, entry: &FileEntry) -> CoreResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new(FBX_FILE)))
        .map_err(sink_error)?;
    write_text_element(writer, FILENAME, path)?;
    write_text_element(writer, COLLISION, entry.collision_type.as_tag())?;

    for (name, clip) in entry.clips.iter() {
        writer
            .write_event(Event::Start(BytesStart::new(ANIM_CLIP)))
            .map_err(sink_error)?;
        write_text_element(writer, CLIP_NAME, name)?;

        let begin = format_decimal(clip.begin_frame);
        let end = format_decimal(clip.end_frame);
        let fps = format_decimal(clip.fps);
        let keyframes = BytesStart::new(KEYFRAMES).with_attributes([
            (BEGIN, begin.as_str()),
            (END, end.as_str()),
            (FPS, fps.as_str()),
        ]);
        writer
            .write_event(Event::Empty(keyframes))
            .map_err(sink_error)?;

        writer
            .write_event(Event::End(BytesEnd::new(ANIM_CLIP)))
            .map_err(sink_error)?;
    }

    writer
        .write_event(Event::End(BytesEnd::new(FBX_FILE)))
        .map_err(sink_error)?;
    Ok(())
}

fn write_text_element<W: Write>(writer: &mut Writer<W>, name: &str, text: &str) -> CoreResult<()> {
    writer
        .write_event(Event::Start(BytesStart::new(name)))
        .map_err(sink_error)?;
    writer
        .write_event(Event::Text(BytesText::new(text)))
        .map_err(sink_error)?;
    writer
        .write_event(Event::End(BytesEnd::new(name)))
        .map_err(sink_error)?;
    Ok(())
}

fn sink_error(err: quick_xml::Error) -> CoreError {
    let io_err = match err {
        quick_xml::Error::Io(e) => io::Error::new(e.kind(), e.to_string()),
        other => io::Error::other(other.to_string()),
    };
    CoreError::Sink(io_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ClipDescriptor, CollisionType};
    use crate::notifications::NullNotifier;

    #[test]
    fn test_encode_layout() {
        let mut batch = BatchDescriptor::new("C:/out/");
        batch
            .add_file(
                "model.fbx",
                FileEntry::new(CollisionType::Convex)
                    .with_clip("Walk", ClipDescriptor::new(0.0, 30.0, 24.0)),
            )
            .unwrap();

        let mut out = Vec::new();
        encode(&batch, &mut out, &|_: &str| true, &NullNotifier).unwrap();

        let expected = "<?xml version=\"1.0\" encoding=\"utf-8\"?>
<BatchConversion>
  <Output>C:/out/</Output>
  <FbxFile>
    <Filename>model.fbx</Filename>
    <CollisionGeneration>Convex</CollisionGeneration>
    <AnimClip>
      <Name>Walk</Name>
      <Keyframes Begin=\"0\" End=\"30\" FPS=\"24\"/>
    </AnimClip>
  </FbxFile>
</BatchConversion>
";
        assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn test_encode_escapes_text_and_attributes() {
        let mut batch = BatchDescriptor::new("out & <more>");
        batch
            .add_file("a&b.fbx", FileEntry::new(CollisionType::Unset))
            .unwrap();

        let mut out = Vec::new();
        encode(&batch, &mut out, &|_: &str| true, &NullNotifier).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("<Output>out &amp; &lt;more&gt;</Output>"));
        assert!(text.contains("<Filename>a&amp;b.fbx</Filename>"));
        assert!(text.contains("<CollisionGeneration></CollisionGeneration>"));
    }

    struct BrokenSink;

    impl Write for BrokenSink {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "read-only"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_sink_failure_is_fatal() {
        let batch = BatchDescriptor::new("out/");
        let err = encode(&batch, &mut BrokenSink, &|_: &str| true, &NullNotifier).unwrap_err();
        assert!(matches!(err, CoreError::Sink(ref e) if e.kind() == io::ErrorKind::PermissionDenied));
    }
}
