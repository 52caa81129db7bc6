// ============================================================================
// fbxbatch-core/src/codec/decoder.rs
// ============================================================================
//
// BATCH DECODER: batch.xml -> BatchDescriptor
//
// A recursive-descent walk over the element event stream with one event of
// lookahead. The only forward search is "skip sibling subtrees until the
// expected child shows up"; everything else must appear in grammar order.
// Whitespace-only text is indentation where elements are expected and content
// inside leaf elements.
//
// `decode` is the host-facing entry point and never fails: any structural
// problem discards what was parsed so far, sends one UnreadableBatch
// notification and returns an empty batch. `try_decode` exposes the error.

use super::events::{EventSource, XmlEvent, XmlEventReader};
use super::number::parse_decimal;
use super::{
    ANIM_CLIP, BEGIN, CLIP_NAME, COLLISION, END, FBX_FILE, FILENAME, FPS, KEYFRAMES, OUTPUT, ROOT,
};
use crate::error::DecodeError;
use crate::model::{BatchDescriptor, ClipDescriptor, CollisionType, FileEntry};
use crate::notifications::{Notification, Notifier};

use log::{debug, warn};
use std::io::{BufReader, Read};

/// Reads a batch document, falling back to an empty batch if it is unusable.
///
/// The notifier receives exactly one [`Notification::UnreadableBatch`] when the
/// fallback is taken and nothing otherwise.
pub fn decode<R: Read>(source: R, notifier: &dyn Notifier) -> BatchDescriptor {
    match try_decode(source) {
        Ok(batch) => batch,
        Err(err) => {
            warn!("Discarding unreadable batch document: {}", err);
            notifier.notify(&Notification::UnreadableBatch {
                reason: err.to_string(),
            });
            BatchDescriptor::default()
        }
    }
}

/// Reads a batch document, reporting the first structural problem.
pub fn try_decode<R: Read>(source: R) -> Result<BatchDescriptor, DecodeError> {
    decode_events(XmlEventReader::new(BufReader::new(source)))
}

/// Runs the batch grammar over any element event source.
pub fn decode_events<S: EventSource>(source: S) -> Result<BatchDescriptor, DecodeError> {
    let batch = Grammar::new(source).batch()?;
    debug!(
        "Decoded batch with {} file(s) and {} clip(s)",
        batch.files.len(),
        batch.clip_count()
    );
    Ok(batch)
}

struct Grammar<S> {
    source: S,
    peeked: Option<XmlEvent>,
}

impl<S: EventSource> Grammar<S> {
    fn new(source: S) -> Self {
        Self { source, peeked: None }
    }

    // ---- Productions ----

    fn batch(&mut self) -> Result<BatchDescriptor, DecodeError> {
        self.seek_root()?;

        let mut batch = BatchDescriptor::default();
        self.child(OUTPUT, ROOT)?;
        batch.output_dir = self.text(OUTPUT)?;

        while self.next_is_open(FBX_FILE)? {
            self.next()?;
            let (path, entry) = self.file()?;
            batch
                .files
                .insert(path, entry)
                .map_err(|dup| DecodeError::DuplicateFile(dup.key))?;
        }

        // Anything after the file list is ignored, but the root must close.
        self.skip_rest(ROOT)?;
        Ok(batch)
    }

    fn file(&mut self) -> Result<(String, FileEntry), DecodeError> {
        self.child(FILENAME, FBX_FILE)?;
        let path = self.text(FILENAME)?;

        self.child(COLLISION, FBX_FILE)?;
        let mut entry = FileEntry::new(CollisionType::from_tag(&self.text(COLLISION)?));

        while self.next_is_open(ANIM_CLIP)? {
            self.next()?;
            let (name, clip) = self.clip()?;
            entry
                .clips
                .insert(name, clip)
                .map_err(|dup| DecodeError::DuplicateClip {
                    file: path.clone(),
                    clip: dup.key,
                })?;
        }

        self.expect_close(FBX_FILE)?;
        Ok((path, entry))
    }

    fn clip(&mut self) -> Result<(String, ClipDescriptor), DecodeError> {
        self.child(CLIP_NAME, ANIM_CLIP)?;
        let name = self.text(CLIP_NAME)?;

        let attributes = self.child(KEYFRAMES, ANIM_CLIP)?;
        let clip = ClipDescriptor {
            begin_frame: keyframe(&attributes, BEGIN)?,
            end_frame: keyframe(&attributes, END)?,
            fps: keyframe(&attributes, FPS)?,
        };
        self.skip_element()?;

        self.expect_close(ANIM_CLIP)?;
        Ok((name, clip))
    }

    // ---- Traversal primitives ----

    fn peek(&mut self) -> Result<Option<&XmlEvent>, DecodeError> {
        if self.peeked.is_none() {
            self.peeked = self.source.next_event()?;
        }
        Ok(self.peeked.as_ref())
    }

    fn next(&mut self) -> Result<XmlEvent, DecodeError> {
        match self.peeked.take() {
            Some(event) => Ok(event),
            None => self.source.next_event()?.ok_or(DecodeError::UnexpectedEof),
        }
    }

    /// Peeks past indentation between elements.
    fn peek_structural(&mut self) -> Result<Option<&XmlEvent>, DecodeError> {
        while self.peek()?.is_some_and(XmlEvent::is_blank_text) {
            self.peeked = None;
        }
        Ok(self.peeked.as_ref())
    }

    fn next_structural(&mut self) -> Result<XmlEvent, DecodeError> {
        self.peek_structural()?;
        self.next()
    }

    fn next_is_open(&mut self, expected: &str) -> Result<bool, DecodeError> {
        Ok(matches!(self.peek_structural()?, Some(XmlEvent::Open { name, .. }) if name == expected))
    }

    /// Skips everything up to the root element, wherever it is.
    fn seek_root(&mut self) -> Result<(), DecodeError> {
        loop {
            match self.next() {
                Ok(XmlEvent::Open { name, .. }) if name == ROOT => return Ok(()),
                Ok(_) => continue,
                Err(DecodeError::UnexpectedEof) => {
                    return Err(DecodeError::MissingElement {
                        name: ROOT.to_string(),
                        parent: "document".to_string(),
                    });
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// Consumes sibling subtrees until the `expected` child opens and returns
    /// its attributes. Fails if `parent` closes first.
    fn child(&mut self, expected: &str, parent: &str) -> Result<Vec<(String, String)>, DecodeError> {
        loop {
            match self.next()? {
                XmlEvent::Open { name, attributes } if name == expected => return Ok(attributes),
                XmlEvent::Open { .. } => self.skip_element()?,
                XmlEvent::Text(_) => continue,
                XmlEvent::Close { .. } => {
                    return Err(DecodeError::MissingElement {
                        name: expected.to_string(),
                        parent: parent.to_string(),
                    });
                }
            }
        }
    }

    /// Collects the text of an element whose open tag was just consumed.
    fn text(&mut self, element: &str) -> Result<String, DecodeError> {
        let mut text = String::new();
        loop {
            match self.next()? {
                XmlEvent::Text(chunk) => text.push_str(&chunk),
                XmlEvent::Close { .. } => return Ok(text),
                XmlEvent::Open { name, .. } => {
                    return Err(DecodeError::UnexpectedElement {
                        expected: format!("text or </{}>", element),
                        found: format!("<{}>", name),
                    });
                }
            }
        }
    }

    /// Skips the content of an element whose open tag was just consumed.
    fn skip_element(&mut self) -> Result<(), DecodeError> {
        let mut depth = 0usize;
        loop {
            match self.next()? {
                XmlEvent::Open { .. } => depth += 1,
                XmlEvent::Close { .. } if depth == 0 => return Ok(()),
                XmlEvent::Close { .. } => depth -= 1,
                XmlEvent::Text(_) => {}
            }
        }
    }

    /// Skips the remaining children of `element` including its close tag.
    fn skip_rest(&mut self, element: &str) -> Result<(), DecodeError> {
        loop {
            match self.next()? {
                XmlEvent::Open { .. } => self.skip_element()?,
                XmlEvent::Text(_) => {}
                XmlEvent::Close { name } if name == element => return Ok(()),
                XmlEvent::Close { name } => {
                    return Err(DecodeError::UnexpectedElement {
                        expected: format!("</{}>", element),
                        found: format!("</{}>", name),
                    });
                }
            }
        }
    }

    fn expect_close(&mut self, element: &str) -> Result<(), DecodeError> {
        match self.next_structural()? {
            XmlEvent::Close { name } if name == element => Ok(()),
            XmlEvent::Close { name } => Err(DecodeError::UnexpectedElement {
                expected: format!("</{}>", element),
                found: format!("</{}>", name),
            }),
            XmlEvent::Open { name, .. } => Err(DecodeError::UnexpectedElement {
                expected: format!("</{}>", element),
                found: format!("<{}>", name),
            }),
            XmlEvent::Text(_) => Err(DecodeError::UnexpectedText {
                element: element.to_string(),
            }),
        }
    }
}

fn keyframe(attributes: &[(String, String)], attribute: &str) -> Result<f64, DecodeError> {
    let value = attributes
        .iter()
        .find(|(key, _)| key == attribute)
        .map(|(_, value)| value)
        .ok_or_else(|| DecodeError::MissingAttribute {
            element: KEYFRAMES.to_string(),
            attribute: attribute.to_string(),
        })?;

    parse_decimal(value).ok_or_else(|| DecodeError::InvalidNumber {
        attribute: attribute.to_string(),
        value: value.clone(),
    })
}
