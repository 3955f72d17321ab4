//! Depth-limited frame traversal.
//!
//! The root frame is fetched and rendered first, then every frame item found
//! in it is fetched and rendered as a nested section, level by level, until
//! the depth budget is spent. Frames found on the last level are rendered like
//! any other item and never fetched.

use std::io::{self, Write};

use miroframe_api::{FetchError, Item, ItemKind, ItemsClient, Transport};
use tracing::info;

use crate::text::{to_plain_text, truncate_chars};

/// Root frame plus its direct child frames.
pub const DEFAULT_DEPTH: usize = 2;
/// Content longer than this many characters is cut off.
pub const CONTENT_PREVIEW_CHARS: usize = 2000;

const RULE_WIDTH: usize = 80;
const NESTED_LABEL: &str = "[Nested] ";

/// A frame discovered inside another frame, queued for its own fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildFrame {
    pub id: String,
    /// Plain-text title, empty when the frame has none.
    pub title: String,
}

/// What a walk touched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Items rendered across all levels.
    pub items: usize,
    /// Container fetches issued, root included.
    pub fetches: usize,
    /// Frames found directly under the root.
    pub child_frames: Vec<ChildFrame>,
}

/// Errors that abort a walk.
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// A container fetch failed.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The output sink rejected a write.
    #[error("failed writing output: {0}")]
    Output(#[from] io::Error),
}

/// Renders a frame and its nested frames to a writer.
pub struct FrameWalker<'a, T> {
    client: &'a ItemsClient<T>,
    board_id: &'a str,
    content_limit: usize,
}

impl<'a, T: Transport> FrameWalker<'a, T> {
    pub fn new(client: &'a ItemsClient<T>, board_id: &'a str) -> Self {
        Self {
            client,
            board_id,
            content_limit: CONTENT_PREVIEW_CHARS,
        }
    }

    pub fn with_content_limit(mut self, content_limit: usize) -> Self {
        self.content_limit = content_limit;
        self
    }

    /// Walk `frame_id` rendering at most `depth` levels (values below 1 act as 1).
    ///
    /// The first error aborts the walk; whatever was already written stays.
    pub fn walk<W: Write>(
        &self,
        frame_id: &str,
        depth: usize,
        out: &mut W,
    ) -> Result<WalkSummary, WalkError> {
        let depth = depth.max(1);
        let items = self.client.fetch_items(frame_id)?;
        let mut summary = WalkSummary {
            fetches: 1,
            ..WalkSummary::default()
        };

        writeln!(out, "Board {}", self.board_id)?;
        writeln!(out, "Found {} items in frame {}\n", items.len(), frame_id)?;

        let children = self.render_level(&items, "", depth > 1, out, &mut summary)?;
        summary.child_frames = children.clone();
        self.walk_children(children, depth - 1, out, &mut summary)?;

        out.flush()?;
        Ok(summary)
    }

    fn walk_children<W: Write>(
        &self,
        children: Vec<ChildFrame>,
        remaining: usize,
        out: &mut W,
        summary: &mut WalkSummary,
    ) -> Result<(), WalkError> {
        for child in children {
            let title = if child.title.is_empty() {
                "(no title)"
            } else {
                child.title.as_str()
            };
            writeln!(out, "{}", "#".repeat(RULE_WIDTH))?;
            writeln!(out, "Nested frame {} – {}", child.id, title)?;

            info!(frame = %child.id, "fetching nested frame");
            let items = self.client.fetch_items(&child.id)?;
            summary.fetches += 1;
            writeln!(
                out,
                "Found {} items inside nested frame {}\n",
                items.len(),
                child.id
            )?;

            let grandchildren =
                self.render_level(&items, NESTED_LABEL, remaining > 1, out, summary)?;
            self.walk_children(grandchildren, remaining.saturating_sub(1), out, summary)?;
        }
        Ok(())
    }

    /// Render one level; returns its frame items when `collect` is set.
    fn render_level<W: Write>(
        &self,
        items: &[Item],
        label: &str,
        collect: bool,
        out: &mut W,
        summary: &mut WalkSummary,
    ) -> io::Result<Vec<ChildFrame>> {
        let mut children = Vec::new();
        for item in items {
            self.render_item(item, label, out)?;
            summary.items += 1;
            if collect && item.kind.is_frame() {
                children.push(ChildFrame {
                    id: item.id.clone(),
                    title: to_plain_text(item.title()),
                });
            }
        }
        Ok(children)
    }

    fn render_item<W: Write>(&self, item: &Item, label: &str, out: &mut W) -> io::Result<()> {
        writeln!(out, "{}", "=".repeat(RULE_WIDTH))?;
        writeln!(out, "{label}ID:    {}", item.id)?;
        writeln!(out, "{label}Type:  {}", item.kind)?;

        if let Some(title) = item.title() {
            writeln!(out, "Title:")?;
            writeln!(out, "{}", to_plain_text(Some(title)))?;
        }
        if let Some(content) = item.content() {
            let content = to_plain_text(Some(content));
            writeln!(out, "Content:")?;
            writeln!(out, "{}", truncate_chars(&content, self.content_limit))?;
        }

        match &item.kind {
            ItemKind::Image => {
                writeln!(out, "Image URL: {}", item.image_url().unwrap_or("(none)"))?
            }
            ItemKind::Stamp => writeln!(out, "(stamp – no textual content)")?,
            ItemKind::Frame | ItemKind::Other(_) => {}
        }

        writeln!(out)
    }
}
