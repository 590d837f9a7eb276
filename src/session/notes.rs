use chrono::Utc;
use serde::Serialize;

use crate::model::{ResourceType, ResourceTyped};
use crate::session::error::Precondition;

/// Creation timestamp in milliseconds.
pub type NoteId = i64;

#[derive(Debug, Clone, PartialEq, Serialize, utoipa::ToSchema)]
pub struct Note {
    id: NoteId,
    /// Seconds into the video.
    time: f64,
    content: String,
}

impl ResourceTyped for Note {
    fn get_resource_type() -> ResourceType {
        ResourceType::Note
    }
}

impl Note {
    pub fn id(&self) -> NoteId {
        self.id
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

#[derive(Debug, Clone, Default)]
pub struct Notes {
    items: Vec<Note>,
    last_id: NoteId,
}

impl Notes {
    pub fn as_slice(&self) -> &[Note] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn add(&mut self, time: f64, content: String) -> Result<&Note, Precondition> {
        if content.trim().is_empty() {
            return Err(Precondition::EmptyNote);
        }

        let id = self.next_id();
        self.items.push(Note { id, time, content });
        Ok(&self.items[self.items.len() - 1])
    }

    /// Replaces the content only, `time` is kept.
    pub fn edit(&mut self, id: NoteId, content: String) -> Option<&Note> {
        let note = self.items.iter_mut().find(|n| n.id == id)?;
        note.content = content;
        Some(&*note)
    }

    pub fn delete(&mut self, id: NoteId) -> Option<Note> {
        let pos = self.items.iter().position(|n| n.id == id)?;
        Some(self.items.remove(pos))
    }

    // strictly increasing even when two notes land on the same millisecond
    fn next_id(&mut self) -> NoteId {
        let id = Utc::now().timestamp_millis().max(self.last_id + 1);
        self.last_id = id;
        id
    }
}
