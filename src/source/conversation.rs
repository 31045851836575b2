//! In-memory conversation: the data source behind the viewer.

use super::{ItemSource, StackChange};
use crate::model::{ItemKey, Section, StackItem};

/// A chat message: a stack item plus its display text.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    pub item: StackItem,
    pub text: String,
}

impl ChatMessage {
    pub fn new(item: StackItem, text: impl Into<String>) -> Self {
        Self {
            item,
            text: text.into(),
        }
    }

    pub fn key(&self) -> ItemKey {
        self.item.key()
    }
}

/// Messages of both sections, each in insertion order.
///
/// Every mutation returns the [`StackChange`] notification the layout
/// consumer has to be told about.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    sections: [Vec<ChatMessage>; 2],
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a conversation from already-loaded messages.
    pub fn from_messages(messages: impl IntoIterator<Item = ChatMessage>) -> Self {
        let mut conversation = Self::default();
        for message in messages {
            conversation.push_or_replace(message);
        }
        conversation
    }

    /// Add a message.
    ///
    /// A message whose key already exists replaces the old one in place and
    /// reports [`StackChange::Reordered`], since only its sort value can
    /// have moved.
    pub fn insert(&mut self, message: ChatMessage) -> StackChange {
        let item = message.item.clone();
        if self.push_or_replace(message) {
            StackChange::Reordered
        } else {
            StackChange::Inserted(item)
        }
    }

    /// Remove a message. `None` when the key is unknown.
    pub fn remove(&mut self, key: &ItemKey) -> Option<StackChange> {
        let messages = &mut self.sections[key.section.index()];
        let position = messages.iter().position(|m| m.item.id() == &key.id)?;
        messages.remove(position);
        Some(StackChange::Removed(key.clone()))
    }

    /// Replace the whole conversation.
    pub fn reset(&mut self, messages: impl IntoIterator<Item = ChatMessage>) -> StackChange {
        *self = Self::from_messages(messages);
        StackChange::Reset
    }

    pub fn get(&self, key: &ItemKey) -> Option<&ChatMessage> {
        self.sections[key.section.index()]
            .iter()
            .find(|m| m.item.id() == &key.id)
    }

    pub fn text(&self, key: &ItemKey) -> Option<&str> {
        self.get(key).map(|m| m.text.as_str())
    }

    pub fn messages(&self, section: Section) -> &[ChatMessage] {
        &self.sections[section.index()]
    }

    pub fn len(&self) -> usize {
        self.sections.iter().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.iter().all(Vec::is_empty)
    }

    /// Largest finite sort value across both sections.
    pub fn latest_sort_value(&self) -> Option<f64> {
        self.sections
            .iter()
            .flatten()
            .map(|m| m.item.sort_value())
            .filter(|v| v.is_finite())
            .reduce(f64::max)
    }

    /// Sort value for a message appended after everything else.
    pub fn next_sort_value(&self) -> f64 {
        self.latest_sort_value().map_or(0.0, |latest| latest + 1.0)
    }

    /// Newest message of a section by sort value.
    pub fn newest(&self, section: Section) -> Option<&ChatMessage> {
        self.sections[section.index()]
            .iter()
            .max_by(|a, b| a.item.sort_value().total_cmp(&b.item.sort_value()))
    }

    /// Returns true when an existing message was replaced.
    fn push_or_replace(&mut self, message: ChatMessage) -> bool {
        let messages = &mut self.sections[message.item.section().index()];
        match messages.iter_mut().find(|m| m.item.id() == message.item.id()) {
            Some(existing) => {
                *existing = message;
                true
            }
            None => {
                messages.push(message);
                false
            }
        }
    }
}

impl ItemSource for Conversation {
    fn items(&self, section: Section) -> Vec<StackItem> {
        self.sections[section.index()]
            .iter()
            .map(|m| m.item.clone())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ItemId;

    fn message(id: &str, section: Section, sort_value: f64) -> ChatMessage {
        ChatMessage::new(
            StackItem::new(ItemId::new(id).unwrap(), section, sort_value),
            format!("text of {id}"),
        )
    }

    #[test]
    fn insert_reports_inserted_item() {
        let mut conversation = Conversation::new();
        let change = conversation.insert(message("a", Section::Outgoing, 1.0));
        assert!(matches!(change, StackChange::Inserted(ref item) if item.id().as_str() == "a"));
        assert_eq!(conversation.len(), 1);
    }

    #[test]
    fn insert_with_existing_key_replaces_and_reorders() {
        let mut conversation = Conversation::new();
        conversation.insert(message("a", Section::Outgoing, 1.0));
        let change = conversation.insert(message("a", Section::Outgoing, 5.0));
        assert_eq!(change, StackChange::Reordered);
        assert_eq!(conversation.len(), 1);
        assert_eq!(conversation.latest_sort_value(), Some(5.0));
    }

    #[test]
    fn same_id_in_other_section_is_a_distinct_message() {
        let mut conversation = Conversation::new();
        conversation.insert(message("a", Section::Outgoing, 1.0));
        let change = conversation.insert(message("a", Section::Incoming, 2.0));
        assert!(matches!(change, StackChange::Inserted(_)));
        assert_eq!(conversation.len(), 2);
    }

    #[test]
    fn remove_reports_key_once() {
        let mut conversation = Conversation::from_messages([message("a", Section::Incoming, 1.0)]);
        let key = ItemKey::new(Section::Incoming, ItemId::new("a").unwrap());
        assert_eq!(conversation.remove(&key), Some(StackChange::Removed(key.clone())));
        assert_eq!(conversation.remove(&key), None);
        assert!(conversation.is_empty());
    }

    #[test]
    fn reset_replaces_everything() {
        let mut conversation = Conversation::from_messages([message("a", Section::Outgoing, 1.0)]);
        let change = conversation.reset([
            message("x", Section::Incoming, 1.0),
            message("y", Section::Incoming, 2.0),
        ]);
        assert_eq!(change, StackChange::Reset);
        assert!(conversation.messages(Section::Outgoing).is_empty());
        assert_eq!(conversation.messages(Section::Incoming).len(), 2);
    }

    #[test]
    fn items_preserve_insertion_order_per_section() {
        let conversation = Conversation::from_messages([
            message("late", Section::Outgoing, 9.0),
            message("early", Section::Outgoing, 1.0),
            message("other", Section::Incoming, 5.0),
        ]);
        let ids: Vec<String> = conversation
            .items(Section::Outgoing)
            .iter()
            .map(|i| i.id().to_string())
            .collect();
        assert_eq!(ids, ["late", "early"]);
    }

    #[test]
    fn text_lookup_by_key() {
        let conversation = Conversation::from_messages([message("a", Section::Outgoing, 1.0)]);
        let key = ItemKey::new(Section::Outgoing, ItemId::new("a").unwrap());
        assert_eq!(conversation.text(&key), Some("text of a"));
    }

    #[test]
    fn next_sort_value_follows_latest() {
        let mut conversation = Conversation::new();
        assert_eq!(conversation.next_sort_value(), 0.0);
        conversation.insert(message("a", Section::Outgoing, 3.0));
        conversation.insert(message("b", Section::Incoming, 7.5));
        assert_eq!(conversation.next_sort_value(), 8.5);
    }

    #[test]
    fn newest_is_by_sort_value_not_insertion() {
        let conversation = Conversation::from_messages([
            message("late", Section::Outgoing, 9.0),
            message("early", Section::Outgoing, 1.0),
        ]);
        assert_eq!(
            conversation.newest(Section::Outgoing).map(|m| m.item.id().as_str()),
            Some("late")
        );
        assert!(conversation.newest(Section::Incoming).is_none());
    }
}
