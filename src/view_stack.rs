use serde::{Deserialize, Serialize};

/// The kind of content a pushed panel shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Panel {
    /// Lessons of a course
    Catalogue { subject_id: String },
    /// Materials attached to a lesson
    Files { subject_id: String },
    /// The AI generation tool panel
    Tool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewKind {
    Files,
    Catalogue,
    Tool,
}

/// A panel descriptor; immutable once built
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    title: String,
    panel: Panel,
}

impl ViewState {
    pub fn new(title: impl Into<String>, panel: Panel) -> Self {
        Self {
            title: title.into(),
            panel,
        }
    }

    pub fn catalogue(title: impl Into<String>, course_id: impl Into<String>) -> Self {
        Self::new(
            title,
            Panel::Catalogue {
                subject_id: course_id.into(),
            },
        )
    }

    pub fn files(title: impl Into<String>, lesson_id: impl Into<String>) -> Self {
        Self::new(
            title,
            Panel::Files {
                subject_id: lesson_id.into(),
            },
        )
    }

    pub fn tool(title: impl Into<String>) -> Self {
        Self::new(title, Panel::Tool)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn panel(&self) -> &Panel {
        &self.panel
    }

    pub fn kind(&self) -> ViewKind {
        match self.panel {
            Panel::Catalogue { .. } => ViewKind::Catalogue,
            Panel::Files { .. } => ViewKind::Files,
            Panel::Tool => ViewKind::Tool,
        }
    }

    pub fn subject_id(&self) -> Option<&str> {
        match &self.panel {
            Panel::Catalogue { subject_id } | Panel::Files { subject_id } => {
                Some(subject_id.as_str())
            }
            Panel::Tool => None,
        }
    }
}

/// LIFO stack of panels layered over the root panel
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewStack {
    views: Vec<ViewState>,
}

impl ViewStack {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, view: ViewState) {
        log::debug!("view stack: push '{}' ({:?})", view.title(), view.kind());
        self.views.push(view);
    }

    /// Remove the top panel; popping an empty stack is a no-op
    pub fn pop(&mut self) -> Option<ViewState> {
        let popped = self.views.pop();
        if let Some(view) = &popped {
            log::debug!("view stack: pop '{}', depth now {}", view.title(), self.views.len());
        }
        popped
    }

    pub fn reset(&mut self) {
        if !self.views.is_empty() {
            log::debug!("view stack: reset from depth {}", self.views.len());
        }
        self.views.clear();
    }

    pub fn top(&self) -> Option<&ViewState> {
        self.views.last()
    }

    pub fn depth(&self) -> usize {
        self.views.len()
    }

    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    pub fn views(&self) -> &[ViewState] {
        &self.views
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_pop_lifo() {
        let mut stack = ViewStack::new();
        stack.push(ViewState::catalogue("奥数金牌辅导小班课", "c1"));
        stack.push(ViewState::files("第1课", "l1"));
        assert_eq!(stack.depth(), 2);
        assert_eq!(stack.top().unwrap().kind(), ViewKind::Files);

        let popped = stack.pop().unwrap();
        assert_eq!(popped.subject_id(), Some("l1"));
        assert_eq!(stack.top().unwrap().title(), "奥数金牌辅导小班课");
    }

    #[test]
    fn test_pop_empty_is_noop() {
        let mut stack = ViewStack::new();
        assert!(stack.pop().is_none());
        assert!(stack.is_empty());
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut stack = ViewStack::new();
        stack.push(ViewState::tool("AI 辅助生成"));
        stack.push(ViewState::catalogue("x", "c1"));
        stack.reset();
        assert!(stack.is_empty());
        assert!(stack.top().is_none());
    }

    #[test]
    fn test_tool_has_no_subject() {
        let view = ViewState::tool("AI 辅助生成");
        assert_eq!(view.kind(), ViewKind::Tool);
        assert_eq!(view.subject_id(), None);
    }
}
