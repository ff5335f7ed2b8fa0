//! Core component trait

/// Identifier for a focusable component
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ComponentId {
    /// The scrollable portfolio page (default focus)
    #[default]
    Page,
    /// System log panel, focused while it is open
    Logs,
}

impl ComponentId {
    pub fn label(&self) -> &'static str {
        match self {
            ComponentId::Page => "page",
            ComponentId::Logs => "logs",
        }
    }
}

/// Base trait for UI components
pub trait Component {
    fn id(&self) -> ComponentId;
}
