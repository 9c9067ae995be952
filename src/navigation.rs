//! Screen stack for interactive mode.

use eventcal_core::Event;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    /// Add a new event, or edit `event` when set
    EventAdd { event: Option<Event> },
    EventHistory,
}

impl Screen {
    pub fn title(&self) -> &'static str {
        match self {
            Screen::Home => "Events",
            Screen::EventAdd { event: Some(_) } => "Edit Event",
            Screen::EventAdd { event: None } => "Add Event",
            Screen::EventHistory => "Event History",
        }
    }
}

/// A stack of screens rooted at `Home`. The root is never popped.
#[derive(Debug)]
pub struct Navigator {
    stack: Vec<Screen>,
}

impl Navigator {
    pub fn new() -> Self {
        Navigator {
            stack: vec![Screen::Home],
        }
    }

    pub fn current(&self) -> &Screen {
        &self.stack[self.stack.len() - 1]
    }

    pub fn navigate(&mut self, screen: Screen) {
        self.stack.push(screen);
    }

    /// Return to the previous screen. Returns false when already at `Home`.
    pub fn go_back(&mut self) -> bool {
        if self.stack.len() > 1 {
            self.stack.pop();
            true
        } else {
            false
        }
    }
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}
