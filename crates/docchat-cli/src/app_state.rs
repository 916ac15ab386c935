use docchat_sdk::DragPayload;

/// What keystrokes currently edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    /// The chat input line.
    Chat,
    /// The `Ctrl+O` path prompt.
    PathPrompt,
    /// Files were dropped; waiting for Enter (drop) or Esc (leave).
    DropConfirm(DragPayload),
}

pub trait AppController {
    fn update(&mut self, action: super::tui::Action);
    fn render(&mut self, f: &mut ratatui::Frame);
    fn should_quit(&self) -> bool;
}
